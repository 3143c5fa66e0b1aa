//! # Outbound Ports (Driven Ports / SPI)

use shared_crypto::Certificate;

/// Source of trusted authority certificates.
pub trait TrustStore: Send + Sync {
    /// Authority that should have issued `certificate`, if one is trusted.
    fn authority_for(&self, certificate: &Certificate) -> Option<Certificate>;
}

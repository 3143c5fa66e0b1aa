//! In-memory trust store over a fixed list of authority certificates.

use crate::ports::outbound::TrustStore;
use shared_crypto::Certificate;

/// Trust store that never changes after construction.
#[derive(Debug, Clone, Default)]
pub struct StaticTrustStore {
    authorities: Vec<Certificate>,
}

impl StaticTrustStore {
    /// Trust exactly `authorities`.
    pub fn new(authorities: Vec<Certificate>) -> Self {
        Self { authorities }
    }

    /// Add one more authority.
    pub fn with_authority(mut self, authority: Certificate) -> Self {
        self.authorities.push(authority);
        self
    }

    /// Number of trusted authorities.
    pub fn len(&self) -> usize {
        self.authorities.len()
    }

    /// Whether nothing is trusted.
    pub fn is_empty(&self) -> bool {
        self.authorities.is_empty()
    }
}

impl TrustStore for StaticTrustStore {
    fn authority_for(&self, certificate: &Certificate) -> Option<Certificate> {
        self.authorities
            .iter()
            .find(|authority| authority.subject_name() == certificate.issuer_name())
            .cloned()
    }
}

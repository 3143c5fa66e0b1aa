//! # X.509 Certificates
//!
//! Parsing and authority checks for DER-encoded X.509 v3 certificates
//! carrying RSA subject keys.
//!
//! ## Verification
//!
//! A certificate is accepted against an authority when:
//!
//! 1. its issuer name equals the authority's subject name
//! 2. it is signed with `sha256WithRSAEncryption`
//! 3. the signature over the TBS bytes verifies under the authority key
//! 4. the current time lies inside its validity window

use crate::keys::RsaPublicKey;
use crate::signatures::RsaSignature;
use crate::CryptoError;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use x509_cert::der::asn1::ObjectIdentifier;
use x509_cert::der::{Decode, DecodePem, Encode, Tag, Tagged};
use x509_cert::name::Name;

/// `sha256WithRSAEncryption`
pub const SHA256_WITH_RSA_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");

/// `rsaEncryption`
pub const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// `id-at-commonName`
pub const COMMON_NAME_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Parsed certificate together with its exact DER encoding.
#[derive(Clone)]
pub struct Certificate {
    der: Vec<u8>,
    inner: x509_cert::Certificate,
}

impl Certificate {
    /// Parse a DER certificate. Trailing bytes are rejected.
    pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
        let inner = x509_cert::Certificate::from_der(der)
            .map_err(|e| CryptoError::MalformedCertificate(e.to_string()))?;
        Ok(Self {
            der: der.to_vec(),
            inner,
        })
    }

    /// Parse a PEM certificate (`-----BEGIN CERTIFICATE-----`).
    pub fn from_pem(pem: &str) -> Result<Self, CryptoError> {
        let inner = x509_cert::Certificate::from_pem(pem)
            .map_err(|e| CryptoError::MalformedCertificate(e.to_string()))?;
        Self::from_inner(inner)
    }

    pub(crate) fn from_inner(inner: x509_cert::Certificate) -> Result<Self, CryptoError> {
        let der = inner
            .to_der()
            .map_err(|e| CryptoError::MalformedCertificate(e.to_string()))?;
        Ok(Self { der, inner })
    }

    /// DER encoding, as carried on the wire.
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Distinguished name of the signer.
    pub fn issuer_name(&self) -> &Name {
        &self.inner.tbs_certificate.issuer
    }

    /// Distinguished name of the key holder.
    pub fn subject_name(&self) -> &Name {
        &self.inner.tbs_certificate.subject
    }

    /// First common name in the subject, if any.
    pub fn subject_common_name(&self) -> Option<String> {
        common_name(self.subject_name())
    }

    /// Subject public key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::UnsupportedAlgorithm` for non-RSA keys.
    pub fn public_key(&self) -> Result<RsaPublicKey, CryptoError> {
        let spki = &self.inner.tbs_certificate.subject_public_key_info;
        if spki.algorithm.oid != RSA_ENCRYPTION_OID {
            return Err(CryptoError::UnsupportedAlgorithm(spki.algorithm.oid.to_string()));
        }
        let spki_der = spki
            .to_der()
            .map_err(|e| CryptoError::MalformedCertificate(e.to_string()))?;
        RsaPublicKey::from_public_key_der(&spki_der)
    }

    /// Check that `authority` issued this certificate and that it is
    /// currently valid.
    pub fn verify_issued_by(&self, authority: &Certificate) -> Result<(), CryptoError> {
        self.verify_signature_by(authority)?;
        self.check_validity()
    }

    /// Check the issuer binding and signature only.
    pub fn verify_signature_by(&self, authority: &Certificate) -> Result<(), CryptoError> {
        if self.issuer_name() != authority.subject_name() {
            return Err(CryptoError::UntrustedCertificate(format!(
                "issuer '{}' does not match authority '{}'",
                self.issuer_name(),
                authority.subject_name()
            )));
        }

        let algorithm = &self.inner.signature_algorithm.oid;
        if *algorithm != SHA256_WITH_RSA_OID {
            return Err(CryptoError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        let tbs = self
            .inner
            .tbs_certificate
            .to_der()
            .map_err(|e| CryptoError::MalformedCertificate(e.to_string()))?;
        let signature = self
            .inner
            .signature
            .as_bytes()
            .ok_or_else(|| CryptoError::MalformedCertificate("unaligned signature".into()))?;

        authority
            .public_key()?
            .verify(&tbs, &RsaSignature::from_bytes(signature))
            .map_err(|_| {
                CryptoError::UntrustedCertificate("signature does not verify".to_string())
            })
    }

    /// Check the validity window against the system clock.
    pub fn check_validity(&self) -> Result<(), CryptoError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
        self.check_validity_at(now.as_secs())
    }

    /// Check the validity window against `unix_secs`.
    pub fn check_validity_at(&self, unix_secs: u64) -> Result<(), CryptoError> {
        let validity = &self.inner.tbs_certificate.validity;
        let not_before = validity.not_before.to_unix_duration().as_secs();
        let not_after = validity.not_after.to_unix_duration().as_secs();

        if unix_secs < not_before {
            return Err(CryptoError::UntrustedCertificate(format!(
                "not valid before {:?}",
                validity.not_before
            )));
        }
        if unix_secs > not_after {
            return Err(CryptoError::UntrustedCertificate(format!(
                "expired at {:?}",
                validity.not_after
            )));
        }
        Ok(())
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("subject", &self.subject_name().to_string())
            .field("issuer", &self.issuer_name().to_string())
            .finish_non_exhaustive()
    }
}

fn common_name(name: &Name) -> Option<String> {
    name.0
        .iter()
        .flat_map(|rdn| rdn.0.iter())
        .filter(|atv| atv.oid == COMMON_NAME_OID)
        .find_map(|atv| match atv.value.tag() {
            Tag::Utf8String | Tag::PrintableString | Tag::Ia5String => {
                std::str::from_utf8(atv.value.value()).ok().map(str::to_owned)
            }
            _ => None,
        })
}

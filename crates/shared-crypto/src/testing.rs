//! Throw-away certificate issuance for tests.
//!
//! Production deployments receive certificates from an external authority;
//! this module only mints enough of a hierarchy to exercise verification.

use crate::certificate::Certificate;
use crate::keys::{RsaKeyPair, RsaPublicKey};
use crate::random::fill_random;
use crate::CryptoError;
use rsa::pkcs1v15::{Signature, SigningKey};
use sha2::Sha256;
use std::str::FromStr;
use std::time::Duration;
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::der::asn1::UtcTime;
use x509_cert::der::Decode;
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::{Time, Validity};

/// Lifetime of certificates minted without an explicit window.
pub const TEST_CERT_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

const TEST_ORGANIZATION: &str = "SecureLink Test";

/// Self-signed authority certificate for `common_name`.
pub fn issue_self_signed(common_name: &str, key: &RsaKeyPair) -> Result<Certificate, CryptoError> {
    let validity = Validity::from_now(TEST_CERT_LIFETIME).map_err(malformed)?;
    issue(Profile::Root, validity, common_name, &key.public_key(), key)
}

/// Leaf certificate for `subject_key`, signed by `issuer_key`.
pub fn issue_leaf(
    common_name: &str,
    subject_key: &RsaPublicKey,
    issuer_cert: &Certificate,
    issuer_key: &RsaKeyPair,
) -> Result<Certificate, CryptoError> {
    let validity = Validity::from_now(TEST_CERT_LIFETIME).map_err(malformed)?;
    issue(
        leaf_profile(issuer_cert),
        validity,
        common_name,
        subject_key,
        issuer_key,
    )
}

/// Leaf certificate with an explicit window, given as offsets from the
/// Unix epoch.
pub fn issue_leaf_with_validity(
    common_name: &str,
    subject_key: &RsaPublicKey,
    issuer_cert: &Certificate,
    issuer_key: &RsaKeyPair,
    not_before: Duration,
    not_after: Duration,
) -> Result<Certificate, CryptoError> {
    let validity = Validity {
        not_before: Time::UtcTime(UtcTime::from_unix_duration(not_before).map_err(malformed)?),
        not_after: Time::UtcTime(UtcTime::from_unix_duration(not_after).map_err(malformed)?),
    };
    issue(
        leaf_profile(issuer_cert),
        validity,
        common_name,
        subject_key,
        issuer_key,
    )
}

fn leaf_profile(issuer_cert: &Certificate) -> Profile {
    Profile::Leaf {
        issuer: issuer_cert.subject_name().clone(),
        enable_key_agreement: false,
        enable_key_encipherment: true,
    }
}

fn issue(
    profile: Profile,
    validity: Validity,
    common_name: &str,
    subject_key: &RsaPublicKey,
    signer: &RsaKeyPair,
) -> Result<Certificate, CryptoError> {
    let subject = Name::from_str(&format!("CN={common_name},O={TEST_ORGANIZATION}"))
        .map_err(malformed)?;

    // Leading 0x01 keeps the serial positive.
    let mut serial = [0u8; 9];
    fill_random(&mut serial[1..]);
    serial[0] = 0x01;
    let serial_number = SerialNumber::new(&serial).map_err(malformed)?;

    let spki = SubjectPublicKeyInfoOwned::from_der(&subject_key.to_public_key_der()?)
        .map_err(malformed)?;
    let signing_key = SigningKey::<Sha256>::new(signer.inner().clone());

    let builder = CertificateBuilder::new(profile, serial_number, validity, subject, spki, &signing_key)
        .map_err(malformed)?;
    let cert = builder.build::<Signature>().map_err(malformed)?;
    Certificate::from_inner(cert)
}

fn malformed(e: impl std::fmt::Display) -> CryptoError {
    CryptoError::MalformedCertificate(e.to_string())
}

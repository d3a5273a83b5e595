use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::did::DocumentProperty;
use crate::error::Error;

// RFC 7517 - JSON Web Key (JWK)
// RFC 8037 - CFRG Elliptic Curve Diffie-Hellman (ECDH) and Signatures in JOSE
//
// Keys in this module are passive containers for public key material that
// was computed elsewhere. Nothing here signs, verifies or generates keys.

/// Security levels accepted for Dilithium keys, with their algorithm tag.
pub const DILITHIUM_SECURITY_LEVELS: [(u8, DilithiumAlgorithm); 3] = [
    (2, DilithiumAlgorithm::CRYD2),
    (3, DilithiumAlgorithm::CRYD3),
    (5, DilithiumAlgorithm::CRYD5),
];

/// Lattice parameter sets accepted for Kyber keys.
pub const KYBER_PARAMETER_SETS: [KyberParameterSet; 3] = [
    KyberParameterSet::Kyber1024,
    KyberParameterSet::Kyber768,
    KyberParameterSet::Kyber512,
];

/// Raw public value held by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey<'a> {
    /// Single encoded value (`x`).
    Octets(&'a str),
    /// RSA modulus and exponent.
    Rsa { modulus: &'a str, exponent: &'a str },
}

/// Public key material usable as the `publicKeyJwk` of a verification method.
///
/// A new key type implements this trait and is added as a variant of [`JWK`],
/// the type a [`VerificationMethod`](crate::did::VerificationMethod) holds.
pub trait PublicJwk: DocumentProperty {
    /// The `kty` parameter of the key.
    fn key_type(&self) -> &'static str;

    /// The stored public value, as given at construction.
    fn public_key(&self) -> PublicKey<'_>;
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
enum OctetKeyPair {
    OKP,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
enum Rsa {
    RSA,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
enum ModuleLattice {
    MLWE,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
enum Curve {
    Ed25519,
}

/// Ed25519 public key (`kty` `OKP`, `crv` `Ed25519`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ed25519Jwk {
    kty: OctetKeyPair,
    crv: Curve,
    x: String,
    #[serde(rename = "alg")]
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm: Option<String>,
    #[serde(rename = "use")]
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_use: Option<String>,
    #[serde(rename = "kid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    key_id: Option<String>,
}

impl Ed25519Jwk {
    pub fn new(x: impl Into<String>) -> Self {
        Self {
            kty: OctetKeyPair::OKP,
            crv: Curve::Ed25519,
            x: x.into(),
            algorithm: None,
            public_key_use: None,
            key_id: None,
        }
    }

    pub fn with_alg(mut self, alg: impl Into<String>) -> Self {
        self.algorithm = Some(alg.into());
        self
    }

    pub fn with_use(mut self, public_key_use: impl Into<String>) -> Self {
        self.public_key_use = Some(public_key_use.into());
        self
    }

    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    pub fn x(&self) -> &str {
        &self.x
    }

    pub fn alg(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    pub fn public_key_use(&self) -> Option<&str> {
        self.public_key_use.as_deref()
    }

    pub fn kid(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}

impl DocumentProperty for Ed25519Jwk {}

impl PublicJwk for Ed25519Jwk {
    fn key_type(&self) -> &'static str {
        "OKP"
    }

    fn public_key(&self) -> PublicKey<'_> {
        PublicKey::Octets(&self.x)
    }
}

/// RSA public key (`kty` `RSA`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RsaJwk {
    kty: Rsa,
    #[serde(rename = "n")]
    modulus: String,
    #[serde(rename = "e")]
    exponent: String,
    #[serde(rename = "alg")]
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm: Option<String>,
    #[serde(rename = "use")]
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_use: Option<String>,
    #[serde(rename = "kid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    key_id: Option<String>,
}

impl RsaJwk {
    pub fn new(n: impl Into<String>, e: impl Into<String>) -> Self {
        Self {
            kty: Rsa::RSA,
            modulus: n.into(),
            exponent: e.into(),
            algorithm: None,
            public_key_use: None,
            key_id: None,
        }
    }

    pub fn with_alg(mut self, alg: impl Into<String>) -> Self {
        self.algorithm = Some(alg.into());
        self
    }

    pub fn with_use(mut self, public_key_use: impl Into<String>) -> Self {
        self.public_key_use = Some(public_key_use.into());
        self
    }

    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    pub fn modulus(&self) -> &str {
        &self.modulus
    }

    pub fn exponent(&self) -> &str {
        &self.exponent
    }

    pub fn alg(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    pub fn public_key_use(&self) -> Option<&str> {
        self.public_key_use.as_deref()
    }

    pub fn kid(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}

impl DocumentProperty for RsaJwk {}

impl PublicJwk for RsaJwk {
    fn key_type(&self) -> &'static str {
        "RSA"
    }

    fn public_key(&self) -> PublicKey<'_> {
        PublicKey::Rsa {
            modulus: &self.modulus,
            exponent: &self.exponent,
        }
    }
}

/// Algorithm tag of a Dilithium key, one per security level.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DilithiumAlgorithm {
    CRYD2,
    CRYD3,
    CRYD5,
}

impl DilithiumAlgorithm {
    pub fn security_level(self) -> u8 {
        match self {
            Self::CRYD2 => 2,
            Self::CRYD3 => 3,
            Self::CRYD5 => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CRYD2 => "CRYD2",
            Self::CRYD3 => "CRYD3",
            Self::CRYD5 => "CRYD5",
        }
    }
}

impl TryFrom<u8> for DilithiumAlgorithm {
    type Error = Error;

    fn try_from(security_level: u8) -> Result<Self, Self::Error> {
        DILITHIUM_SECURITY_LEVELS
            .iter()
            .find(|(level, _)| *level == security_level)
            .map(|(_, alg)| *alg)
            .ok_or_else(|| Error::InvalidParameter {
                name: "security level",
                value: security_level.to_string(),
            })
    }
}

impl fmt::Display for DilithiumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dilithium (module-lattice signature) public key (`kty` `MLWE`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DilithiumJwk {
    #[serde(rename = "kid")]
    key_id: String,
    #[serde(rename = "alg")]
    algorithm: DilithiumAlgorithm,
    kty: ModuleLattice,
    x: String,
}

impl DilithiumJwk {
    /// Fails with [`Error::InvalidParameter`] unless `security_level` is 2, 3 or 5.
    pub fn new(
        kid: impl Into<String>,
        security_level: u8,
        x: impl Into<String>,
    ) -> Result<Self, Error> {
        let algorithm = DilithiumAlgorithm::try_from(security_level)?;
        Ok(Self {
            key_id: kid.into(),
            algorithm,
            kty: ModuleLattice::MLWE,
            x: x.into(),
        })
    }

    pub fn kid(&self) -> &str {
        &self.key_id
    }

    pub fn alg(&self) -> DilithiumAlgorithm {
        self.algorithm
    }

    pub fn security_level(&self) -> u8 {
        self.algorithm.security_level()
    }

    pub fn x(&self) -> &str {
        &self.x
    }
}

impl DocumentProperty for DilithiumJwk {}

impl PublicJwk for DilithiumJwk {
    fn key_type(&self) -> &'static str {
        "MLWE"
    }

    fn public_key(&self) -> PublicKey<'_> {
        PublicKey::Octets(&self.x)
    }
}

/// Lattice parameter set of a Kyber key.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KyberParameterSet {
    #[serde(rename = "Kyber-1024")]
    Kyber1024,
    #[serde(rename = "Kyber-768")]
    Kyber768,
    #[serde(rename = "Kyber-512")]
    Kyber512,
}

impl KyberParameterSet {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kyber1024 => "Kyber-1024",
            Self::Kyber768 => "Kyber-768",
            Self::Kyber512 => "Kyber-512",
        }
    }
}

impl FromStr for KyberParameterSet {
    type Err = Error;

    fn from_str(lat: &str) -> Result<Self, Self::Err> {
        KYBER_PARAMETER_SETS
            .iter()
            .copied()
            .find(|set| set.as_str() == lat)
            .ok_or_else(|| Error::InvalidParameter {
                name: "lat",
                value: lat.to_string(),
            })
    }
}

impl fmt::Display for KyberParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kyber (lattice KEM) public key (`kty` `OKP`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KyberJwk {
    kty: OctetKeyPair,
    lat: KyberParameterSet,
    x: String,
}

impl KyberJwk {
    /// Fails with [`Error::InvalidParameter`] unless `lat` names one of
    /// [`KYBER_PARAMETER_SETS`].
    pub fn new(lat: &str, x: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            kty: OctetKeyPair::OKP,
            lat: lat.parse()?,
            x: x.into(),
        })
    }

    pub fn lat(&self) -> KyberParameterSet {
        self.lat
    }

    pub fn x(&self) -> &str {
        &self.x
    }
}

impl DocumentProperty for KyberJwk {}

impl PublicJwk for KyberJwk {
    fn key_type(&self) -> &'static str {
        "OKP"
    }

    fn public_key(&self) -> PublicKey<'_> {
        PublicKey::Octets(&self.x)
    }
}

/// Any of the supported public keys.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum JWK {
    Ed25519(Ed25519Jwk),
    RSA(RsaJwk),
    Dilithium(DilithiumJwk),
    Kyber(KyberJwk),
}

impl DocumentProperty for JWK {}

impl PublicJwk for JWK {
    fn key_type(&self) -> &'static str {
        match self {
            Self::Ed25519(key) => key.key_type(),
            Self::RSA(key) => key.key_type(),
            Self::Dilithium(key) => key.key_type(),
            Self::Kyber(key) => key.key_type(),
        }
    }

    fn public_key(&self) -> PublicKey<'_> {
        match self {
            Self::Ed25519(key) => key.public_key(),
            Self::RSA(key) => key.public_key(),
            Self::Dilithium(key) => key.public_key(),
            Self::Kyber(key) => key.public_key(),
        }
    }
}

impl From<Ed25519Jwk> for JWK {
    fn from(key: Ed25519Jwk) -> Self {
        Self::Ed25519(key)
    }
}

impl From<RsaJwk> for JWK {
    fn from(key: RsaJwk) -> Self {
        Self::RSA(key)
    }
}

impl From<DilithiumJwk> for JWK {
    fn from(key: DilithiumJwk) -> Self {
        Self::Dilithium(key)
    }
}

impl From<KyberJwk> for JWK {
    fn from(key: KyberJwk) -> Self {
        Self::Kyber(key)
    }
}

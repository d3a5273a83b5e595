//! `did:iiot` identifiers.
//!
//! Identifiers are built around a random (version 4) UUID:
//!
//! - `did:iiot:<uuid>`
//! - `did:net:<environment>:<uuid>` when scoped to an environment
//! - `did:iiot:<sha256-hex>` for the hashed form, where the UUID is replaced
//!   by the hex SHA-256 digest of its hyphenated text
//!
//! Nothing is resolved or registered; the generated strings are opaque to
//! this crate.

use rand::RngCore;
use uuid::Uuid;

use crate::hash::sha256_hex;

/// Method name of environment-less identifiers.
pub const METHOD: &str = "iiot";

/// Method name of identifiers scoped to an environment.
pub const NETWORK_METHOD: &str = "net";

/// `did:iiot` URI generator.
pub struct DIDIndustrialIoT;

fn random_uuid<R: RngCore + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

impl DIDIndustrialIoT {
    /// Generate a DID URI using the thread-local RNG.
    pub fn generate_did_uri(environment: Option<&str>) -> String {
        Self::generate_did_uri_with_rng(&mut rand::thread_rng(), environment)
    }

    /// Generate a DID URI from the given randomness source.
    ///
    /// An empty `environment` is treated as no environment.
    pub fn generate_did_uri_with_rng<R: RngCore + ?Sized>(
        rng: &mut R,
        environment: Option<&str>,
    ) -> String {
        let uuid = random_uuid(rng);
        let did = match environment.filter(|env| !env.is_empty()) {
            Some(env) => format!("did:{}:{}:{}", NETWORK_METHOD, env, uuid),
            None => format!("did:{}:{}", METHOD, uuid),
        };
        log::debug!("generated {}", did);
        did
    }

    /// Generate a `did:iiot` URI whose method-specific id is a SHA-256 hex digest.
    pub fn generate_did_uri_hashed() -> String {
        Self::generate_did_uri_hashed_with_rng(&mut rand::thread_rng())
    }

    pub fn generate_did_uri_hashed_with_rng<R: RngCore + ?Sized>(rng: &mut R) -> String {
        let uuid = random_uuid(rng);
        let did = format!("did:{}:{}", METHOD, sha256_hex(uuid.to_string().as_bytes()));
        log::debug!("generated {}", did);
        did
    }
}

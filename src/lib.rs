//! DID documents for Industrial IoT devices.
//!
//! The crate models [DID documents][did-core] as used by the `did:iiot`
//! method: verification methods carrying public key material as JWKs,
//! services, and the `authentication` and `assertionMethod` verification
//! relationships. It also generates `did:iiot` URIs.
//!
//! Key types are value holders for public key material computed elsewhere
//! (Ed25519, RSA, Dilithium and Kyber). No signing, verification, key
//! generation or DID resolution happens here.
//!
//! [did-core]: <https://www.w3.org/TR/did-core/>
//!
//! # Basic Usage
//!
//! ```
//! use did_iiot::did::{Document, DocumentProperty, Service, ServiceType, VerificationMethod};
//! use did_iiot::did_iiot::DIDIndustrialIoT;
//! use did_iiot::jwk::{DilithiumJwk, Ed25519Jwk};
//!
//! let did = DIDIndustrialIoT::generate_did_uri(None);
//!
//! let key_1 = VerificationMethod::new(
//!     format!("{}#key-1", did),
//!     "JsonWebKey2020",
//!     Ed25519Jwk::new("11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"),
//! );
//! let key_2 = VerificationMethod::new(
//!     format!("{}#key-2", did),
//!     "JsonWebKey2020",
//!     DilithiumJwk::new("key-2", 3, "cHVibGljLWtleQ")?,
//! );
//!
//! // Both verification relationships default to `#key-1`.
//! let mut doc = Document::new(did.clone(), vec![key_1, key_2])?;
//! doc.add_service(Service::new(
//!     format!("{}#dwn", did),
//!     ServiceType::DecentralizedWebNode,
//!     "https://dwn.example.com",
//! ));
//!
//! assert_eq!(doc.to_map()?["authentication"][0], format!("{}#key-1", did));
//! println!("{}", doc.to_json()?);
//! # Ok::<(), did_iiot::error::Error>(())
//! ```

#[macro_use]
extern crate derive_builder;

pub mod did;
pub mod did_iiot;
pub mod error;
pub mod hash;
pub mod jwk;

pub use did::{Document, DocumentBuilder, DocumentProperty};
pub use did_iiot::DIDIndustrialIoT;
pub use error::Error;
pub use jwk::{PublicJwk, JWK};

use did_iiot::did::{
    Document, DocumentBuilder, DocumentProperty, Service, ServiceType, ValueOrReference,
    VerificationMethod,
};
use did_iiot::jwk::{DilithiumJwk, Ed25519Jwk, KyberJwk, RsaJwk};
use did_iiot::{DIDIndustrialIoT, Error};
use serde_json::{json, Value};

const DID: &str = "did:iiot:abc";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ed25519_method(fragment: &str) -> VerificationMethod {
    VerificationMethod::new(
        format!("{}#{}", DID, fragment),
        "JsonWebKey2020",
        Ed25519Jwk::new("base64url..."),
    )
}

fn device_document() -> Document {
    let mut doc = Document::new(
        DID,
        vec![
            ed25519_method("key-1"),
            VerificationMethod::new(
                "did:iiot:abc#key-2",
                "JsonWebKey2020",
                RsaJwk::new("0vx7agoebGcQSuu", "AQAB").with_kid("rsa-1"),
            )
            .with_controller(DID),
        ],
    )
    .unwrap();
    doc.add_verification_method(VerificationMethod::new(
        "did:iiot:abc#key-3",
        "JsonWebKey2020",
        DilithiumJwk::new("key-3", 5, "ZGlsaXRoaXVt").unwrap(),
    ));
    doc.add_verification_method(VerificationMethod::new(
        "did:iiot:abc#key-4",
        "JsonWebKey2020",
        KyberJwk::new("Kyber-1024", "a3liZXI").unwrap(),
    ));
    doc.add_service(Service::new(
        "did:iiot:abc#domain",
        ServiceType::LinkedDomains,
        "https://plant.example.com",
    ));
    doc
}

#[test]
fn single_key_document() {
    let doc = Document::new(DID, vec![ed25519_method("key-1")]).unwrap();
    assert_eq!(
        Value::Object(doc.to_map().unwrap()),
        json!({
            "id": "did:iiot:abc",
            "verificationMethod": [{
                "id": "did:iiot:abc#key-1",
                "type": "JsonWebKey2020",
                "publicKeyJwk": {"kty": "OKP", "crv": "Ed25519", "x": "base64url..."}
            }],
            "service": [],
            "authentication": ["did:iiot:abc#key-1"],
            "assertionMethod": ["did:iiot:abc#key-1"]
        })
    );
}

#[test]
fn document_key_order() {
    let map = device_document().to_map().unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "id",
            "verificationMethod",
            "service",
            "authentication",
            "assertionMethod"
        ]
    );
}

#[test]
fn remove_verification_method() {
    init_logger();
    let mut doc = device_document();
    assert_eq!(doc.verification_methods().len(), 4);

    assert!(doc.remove_verification_method("did:iiot:abc#key-2"));
    assert_eq!(doc.verification_methods().len(), 3);
    assert!(doc.get_verification_method("did:iiot:abc#key-2").is_none());

    assert!(!doc.remove_verification_method("did:iiot:abc#key-2"));
    assert_eq!(doc.verification_methods().len(), 3);

    // References are not cascaded.
    assert_eq!(doc.authentication()[0].id(), "did:iiot:abc#key-1");
}

#[test]
fn duplicate_verification_method_ids() {
    let mut doc = Document::new(DID, vec![ed25519_method("key-1")]).unwrap();
    doc.add_verification_method(ed25519_method("key-1"));
    assert_eq!(doc.verification_methods().len(), 2);
    assert!(doc.remove_verification_method("did:iiot:abc#key-1"));
    assert_eq!(doc.verification_methods().len(), 1);
}

#[test]
fn get_verification_method() {
    let doc = device_document();
    let vm = doc.get_verification_method("did:iiot:abc#key-2").unwrap();
    assert_eq!(vm.controller.as_deref(), Some(DID));
    assert!(doc.get_verification_method("did:iiot:abc#key-9").is_none());
}

#[test]
fn remove_service_removes_all_matches() {
    init_logger();
    let mut doc = device_document();
    doc.add_service(Service::new(
        "svc1",
        ServiceType::DecentralizedWebNode,
        "https://a.example.com",
    ));
    doc.add_service(Service::new(
        "svc1",
        ServiceType::LinkedDomains,
        "https://b.example.com",
    ));
    assert_eq!(
        doc.get_service("svc1").unwrap().service_endpoint,
        "https://a.example.com"
    );

    doc.remove_service("svc1");
    assert!(doc.get_service("svc1").is_none());
    assert_eq!(doc.services().len(), 1);

    doc.remove_service("svc1");
    assert_eq!(doc.services().len(), 1);
}

#[test]
fn authentication_round_trip() {
    let mut doc = device_document();
    let before = doc.authentication().len();
    doc.add_authentication("did:example:123");
    assert_eq!(doc.authentication().len(), before + 1);
    assert!(doc.remove_authentication("did:example:123"));
    assert_eq!(doc.authentication().len(), before);
    assert!(!doc.remove_authentication("did:example:123"));
}

#[test]
fn embedded_relationship_entries() {
    let mut doc = device_document();
    doc.add_assertion_method(ed25519_method("key-5"));
    doc.add_assertion_method(String::from("did:iiot:abc#key-3"));

    let map = doc.to_map().unwrap();
    assert_eq!(
        map["assertionMethod"],
        json!([
            "did:iiot:abc#key-1",
            {
                "id": "did:iiot:abc#key-5",
                "type": "JsonWebKey2020",
                "publicKeyJwk": {"kty": "OKP", "crv": "Ed25519", "x": "base64url..."}
            },
            "did:iiot:abc#key-3"
        ])
    );

    assert!(doc.remove_assertion_method("did:iiot:abc#key-5"));
    assert_eq!(
        doc.assertion_method(),
        [
            ValueOrReference::from("did:iiot:abc#key-1"),
            ValueOrReference::from("did:iiot:abc#key-3")
        ]
    );
    // Independent of authentication.
    assert!(!doc.remove_authentication("did:iiot:abc#key-3"));
}

#[test]
fn relationship_from_json_values() {
    let mut doc = device_document();
    doc.try_add_authentication(json!("did:iiot:abc#key-4")).unwrap();
    doc.try_add_assertion_method(serde_json::to_value(ed25519_method("key-6")).unwrap())
        .unwrap();

    for value in [json!(1), json!(null), json!(true), json!(["did:iiot:abc#key-1"])] {
        let before = doc.authentication().len();
        let err = doc.try_add_authentication(value).unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentType(_)), "{}", err);
        assert_eq!(doc.authentication().len(), before);
    }
    assert!(matches!(
        doc.try_add_assertion_method(json!(3.5)),
        Err(Error::InvalidArgumentType("number"))
    ));

    assert_eq!(doc.authentication().last().unwrap().id(), "did:iiot:abc#key-4");
    assert!(doc.assertion_method().last().unwrap().as_value().is_some());
}

#[test]
fn explicit_relationships_are_kept() {
    let doc = DocumentBuilder::default()
        .id(DID)
        .verification_method(vec![ed25519_method("key-1"), ed25519_method("key-2")])
        .authentication(vec![ValueOrReference::from("did:iiot:abc#key-2")])
        .assertion_method(vec![ValueOrReference::from(ed25519_method("key-2"))])
        .service(vec![Service::new(
            "did:iiot:abc#dwn",
            ServiceType::DecentralizedWebNode,
            "https://dwn.example.com",
        )])
        .build()
        .unwrap();
    assert_eq!(doc.authentication()[0].id(), "did:iiot:abc#key-2");
    assert_eq!(
        doc.assertion_method()[0].as_value(),
        Some(&ed25519_method("key-2"))
    );
    assert_eq!(doc.services().len(), 1);
}

#[test]
fn to_json_matches_to_map() {
    let doc = device_document();
    let json = doc.to_json().unwrap();
    assert!(json.contains("\n    \"id\": \"did:iiot:abc\""));
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, Value::Object(doc.to_map().unwrap()));
}

#[test]
fn document_from_json() {
    let doc = device_document();
    let parsed = Document::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(parsed, doc);
    let parsed = Document::from_json_bytes(doc.to_json().unwrap().as_bytes()).unwrap();
    assert_eq!(parsed.id(), DID);
}

#[test]
fn document_for_generated_did() {
    init_logger();
    let did = DIDIndustrialIoT::generate_did_uri_hashed();
    let key_id = format!("{}#key-1", did);
    let doc = Document::new(
        did.clone(),
        vec![VerificationMethod::new(
            key_id.clone(),
            "JsonWebKey2020",
            KyberJwk::new("Kyber-512", "a3liZXI").unwrap(),
        )],
    )
    .unwrap();
    let map = doc.to_map().unwrap();
    assert_eq!(map["id"], did);
    assert_eq!(map["authentication"], json!([key_id]));
    assert_eq!(map["verificationMethod"][0]["publicKeyJwk"]["lat"], "Kyber-512");
}

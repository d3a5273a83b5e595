use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::jwk::JWK;

// ***********************************************
// * Data Structures for Decentralized Identifiers
// * W3C Recommendation 19 July 2022
// * https://www.w3.org/TR/did-core/
// ***********************************************
// Documents are plain owned values. Mutation goes through `&mut Document`;
// sharing one across threads needs the caller's own synchronization.

type DID = String;
type DIDURL = String;

/// Element of a DID document with a canonical JSON object form.
pub trait DocumentProperty: Serialize {
    /// Canonical map representation of this property.
    fn to_map(&self) -> Result<Map<String, Value>, Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::ExpectedObject),
        }
    }
}

/// A [verification method](https://www.w3.org/TR/did-core/#verification-methods)
/// carrying its public key as a JWK.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: DIDURL,
    #[serde(rename = "type")]
    pub type_: String,
    pub public_key_jwk: JWK,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<DID>,
}

impl VerificationMethod {
    pub fn new(id: impl Into<DIDURL>, type_: impl Into<String>, key: impl Into<JWK>) -> Self {
        Self {
            id: id.into(),
            type_: type_.into(),
            public_key_jwk: key.into(),
            controller: None,
        }
    }

    pub fn with_controller(mut self, controller: impl Into<DID>) -> Self {
        self.controller = Some(controller.into());
        self
    }
}

impl DocumentProperty for VerificationMethod {}

/// Service types understood by `did:iiot` documents.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    LinkedDomains,
    DecentralizedWebNode,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: ServiceType,
    pub service_endpoint: String,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        type_: ServiceType,
        service_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            type_,
            service_endpoint: service_endpoint.into(),
        }
    }
}

impl DocumentProperty for Service {}

/// Entry of a verification relationship: a DID URL pointing at a
/// verification method, or an embedded verification method.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum ValueOrReference {
    Reference(DIDURL),
    /// Embedded verification method.
    Value(VerificationMethod),
}

impl ValueOrReference {
    /// The referenced id, or the embedded method's id.
    pub fn id(&self) -> &str {
        match self {
            Self::Reference(r) => r,
            Self::Value(v) => &v.id,
        }
    }

    pub fn as_value(&self) -> Option<&VerificationMethod> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for ValueOrReference {
    fn from(value: &str) -> Self {
        Self::Reference(value.to_string())
    }
}

impl From<String> for ValueOrReference {
    fn from(value: String) -> Self {
        Self::Reference(value)
    }
}

impl From<VerificationMethod> for ValueOrReference {
    fn from(value: VerificationMethod) -> Self {
        Self::Value(value)
    }
}

impl TryFrom<Value> for ValueOrReference {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(r) => Ok(Self::Reference(r)),
            Value::Object(map) => Ok(Self::Value(serde_json::from_value(Value::Object(map))?)),
            Value::Null => Err(Error::InvalidArgumentType("null")),
            Value::Bool(_) => Err(Error::InvalidArgumentType("boolean")),
            Value::Number(_) => Err(Error::InvalidArgumentType("number")),
            Value::Array(_) => Err(Error::InvalidArgumentType("array")),
        }
    }
}

/// A [DID document](https://www.w3.org/TR/did-core/#dfn-did-documents).
///
/// When `authentication` or `assertionMethod` is not given to the builder, or
/// is given empty, it defaults to a single reference to the first
/// verification method. Parsing goes through the same builder.
#[derive(Debug, Serialize, Deserialize, Builder, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "DocumentData")]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Document {
    id: DID,
    verification_method: Vec<VerificationMethod>,
    #[serde(default)]
    #[builder(default)]
    service: Vec<Service>,
    #[builder(setter(custom), default = "self.default_relationship()?")]
    authentication: Vec<ValueOrReference>,
    #[builder(setter(custom), default = "self.default_relationship()?")]
    assertion_method: Vec<ValueOrReference>,
}

/// Unvalidated shape of a serialized DID document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentData {
    id: DID,
    #[serde(default)]
    verification_method: Vec<VerificationMethod>,
    #[serde(default)]
    service: Vec<Service>,
    #[serde(default)]
    authentication: Option<Vec<ValueOrReference>>,
    #[serde(default)]
    assertion_method: Option<Vec<ValueOrReference>>,
}

impl TryFrom<DocumentData> for Document {
    type Error = Error;

    fn try_from(data: DocumentData) -> Result<Self, Self::Error> {
        let mut builder = DocumentBuilder::default();
        builder
            .id(data.id)
            .verification_method(data.verification_method)
            .service(data.service);
        if let Some(authentication) = data.authentication {
            builder.authentication(authentication);
        }
        if let Some(assertion_method) = data.assertion_method {
            builder.assertion_method(assertion_method);
        }
        builder.build().map_err(Error::InvalidDocument)
    }
}

fn non_empty(relationship: Vec<ValueOrReference>) -> Option<Vec<ValueOrReference>> {
    if relationship.is_empty() {
        None
    } else {
        Some(relationship)
    }
}

impl DocumentBuilder {
    /// An empty list falls back to the first verification method.
    pub fn authentication<VALUE: Into<Vec<ValueOrReference>>>(
        &mut self,
        value: VALUE,
    ) -> &mut Self {
        self.authentication = non_empty(value.into());
        self
    }

    /// An empty list falls back to the first verification method.
    pub fn assertion_method<VALUE: Into<Vec<ValueOrReference>>>(
        &mut self,
        value: VALUE,
    ) -> &mut Self {
        self.assertion_method = non_empty(value.into());
        self
    }

    fn validate(&self) -> Result<(), Error> {
        // validate is called before defaults are assigned.
        if self.id.is_none() {
            return Err(Error::MissingDocumentId);
        }
        match &self.verification_method {
            Some(methods) if !methods.is_empty() => Ok(()),
            _ => Err(Error::MissingVerificationMethod),
        }
    }

    fn default_relationship(&self) -> Result<Vec<ValueOrReference>, String> {
        match self.verification_method.as_ref().and_then(|vms| vms.first()) {
            Some(vm) => Ok(vec![ValueOrReference::Reference(vm.id.clone())]),
            None => Err(Error::MissingVerificationMethod.into()),
        }
    }
}

fn remove_relationship(relationship: &mut Vec<ValueOrReference>, id: &str) -> bool {
    match relationship.iter().position(|entry| entry.id() == id) {
        Some(index) => {
            relationship.remove(index);
            true
        }
        None => false,
    }
}

impl Document {
    /// Construct a DID document with default verification relationships.
    pub fn new(
        id: impl Into<DID>,
        verification_methods: Vec<VerificationMethod>,
    ) -> Result<Document, Error> {
        DocumentBuilder::default()
            .id(id)
            .verification_method(verification_methods)
            .build()
            .map_err(Error::InvalidDocument)
    }

    pub fn from_json(json: &str) -> Result<Document, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_bytes(json: &[u8]) -> Result<Document, Error> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn verification_methods(&self) -> &[VerificationMethod] {
        &self.verification_method
    }

    pub fn services(&self) -> &[Service] {
        &self.service
    }

    pub fn authentication(&self) -> &[ValueOrReference] {
        &self.authentication
    }

    pub fn assertion_method(&self) -> &[ValueOrReference] {
        &self.assertion_method
    }

    /// Append a verification method. Ids are not checked for uniqueness.
    pub fn add_verification_method(&mut self, method: VerificationMethod) {
        log::trace!("adding verification method {}", method.id);
        self.verification_method.push(method);
    }

    /// Returns the first verification method with the given `id`, if any.
    pub fn get_verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// Remove the first verification method with the given `id`.
    ///
    /// Verification relationships referencing it are left untouched.
    pub fn remove_verification_method(&mut self, id: &str) -> bool {
        match self.verification_method.iter().position(|vm| vm.id == id) {
            Some(index) => {
                self.verification_method.remove(index);
                log::debug!("removed verification method {}", id);
                true
            }
            None => {
                log::debug!("verification method {} not found", id);
                false
            }
        }
    }

    pub fn add_service(&mut self, service: Service) {
        log::trace!("adding service {}", service.id);
        self.service.push(service);
    }

    /// Returns the first service with the given `id`, if any.
    pub fn get_service(&self, id: &str) -> Option<&Service> {
        self.service.iter().find(|s| s.id == id)
    }

    /// Remove every service with the given `id`.
    pub fn remove_service(&mut self, id: &str) {
        let before = self.service.len();
        self.service.retain(|s| s.id != id);
        log::debug!("removed {} service(s) {}", before - self.service.len(), id);
    }

    pub fn add_authentication(&mut self, method: impl Into<ValueOrReference>) {
        self.authentication.push(method.into());
    }

    /// Append a JSON value to `authentication`.
    ///
    /// Strings become references and objects embedded verification methods.
    /// Any other value fails with [`Error::InvalidArgumentType`].
    pub fn try_add_authentication(&mut self, method: Value) -> Result<(), Error> {
        self.authentication.push(ValueOrReference::try_from(method)?);
        Ok(())
    }

    /// Remove the first `authentication` entry whose id is `id`.
    pub fn remove_authentication(&mut self, id: &str) -> bool {
        remove_relationship(&mut self.authentication, id)
    }

    pub fn add_assertion_method(&mut self, method: impl Into<ValueOrReference>) {
        self.assertion_method.push(method.into());
    }

    /// Append a JSON value to `assertionMethod`, as
    /// [`try_add_authentication`](Self::try_add_authentication) does.
    pub fn try_add_assertion_method(&mut self, method: Value) -> Result<(), Error> {
        self.assertion_method.push(ValueOrReference::try_from(method)?);
        Ok(())
    }

    /// Remove the first `assertionMethod` entry whose id is `id`.
    pub fn remove_assertion_method(&mut self, id: &str) -> bool {
        remove_relationship(&mut self.assertion_method, id)
    }

    /// Pretty-printed JSON, indented by four spaces.
    pub fn to_json(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl DocumentProperty for Document {}

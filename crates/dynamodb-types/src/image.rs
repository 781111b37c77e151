//! The tagged-value document format and its typed accessor object.
//!
//! A document on the wire looks like:
//!
//! ```json
//! {
//!     "systemNumber": {"S": "SYSTEM-NUMBER"},
//!     "offRoad": {"BOOL": true},
//!     "brakes": {"M": {"brakeCode": {"S": "333"}}}
//! }
//! ```
//!
//! Every field carries exactly one type tag. [`DynamoDbImage::from_json`]
//! rejects anything else up front, so accessors only ever deal with
//! well-formed attributes.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The closed set of wire type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Null,
    Bool,
    String,
    StringSet,
    Number,
    NumberSet,
    Binary,
    BinarySet,
    Map,
    List,
}

impl AttributeType {
    /// Map a wire type key to its tag, if recognized.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "NULL" => Some(Self::Null),
            "BOOL" => Some(Self::Bool),
            "S" => Some(Self::String),
            "SS" => Some(Self::StringSet),
            "N" => Some(Self::Number),
            "NS" => Some(Self::NumberSet),
            "B" => Some(Self::Binary),
            "BS" => Some(Self::BinarySet),
            "M" => Some(Self::Map),
            "L" => Some(Self::List),
            _ => None,
        }
    }

    /// The wire type key for this tag.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool => "BOOL",
            Self::String => "S",
            Self::StringSet => "SS",
            Self::Number => "N",
            Self::NumberSet => "NS",
            Self::Binary => "B",
            Self::BinarySet => "BS",
            Self::Map => "M",
            Self::List => "L",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Error during document decoding or field access.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("field {field}: expected exactly 1 type key, found {found} ({keys:?})")]
    MalformedAttribute {
        field: String,
        found: usize,
        keys: Vec<String>,
    },
    #[error("field {field}: unknown type key '{tag}'")]
    UnknownTag { field: String, tag: String },
    #[error("field {field}: payload does not match type key '{tag}'")]
    InvalidPayload { field: String, tag: AttributeType },
    #[error("field {field}: invalid number '{value}'")]
    InvalidNumber { field: String, value: String },
    #[error("field {field}: invalid base64 payload")]
    InvalidBase64 {
        field: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("key {0} not found")]
    MissingField(String),
    #[error("field {field} is not of type '{expected}' (actual: '{actual}')")]
    TypeMismatch {
        field: String,
        expected: AttributeType,
        actual: AttributeType,
    },
}

/// A decoded tagged value.
///
/// `N`/`NS` payloads arrive as decimal text and are parsed to `f64` at decode
/// time; `B`/`BS` payloads arrive as base64 text and are decoded to raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    String(String),
    StringSet(Vec<String>),
    Number(f64),
    NumberSet(Vec<f64>),
    Binary(Vec<u8>),
    BinarySet(Vec<Vec<u8>>),
    Map(DynamoDbImage),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// The type tag this value carries.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Null => AttributeType::Null,
            Self::Bool(_) => AttributeType::Bool,
            Self::String(_) => AttributeType::String,
            Self::StringSet(_) => AttributeType::StringSet,
            Self::Number(_) => AttributeType::Number,
            Self::NumberSet(_) => AttributeType::NumberSet,
            Self::Binary(_) => AttributeType::Binary,
            Self::BinarySet(_) => AttributeType::BinarySet,
            Self::Map(_) => AttributeType::Map,
            Self::List(_) => AttributeType::List,
        }
    }

    /// Try to get this value as a nested image.
    pub fn as_map(&self) -> Option<&DynamoDbImage> {
        match self {
            Self::Map(image) => Some(image),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a nested image, reporting `field` on mismatch.
    ///
    /// List elements have no field name of their own; callers pass the name
    /// of the enclosing list field for error reporting.
    pub fn expect_map(&self, field: &str) -> Result<&DynamoDbImage, DocumentError> {
        self.as_map().ok_or_else(|| DocumentError::TypeMismatch {
            field: field.to_string(),
            expected: AttributeType::Map,
            actual: self.attribute_type(),
        })
    }
}

/// An immutable, queryable view over one tagged-value document.
///
/// Every accessor either returns a valid typed value or fails; there is no
/// implicit defaulting. Optional fields are probed through the `opt_*`
/// accessors, which distinguish "absent" (`Ok(None)`) from "present with the
/// wrong tag" (an error).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamoDbImage {
    fields: HashMap<String, AttributeValue>,
}

impl DynamoDbImage {
    /// Decode a raw JSON document in the tagged-value wire format.
    pub fn from_json(raw: &serde_json::Value) -> Result<Self, DocumentError> {
        let object = raw.as_object().ok_or(DocumentError::NotAnObject)?;

        let mut fields = HashMap::with_capacity(object.len());
        for (key, tagged) in object {
            fields.insert(key.clone(), decode_attribute(key, tagged)?);
        }

        Ok(Self { fields })
    }

    /// Whether a field is present, regardless of its tag.
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields in this document.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether this document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn required(&self, key: &str) -> Result<&AttributeValue, DocumentError> {
        self.fields
            .get(key)
            .ok_or_else(|| DocumentError::MissingField(key.to_string()))
    }

    fn mismatch(key: &str, expected: AttributeType, value: &AttributeValue) -> DocumentError {
        DocumentError::TypeMismatch {
            field: key.to_string(),
            expected,
            actual: value.attribute_type(),
        }
    }

    pub fn get_null(&self, key: &str) -> Result<(), DocumentError> {
        match self.required(key)? {
            AttributeValue::Null => Ok(()),
            other => Err(Self::mismatch(key, AttributeType::Null, other)),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, DocumentError> {
        match self.required(key)? {
            AttributeValue::Bool(b) => Ok(*b),
            other => Err(Self::mismatch(key, AttributeType::Bool, other)),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<String, DocumentError> {
        match self.required(key)? {
            AttributeValue::String(s) => Ok(s.clone()),
            other => Err(Self::mismatch(key, AttributeType::String, other)),
        }
    }

    pub fn get_strings(&self, key: &str) -> Result<Vec<String>, DocumentError> {
        match self.required(key)? {
            AttributeValue::StringSet(ss) => Ok(ss.clone()),
            other => Err(Self::mismatch(key, AttributeType::StringSet, other)),
        }
    }

    pub fn get_number(&self, key: &str) -> Result<f64, DocumentError> {
        match self.required(key)? {
            AttributeValue::Number(n) => Ok(*n),
            other => Err(Self::mismatch(key, AttributeType::Number, other)),
        }
    }

    pub fn get_numbers(&self, key: &str) -> Result<Vec<f64>, DocumentError> {
        match self.required(key)? {
            AttributeValue::NumberSet(ns) => Ok(ns.clone()),
            other => Err(Self::mismatch(key, AttributeType::NumberSet, other)),
        }
    }

    pub fn get_binary(&self, key: &str) -> Result<Vec<u8>, DocumentError> {
        match self.required(key)? {
            AttributeValue::Binary(b) => Ok(b.clone()),
            other => Err(Self::mismatch(key, AttributeType::Binary, other)),
        }
    }

    pub fn get_binaries(&self, key: &str) -> Result<Vec<Vec<u8>>, DocumentError> {
        match self.required(key)? {
            AttributeValue::BinarySet(bs) => Ok(bs.clone()),
            other => Err(Self::mismatch(key, AttributeType::BinarySet, other)),
        }
    }

    /// Get a nested sub-document, recursing into the same contract.
    pub fn get_map(&self, key: &str) -> Result<&DynamoDbImage, DocumentError> {
        match self.required(key)? {
            AttributeValue::Map(image) => Ok(image),
            other => Err(Self::mismatch(key, AttributeType::Map, other)),
        }
    }

    /// Get the raw ordered elements of a list field.
    ///
    /// Lists are heterogeneous on the wire; element typing is the caller's
    /// responsibility.
    pub fn get_list(&self, key: &str) -> Result<&[AttributeValue], DocumentError> {
        match self.required(key)? {
            AttributeValue::List(elements) => Ok(elements),
            other => Err(Self::mismatch(key, AttributeType::List, other)),
        }
    }

    /// Non-failing string accessor: absent or `NULL`-tagged fields yield
    /// `None`, a present field with any other non-`S` tag is still an error.
    pub fn opt_string(&self, key: &str) -> Result<Option<String>, DocumentError> {
        match self.fields.get(key) {
            None | Some(AttributeValue::Null) => Ok(None),
            Some(AttributeValue::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(Self::mismatch(key, AttributeType::String, other)),
        }
    }

    pub fn opt_number(&self, key: &str) -> Result<Option<f64>, DocumentError> {
        match self.fields.get(key) {
            None | Some(AttributeValue::Null) => Ok(None),
            Some(AttributeValue::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(Self::mismatch(key, AttributeType::Number, other)),
        }
    }

    pub fn opt_bool(&self, key: &str) -> Result<Option<bool>, DocumentError> {
        match self.fields.get(key) {
            None | Some(AttributeValue::Null) => Ok(None),
            Some(AttributeValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(Self::mismatch(key, AttributeType::Bool, other)),
        }
    }

    /// Non-failing sub-document accessor, for optional nested entities.
    pub fn opt_map(&self, key: &str) -> Result<Option<&DynamoDbImage>, DocumentError> {
        match self.fields.get(key) {
            None | Some(AttributeValue::Null) => Ok(None),
            Some(AttributeValue::Map(image)) => Ok(Some(image)),
            Some(other) => Err(Self::mismatch(key, AttributeType::Map, other)),
        }
    }

    /// Non-failing list accessor; an absent list reads as `None`.
    pub fn opt_list(&self, key: &str) -> Result<Option<&[AttributeValue]>, DocumentError> {
        match self.fields.get(key) {
            None | Some(AttributeValue::Null) => Ok(None),
            Some(AttributeValue::List(elements)) => Ok(Some(elements)),
            Some(other) => Err(Self::mismatch(key, AttributeType::List, other)),
        }
    }
}

fn decode_attribute(
    field: &str,
    tagged: &serde_json::Value,
) -> Result<AttributeValue, DocumentError> {
    let object = tagged
        .as_object()
        .ok_or_else(|| DocumentError::MalformedAttribute {
            field: field.to_string(),
            found: 0,
            keys: vec![],
        })?;

    if object.len() != 1 {
        return Err(DocumentError::MalformedAttribute {
            field: field.to_string(),
            found: object.len(),
            keys: object.keys().cloned().collect(),
        });
    }

    let (tag_key, payload) = object.iter().next().unwrap();
    let tag = AttributeType::from_key(tag_key).ok_or_else(|| DocumentError::UnknownTag {
        field: field.to_string(),
        tag: tag_key.clone(),
    })?;

    let invalid = || DocumentError::InvalidPayload {
        field: field.to_string(),
        tag,
    };

    match tag {
        AttributeType::Null => Ok(AttributeValue::Null),
        AttributeType::Bool => Ok(AttributeValue::Bool(payload.as_bool().ok_or_else(invalid)?)),
        AttributeType::String => Ok(AttributeValue::String(
            payload.as_str().ok_or_else(invalid)?.to_string(),
        )),
        AttributeType::StringSet => {
            let elements = payload.as_array().ok_or_else(invalid)?;
            let mut ss = Vec::with_capacity(elements.len());
            for element in elements {
                ss.push(element.as_str().ok_or_else(invalid)?.to_string());
            }
            Ok(AttributeValue::StringSet(ss))
        }
        AttributeType::Number => {
            let text = payload.as_str().ok_or_else(invalid)?;
            Ok(AttributeValue::Number(parse_number(field, text)?))
        }
        AttributeType::NumberSet => {
            let elements = payload.as_array().ok_or_else(invalid)?;
            let mut ns = Vec::with_capacity(elements.len());
            for element in elements {
                let text = element.as_str().ok_or_else(invalid)?;
                ns.push(parse_number(field, text)?);
            }
            Ok(AttributeValue::NumberSet(ns))
        }
        AttributeType::Binary => {
            let text = payload.as_str().ok_or_else(invalid)?;
            Ok(AttributeValue::Binary(decode_base64(field, text)?))
        }
        AttributeType::BinarySet => {
            let elements = payload.as_array().ok_or_else(invalid)?;
            let mut bs = Vec::with_capacity(elements.len());
            for element in elements {
                let text = element.as_str().ok_or_else(invalid)?;
                bs.push(decode_base64(field, text)?);
            }
            Ok(AttributeValue::BinarySet(bs))
        }
        AttributeType::Map => {
            let image = DynamoDbImage::from_json(payload).map_err(|e| match e {
                DocumentError::NotAnObject => invalid(),
                other => other,
            })?;
            Ok(AttributeValue::Map(image))
        }
        AttributeType::List => {
            let elements = payload.as_array().ok_or_else(invalid)?;
            let mut list = Vec::with_capacity(elements.len());
            for element in elements {
                list.push(decode_attribute(field, element)?);
            }
            Ok(AttributeValue::List(list))
        }
    }
}

fn parse_number(field: &str, text: &str) -> Result<f64, DocumentError> {
    text.parse::<f64>()
        .map_err(|_| DocumentError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        })
}

fn decode_base64(field: &str, text: &str) -> Result<Vec<u8>, DocumentError> {
    BASE64
        .decode(text)
        .map_err(|source| DocumentError::InvalidBase64 {
            field: field.to_string(),
            source,
        })
}

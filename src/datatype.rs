// used for the driver boundary
use crate::persist::DriverValue;
use crate::convert;
use crate::array::{format_array_literal, parse_array_literal};
use crate::error::Result;

// used for timestamps
use chrono::{DateTime, Utc};
// used for byte sequences in JSON
use base64::{Engine, engine::general_purpose::STANDARD};
// used for the JSON encodings
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
// used for non-optional documents embedded in JSON
use serde_json::value::RawValue;

// used to print out readable forms of a data type
use std::fmt;
// used to expose the document bytes
use std::ops;

/// A payload that can sit inside a [`crate::Nullable`].
///
/// Implementors supply the JSON encoding, the driver encoding and the
/// conversion back from whatever a driver hands over. `Default` is the zero
/// value an absent wrapper reports.
pub trait DataType: Clone + Default + fmt::Debug + PartialEq {
    const DATA_TYPE: &'static str;
    /// Whether a failed scan drops the wrapper back to absent.
    ///
    /// Byte and document conversions cannot fail, so among the built-in
    /// payloads only integer sequences ever take this path.
    const RESET_ON_SCAN_ERROR: bool = false;
    /// Converts whatever the driver handed over into the payload.
    fn convert(value: DriverValue) -> Result<Self>;
    /// The value bound as a parameter; `None` asks the driver to store NULL.
    fn to_driver(&self) -> Option<DriverValue>;
    /// Writes the payload of a present wrapper as JSON.
    fn encode<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>;
    /// Reads the payload of a present wrapper from non-null JSON.
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error>;
    /// Writes the text shown inside `Some(...)`.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    // instance callable with pre-made implementation
    fn data_type(&self) -> &'static str {
        Self::DATA_TYPE
    }
}

// Payloads whose JSON form is their own serde form and whose text form is Display.
macro_rules! serde_payload {
    () => {
        fn encode<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            self.serialize(serializer)
        }
        fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            Self::deserialize(deserializer)
        }
        fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self)
        }
    };
}

// ------------- Data Types --------------
impl DataType for bool {
    const DATA_TYPE: &'static str = "Bool";
    fn convert(value: DriverValue) -> Result<bool> {
        convert::to_bool(value)
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Bool(*self))
    }
    serde_payload!();
}
impl DataType for f64 {
    const DATA_TYPE: &'static str = "Float64";
    fn convert(value: DriverValue) -> Result<f64> {
        convert::to_f64(value)
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Float(*self))
    }
    fn encode<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // JSON has no NaN or infinity
        if !self.is_finite() {
            return Err(S::Error::custom(format!("unsupported value: {self}")));
        }
        serializer.serialize_f64(*self)
    }
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        f64::deserialize(deserializer)
    }
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
impl DataType for i16 {
    const DATA_TYPE: &'static str = "Int16";
    fn convert(value: DriverValue) -> Result<i16> {
        convert::to_i16(value)
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Int(i64::from(*self)))
    }
    serde_payload!();
}
impl DataType for i64 {
    const DATA_TYPE: &'static str = "Int64";
    fn convert(value: DriverValue) -> Result<i64> {
        convert::to_i64(value)
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Int(*self))
    }
    serde_payload!();
}
impl DataType for String {
    const DATA_TYPE: &'static str = "String";
    fn convert(value: DriverValue) -> Result<String> {
        convert::to_text(value, Self::DATA_TYPE)
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Text(self.clone()))
    }
    serde_payload!();
}
impl DataType for DateTime<Utc> {
    const DATA_TYPE: &'static str = "Time";
    fn convert(value: DriverValue) -> Result<DateTime<Utc>> {
        convert::to_time(value)
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Time(*self))
    }
    serde_payload!();
}
impl DataType for Vec<u8> {
    const DATA_TYPE: &'static str = "Bytes";
    const RESET_ON_SCAN_ERROR: bool = true;
    fn convert(value: DriverValue) -> Result<Vec<u8>> {
        Ok(convert::to_bytes(value))
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Bytes(self.clone()))
    }
    fn encode<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(self))
    }
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.as_bytes()).map_err(D::Error::custom)
    }
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl DataType for Vec<i64> {
    const DATA_TYPE: &'static str = "Int64Slice";
    const RESET_ON_SCAN_ERROR: bool = true;
    fn convert(value: DriverValue) -> Result<Vec<i64>> {
        let text = convert::to_text(value, Self::DATA_TYPE)?;
        parse_array_literal(&text)
    }
    fn to_driver(&self) -> Option<DriverValue> {
        Some(DriverValue::Text(format_array_literal(self)))
    }
    fn encode<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.serialize(serializer)
    }
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Self::deserialize(deserializer)
    }
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl DataType for Document {
    const DATA_TYPE: &'static str = "JSONB";
    const RESET_ON_SCAN_ERROR: bool = true;
    fn convert(value: DriverValue) -> Result<Document> {
        Ok(Document(convert::to_bytes(value)))
    }
    fn to_driver(&self) -> Option<DriverValue> {
        if self.is_null() {
            return None;
        }
        Some(DriverValue::Bytes(self.sanitized()))
    }
    // base64, like plain bytes
    fn encode<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.encode(serializer)
    }
    fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<u8>::decode(deserializer).map(Document)
    }
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

// Special types below

/// Opaque bytes of a structured document stored natively by the database.
#[derive(Eq, PartialEq, Hash, Clone, Debug, Default)]
pub struct Document(pub Vec<u8>);

const EMPTY_DOCUMENT: &[u8] = b"{}";
const NULL_DOCUMENT: &[u8] = b"null";
const NUL_ESCAPE: &[u8] = b"\\u0000";

impl Document {
    /// True when the payload is the literal `null` document.
    pub fn is_null(&self) -> bool {
        self.0 == NULL_DOCUMENT
    }
    /// The bytes handed to the database: `{}` for an empty payload, otherwise
    /// the payload without any `\u0000` escape.
    pub fn sanitized(&self) -> Vec<u8> {
        if self.0.is_empty() {
            return EMPTY_DOCUMENT.to_vec();
        }
        strip_nul_escapes(&self.0)
    }
}
impl From<Vec<u8>> for Document {
    fn from(bytes: Vec<u8>) -> Self {
        Document(bytes)
    }
}
impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document(text.as_bytes().to_vec())
    }
}
impl ops::Deref for Document {
    type Target = Vec<u8>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Removes every literal six-byte `\u0000` escape, scanning left to right.
///
/// The target storage rejects the NUL code point in documents.
pub fn strip_nul_escapes(document: &[u8]) -> Vec<u8> {
    let mut stripped = Vec::with_capacity(document.len());
    let mut rest = document;
    while let Some((&first, tail)) = rest.split_first() {
        if rest.starts_with(NUL_ESCAPE) {
            rest = &rest[NUL_ESCAPE.len()..];
        } else {
            stripped.push(first);
            rest = tail;
        }
    }
    if stripped.len() != document.len() {
        tracing::trace!(removed = (document.len() - stripped.len()) / NUL_ESCAPE.len(), "stripped NUL escapes from document");
    }
    stripped
}

/// Writes document bytes into JSON verbatim; an empty payload becomes `{}`.
pub(crate) fn embed_document<S: Serializer>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let bytes = if bytes.is_empty() { EMPTY_DOCUMENT } else { bytes };
    let text = std::str::from_utf8(bytes).map_err(S::Error::custom)?;
    let raw: &RawValue = serde_json::from_str(text).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

pub(crate) fn is_empty_or_null_document(bytes: &[u8]) -> bool {
    bytes.is_empty() || bytes == NULL_DOCUMENT
}

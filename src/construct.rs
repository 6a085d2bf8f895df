//! The generic nullable wrapper.
//!
//! A [`Nullable<T>`] is a payload plus an explicit presence flag, so that an
//! absent value can be told apart from a zero value when it crosses a JSON or
//! database boundary.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::datatype::DataType;
use crate::error::{NullError, Result};
use crate::persist::DriverValue;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Nullable<T> {
    has_value: bool,
    value: T,
}

impl<T: DataType> Nullable<T> {
    /// Builds a wrapper; `value` is ignored when `has_value` is false.
    pub fn new(value: T, has_value: bool) -> Self {
        let mut nullable = Self::none();
        if has_value {
            nullable.set_value(value);
        }
        nullable
    }
    pub fn some(value: T) -> Self {
        Self { has_value: true, value }
    }
    pub fn none() -> Self {
        Self { has_value: false, value: T::default() }
    }
    /// Stores `value` and marks the wrapper present.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
        self.has_value = true;
    }
    fn clear(&mut self) {
        self.value = T::default();
        self.has_value = false;
    }
    pub fn is_some(&self) -> bool {
        self.has_value
    }
    pub fn is_none(&self) -> bool {
        !self.has_value
    }
    pub fn as_option(&self) -> Option<&T> {
        self.has_value.then_some(&self.value)
    }

    /// Moves the payload out together with the presence flag.
    ///
    /// An absent wrapper yields the zero value of `T`, never an error.
    pub fn unwrap(self) -> (T, bool) {
        (self.value, self.has_value)
    }
    pub fn unwrap_or(self, default: T) -> T {
        if self.has_value { self.value } else { default }
    }
    /// Returns the payload, calling `f` only when absent.
    pub fn unwrap_or_else<F: FnOnce() -> T>(self, f: F) -> T {
        if self.has_value { self.value } else { f() }
    }
    pub fn unwrap_or_default(self) -> T {
        if self.has_value { self.value } else { T::default() }
    }
    /// Returns the payload or panics.
    ///
    /// Only for callers that have already ruled out absence; unwrapping an
    /// absent wrapper is a programming error.
    #[track_caller]
    pub fn unwrap_or_panic(self) -> T {
        if self.has_value {
            return self.value;
        }
        panic!("unable to unwrap {}", T::DATA_TYPE)
    }
    /// Returns `self` when present, otherwise `other`.
    pub fn or(self, other: Self) -> Self {
        if self.has_value { self } else { other }
    }

    // ------------- JSON -------------
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| NullError::Encode {
            data_type: T::DATA_TYPE,
            message: e.to_string(),
        })
    }
    /// Decodes JSON into this wrapper.
    ///
    /// Empty input and `null` leave it absent without error. Malformed input
    /// leaves it absent and the error is returned.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() || data == b"null" {
            self.clear();
            return Ok(());
        }
        match serde_json::from_slice::<Self>(data) {
            Ok(decoded) => {
                *self = decoded;
                Ok(())
            }
            Err(e) => {
                self.clear();
                debug!(data_type = T::DATA_TYPE, error = %e, "JSON decode failed");
                Err(NullError::Decode { data_type: T::DATA_TYPE, message: e.to_string() })
            }
        }
    }

    // ------------- Driver -------------
    /// The value to bind as a query parameter; `None` binds NULL.
    pub fn to_driver_value(&self) -> Result<Option<DriverValue>> {
        if !self.has_value {
            return Ok(None);
        }
        Ok(self.value.to_driver())
    }
    /// Reads a value handed over by the driver; `None` is SQL NULL.
    ///
    /// On a failed conversion byte, document and integer sequence wrappers
    /// become absent, the others keep whatever they held before.
    pub fn scan(&mut self, src: Option<DriverValue>) -> Result<()> {
        let Some(src) = src else {
            self.clear();
            return Ok(());
        };
        match T::convert(src) {
            Ok(value) => {
                self.set_value(value);
                Ok(())
            }
            Err(e) => {
                debug!(data_type = T::DATA_TYPE, error = %e, "scan failed");
                if T::RESET_ON_SCAN_ERROR {
                    self.clear();
                }
                Err(e)
            }
        }
    }
}

impl<T: DataType> From<Option<T>> for Nullable<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::some(value),
            None => Self::none(),
        }
    }
}
impl<T: DataType> From<Nullable<T>> for Option<T> {
    fn from(nullable: Nullable<T>) -> Self {
        nullable.has_value.then_some(nullable.value)
    }
}

impl<T: DataType> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.has_value {
            return write!(f, "null");
        }
        write!(f, "Some(")?;
        self.value.render(f)?;
        write!(f, ")")
    }
}

impl<T: DataType> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.has_value {
            self.value.encode(serializer)
        } else {
            serializer.serialize_none()
        }
    }
}

// routes a present JSON value through the payload's own decoder
struct Payload<T>(T);

impl<'de, T: DataType> Deserialize<'de> for Payload<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        T::decode(deserializer).map(Payload)
    }
}

impl<'de, T: DataType> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let payload = Option::<Payload<T>>::deserialize(deserializer)?;
        Ok(payload.map(|Payload(value)| value).into())
    }
}

//! Non-optional column types.
//!
//! These carry no presence flag. A NULL from the driver or a JSON `null`
//! decodes to an empty payload instead.

use std::ops;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::debug;

use crate::array::{format_array_literal, parse_array_literal};
use crate::convert;
use crate::datatype::{embed_document, is_empty_or_null_document, strip_nul_escapes};
use crate::error::Result;
use crate::persist::{DriverValue, bind};

// ------------- Int64Slice -------------

/// An integer array column that is never NULL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Int64Slice(pub Vec<i64>);

impl Int64Slice {
    pub fn scan(&mut self, src: Option<DriverValue>) -> Result<()> {
        let Some(src) = src else {
            self.0.clear();
            return Ok(());
        };
        let text = convert::to_text(src, "Int64Slice")?;
        let values = parse_array_literal(&text).inspect_err(|e| {
            debug!(data_type = "Int64Slice", error = %e, "scan failed");
        })?;
        self.0 = values;
        Ok(())
    }
    pub fn to_driver_value(&self) -> Result<DriverValue> {
        Ok(DriverValue::Text(format_array_literal(&self.0)))
    }
}

impl Serialize for Int64Slice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for Int64Slice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Option::<Vec<i64>>::deserialize(deserializer)?;
        Ok(Int64Slice(values.unwrap_or_default()))
    }
}
impl ToSql for Int64Slice {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = self
            .to_driver_value()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(bind(Some(value)))
    }
}
impl FromSql for Int64Slice {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let mut slice = Int64Slice::default();
        slice
            .scan(DriverValue::from_value_ref(value))
            .map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Ok(slice)
    }
}
impl From<Vec<i64>> for Int64Slice {
    fn from(values: Vec<i64>) -> Self {
        Int64Slice(values)
    }
}
impl ops::Deref for Int64Slice {
    type Target = Vec<i64>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// ------------- Jsonb -------------

/// A document column that is never NULL; empty and `null` are stored as `{}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Jsonb(pub Vec<u8>);

impl Jsonb {
    pub fn scan(&mut self, src: Option<DriverValue>) -> Result<()> {
        self.0 = src.map(convert::to_bytes).unwrap_or_default();
        Ok(())
    }
    pub fn to_driver_value(&self) -> Result<DriverValue> {
        if is_empty_or_null_document(&self.0) {
            return Ok(DriverValue::Bytes(b"{}".to_vec()));
        }
        Ok(DriverValue::Bytes(strip_nul_escapes(&self.0)))
    }
}

impl Serialize for Jsonb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if is_empty_or_null_document(&self.0) {
            return embed_document(b"{}", serializer);
        }
        embed_document(&self.0, serializer)
    }
}
impl<'de> Deserialize<'de> for Jsonb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<Box<RawValue>>::deserialize(deserializer)?;
        Ok(Jsonb(raw.map(|raw| raw.get().as_bytes().to_vec()).unwrap_or_default()))
    }
}
impl ToSql for Jsonb {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = self
            .to_driver_value()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(bind(Some(value)))
    }
}
impl FromSql for Jsonb {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let mut document = Jsonb::default();
        document
            .scan(DriverValue::from_value_ref(value))
            .map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Ok(document)
    }
}
impl From<&str> for Jsonb {
    fn from(text: &str) -> Self {
        Jsonb(text.as_bytes().to_vec())
    }
}
impl ops::Deref for Jsonb {
    type Target = Vec<u8>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

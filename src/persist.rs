//! The driver boundary: values handed to and received from a SQL driver.
//!
//! [`DriverValue`] is the closed set of shapes a driver exchanges with a
//! wrapper. The rusqlite bindings below translate it to and from SQLite's
//! storage classes so every [`Nullable`] can be bound as a parameter or read
//! from a row directly.

// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
// used for timestamps in the database
use chrono::{DateTime, Utc};

use crate::construct::Nullable;
use crate::datatype::DataType;

/// Text layout rusqlite uses for `DateTime<Utc>` columns.
pub const TIMESTAMP_FORMAT: &str = "%F %T%.f%:z";

#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Time(DateTime<Utc>),
}

impl DriverValue {
    /// Short name of the variant, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            DriverValue::Bool(_) => "bool",
            DriverValue::Int(_) => "int64",
            DriverValue::Float(_) => "float64",
            DriverValue::Text(_) => "text",
            DriverValue::Bytes(_) => "bytes",
            DriverValue::Time(_) => "time",
        }
    }
    /// Reads a SQLite cell; NULL becomes `None`.
    ///
    /// TEXT that is not valid UTF-8 is passed on as bytes rather than failing
    /// here, the target conversion decides whether it is acceptable.
    pub fn from_value_ref(value: ValueRef<'_>) -> Option<DriverValue> {
        match value {
            ValueRef::Null => None,
            ValueRef::Integer(i) => Some(DriverValue::Int(i)),
            ValueRef::Real(f) => Some(DriverValue::Float(f)),
            ValueRef::Text(t) => Some(match std::str::from_utf8(t) {
                Ok(s) => DriverValue::Text(s.to_owned()),
                Err(_) => DriverValue::Bytes(t.to_vec()),
            }),
            ValueRef::Blob(b) => Some(DriverValue::Bytes(b.to_vec())),
        }
    }
}

impl From<DriverValue> for Value {
    fn from(value: DriverValue) -> Value {
        match value {
            DriverValue::Bool(b) => Value::Integer(b as i64),
            DriverValue::Int(i) => Value::Integer(i),
            DriverValue::Float(f) => Value::Real(f),
            DriverValue::Text(s) => Value::Text(s),
            DriverValue::Bytes(b) => Value::Blob(b),
            DriverValue::Time(t) => Value::Text(t.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

impl ToSql for DriverValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            DriverValue::Bool(b) => ToSqlOutput::from(*b),
            DriverValue::Int(i) => ToSqlOutput::from(*i),
            DriverValue::Float(f) => ToSqlOutput::from(*f),
            DriverValue::Text(s) => ToSqlOutput::from(s.as_str()),
            DriverValue::Bytes(b) => ToSqlOutput::from(b.as_slice()),
            DriverValue::Time(t) => ToSqlOutput::from(t.format(TIMESTAMP_FORMAT).to_string()),
        })
    }
}

/// Binds a driver value, or SQL NULL when there is none.
pub(crate) fn bind(value: Option<DriverValue>) -> ToSqlOutput<'static> {
    ToSqlOutput::Owned(value.map(Value::from).unwrap_or(Value::Null))
}

impl<T: DataType> ToSql for Nullable<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = self
            .to_driver_value()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(bind(value))
    }
}

impl<T: DataType> FromSql for Nullable<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let mut nullable = Nullable::none();
        nullable
            .scan(DriverValue::from_value_ref(value))
            .map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Ok(nullable)
    }
}

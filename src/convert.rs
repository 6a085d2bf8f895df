//! Best-effort conversion of driver values into payload types.
//!
//! Drivers hand back whatever storage class the column happened to use, so a
//! target accepts its own shape directly and otherwise goes through the value's
//! text rendering. Each function names the target in its error.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{NullError, Result};
use crate::persist::{DriverValue, TIMESTAMP_FORMAT};

fn conversion(from: &DriverValue, to: &'static str, message: impl Into<String>) -> NullError {
    NullError::Conversion { from: from.kind(), to, message: message.into() }
}

/// Renders any driver value as text; bytes must be valid UTF-8.
pub fn to_text(value: DriverValue, to: &'static str) -> Result<String> {
    match value {
        DriverValue::Text(s) => Ok(s),
        DriverValue::Bytes(b) => String::from_utf8(b).map_err(|e| NullError::Conversion {
            from: "bytes",
            to,
            message: e.to_string(),
        }),
        DriverValue::Int(i) => Ok(i.to_string()),
        DriverValue::Float(f) => Ok(f.to_string()),
        DriverValue::Bool(b) => Ok(b.to_string()),
        DriverValue::Time(t) => Ok(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    }
}

pub fn to_bytes(value: DriverValue) -> Vec<u8> {
    match value {
        DriverValue::Bytes(b) => b,
        DriverValue::Text(s) => s.into_bytes(),
        DriverValue::Int(i) => i.to_string().into_bytes(),
        DriverValue::Float(f) => f.to_string().into_bytes(),
        DriverValue::Bool(b) => b.to_string().into_bytes(),
        DriverValue::Time(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true).into_bytes(),
    }
}

pub fn to_i64(value: DriverValue) -> Result<i64> {
    match value {
        DriverValue::Int(i) => Ok(i),
        DriverValue::Time(_) => Err(conversion(&value, "int64", "unsupported")),
        other => {
            let kind = other.clone();
            let text = to_text(other, "int64")?;
            text.parse::<i64>()
                .map_err(|e| conversion(&kind, "int64", format!("'{text}': {e}")))
        }
    }
}

pub fn to_i16(value: DriverValue) -> Result<i16> {
    match value {
        DriverValue::Int(i) => {
            i16::try_from(i).map_err(|e| conversion(&value, "int16", format!("{i}: {e}")))
        }
        DriverValue::Time(_) => Err(conversion(&value, "int16", "unsupported")),
        other => {
            let kind = other.clone();
            let text = to_text(other, "int16")?;
            text.parse::<i16>()
                .map_err(|e| conversion(&kind, "int16", format!("'{text}': {e}")))
        }
    }
}

pub fn to_f64(value: DriverValue) -> Result<f64> {
    match value {
        DriverValue::Float(f) => Ok(f),
        DriverValue::Int(i) => Ok(i as f64),
        DriverValue::Bool(_) | DriverValue::Time(_) => {
            Err(conversion(&value, "float64", "unsupported"))
        }
        other => {
            let kind = other.clone();
            let text = to_text(other, "float64")?;
            text.parse::<f64>()
                .map_err(|e| conversion(&kind, "float64", format!("'{text}': {e}")))
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

pub fn to_bool(value: DriverValue) -> Result<bool> {
    match value {
        DriverValue::Bool(b) => Ok(b),
        DriverValue::Int(1) => Ok(true),
        DriverValue::Int(0) => Ok(false),
        DriverValue::Text(ref s) => {
            parse_bool(s).ok_or_else(|| conversion(&value, "bool", format!("'{s}'")))
        }
        DriverValue::Bytes(ref b) => std::str::from_utf8(b)
            .ok()
            .and_then(parse_bool)
            .ok_or_else(|| conversion(&value, "bool", "not a boolean literal")),
        DriverValue::Int(i) => Err(conversion(&value, "bool", format!("{i} is neither 0 nor 1"))),
        DriverValue::Float(_) | DriverValue::Time(_) => {
            Err(conversion(&value, "bool", "unsupported"))
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_str(text, TIMESTAMP_FORMAT) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }
    // naive layouts are taken as UTC
    ["%F %T%.f", "%FT%T%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|t| t.and_utc())
}

pub fn to_time(value: DriverValue) -> Result<DateTime<Utc>> {
    match value {
        DriverValue::Time(t) => Ok(t),
        DriverValue::Text(_) | DriverValue::Bytes(_) => {
            let kind = value.clone();
            let text = to_text(value, "time")?;
            parse_timestamp(&text)
                .ok_or_else(|| conversion(&kind, "time", format!("'{text}' is not a timestamp")))
        }
        _ => Err(conversion(&value, "time", "unsupported")),
    }
}

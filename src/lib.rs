//! sqlnull – nullable scalar wrappers for JSON payloads and SQL columns.
//!
//! A [`Nullable<T>`] couples a payload with an explicit *has value* flag, so
//! that "no value" stays distinct from a zero value (`0`, `""`, `false`, an
//! empty array) when the value is encoded to JSON or bound to / scanned from a
//! database driver.
//!
//! ## Modules
//! * [`construct`] – The generic [`construct::Nullable`] wrapper and its unwrap API.
//! * [`datatype`] – The [`datatype::DataType`] trait plus the provided payloads
//!   (bool, bytes, float, integers, integer arrays, documents, text, time).
//! * [`persist`] – The [`persist::DriverValue`] exchanged with drivers and the
//!   rusqlite parameter / column bindings.
//! * [`convert`] – Best-effort conversion of driver values into payloads.
//! * [`array`] – The `{1,2,3}` integer array literal codec.
//! * [`must`] – Array and document columns without a presence flag.
//! * [`settings`] – Logging settings loaded from a file.
//!
//! ## Encodings
//! | alias            | payload            | JSON              | driver value        |
//! |------------------|--------------------|-------------------|---------------------|
//! | `NullBool`       | `bool`             | `true`/`false`    | `Bool`              |
//! | `NullBytes`      | `Vec<u8>`          | base64 string     | `Bytes`             |
//! | `NullFloat64`    | `f64`              | number            | `Float`             |
//! | `NullInt16`      | `i16`              | number            | `Int` (widened)     |
//! | `NullInt64`      | `i64`              | number            | `Int`               |
//! | `NullInt64Slice` | `Vec<i64>`         | array of numbers  | `Text` `{1,2,3}`    |
//! | `NullJsonb`      | `Document`         | base64 string     | `Bytes`, sanitized  |
//! | `NullString`     | `String`           | string            | `Text`              |
//! | `NullTime`       | `DateTime<Utc>`    | RFC 3339 string   | `Time`              |
//!
//! An absent wrapper is JSON `null` and SQL NULL in both directions. A field
//! marked `#[serde(default)]` that is missing from the input is absent too.
//!
//! ## Quick Start
//! ```
//! use rusqlite::Connection;
//! use sqlnull::{NullInt64, NullString};
//! let conn = Connection::open_in_memory().unwrap();
//! conn.execute_batch("create table person (name text, age integer);").unwrap();
//! conn.execute(
//!     "insert into person (name, age) values (?, ?)",
//!     (NullString::some("Alice".to_string()), NullInt64::none()),
//! ).unwrap();
//! let (name, age): (NullString, NullInt64) = conn
//!     .query_row("select name, age from person", [], |r| Ok((r.get(0)?, r.get(1)?)))
//!     .unwrap();
//! assert_eq!(name.to_string(), "Some(Alice)");
//! assert_eq!(age.unwrap_or(7), 7);
//! ```

pub mod array;
pub mod construct;
pub mod convert;
pub mod datatype;
pub mod error;
pub mod must;
pub mod persist;
pub mod settings;

pub use construct::Nullable;
pub use datatype::{DataType, Document};
pub use error::{NullError, Result};
pub use persist::DriverValue;

use chrono::{DateTime, Utc};

pub type NullBool = Nullable<bool>;
pub type NullBytes = Nullable<Vec<u8>>;
pub type NullFloat64 = Nullable<f64>;
pub type NullInt16 = Nullable<i16>;
pub type NullInt64 = Nullable<i64>;
pub type NullInt64Slice = Nullable<Vec<i64>>;
pub type NullJsonb = Nullable<Document>;
pub type NullString = Nullable<String>;
pub type NullTime = Nullable<DateTime<Utc>>;

//! Integer array literals as exchanged with relational array columns.
//!
//! The text form is `{v1,v2,...,vn}`: base-10 integers joined by commas,
//! no spaces, and `{}` for the empty array.

use crate::error::{NullError, Result};

/// Parses an array literal such as `{1,2,3}` into its integers.
///
/// Every leading and trailing brace is trimmed before splitting, so `{{1}}`
/// parses like `{1}`. The first token that is not a base-10 `i64` aborts the
/// parse and nothing is returned.
pub fn parse_array_literal(literal: &str) -> Result<Vec<i64>> {
    if literal == "{}" {
        return Ok(Vec::new());
    }
    let inner = literal.trim_matches(|c| c == '{' || c == '}');
    let mut values = Vec::new();
    for token in inner.split(',') {
        let value = token.parse::<i64>().map_err(|e| NullError::ArrayLiteral {
            literal: literal.to_string(),
            message: format!("'{token}': {e}"),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Formats integers as an array literal, `{}` when empty.
pub fn format_array_literal(values: &[i64]) -> String {
    let joined = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{joined}}}")
}

//! Coordinate-list attributes (`d`, `points`)
//!
//! A value is a whitespace-separated list of blocks. A block may start with a
//! single non-digit prefix (a path command such as `M` or `L`), followed by
//! exactly one `X,Y` pair. Scaled coordinates are truncated toward zero.

use thiserror::Error;

/// A block that is not a 2-D coordinate pair
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("attribute '{attribute}' may only contain 2-D coordinates, found block '{block}' in \"{value}\"")]
pub struct CoordinateError {
    pub attribute: String,
    pub value: String,
    pub block: String,
}

/// Parse the leading integer of a string, ignoring any trailing garbage
///
/// Accepts optional leading whitespace and sign. Returns None when no digit
/// follows. Digit runs beyond the range of `i64` saturate.
pub(crate) fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, sign_len) = match s.as_bytes().first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let end = s[sign_len..]
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);
    if end == 0 {
        return None;
    }
    match s[..sign_len + end].parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Split off a single leading non-digit character, if any
fn split_prefix(block: &str) -> (&str, &str) {
    match block.chars().next() {
        Some(c) if !c.is_ascii_digit() => block.split_at(c.len_utf8()),
        _ => ("", block),
    }
}

/// Multiply by `factor` and truncate toward zero
fn scale_truncated(v: i64, factor: f64) -> i64 {
    (v as f64 * factor).trunc() as i64
}

/// Scale every coordinate pair of a `d` or `points` value
///
/// Prefixes are kept in place; blocks are rejoined with single spaces. A block
/// consisting of a prefix alone (e.g. a closing `Z`) is kept as is.
pub fn scale_coordinate_list(
    attribute: &str,
    value: &str,
    factor: f64,
) -> Result<String, CoordinateError> {
    let invalid = |block: &str| CoordinateError {
        attribute: attribute.to_string(),
        value: value.to_string(),
        block: block.to_string(),
    };

    let mut blocks = Vec::new();
    for block in value.split_whitespace() {
        let (prefix, rest) = split_prefix(block);
        if rest.is_empty() {
            blocks.push(prefix.to_string());
            continue;
        }

        let mut fields = rest.split(',');
        let (x, y) = match (fields.next(), fields.next(), fields.next()) {
            (Some(x), Some(y), None) => (x, y),
            _ => return Err(invalid(block)),
        };
        let x = leading_int(x).ok_or_else(|| invalid(block))?;
        let y = leading_int(y).ok_or_else(|| invalid(block))?;

        blocks.push(format!(
            "{}{},{}",
            prefix,
            scale_truncated(x, factor),
            scale_truncated(y, factor)
        ));
    }

    Ok(blocks.join(" "))
}

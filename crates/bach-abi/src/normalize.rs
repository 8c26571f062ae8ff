//! Value normalization
//!
//! Coerces loosely typed caller values (`serde_json::Value`) into [`Token`]s
//! that match a [`ParamType`], and validates caller-built tokens against a
//! type. Nothing is encoded until every value has passed through here.

use primitive_types::U256;
use serde_json::Value;

use crate::address::Address;
use crate::error::{AbiError, Result};
use crate::types::{Kind, ParamType, Token, I256};
use crate::word::{decode_hex, strip_hex_prefix, WORD_SIZE};

/// Root of a nesting path
pub const ROOT_PATH: &str = "$";

/// Normalize one value against its type
pub fn normalize(ty: &ParamType, raw: &Value) -> Result<Token> {
    normalize_at(ty, raw, ROOT_PATH)
}

/// Normalize a parameter list; the list is treated as a tuple
pub fn normalize_params(types: &[&ParamType], values: &[Value]) -> Result<Vec<Token>> {
    if types.len() != values.len() {
        return Err(AbiError::arity(ROOT_PATH, types.len(), values.len()));
    }
    types
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (ty, raw))| normalize_at(ty, raw, &child(ROOT_PATH, i)))
        .collect()
}

/// Normalize a value found at `path`
pub fn normalize_at(ty: &ParamType, raw: &Value, path: &str) -> Result<Token> {
    match ty.kind() {
        Kind::Bool => raw
            .as_bool()
            .map(Token::Bool)
            .ok_or_else(|| mismatch(ty, raw, path, "expected a boolean")),
        Kind::Uint(bits) => {
            let (negative, abs) = parse_integer(ty, raw, path)?;
            if negative || abs.bits() > *bits {
                return Err(out_of_range(ty, raw, path));
            }
            Ok(Token::Uint(abs))
        }
        Kind::Int(bits) => {
            let (negative, abs) = parse_integer(ty, raw, path)?;
            let value = I256::new(abs, negative);
            if !value.fits_bits(*bits) {
                return Err(out_of_range(ty, raw, path));
            }
            Ok(Token::Int(value))
        }
        Kind::Address => {
            let s = expect_str(ty, raw, path)?;
            Address::from_hex(s)
                .map(Token::Address)
                .map_err(|e| mismatch(ty, raw, path, e.to_string()))
        }
        Kind::FixedBytes(size) => {
            let bytes = expect_hex(ty, raw, path)?;
            if bytes.len() > *size {
                return Err(mismatch(
                    ty,
                    raw,
                    path,
                    format!("{} bytes exceed {}", bytes.len(), ty),
                ));
            }
            Ok(Token::FixedBytes(bytes))
        }
        Kind::Bytes => expect_hex(ty, raw, path).map(Token::Bytes),
        Kind::String => expect_str(ty, raw, path).map(|s| Token::String(s.to_string())),
        Kind::Array(inner) => {
            let items = expect_array(ty, raw, path)?;
            normalize_items(inner, items, path).map(Token::Array)
        }
        Kind::FixedArray(inner, len) => {
            let items = expect_array(ty, raw, path)?;
            if items.len() != *len {
                return Err(AbiError::arity(path, *len, items.len()));
            }
            normalize_items(inner, items, path).map(Token::FixedArray)
        }
        Kind::Tuple(fields) => {
            let items = expect_array(ty, raw, path)?;
            if items.len() != fields.len() {
                return Err(AbiError::arity(path, fields.len(), items.len()));
            }
            fields
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (field, item))| normalize_at(field, item, &child(path, i)))
                .collect::<Result<Vec<_>>>()
                .map(Token::Tuple)
        }
    }
}

/// Validate a caller-built token against its type
pub fn check_token(ty: &ParamType, token: &Token, path: &str) -> Result<()> {
    match (ty.kind(), token) {
        (Kind::Address, Token::Address(_))
        | (Kind::Bool, Token::Bool(_))
        | (Kind::Bytes, Token::Bytes(_))
        | (Kind::String, Token::String(_)) => Ok(()),
        (Kind::Uint(bits), Token::Uint(value)) => {
            check_int_width(ty, *bits)?;
            if value.bits() > *bits {
                return Err(token_out_of_range(ty, token, path));
            }
            Ok(())
        }
        (Kind::Int(bits), Token::Int(value)) => {
            check_int_width(ty, *bits)?;
            if !value.fits_bits(*bits) {
                return Err(token_out_of_range(ty, token, path));
            }
            Ok(())
        }
        (Kind::FixedBytes(size), Token::FixedBytes(data)) => {
            if !(1..=WORD_SIZE).contains(size) {
                return Err(AbiError::malformed(
                    &ty.to_string(),
                    "fixed bytes size must be between 1 and 32",
                ));
            }
            if data.len() > *size {
                return Err(AbiError::ValueMismatch {
                    path: path.to_string(),
                    ty: ty.to_string(),
                    value: format!("{:?}", token),
                    reason: format!("{} bytes exceed {}", data.len(), ty),
                });
            }
            Ok(())
        }
        (Kind::Array(inner), Token::Array(items)) => check_items(inner, items, path),
        (Kind::FixedArray(inner, len), Token::FixedArray(items)) => {
            if items.len() != *len {
                return Err(AbiError::arity(path, *len, items.len()));
            }
            check_items(inner, items, path)
        }
        (Kind::Tuple(fields), Token::Tuple(items)) => {
            if items.len() != fields.len() {
                return Err(AbiError::arity(path, fields.len(), items.len()));
            }
            fields
                .iter()
                .zip(items)
                .enumerate()
                .try_for_each(|(i, (field, item))| check_token(field, item, &child(path, i)))
        }
        _ => Err(AbiError::ValueMismatch {
            path: path.to_string(),
            ty: ty.to_string(),
            value: format!("{:?}", token),
            reason: format!("expected a {} token", ty),
        }),
    }
}

/// Types built by hand bypass the parser, so their widths are checked here
fn check_int_width(ty: &ParamType, bits: usize) -> Result<()> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::malformed(
            &ty.to_string(),
            "integer width must be a multiple of 8 between 8 and 256",
        ));
    }
    Ok(())
}

/// Path of the `index`-th member under `parent`
pub(crate) fn child(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

fn normalize_items(inner: &ParamType, items: &[Value], path: &str) -> Result<Vec<Token>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| normalize_at(inner, item, &child(path, i)))
        .collect()
}

fn check_items(inner: &ParamType, items: &[Token], path: &str) -> Result<()> {
    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| check_token(inner, item, &child(path, i)))
}

/// Parse a JSON number, decimal string or `0x` hex string into sign and magnitude
fn parse_integer(ty: &ParamType, raw: &Value, path: &str) -> Result<(bool, U256)> {
    match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok((false, U256::from(v)))
            } else if let Some(v) = n.as_i64() {
                Ok((v < 0, U256::from(v.unsigned_abs())))
            } else {
                Err(mismatch(ty, raw, path, "expected an integer"))
            }
        }
        Value::String(s) => {
            let (negative, digits) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s.as_str()),
            };
            let abs = if digits.starts_with("0x") || digits.starts_with("0X") {
                parse_hex_magnitude(ty, raw, path, strip_hex_prefix(digits))?
            } else {
                parse_dec_magnitude(ty, raw, path, digits)?
            };
            Ok((negative && !abs.is_zero(), abs))
        }
        _ => Err(mismatch(ty, raw, path, "expected an integer or numeric string")),
    }
}

fn parse_dec_magnitude(ty: &ParamType, raw: &Value, path: &str, digits: &str) -> Result<U256> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(mismatch(ty, raw, path, "not a decimal integer"));
    }
    // digits are validated, so the only failure left is overflow
    U256::from_dec_str(digits).map_err(|_| out_of_range(ty, raw, path))
}

fn parse_hex_magnitude(ty: &ParamType, raw: &Value, path: &str, digits: &str) -> Result<U256> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(mismatch(ty, raw, path, "not a hex integer"));
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 64 {
        return Err(out_of_range(ty, raw, path));
    }
    let bytes = decode_hex(significant).map_err(|e| mismatch(ty, raw, path, e.to_string()))?;
    Ok(U256::from_big_endian(&bytes))
}

fn expect_str<'a>(ty: &ParamType, raw: &'a Value, path: &str) -> Result<&'a str> {
    raw.as_str()
        .ok_or_else(|| mismatch(ty, raw, path, "expected a string"))
}

fn expect_hex(ty: &ParamType, raw: &Value, path: &str) -> Result<Vec<u8>> {
    let s = expect_str(ty, raw, path)?;
    decode_hex(s).map_err(|e| mismatch(ty, raw, path, format!("invalid hex: {}", e)))
}

fn expect_array<'a>(ty: &ParamType, raw: &'a Value, path: &str) -> Result<&'a [Value]> {
    raw.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| mismatch(ty, raw, path, "expected an array"))
}

fn mismatch(ty: &ParamType, raw: &Value, path: &str, reason: impl Into<String>) -> AbiError {
    AbiError::ValueMismatch {
        path: path.to_string(),
        ty: ty.to_string(),
        value: raw.to_string(),
        reason: reason.into(),
    }
}

fn out_of_range(ty: &ParamType, raw: &Value, path: &str) -> AbiError {
    AbiError::ValueOutOfRange {
        path: path.to_string(),
        ty: ty.to_string(),
        value: raw.to_string(),
    }
}

fn token_out_of_range(ty: &ParamType, token: &Token, path: &str) -> AbiError {
    let value = match token {
        Token::Uint(v) => v.to_string(),
        Token::Int(v) => v.to_string(),
        other => format!("{:?}", other),
    };
    AbiError::ValueOutOfRange {
        path: path.to_string(),
        ty: ty.to_string(),
        value,
    }
}

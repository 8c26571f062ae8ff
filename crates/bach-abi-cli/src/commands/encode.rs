//! Encoding commands

use bach_abi::parser::split_top_level;
use bach_abi::AbiEncoder;
use serde_json::Value;
use tracing::debug;

use crate::{output::Output, CliError};

/// Encode a JSON array of values against a comma-separated type list
pub fn encode(encoder: &AbiEncoder, types: &str, values: &str, json: bool) -> Result<(), CliError> {
    let types = split_types(types)?;
    let values = parse_values(values)?;
    debug!(types = types.len(), values = values.len(), "encoding parameters");

    let encoded = encoder.encode_parameters(&types, &values)?;
    Output::new(json)
        .field("encoded", &encoded)
        .message(&encoded)
        .print();
    Ok(())
}

/// Encode a function call: selector followed by the encoded parameters
pub fn call(encoder: &AbiEncoder, signature: &str, values: &str, json: bool) -> Result<(), CliError> {
    let values = parse_values(values)?;
    let data = encoder.encode_function_call(signature, &values)?;
    Output::new(json)
        .field("signature", signature)
        .field("data", &data)
        .message(&data)
        .print();
    Ok(())
}

/// Split a type list on top-level commas; an empty list means no parameters
pub(crate) fn split_types(list: &str) -> Result<Vec<&str>, CliError> {
    if list.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list)
        .ok_or_else(|| CliError::InvalidInput(format!("unbalanced parentheses in `{}`", list)))
}

/// Parse the values argument, which must be a JSON array
pub(crate) fn parse_values(values: &str) -> Result<Vec<Value>, CliError> {
    match serde_json::from_str(values)? {
        Value::Array(items) => Ok(items),
        other => Err(CliError::InvalidInput(format!(
            "values must be a JSON array, got {}",
            other
        ))),
    }
}

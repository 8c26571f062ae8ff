//! Type and selector inspection commands

use bach_abi::{function_selector, AbiEncoder};

use crate::{output::Output, CliError};

/// Parse a type signature and print its canonical form and layout
pub fn parse(encoder: &AbiEncoder, signature: &str, json: bool) -> Result<(), CliError> {
    let ty = encoder.resolve(signature)?;
    let canonical = ty.to_string();
    Output::new(json)
        .field("canonical", &canonical)
        .field_bool("dynamic", ty.is_dynamic())
        .field_u64("head_len", ty.head_len() as u64)
        .message(&format!(
            "Canonical: {}\nDynamic: {}\nHead length: {}",
            canonical,
            ty.is_dynamic(),
            ty.head_len()
        ))
        .print();
    Ok(())
}

/// Print the 4-byte selector of a function signature
pub fn selector(signature: &str, json: bool) -> Result<(), CliError> {
    let selector = format!("0x{}", hex::encode(function_selector(signature)?));
    Output::new(json)
        .field("signature", signature)
        .field("selector", &selector)
        .message(&selector)
        .print();
    Ok(())
}

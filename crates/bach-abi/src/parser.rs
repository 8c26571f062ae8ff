//! Type signature parsing
//!
//! Grammar:
//!
//! ```text
//! type     := elementary | type "[" digits? "]" | "tuple(" list ")" | "(" list ")"
//! list     := ε | type ("," type)*
//! ```
//!
//! Every tuple level and every array suffix counts as one level of nesting.
//! Signatures nesting deeper than the configured limit are rejected.

use tracing::debug;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{AbiError, Result};
use crate::types::{Kind, ParamType};

/// Parse a type string (e.g., "uint256", "tuple(bool,bytes)[]")
pub fn parse_type(signature: &str) -> Result<ParamType> {
    parse_type_with_depth(signature, DEFAULT_MAX_DEPTH)
}

/// Parse a type string, allowing at most `max_depth` levels of nesting
pub fn parse_type_with_depth(signature: &str, max_depth: usize) -> Result<ParamType> {
    let parser = Parser {
        signature,
        max_depth,
    };
    parser.parse(signature.trim(), 0).map_err(|e| {
        debug!(signature, error = %e, "rejected type signature");
        e
    })
}

/// Function signature such as `transfer(address,uint256)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Input parameter types
    pub inputs: Vec<ParamType>,
}

impl FunctionSignature {
    /// Canonical form used for selector hashing
    pub fn canonical(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(|t| t.selector_name()).collect();
        format!("{}({})", self.name, inputs.join(","))
    }
}

/// Parse a function signature `name(type,...)`
pub fn parse_function_signature(signature: &str, max_depth: usize) -> Result<FunctionSignature> {
    let parser = Parser {
        signature,
        max_depth,
    };
    let s = signature.trim();
    let open = s
        .find('(')
        .ok_or_else(|| AbiError::malformed(signature, "missing parameter list"))?;
    let name = &s[..open];
    if !is_identifier(name) {
        return Err(AbiError::malformed(
            signature,
            format!("invalid function name `{}`", name),
        ));
    }
    let body = s[open..]
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| AbiError::malformed(signature, "unterminated parameter list"))?;
    let inputs = parser.parse_list(body, 0)?;
    Ok(FunctionSignature {
        name: name.to_string(),
        inputs,
    })
}

/// Split a comma-separated type list on top-level commas only
pub fn split_top_level(list: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&list[start..]);
    Some(parts)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

struct Parser<'a> {
    signature: &'a str,
    max_depth: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> AbiError {
        AbiError::malformed(self.signature, reason)
    }

    fn parse(&self, s: &str, depth: usize) -> Result<ParamType> {
        if depth > self.max_depth {
            return Err(self.error(format!(
                "nesting deeper than {} levels",
                self.max_depth
            )));
        }
        if s.is_empty() {
            return Err(self.error("empty type"));
        }

        if let Some(rest) = s.strip_suffix(']') {
            // suffix holds digits only, so the last '[' opens it
            let open = rest
                .rfind('[')
                .ok_or_else(|| self.error("unmatched `]`"))?;
            let inner = self.parse(&rest[..open], depth + 1)?;
            let len = &rest[open + 1..];
            if len.is_empty() {
                return Ok(ParamType::array(inner));
            }
            let len = self.parse_number(len)?;
            return Ok(ParamType::fixed_array(inner, len));
        }

        if s.ends_with(')') {
            let body = s
                .strip_prefix("tuple(")
                .or_else(|| s.strip_prefix('('))
                .and_then(|rest| rest.strip_suffix(')'))
                .ok_or_else(|| self.error(format!("unknown type `{}`", s)))?;
            let fields = self.parse_list(body, depth + 1)?;
            return Ok(ParamType::tuple(fields));
        }

        self.parse_elementary(s)
    }

    fn parse_list(&self, body: &str, depth: usize) -> Result<Vec<ParamType>> {
        if body.is_empty() {
            return Ok(Vec::new());
        }
        let parts = split_top_level(body).ok_or_else(|| self.error("unbalanced parentheses"))?;
        parts
            .into_iter()
            .map(|part| self.parse(part, depth))
            .collect()
    }

    fn parse_elementary(&self, s: &str) -> Result<ParamType> {
        match s {
            "address" => return Ok(ParamType::address()),
            "bool" => return Ok(ParamType::bool()),
            "string" => return Ok(ParamType::string()),
            "bytes" => return Ok(ParamType::bytes()),
            _ => {}
        }

        // uint<N>
        if let Some(rest) = s.strip_prefix("uint") {
            return Ok(ParamType::new(Kind::Uint(self.parse_int_width(rest)?)));
        }

        // int<N>
        if let Some(rest) = s.strip_prefix("int") {
            return Ok(ParamType::new(Kind::Int(self.parse_int_width(rest)?)));
        }

        // bytes<N>
        if let Some(rest) = s.strip_prefix("bytes") {
            let size = self.parse_number(rest)?;
            if !(1..=32).contains(&size) {
                return Err(self.error(format!("invalid bytes size: {}", size)));
            }
            return Ok(ParamType::fixed_bytes(size));
        }

        Err(self.error(format!("unknown type `{}`", s)))
    }

    fn parse_int_width(&self, rest: &str) -> Result<usize> {
        if rest.is_empty() {
            return Ok(256);
        }
        let bits = self.parse_number(rest)?;
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return Err(self.error(format!("invalid integer size: {}", bits)));
        }
        Ok(bits)
    }

    fn parse_number(&self, digits: &str) -> Result<usize> {
        let canonical = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && (digits == "0" || !digits.starts_with('0'));
        if !canonical {
            return Err(self.error(format!("invalid size `{}`", digits)));
        }
        digits
            .parse()
            .map_err(|_| self.error(format!("size too large: {}", digits)))
    }
}

//! ABI encoding
//!
//! Each nesting level (parameter list, tuple, array) is laid out as a head
//! region followed by the tails of its dynamic members. Static members are
//! written straight into the head; a dynamic member's head slot holds the
//! byte offset of its tail, measured from the start of the head region it
//! sits in.

use tracing::trace;

use crate::error::{AbiError, Result};
use crate::normalize::{check_token, child, ROOT_PATH};
use crate::types::{Kind, ParamType, Token};
use crate::word::{bool_word, int_word, padded_len, right_padded, uint_word, usize_word};

/// Encoded form of one member of a head region
#[derive(Debug)]
enum Segment {
    /// Inline head bytes (one word, or several for a static composite)
    Head(Vec<u8>),
    /// Tail content referenced through an offset word
    Tail(Vec<u8>),
}

/// Encode tokens with the Solidity head/tail layout
///
/// Types are inferred from the tokens themselves; see [`Token::type_of`].
pub fn encode(tokens: &[Token]) -> Result<Vec<u8>> {
    let types: Vec<ParamType> = tokens.iter().map(|t| t.type_of()).collect();
    encode_tokens(&types, tokens)
}

/// Encode tokens against explicit types
pub fn encode_tokens(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>> {
    if types.len() != tokens.len() {
        return Err(AbiError::arity(ROOT_PATH, types.len(), tokens.len()));
    }
    for (i, (ty, token)) in types.iter().zip(tokens).enumerate() {
        check_token(ty, token, &child(ROOT_PATH, i))?;
    }
    encode_validated(types.iter().zip(tokens))
}

/// Encode function call (selector + params)
pub fn encode_with_selector(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>> {
    let mut result = selector.to_vec();
    result.extend(encode_tokens(types, tokens)?);
    Ok(result)
}

/// Encode pairs that already passed normalization or [`check_token`]
pub(crate) fn encode_validated<'a, I>(members: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a ParamType, &'a Token)>,
{
    let encoded = encode_region(members)?;
    trace!(len = encoded.len(), "encoded parameters");
    Ok(encoded)
}

/// Lay out one head region and its tails
fn encode_region<'a, I>(members: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a ParamType, &'a Token)>,
{
    let mut head_len = 0usize;
    let mut tail_len = 0usize;
    let mut segments = Vec::new();

    for (ty, token) in members {
        let body = encode_body(ty, token)?;
        if ty.is_dynamic() {
            head_len += ty.head_len();
            tail_len += body.len();
            segments.push(Segment::Tail(body));
        } else {
            head_len += body.len();
            segments.push(Segment::Head(body));
        }
    }

    let mut out = Vec::with_capacity(head_len + tail_len);
    let mut offset = head_len;
    for segment in &segments {
        match segment {
            Segment::Head(bytes) => out.extend_from_slice(bytes),
            Segment::Tail(bytes) => {
                out.extend_from_slice(&usize_word(offset));
                offset += bytes.len();
            }
        }
    }
    for segment in segments {
        if let Segment::Tail(bytes) = segment {
            out.extend(bytes);
        }
    }

    Ok(out)
}

/// Encode a single token (its head bytes if static, its tail if dynamic)
fn encode_body(param_type: &ParamType, token: &Token) -> Result<Vec<u8>> {
    let encoded = match (param_type.kind(), token) {
        (Kind::Address, Token::Address(addr)) => addr.to_word().to_vec(),
        (Kind::Uint(_), Token::Uint(value)) => uint_word(value).to_vec(),
        // full-word two's complement whatever the declared width
        (Kind::Int(_), Token::Int(value)) => int_word(value).to_vec(),
        (Kind::Bool, Token::Bool(b)) => bool_word(*b).to_vec(),
        (Kind::FixedBytes(_), Token::FixedBytes(data)) => right_padded(data).to_vec(),
        (Kind::Bytes, Token::Bytes(data)) => encode_bytes(data),
        (Kind::String, Token::String(s)) => encode_bytes(s.as_bytes()),
        (Kind::Array(inner), Token::Array(tokens)) => {
            let mut result = usize_word(tokens.len()).to_vec();
            result.extend(encode_region(tokens.iter().map(|t| (inner.as_ref(), t)))?);
            result
        }
        (Kind::FixedArray(inner, _), Token::FixedArray(tokens)) => {
            encode_region(tokens.iter().map(|t| (inner.as_ref(), t)))?
        }
        (Kind::Tuple(types), Token::Tuple(tokens)) => encode_region(types.iter().zip(tokens))?,
        _ => {
            return Err(AbiError::ValueMismatch {
                path: ROOT_PATH.to_string(),
                ty: param_type.to_string(),
                value: format!("{:?}", token),
                reason: "token does not match type".to_string(),
            })
        }
    };
    Ok(encoded)
}

/// Encode dynamic bytes: length word, then content padded to a word boundary
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = usize_word(data.len()).to_vec();
    result.extend_from_slice(data);
    result.resize(32 + padded_len(data.len()), 0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::types::I256;
    use primitive_types::U256;

    fn word(hex_str: &str) -> Vec<u8> {
        let mut w = vec![0u8; 32];
        let bytes = hex::decode(hex_str).unwrap();
        w[32 - bytes.len()..].copy_from_slice(&bytes);
        w
    }

    #[test]
    fn test_encode_address() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let encoded = encode(&[Token::Address(addr)]).unwrap();

        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[..12], &[0u8; 12]);
        assert_eq!(&encoded[12..32], addr.as_bytes());
    }

    #[test]
    fn test_encode_uint() {
        let encoded = encode(&[Token::Uint(U256::from(100))]).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 100);
    }

    #[test]
    fn test_encode_negative_int() {
        let encoded = encode(&[Token::Int(I256::from_i128(-1))]).unwrap();
        assert_eq!(encoded, vec![0xff; 32]);
    }

    #[test]
    fn test_encode_bool() {
        let encoded_true = encode(&[Token::Bool(true)]).unwrap();
        let encoded_false = encode(&[Token::Bool(false)]).unwrap();

        assert_eq!(encoded_true[31], 1);
        assert_eq!(encoded_false[31], 0);
    }

    #[test]
    fn test_encode_bytes32() {
        let data = [0x42u8; 32];
        let encoded = encode(&[Token::FixedBytes(data.to_vec())]).unwrap();

        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[..], &data[..]);
    }

    #[test]
    fn test_encode_short_fixed_bytes_right_padded() {
        let encoded = encode_tokens(
            &[ParamType::fixed_bytes(3)],
            &[Token::FixedBytes(vec![0xcf, 0x00, 0x11])],
        )
        .unwrap();
        assert_eq!(&encoded[..3], &[0xcf, 0x00, 0x11]);
        assert_eq!(&encoded[3..], &[0u8; 29]);
    }

    #[test]
    fn test_encode_dynamic_bytes() {
        let data = vec![0x01, 0x02, 0x03];
        let encoded = encode(&[Token::Bytes(data.clone())]).unwrap();

        // offset + length + padded data
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 32);
        assert_eq!(encoded[63], 3);
        assert_eq!(&encoded[64..67], &data[..]);
        assert_eq!(&encoded[67..], &[0u8; 29]);
    }

    #[test]
    fn test_encode_empty_bytes_and_string() {
        let encoded = encode(&[Token::Bytes(vec![]), Token::string("")]).unwrap();
        let mut expected = word("40");
        expected.extend(word("60"));
        expected.extend(word("00"));
        expected.extend(word("00"));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_exact_word_content_not_over_padded() {
        let encoded = encode(&[Token::Bytes(vec![0xff; 32])]).unwrap();
        assert_eq!(encoded.len(), 96);
    }

    #[test]
    fn test_encode_string() {
        let encoded = encode(&[Token::string("hello")]).unwrap();
        assert_eq!(encoded.len(), 96);
        assert_eq!(&encoded[64..69], b"hello");
    }

    #[test]
    fn test_static_tuple_inline() {
        let ty = ParamType::tuple(vec![ParamType::bool(), ParamType::uint(8)]);
        let token = Token::Tuple(vec![Token::Bool(true), Token::Uint(U256::from(7))]);
        let encoded = encode_tokens(&[ty], &[token]).unwrap();

        let mut expected = word("01");
        expected.extend(word("07"));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_offsets_relative_to_inner_region() {
        // tuple(uint256,string) after a leading uint256
        let ty = ParamType::tuple(vec![ParamType::uint(256), ParamType::string()]);
        let token = Token::Tuple(vec![Token::Uint(U256::from(5)), Token::string("ab")]);
        let encoded = encode_tokens(
            &[ParamType::uint(256), ty],
            &[Token::Uint(U256::from(1)), token],
        )
        .unwrap();

        let mut expected = word("01");
        expected.extend(word("40")); // outer offset to tuple tail
        expected.extend(word("05"));
        expected.extend(word("40")); // inner offset from tuple start
        expected.extend(word("02"));
        expected.extend(right_padded(b"ab"));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_dynamic_array_of_strings() {
        let ty = ParamType::array(ParamType::string());
        let token = Token::Array(vec![Token::string("a"), Token::string("b")]);
        let encoded = encode_tokens(&[ty], &[token]).unwrap();

        let mut expected = word("20");
        expected.extend(word("02"));
        expected.extend(word("40"));
        expected.extend(word("80"));
        expected.extend(word("01"));
        expected.extend(right_padded(b"a"));
        expected.extend(word("01"));
        expected.extend(right_padded(b"b"));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_empty_dynamic_array() {
        let encoded = encode_tokens(
            &[ParamType::array(ParamType::address())],
            &[Token::Array(vec![])],
        )
        .unwrap();
        let mut expected = word("20");
        expected.extend(word("00"));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_tokens_validates_first() {
        let err = encode_tokens(&[ParamType::uint(8)], &[Token::Uint(U256::from(256))]).unwrap_err();
        assert!(matches!(err, AbiError::ValueOutOfRange { .. }));

        let err = encode_tokens(&[ParamType::uint(8)], &[]).unwrap_err();
        assert_eq!(err, AbiError::arity("$", 1, 0));

        let err = encode_tokens(&[ParamType::string()], &[Token::Bool(true)]).unwrap_err();
        assert!(matches!(err, AbiError::ValueMismatch { .. }));
    }

    #[test]
    fn test_encode_heterogeneous_array_rejected() {
        let tokens = [Token::Array(vec![Token::Bool(true), Token::string("x")])];
        assert!(matches!(encode(&tokens), Err(AbiError::ValueMismatch { .. })));
    }

    #[test]
    fn test_encode_rejects_unrepresentable_fixed_bytes() {
        // inferred as bytes40 / bytes0, neither fits a word
        let err = encode(&[Token::FixedBytes(vec![0xab; 40])]).unwrap_err();
        assert!(matches!(err, AbiError::MalformedType { ref signature, .. } if signature == "bytes40"));
        assert!(matches!(
            encode(&[Token::FixedBytes(vec![])]),
            Err(AbiError::MalformedType { .. })
        ));

        let err = encode_tokens(
            &[ParamType::new(Kind::FixedBytes(40))],
            &[Token::FixedBytes(vec![0xab; 40])],
        )
        .unwrap_err();
        assert!(matches!(err, AbiError::MalformedType { .. }));
    }

    #[test]
    fn test_encode_rejects_hand_built_integer_widths() {
        for kind in [Kind::Uint(7), Kind::Uint(0), Kind::Int(264), Kind::Int(12)] {
            let token = match kind {
                Kind::Uint(_) => Token::Uint(U256::one()),
                _ => Token::Int(I256::from_i128(-1)),
            };
            let err = encode_tokens(&[ParamType::new(kind)], &[token]).unwrap_err();
            assert!(matches!(err, AbiError::MalformedType { .. }));
        }

        let nested = ParamType::tuple(vec![ParamType::bool(), ParamType::new(Kind::FixedBytes(33))]);
        let token = Token::Tuple(vec![Token::Bool(true), Token::FixedBytes(vec![1; 33])]);
        assert!(matches!(
            encode_tokens(&[nested], &[token]),
            Err(AbiError::MalformedType { .. })
        ));
    }

    #[test]
    fn test_encode_with_selector() {
        let to = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let selector = [0xa9, 0x05, 0x9c, 0xbb];
        let encoded = encode_with_selector(
            selector,
            &[ParamType::address(), ParamType::uint(256)],
            &[Token::Address(to), Token::Uint(U256::from(1000))],
        )
        .unwrap();

        // 4 bytes selector + 32 bytes address + 32 bytes uint
        assert_eq!(encoded.len(), 68);
        assert_eq!(&encoded[..4], &selector);
    }
}

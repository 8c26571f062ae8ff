//! 32-byte word helpers: padding, two's complement, hex

use primitive_types::U256;

use crate::types::I256;

/// One ABI word
pub type Word = [u8; 32];

/// Size of an ABI word in bytes
pub const WORD_SIZE: usize = 32;

/// Big-endian unsigned integer word
pub fn uint_word(value: &U256) -> Word {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

/// 256-bit two's complement word, independent of the declared width
pub fn int_word(value: &I256) -> Word {
    if value.negative {
        // 2^256 - |x|
        uint_word(&value.abs.overflowing_neg().0)
    } else {
        uint_word(&value.abs)
    }
}

/// Length, count or offset word
pub fn usize_word(value: usize) -> Word {
    uint_word(&U256::from(value))
}

/// Boolean word: 31 zero bytes then 0x00 or 0x01
pub fn bool_word(value: bool) -> Word {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 1] = u8::from(value);
    word
}

/// Place `data` at the end of a zero word. Input longer than a word keeps its low bytes.
pub fn left_padded(data: &[u8]) -> Word {
    let mut word = [0u8; WORD_SIZE];
    let len = data.len().min(WORD_SIZE);
    word[WORD_SIZE - len..].copy_from_slice(&data[data.len() - len..]);
    word
}

/// Place `data` at the start of a zero word. Input longer than a word is cut.
pub fn right_padded(data: &[u8]) -> Word {
    let mut word = [0u8; WORD_SIZE];
    let len = data.len().min(WORD_SIZE);
    word[..len].copy_from_slice(&data[..len]);
    word
}

/// Round a byte length up to the next word boundary
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Decode a hex string, with or without `0x`.
///
/// An odd nibble count is read as if a leading `0` were present, so
/// `0xabc` decodes to `[0x0a, 0xbc]`.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = strip_hex_prefix(s);
    if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))
    } else {
        hex::decode(digits)
    }
}

/// Strip an optional `0x` / `0X` prefix
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Render bytes as `0x` followed by lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

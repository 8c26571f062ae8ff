//! ABI type definitions

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;

use crate::address::Address;
use crate::error::AbiError;
use crate::word::WORD_SIZE;

/// Solidity ABI token types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits)
    Uint(U256),
    /// Signed integer (8-256 bits)
    Int(I256),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
    /// Fixed-size array
    FixedArray(Vec<Token>),
    /// Tuple (struct)
    Tuple(Vec<Token>),
}

/// Signed 256-bit integer in sign-magnitude form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256. Negative zero collapses to zero.
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Whether the value lies in `[-2^(bits-1), 2^(bits-1))`
    pub fn fits_bits(&self, bits: usize) -> bool {
        if bits == 0 || bits > 256 {
            return false;
        }
        let limit = U256::one() << (bits - 1);
        if self.negative {
            self.abs <= limit
        } else {
            self.abs < limit
        }
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

/// Shape of a parameter type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Tuple
    Tuple(Vec<ParamType>),
}

/// Solidity parameter type
///
/// Immutable once built. Whether the type is dynamic and how many head bytes
/// it takes are derived from the structure when the node is constructed, so
/// the encoder never walks a type tree to answer either question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamType {
    kind: Kind,
    dynamic: bool,
    head_len: usize,
}

impl ParamType {
    /// Build a type node from its kind
    pub fn new(kind: Kind) -> Self {
        let dynamic = match &kind {
            Kind::Bytes | Kind::String | Kind::Array(_) => true,
            Kind::FixedArray(inner, _) => inner.dynamic,
            Kind::Tuple(fields) => fields.iter().any(|f| f.dynamic),
            _ => false,
        };
        let head_len = match &kind {
            _ if dynamic => WORD_SIZE,
            Kind::FixedArray(inner, len) => inner.head_len.saturating_mul(*len),
            Kind::Tuple(fields) => fields
                .iter()
                .fold(0usize, |acc, f| acc.saturating_add(f.head_len)),
            _ => WORD_SIZE,
        };
        Self {
            kind,
            dynamic,
            head_len,
        }
    }

    /// `address`
    pub fn address() -> Self {
        Self::new(Kind::Address)
    }

    /// `bool`
    pub fn bool() -> Self {
        Self::new(Kind::Bool)
    }

    /// `uint<bits>`
    pub fn uint(bits: usize) -> Self {
        Self::new(Kind::Uint(bits))
    }

    /// `int<bits>`
    pub fn int(bits: usize) -> Self {
        Self::new(Kind::Int(bits))
    }

    /// `bytes`
    pub fn bytes() -> Self {
        Self::new(Kind::Bytes)
    }

    /// `bytes<size>`
    pub fn fixed_bytes(size: usize) -> Self {
        Self::new(Kind::FixedBytes(size))
    }

    /// `string`
    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    /// `<inner>[]`
    pub fn array(inner: ParamType) -> Self {
        Self::new(Kind::Array(Box::new(inner)))
    }

    /// `<inner>[<len>]`
    pub fn fixed_array(inner: ParamType, len: usize) -> Self {
        Self::new(Kind::FixedArray(Box::new(inner), len))
    }

    /// `tuple(<fields>)`
    pub fn tuple(fields: Vec<ParamType>) -> Self {
        Self::new(Kind::Tuple(fields))
    }

    /// Shape of this type
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Bytes this type occupies in an enclosing head region
    pub fn head_len(&self) -> usize {
        self.head_len
    }

    /// Name as it appears in a function signature: tuples are written
    /// `(a,b)` rather than `tuple(a,b)`
    pub fn selector_name(&self) -> String {
        match &self.kind {
            Kind::Array(inner) => format!("{}[]", inner.selector_name()),
            Kind::FixedArray(inner, len) => format!("{}[{}]", inner.selector_name(), len),
            Kind::Tuple(fields) => {
                let fields: Vec<String> = fields.iter().map(|f| f.selector_name()).collect();
                format!("({})", fields.join(","))
            }
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Address => f.write_str("address"),
            Kind::Uint(bits) => write!(f, "uint{}", bits),
            Kind::Int(bits) => write!(f, "int{}", bits),
            Kind::Bool => f.write_str("bool"),
            Kind::Bytes => f.write_str("bytes"),
            Kind::FixedBytes(size) => write!(f, "bytes{}", size),
            Kind::String => f.write_str("string"),
            Kind::Array(inner) => write!(f, "{}[]", inner),
            Kind::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
            Kind::Tuple(fields) => {
                f.write_str("tuple(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", field)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_type(s)
    }
}

impl Token {
    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Get the type of this token
    ///
    /// Integers map to their 256-bit types and empty arrays to `uint256[]`.
    pub fn type_of(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::address(),
            Token::Uint(_) => ParamType::uint(256),
            Token::Int(_) => ParamType::int(256),
            Token::Bool(_) => ParamType::bool(),
            Token::Bytes(_) => ParamType::bytes(),
            Token::FixedBytes(b) => ParamType::fixed_bytes(b.len()),
            Token::String(_) => ParamType::string(),
            Token::Array(tokens) => {
                let inner = tokens.first().map(|t| t.type_of()).unwrap_or(ParamType::uint(256));
                ParamType::array(inner)
            }
            Token::FixedArray(tokens) => {
                let inner = tokens.first().map(|t| t.type_of()).unwrap_or(ParamType::uint(256));
                ParamType::fixed_array(inner, tokens.len())
            }
            Token::Tuple(tokens) => ParamType::tuple(tokens.iter().map(|t| t.type_of()).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::address().is_dynamic());
        assert!(!ParamType::uint(256).is_dynamic());
        assert!(!ParamType::bool().is_dynamic());
        assert!(!ParamType::fixed_bytes(32).is_dynamic());

        assert!(ParamType::bytes().is_dynamic());
        assert!(ParamType::string().is_dynamic());
        assert!(ParamType::array(ParamType::uint(256)).is_dynamic());
    }

    #[test]
    fn test_composite_classification() {
        let static_tuple = ParamType::tuple(vec![ParamType::fixed_bytes(32), ParamType::bool()]);
        assert!(!static_tuple.is_dynamic());
        assert_eq!(static_tuple.head_len(), 64);

        let dynamic_tuple = ParamType::tuple(vec![ParamType::bool(), ParamType::bytes()]);
        assert!(dynamic_tuple.is_dynamic());
        assert_eq!(dynamic_tuple.head_len(), 32);

        let static_array = ParamType::fixed_array(static_tuple.clone(), 3);
        assert!(!static_array.is_dynamic());
        assert_eq!(static_array.head_len(), 192);

        let dynamic_array = ParamType::fixed_array(ParamType::string(), 2);
        assert!(dynamic_array.is_dynamic());
        assert_eq!(dynamic_array.head_len(), 32);

        let nested = ParamType::tuple(vec![static_tuple, ParamType::tuple(vec![dynamic_tuple])]);
        assert!(nested.is_dynamic());
    }

    #[test]
    fn test_empty_tuple_is_static() {
        let empty = ParamType::tuple(vec![]);
        assert!(!empty.is_dynamic());
        assert_eq!(empty.head_len(), 0);
    }

    #[test]
    fn test_display_canonical() {
        let ty = ParamType::array(ParamType::tuple(vec![
            ParamType::bool(),
            ParamType::tuple(vec![ParamType::bytes(), ParamType::address()]),
        ]));
        assert_eq!(ty.to_string(), "tuple(bool,tuple(bytes,address))[]");
        assert_eq!(
            ParamType::fixed_array(ParamType::uint(64), 2).to_string(),
            "uint64[2]"
        );
        assert_eq!(ty.selector_name(), "(bool,(bytes,address))[]");
    }

    #[test]
    fn test_token_type_of() {
        assert_eq!(Token::Address(Address::ZERO).type_of(), ParamType::address());
        assert_eq!(Token::Uint(U256::zero()).type_of(), ParamType::uint(256));
        assert_eq!(Token::Bool(true).type_of(), ParamType::bool());
        assert_eq!(
            Token::FixedBytes(vec![1, 2, 3]).type_of(),
            ParamType::fixed_bytes(3)
        );
        assert_eq!(
            Token::Array(vec![]).type_of(),
            ParamType::array(ParamType::uint(256))
        );
    }

    #[test]
    fn test_i256_from_i128() {
        let positive = I256::from_i128(100);
        assert!(!positive.negative);
        assert_eq!(positive.abs, U256::from(100));

        let negative = I256::from_i128(-100);
        assert!(negative.negative);
        assert_eq!(negative.abs, U256::from(100));

        let zero = I256::from_i128(0);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_i256_negative_zero_collapses() {
        let zero = I256::new(U256::zero(), true);
        assert!(!zero.negative);
        assert_eq!(zero, I256::default());
    }

    #[test]
    fn test_i256_fits_bits() {
        assert!(I256::from_i128(127).fits_bits(8));
        assert!(!I256::from_i128(128).fits_bits(8));
        assert!(I256::from_i128(-128).fits_bits(8));
        assert!(!I256::from_i128(-129).fits_bits(8));

        let max = I256::new((U256::one() << 255) - U256::one(), false);
        let min = I256::new(U256::one() << 255, true);
        assert!(max.fits_bits(256));
        assert!(min.fits_bits(256));
        assert!(!I256::new(U256::one() << 255, false).fits_bits(256));
    }

    #[test]
    fn test_i256_display() {
        assert_eq!(I256::from_i128(-12451).to_string(), "-12451");
        assert_eq!(I256::from_i128(5).to_string(), "5");
    }
}

//! Error types for the Library of Babel generator.
//!
//! Two families live here. [`BabelError`] is returned per request and never
//! leaves the library in a bad state. [`ConfigError`] is only produced while a
//! [`LibraryConfig`](crate::config::LibraryConfig) is validated at start-up;
//! a library that was built successfully can never produce one.

use thiserror::Error;

/// Errors produced while generating or locating a page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BabelError {
    /// The book number is not a non-negative decimal numeral.
    #[error("invalid book number: {input:?} is not a non-negative decimal numeral")]
    InvalidAddress { input: String },

    /// The book number needs more bytes than a book holds (strict policy only).
    #[error("book number needs {needed} bytes but a book holds {book_size}")]
    AddressOverflow { needed: usize, book_size: usize },

    /// The page index is outside `[0, page_count)`.
    #[error("page {page} is out of range, book has {page_count} pages")]
    PageOutOfRange { page: i64, page_count: usize },

    /// The alphabet has no glyph for a generated byte.
    #[error("byte 0x{byte:02x} has no glyph in the alphabet")]
    UnmappedByte { byte: u8 },

    /// A buffer does not have the book's fixed size.
    #[error("buffer length {actual} does not match book size {expected}")]
    BufferLength { expected: usize, actual: usize },

    /// A glyph in a search text is not part of the alphabet.
    #[error("glyph {glyph:?} is not part of the alphabet")]
    UnknownGlyph { glyph: char },

    /// A search text does not fit on one page.
    #[error("text of {len} glyphs does not fit on a page of {page_size}")]
    TextTooLong { len: usize, page_size: usize },
}

impl BabelError {
    /// Returns `true` when the caller supplied bad input.
    ///
    /// `false` means the library itself is misconfigured and the failure is a
    /// server-side fault.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, BabelError::UnmappedByte { .. })
    }
}

/// Fatal configuration errors raised before a library is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The cipher key is not an AES key size (16, 24 or 32 bytes).
    #[error("cipher key must be 16, 24 or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The IV is not exactly one cipher block.
    #[error("cipher IV must be {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// Book size is zero.
    #[error("book size must be positive")]
    ZeroBookSize,

    /// Page size is zero.
    #[error("page size must be positive")]
    ZeroPageSize,

    /// Book size is not a multiple of the cipher block size.
    #[error("book size {book_size} is not a multiple of the {block_size}-byte cipher block")]
    BookSizeNotBlockAligned { book_size: usize, block_size: usize },

    /// Page size does not evenly divide the book size.
    #[error("page size {page_size} does not divide book size {book_size}")]
    PageSizeDoesNotDivide { page_size: usize, book_size: usize },

    /// The alphabet has no symbols at all.
    #[error("alphabet has no symbols")]
    EmptyAlphabet,

    /// The alphabet is missing a glyph for a byte the cipher can produce.
    #[error("alphabet has no glyph for byte 0x{byte:02x}")]
    AlphabetNotTotal { byte: u8 },

    /// A hex-encoded key or IV could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for ConfigError {
    fn from(err: hex::FromHexError) -> Self {
        ConfigError::InvalidHex(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_address() {
        let err = BabelError::InvalidAddress {
            input: "12a".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "invalid book number: \"12a\" is not a non-negative decimal numeral"
        );
    }

    #[test]
    fn test_display_page_out_of_range() {
        let err = BabelError::PageOutOfRange {
            page: 4,
            page_count: 4,
        };
        assert_eq!(format!("{}", err), "page 4 is out of range, book has 4 pages");
    }

    #[test]
    fn test_display_unmapped_byte() {
        let err = BabelError::UnmappedByte { byte: 0xab };
        assert_eq!(format!("{}", err), "byte 0xab has no glyph in the alphabet");
    }

    #[test]
    fn test_caller_vs_server_fault() {
        assert!(BabelError::InvalidAddress {
            input: String::new()
        }
        .is_caller_error());
        assert!(BabelError::PageOutOfRange {
            page: -1,
            page_count: 4
        }
        .is_caller_error());
        assert!(!BabelError::UnmappedByte { byte: 0 }.is_caller_error());
    }

    #[test]
    fn test_display_config_errors() {
        assert_eq!(
            format!("{}", ConfigError::InvalidKeyLength(7)),
            "cipher key must be 16, 24 or 32 bytes, got 7"
        );
        assert_eq!(
            format!(
                "{}",
                ConfigError::PageSizeDoesNotDivide {
                    page_size: 3,
                    book_size: 32
                }
            ),
            "page size 3 does not divide book size 32"
        );
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: ConfigError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, ConfigError::InvalidHex(_)));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(ConfigError::ZeroBookSize, ConfigError::ZeroBookSize);
        assert_ne!(ConfigError::ZeroBookSize, ConfigError::ZeroPageSize);
    }
}

//! AddressEncoder: book numbers to fixed-size book buffers and back.
//!
//! A book number is an arbitrary-precision non-negative integer written in
//! decimal. Its minimal big-endian magnitude is right-aligned in a buffer of
//! exactly `book_size` bytes, with zero bytes in front.

use num_bigint::BigUint;
use tracing::warn;

use crate::error::BabelError;
use crate::utils::converter;

/// What to do with a book number whose magnitude needs more than `book_size` bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressPolicy {
    /// Keep only the least-significant `book_size` bytes.
    #[default]
    Truncate,
    /// Fail with [`BabelError::AddressOverflow`].
    Reject,
}

/// A byte buffer of exactly one book's size; the unit of scrambling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedBuffer {
    bytes: Vec<u8>,
}

impl FixedBuffer {
    /// Wraps `bytes`, checking that it holds exactly `book_size` bytes.
    ///
    /// # Errors
    /// Returns [`BabelError::BufferLength`] on a size mismatch.
    pub fn from_bytes(bytes: Vec<u8>, book_size: usize) -> Result<Self, BabelError> {
        if bytes.len() != book_size {
            return Err(BabelError::BufferLength {
                expected: book_size,
                actual: bytes.len(),
            });
        }
        Ok(FixedBuffer { bytes })
    }

    /// Returns an all-zero buffer of `book_size` bytes.
    pub fn zeroed(book_size: usize) -> Self {
        FixedBuffer {
            bytes: vec![0u8; book_size],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for FixedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Parses a book number, accepting ASCII digits only.
///
/// Leading zeros are allowed. Signs, whitespace, separators and the empty
/// string are rejected.
pub fn parse_book_number(book: &str) -> Result<BigUint, BabelError> {
    let invalid = || BabelError::InvalidAddress {
        input: book.to_string(),
    };
    if book.is_empty() || !book.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    BigUint::parse_bytes(book.as_bytes(), 10).ok_or_else(invalid)
}

/// Encodes a decimal book number into a [`FixedBuffer`] of `book_size` bytes.
///
/// # Parameters
/// - `book`: Decimal numeral, arbitrary length.
/// - `book_size`: Bytes per book.
/// - `policy`: Handling of numbers wider than `book_size` bytes.
///
/// # Errors
/// - [`BabelError::InvalidAddress`] if `book` is not a decimal numeral.
/// - [`BabelError::AddressOverflow`] if the number is too wide and `policy`
///   is [`AddressPolicy::Reject`].
///
/// # Examples
///
/// ```
/// use babel_library::{encode_address, AddressPolicy};
///
/// let buffer = encode_address("258", 4, AddressPolicy::Truncate).unwrap();
/// assert_eq!(buffer.as_bytes(), &[0, 0, 1, 2]);
/// ```
pub fn encode_address(
    book: &str,
    book_size: usize,
    policy: AddressPolicy,
) -> Result<FixedBuffer, BabelError> {
    let number = parse_book_number(book)?;
    let magnitude = converter::minimal_be_bytes(&number);

    if magnitude.len() > book_size {
        match policy {
            AddressPolicy::Reject => {
                return Err(BabelError::AddressOverflow {
                    needed: magnitude.len(),
                    book_size,
                });
            }
            AddressPolicy::Truncate => {
                warn!(
                    needed = magnitude.len(),
                    book_size, "book number truncated to its low-order bytes"
                );
            }
        }
    }

    Ok(FixedBuffer {
        bytes: converter::right_align(&magnitude, book_size),
    })
}

/// Decodes a buffer back into its canonical decimal book number.
///
/// The result has no leading zeros; an all-zero buffer is `"0"`.
pub fn decode_address(buffer: &FixedBuffer) -> String {
    converter::be_bytes_to_biguint(buffer.as_bytes()).to_string()
}

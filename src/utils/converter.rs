//! Big-integer to fixed-width byte conversion utilities.
//!
//! Provides conversion between arbitrary-precision unsigned integers and
//! fixed-width big-endian byte buffers, where the integer's minimal
//! representation is right-aligned and padded with leading zero bytes.

use num_bigint::BigUint;

/// Returns the minimal big-endian byte representation of `value`.
///
/// Zero has no significant bytes and yields an empty vector (unlike
/// [`BigUint::to_bytes_be`], which yields `[0]`).
pub fn minimal_be_bytes(value: &BigUint) -> Vec<u8> {
    if value.bits() == 0 {
        return Vec::new();
    }
    value.to_bytes_be()
}

/// Right-aligns `bytes` in a zero-filled buffer of exactly `width` bytes.
///
/// When `bytes` is longer than `width`, only its trailing (least-significant)
/// `width` bytes are kept.
///
/// # Parameters
/// - `bytes`: Big-endian magnitude bytes.
/// - `width`: Length of the output buffer.
///
/// # Returns
/// A `Vec<u8>` of length `width`.
pub fn right_align(bytes: &[u8], width: usize) -> Vec<u8> {
    let mut output = vec![0u8; width];
    if bytes.len() >= width {
        output.copy_from_slice(&bytes[bytes.len() - width..]);
    } else {
        output[width - bytes.len()..].copy_from_slice(bytes);
    }
    output
}

/// Interprets a big-endian byte buffer as an unsigned integer.
///
/// Leading zero bytes are insignificant; an empty or all-zero buffer is zero.
pub fn be_bytes_to_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

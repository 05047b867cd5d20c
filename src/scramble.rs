//! Scrambler: the reversible mixing transform applied to a whole book.
//!
//! The forward transform runs AES-CBC over the entire buffer, reverses the
//! result end to end, and runs AES-CBC over it again with the same key and
//! IV. After the second pass every output byte depends on bytes from both
//! ends of the input, so any page-sized window looks uniformly random.
//!
//! ```text
//! buffer ──CBC(key, iv)──▶ E1 ──reverse──▶ E1' ──CBC(key, iv)──▶ scrambled
//! ```
//!
//! The construction is fixed: changing any step changes every book.

use std::fmt;

use aes::cipher::block_padding::NoPadding;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};

use crate::address::FixedBuffer;
use crate::error::{BabelError, ConfigError};

/// AES block size in bytes. Book sizes and the IV are measured against it.
pub const BLOCK_SIZE: usize = 16;

#[derive(Clone)]
enum CipherKey {
    Aes128([u8; 16]),
    Aes192([u8; 24]),
    Aes256([u8; 32]),
}

impl CipherKey {
    fn from_slice(key: &[u8]) -> Result<Self, ConfigError> {
        let invalid = |_| ConfigError::InvalidKeyLength(key.len());
        match key.len() {
            16 => Ok(CipherKey::Aes128(key.try_into().map_err(invalid)?)),
            24 => Ok(CipherKey::Aes192(key.try_into().map_err(invalid)?)),
            32 => Ok(CipherKey::Aes256(key.try_into().map_err(invalid)?)),
            len => Err(ConfigError::InvalidKeyLength(len)),
        }
    }

    fn bits(&self) -> usize {
        match self {
            CipherKey::Aes128(_) => 128,
            CipherKey::Aes192(_) => 192,
            CipherKey::Aes256(_) => 256,
        }
    }
}

/// Forward and inverse two-pass CBC transform under a fixed key and IV.
///
/// Immutable after construction; one instance is shared by every request.
#[derive(Clone)]
pub struct Scrambler {
    key: CipherKey,
    iv: [u8; BLOCK_SIZE],
}

impl fmt::Debug for Scrambler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scrambler")
            .field("key_bits", &self.key.bits())
            .finish_non_exhaustive()
    }
}

impl Scrambler {
    /// Initializes the cipher with a fixed key and IV.
    ///
    /// The key length picks the cipher: 16 bytes AES-128, 24 bytes AES-192,
    /// 32 bytes AES-256.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidKeyLength`] for any other key length.
    /// - [`ConfigError::InvalidIvLength`] if `iv` is not one 16-byte block.
    ///
    /// # Examples
    ///
    /// ```
    /// use babel_library::Scrambler;
    ///
    /// assert!(Scrambler::new(&[7u8; 16], &[9u8; 16]).is_ok());
    /// assert!(Scrambler::new(&[7u8; 15], &[9u8; 16]).is_err());
    /// ```
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, ConfigError> {
        let key = CipherKey::from_slice(key)?;
        let iv: [u8; BLOCK_SIZE] = iv.try_into().map_err(|_| ConfigError::InvalidIvLength {
            expected: BLOCK_SIZE,
            actual: iv.len(),
        })?;
        Ok(Scrambler { key, iv })
    }

    /// Returns the key size in bits.
    pub fn key_bits(&self) -> usize {
        self.key.bits()
    }

    /// Scrambles a book buffer.
    ///
    /// Pure function of `(key, iv, buffer)`.
    ///
    /// # Errors
    /// Returns [`BabelError::BufferLength`] if the buffer is not a whole
    /// number of cipher blocks.
    pub fn scramble(&self, mut buffer: FixedBuffer) -> Result<FixedBuffer, BabelError> {
        self.scramble_in_place(buffer.as_mut_bytes())?;
        Ok(buffer)
    }

    /// Inverse of [`scramble`](Self::scramble).
    pub fn unscramble(&self, mut buffer: FixedBuffer) -> Result<FixedBuffer, BabelError> {
        self.unscramble_in_place(buffer.as_mut_bytes())?;
        Ok(buffer)
    }

    /// Scrambles `bytes` in place: CBC encrypt, reverse, CBC encrypt.
    pub fn scramble_in_place(&self, bytes: &mut [u8]) -> Result<(), BabelError> {
        check_aligned(bytes)?;
        self.encrypt_pass(bytes)?;
        bytes.reverse();
        self.encrypt_pass(bytes)
    }

    /// Unscrambles `bytes` in place: CBC decrypt, reverse, CBC decrypt.
    pub fn unscramble_in_place(&self, bytes: &mut [u8]) -> Result<(), BabelError> {
        check_aligned(bytes)?;
        self.decrypt_pass(bytes)?;
        bytes.reverse();
        self.decrypt_pass(bytes)
    }

    /// One CBC encryption pass with a fresh chain starting at the IV.
    fn encrypt_pass(&self, bytes: &mut [u8]) -> Result<(), BabelError> {
        let len = bytes.len();
        let iv = GenericArray::from_slice(&self.iv);
        let result = match &self.key {
            CipherKey::Aes128(key) => {
                cbc::Encryptor::<Aes128>::new(GenericArray::from_slice(key), iv)
                    .encrypt_padded_mut::<NoPadding>(bytes, len)
                    .map(|_| ())
            }
            CipherKey::Aes192(key) => {
                cbc::Encryptor::<Aes192>::new(GenericArray::from_slice(key), iv)
                    .encrypt_padded_mut::<NoPadding>(bytes, len)
                    .map(|_| ())
            }
            CipherKey::Aes256(key) => {
                cbc::Encryptor::<Aes256>::new(GenericArray::from_slice(key), iv)
                    .encrypt_padded_mut::<NoPadding>(bytes, len)
                    .map(|_| ())
            }
        };
        result.map_err(|_| misaligned(len))
    }

    /// One CBC decryption pass with a fresh chain starting at the IV.
    fn decrypt_pass(&self, bytes: &mut [u8]) -> Result<(), BabelError> {
        let len = bytes.len();
        let iv = GenericArray::from_slice(&self.iv);
        let result = match &self.key {
            CipherKey::Aes128(key) => {
                cbc::Decryptor::<Aes128>::new(GenericArray::from_slice(key), iv)
                    .decrypt_padded_mut::<NoPadding>(bytes)
                    .map(|_| ())
            }
            CipherKey::Aes192(key) => {
                cbc::Decryptor::<Aes192>::new(GenericArray::from_slice(key), iv)
                    .decrypt_padded_mut::<NoPadding>(bytes)
                    .map(|_| ())
            }
            CipherKey::Aes256(key) => {
                cbc::Decryptor::<Aes256>::new(GenericArray::from_slice(key), iv)
                    .decrypt_padded_mut::<NoPadding>(bytes)
                    .map(|_| ())
            }
        };
        result.map_err(|_| misaligned(len))
    }
}

fn check_aligned(bytes: &[u8]) -> Result<(), BabelError> {
    if !bytes.len().is_multiple_of(BLOCK_SIZE) {
        return Err(misaligned(bytes.len()));
    }
    Ok(())
}

fn misaligned(len: usize) -> BabelError {
    BabelError::BufferLength {
        expected: len.next_multiple_of(BLOCK_SIZE),
        actual: len,
    }
}

//! Library configuration.
//!
//! A [`LibraryConfig`] is built once at start-up, validated, and handed to
//! [`Library::new`](crate::Library::new). Nothing in it can change afterwards.

use crate::address::AddressPolicy;
use crate::alphabet::Alphabet;
use crate::error::ConfigError;
use crate::scramble::BLOCK_SIZE;

/// Glyphs per page in the classic library (80 lines of 40 glyphs).
pub const DEFAULT_PAGE_SIZE: usize = 3200;

/// Pages per book in the classic library.
pub const DEFAULT_PAGES_PER_BOOK: usize = 410;

/// Bytes per book: 410 pages of 3200 glyphs.
pub const DEFAULT_BOOK_SIZE: usize = DEFAULT_PAGE_SIZE * DEFAULT_PAGES_PER_BOOK;

/// Fixed AES-128 key of the default library.
pub const DEFAULT_KEY: [u8; 16] = [
    0x4c, 0x69, 0x62, 0x72, 0x61, 0x72, 0x79, 0x20, 0x6f, 0x66, 0x20, 0x42, 0x61, 0x62, 0x65, 0x6c,
];

/// Fixed CBC IV of the default library.
pub const DEFAULT_IV: [u8; 16] = [
    0x4a, 0x2e, 0x4c, 0x2e, 0x42, 0x6f, 0x72, 0x67, 0x65, 0x73, 0x2c, 0x20, 0x31, 0x39, 0x34, 0x31,
];

/// Process-wide generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    book_size: usize,
    page_size: usize,
    key: Vec<u8>,
    iv: Vec<u8>,
    alphabet: Alphabet,
    address_policy: AddressPolicy,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig {
            book_size: DEFAULT_BOOK_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            key: DEFAULT_KEY.to_vec(),
            iv: DEFAULT_IV.to_vec(),
            alphabet: Alphabet::default(),
            address_policy: AddressPolicy::default(),
        }
    }
}

impl LibraryConfig {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book_size(mut self, book_size: usize) -> Self {
        self.book_size = book_size;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_iv(mut self, iv: impl Into<Vec<u8>>) -> Self {
        self.iv = iv.into();
        self
    }

    /// Sets the key from a hex string.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHex`] if `key` is not valid hex.
    pub fn with_key_hex(self, key: &str) -> Result<Self, ConfigError> {
        Ok(self.with_key(hex::decode(key)?))
    }

    /// Sets the IV from a hex string.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHex`] if `iv` is not valid hex.
    pub fn with_iv_hex(self, iv: &str) -> Result<Self, ConfigError> {
        Ok(self.with_iv(hex::decode(iv)?))
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_address_policy(mut self, policy: AddressPolicy) -> Self {
        self.address_policy = policy;
        self
    }

    pub fn book_size(&self) -> usize {
        self.book_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn address_policy(&self) -> AddressPolicy {
        self.address_policy
    }

    /// Number of pages per book. Only meaningful on a validated config.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.book_size / self.page_size
    }

    /// Checks every start-up invariant.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidKeyLength`] / [`ConfigError::InvalidIvLength`]
    ///   if the cipher cannot be initialized.
    /// - [`ConfigError::ZeroBookSize`] / [`ConfigError::ZeroPageSize`].
    /// - [`ConfigError::BookSizeNotBlockAligned`] if the book is not a whole
    ///   number of cipher blocks.
    /// - [`ConfigError::PageSizeDoesNotDivide`] if pages do not tile the book.
    /// - [`ConfigError::AlphabetNotTotal`] if a byte value has no glyph.
    ///
    /// # Examples
    ///
    /// ```
    /// use babel_library::LibraryConfig;
    ///
    /// assert!(LibraryConfig::default().validate().is_ok());
    /// assert!(LibraryConfig::default().with_page_size(3).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.key.len(), 16 | 24 | 32) {
            return Err(ConfigError::InvalidKeyLength(self.key.len()));
        }
        if self.iv.len() != BLOCK_SIZE {
            return Err(ConfigError::InvalidIvLength {
                expected: BLOCK_SIZE,
                actual: self.iv.len(),
            });
        }
        if self.book_size == 0 {
            return Err(ConfigError::ZeroBookSize);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if !self.book_size.is_multiple_of(BLOCK_SIZE) {
            return Err(ConfigError::BookSizeNotBlockAligned {
                book_size: self.book_size,
                block_size: BLOCK_SIZE,
            });
        }
        if !self.book_size.is_multiple_of(self.page_size) {
            return Err(ConfigError::PageSizeDoesNotDivide {
                page_size: self.page_size,
                book_size: self.book_size,
            });
        }
        self.alphabet.ensure_total()
    }
}

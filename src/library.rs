//! Library: the page generator behind `GenerateBookPage`.
//!
//! Ties the pieces together for one validated configuration:
//!
//! ```text
//! book number ──encode──▶ FixedBuffer ──scramble──▶ scrambled book
//!                                                     │
//!                                     page slice ◀────┘
//!                                         │
//!                                         ▼ alphabet
//!                                       text
//! ```
//!
//! [`Library::locate`] walks the same path backwards: text to bytes,
//! unscramble, decode to a book number.

use tracing::{debug, trace};

use crate::address::{self, FixedBuffer};
use crate::config::LibraryConfig;
use crate::error::{BabelError, ConfigError};
use crate::page;
use crate::scramble::Scrambler;

/// Deterministic generator for every page of every book.
///
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Library {
    config: LibraryConfig,
    scrambler: Scrambler,
}

impl Library {
    /// Validates `config` and initializes the cipher.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found; a library is never built from
    /// an invalid configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use babel_library::{Library, LibraryConfig};
    ///
    /// let library = Library::new(LibraryConfig::default()).unwrap();
    /// assert_eq!(library.page_count(), 410);
    /// ```
    pub fn new(config: LibraryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scrambler = Scrambler::new(config.key(), config.iv())?;
        debug!(
            book_size = config.book_size(),
            page_size = config.page_size(),
            pages = config.page_count(),
            key_bits = scrambler.key_bits(),
            "library initialized"
        );
        Ok(Library { config, scrambler })
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn scrambler(&self) -> &Scrambler {
        &self.scrambler
    }

    pub fn book_size(&self) -> usize {
        self.config.book_size()
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.config.page_count()
    }

    /// Encodes a book number under the configured address policy.
    pub fn encode(&self, book: &str) -> Result<FixedBuffer, BabelError> {
        address::encode_address(book, self.book_size(), self.config.address_policy())
    }

    /// Encodes and scrambles a whole book.
    pub fn scrambled_book(&self, book: &str) -> Result<FixedBuffer, BabelError> {
        let buffer = self.encode(book)?;
        self.scrambler.scramble(buffer)
    }

    /// Recovers the raw buffer of a scrambled book.
    ///
    /// # Errors
    /// Returns [`BabelError::BufferLength`] if `scrambled` is not one book long.
    pub fn unscramble(&self, scrambled: FixedBuffer) -> Result<FixedBuffer, BabelError> {
        self.check_len(&scrambled)?;
        self.scrambler.unscramble(scrambled)
    }

    /// Returns the text of `page` in `book`.
    ///
    /// # Errors
    /// - [`BabelError::InvalidAddress`] if `book` is not a decimal numeral.
    /// - [`BabelError::AddressOverflow`] if `book` is too wide under the
    ///   rejecting policy.
    /// - [`BabelError::PageOutOfRange`] if `page` is not in `[0, page_count)`.
    /// - [`BabelError::UnmappedByte`] if the alphabet misses a generated byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use babel_library::{BabelError, Library, LibraryConfig};
    ///
    /// let config = LibraryConfig::default().with_book_size(64).with_page_size(16);
    /// let library = Library::new(config).unwrap();
    ///
    /// let text = library.generate_book_page("42", 3).unwrap();
    /// assert_eq!(text.chars().count(), 16);
    /// assert_eq!(library.generate_book_page("42", 3).unwrap(), text);
    /// assert!(matches!(
    ///     library.generate_book_page("42", 4),
    ///     Err(BabelError::PageOutOfRange { .. })
    /// ));
    /// ```
    pub fn generate_book_page(&self, book: &str, page: i64) -> Result<String, BabelError> {
        let buffer = self.encode(book)?;
        page::page_range(page, self.book_size(), self.page_size())?;
        let scrambled = self.scrambler.scramble(buffer)?;
        let text = self.render(&scrambled, page)?;
        trace!(page, book_digits = book.len(), "page generated");
        Ok(text)
    }

    /// Renders `page` of an already scrambled book.
    pub fn render(&self, scrambled: &FixedBuffer, page: i64) -> Result<String, BabelError> {
        self.check_len(scrambled)?;
        page::render_page(scrambled, page, self.page_size(), self.config.alphabet())
    }

    /// Returns every page of `book`, in order, from a single scramble.
    pub fn generate_book(&self, book: &str) -> Result<Vec<String>, BabelError> {
        let scrambled = self.scrambled_book(book)?;
        self.render_all(&scrambled)
    }

    pub(crate) fn render_all(&self, scrambled: &FixedBuffer) -> Result<Vec<String>, BabelError> {
        let alphabet = self.config.alphabet();
        scrambled
            .as_bytes()
            .chunks_exact(self.page_size())
            .map(|page| alphabet.translate(page))
            .collect()
    }

    /// Finds the book whose `page` starts with `text`.
    ///
    /// Each glyph becomes its smallest byte value; the rest of the scrambled
    /// book is zero. The returned number is canonical decimal.
    ///
    /// # Errors
    /// - [`BabelError::UnknownGlyph`] if `text` uses a glyph outside the alphabet.
    /// - [`BabelError::TextTooLong`] if `text` has more glyphs than a page.
    /// - [`BabelError::PageOutOfRange`] for an invalid page index.
    ///
    /// # Examples
    ///
    /// ```
    /// use babel_library::{Library, LibraryConfig};
    ///
    /// let config = LibraryConfig::default().with_book_size(64).with_page_size(16);
    /// let library = Library::new(config).unwrap();
    ///
    /// let book = library.locate("hello world", 2).unwrap();
    /// assert!(library.generate_book_page(&book, 2).unwrap().starts_with("hello world"));
    /// ```
    pub fn locate(&self, text: &str, page: i64) -> Result<String, BabelError> {
        let range = page::page_range(page, self.book_size(), self.page_size())?;
        let len = text.chars().count();
        if len > self.page_size() {
            return Err(BabelError::TextTooLong {
                len,
                page_size: self.page_size(),
            });
        }

        let alphabet = self.config.alphabet();
        let mut scrambled = FixedBuffer::zeroed(self.book_size());
        let window = &mut scrambled.as_mut_bytes()[range];
        for (slot, glyph) in window.iter_mut().zip(text.chars()) {
            *slot = alphabet
                .byte_for(glyph)
                .ok_or(BabelError::UnknownGlyph { glyph })?;
        }

        let raw = self.scrambler.unscramble(scrambled)?;
        let book = address::decode_address(&raw);
        debug!(page, glyphs = len, book_digits = book.len(), "text located");
        Ok(book)
    }

    /// Checks that scrambling `book` and unscrambling it restores the buffer.
    pub fn verify(&self, book: &str) -> Result<bool, BabelError> {
        let buffer = self.encode(book)?;
        let scrambled = self.scrambler.scramble(buffer.clone())?;
        Ok(self.scrambler.unscramble(scrambled)? == buffer)
    }

    fn check_len(&self, buffer: &FixedBuffer) -> Result<(), BabelError> {
        if buffer.len() != self.book_size() {
            return Err(BabelError::BufferLength {
                expected: self.book_size(),
                actual: buffer.len(),
            });
        }
        Ok(())
    }
}

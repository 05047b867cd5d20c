//! Byte-to-glyph alphabet.
//!
//! Every byte of a scrambled book is shown as exactly one glyph. The table
//! covers all 256 byte values; a config is only accepted once the table is
//! total (see [`Alphabet::first_unmapped`]), so rendering a page from a built
//! library never hits a missing entry.

use crate::error::{BabelError, ConfigError};

/// Glyphs of the classic library: 26 lowercase letters, comma, space, period.
pub const DEFAULT_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz, .";

/// Number of distinct byte values.
const BYTE_VALUES: usize = 256;

/// Mapping from byte value to a single displayable glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    table: [Option<char>; BYTE_VALUES],
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_SYMBOLS.chars().collect();
        Self::cycle(&symbols)
    }
}

impl Alphabet {
    /// Builds a total alphabet where byte `b` maps to `symbols[b % symbols.len()]`.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyAlphabet`] if `symbols` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use babel_library::Alphabet;
    ///
    /// let alphabet = Alphabet::modulo("ab").unwrap();
    /// assert_eq!(alphabet.glyph(0).unwrap(), 'a');
    /// assert_eq!(alphabet.glyph(255).unwrap(), 'b');
    /// ```
    pub fn modulo(symbols: &str) -> Result<Self, ConfigError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self::cycle(&symbols))
    }

    /// Builds an alphabet from explicit `(byte, glyph)` entries.
    ///
    /// Bytes without an entry stay unmapped. Later entries for the same byte
    /// replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u8, char)>,
    {
        let mut table = [None; BYTE_VALUES];
        for (byte, glyph) in entries {
            table[byte as usize] = Some(glyph);
        }
        Alphabet { table }
    }

    fn cycle(symbols: &[char]) -> Self {
        let mut table = [None; BYTE_VALUES];
        for (byte, slot) in table.iter_mut().enumerate() {
            *slot = Some(symbols[byte % symbols.len()]);
        }
        Alphabet { table }
    }

    /// Returns the glyph for `byte`.
    ///
    /// # Errors
    /// Returns [`BabelError::UnmappedByte`] if the byte has no entry.
    pub fn glyph(&self, byte: u8) -> Result<char, BabelError> {
        self.table[byte as usize].ok_or(BabelError::UnmappedByte { byte })
    }

    /// Translates bytes to text, one glyph per byte, in order.
    pub fn translate(&self, bytes: &[u8]) -> Result<String, BabelError> {
        bytes.iter().map(|&byte| self.glyph(byte)).collect()
    }

    /// Returns the smallest byte value that renders as `glyph`.
    pub fn byte_for(&self, glyph: char) -> Option<u8> {
        self.table
            .iter()
            .position(|entry| *entry == Some(glyph))
            .map(|pos| pos as u8)
    }

    /// Returns the first byte value with no glyph, or `None` if the table is total.
    pub fn first_unmapped(&self) -> Option<u8> {
        self.table
            .iter()
            .position(Option::is_none)
            .map(|pos| pos as u8)
    }

    /// Returns `true` if every byte value has a glyph.
    pub fn is_total(&self) -> bool {
        self.first_unmapped().is_none()
    }

    /// Checks totality, for use during config validation.
    pub(crate) fn ensure_total(&self) -> Result<(), ConfigError> {
        match self.first_unmapped() {
            Some(byte) => Err(ConfigError::AlphabetNotTotal { byte }),
            None => Ok(()),
        }
    }
}

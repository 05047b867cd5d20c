//! Page extraction and rendering.
//!
//! A book of `book_size` bytes is tiled by `book_size / page_size` pages.
//! Page `n` covers bytes `[n * page_size, (n + 1) * page_size)` of the
//! scrambled book, rendered one glyph per byte in order.

use std::ops::Range;

use crate::address::FixedBuffer;
use crate::alphabet::Alphabet;
use crate::error::BabelError;

/// Number of whole pages in a book.
pub fn page_count(book_size: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    book_size / page_size
}

/// Byte range covered by `page`.
///
/// # Errors
/// Returns [`BabelError::PageOutOfRange`] if `page` is negative or the page
/// would end past `book_size`.
pub fn page_range(
    page: i64,
    book_size: usize,
    page_size: usize,
) -> Result<Range<usize>, BabelError> {
    let out_of_range = || BabelError::PageOutOfRange {
        page,
        page_count: page_count(book_size, page_size),
    };
    let index = usize::try_from(page).map_err(|_| out_of_range())?;
    let start = index.checked_mul(page_size).ok_or_else(out_of_range)?;
    let end = start.checked_add(page_size).ok_or_else(out_of_range)?;
    if page_size == 0 || end > book_size {
        return Err(out_of_range());
    }
    Ok(start..end)
}

/// Renders one page of a scrambled book as text.
///
/// # Errors
/// - [`BabelError::PageOutOfRange`] for an invalid page index.
/// - [`BabelError::UnmappedByte`] if the alphabet lacks a generated byte.
pub fn render_page(
    scrambled: &FixedBuffer,
    page: i64,
    page_size: usize,
    alphabet: &Alphabet,
) -> Result<String, BabelError> {
    let range = page_range(page, scrambled.len(), page_size)?;
    alphabet.translate(&scrambled.as_bytes()[range])
}

//! Read-through cache of scrambled books.
//!
//! Scrambling the whole book dominates the cost of a page request, and
//! readers tend to page through one book at a time. [`CachedLibrary`] keeps
//! the most recently scrambled books in a bounded LRU keyed by the encoded
//! book buffer, so numerals with leading zeros share an entry.
//!
//! Results are identical to the wrapped [`Library`]; only timing changes.
//! Each entry holds two book-sized buffers (key and value).

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

use crate::address::FixedBuffer;
use crate::error::BabelError;
use crate::library::Library;
use crate::page;

/// A [`Library`] with a bounded cache of scrambled books.
pub struct CachedLibrary {
    library: Library,
    books: Mutex<LruCache<FixedBuffer, Arc<FixedBuffer>>>,
}

impl CachedLibrary {
    /// Wraps `library`, caching up to `capacity` scrambled books.
    pub fn new(library: Library, capacity: NonZeroUsize) -> Self {
        CachedLibrary {
            library,
            books: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Number of books currently cached.
    pub fn len(&self) -> usize {
        self.books.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.lock().is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.books.lock().cap()
    }

    pub fn clear(&self) {
        self.books.lock().clear();
    }

    /// Returns the scrambled book, computing and caching it on a miss.
    pub fn scrambled_book(&self, book: &str) -> Result<Arc<FixedBuffer>, BabelError> {
        let key = self.library.encode(book)?;
        self.lookup(key)
    }

    /// Cached equivalent of [`Library::generate_book_page`].
    pub fn generate_book_page(&self, book: &str, page: i64) -> Result<String, BabelError> {
        let key = self.library.encode(book)?;
        page::page_range(page, self.library.book_size(), self.library.page_size())?;
        let scrambled = self.lookup(key)?;
        self.library.render(&scrambled, page)
    }

    /// Cached equivalent of [`Library::generate_book`].
    pub fn generate_book(&self, book: &str) -> Result<Vec<String>, BabelError> {
        let scrambled = self.scrambled_book(book)?;
        self.library.render_all(&scrambled)
    }

    // The lock is not held while scrambling; two threads missing on the same
    // book both compute it and the later insert wins.
    fn lookup(&self, key: FixedBuffer) -> Result<Arc<FixedBuffer>, BabelError> {
        if let Some(hit) = self.books.lock().get(&key) {
            trace!("book cache hit");
            return Ok(Arc::clone(hit));
        }

        trace!("book cache miss");
        let scrambled = Arc::new(self.library.scrambler().scramble(key.clone())?);
        self.books.lock().put(key, Arc::clone(&scrambled));
        Ok(scrambled)
    }
}

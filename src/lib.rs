//! Deterministic Library of Babel page generator.
//!
//! Every possible book already exists: a book is addressed by an arbitrarily
//! large integer, and its text is computed on demand from that address. No
//! book is ever stored.
//!
//! # Architecture
//!
//! ```text
//! AddressEncoder  (decimal book number -> fixed-size big-endian buffer)
//!     ↓
//! Scrambler       (AES-CBC pass, byte reversal, AES-CBC pass)
//!     ↓
//! page slice      (bytes [n * PageSize, (n + 1) * PageSize))
//!     ↓
//! Alphabet        (one glyph per byte)
//! ```
//!
//! All configuration lives in a [`LibraryConfig`] validated once at start-up.
//! A [`Library`] built from it is immutable and can be shared freely between
//! threads; [`CachedLibrary`] adds an optional read-through cache.
//!
//! The cipher only mixes bytes. Key and IV are fixed public parameters, not
//! secrets.
//!
//! # Examples
//!
//! Read a page, then find the book that contains a given text:
//!
//! ```
//! use babel_library::{Library, LibraryConfig};
//!
//! let config = LibraryConfig::default().with_book_size(320).with_page_size(32);
//! let library = Library::new(config).unwrap();
//!
//! let page = library.generate_book_page("1234567890", 0).unwrap();
//! assert_eq!(page.chars().count(), 32);
//!
//! let book = library.locate("in the beginning", 9).unwrap();
//! let text = library.generate_book_page(&book, 9).unwrap();
//! assert!(text.starts_with("in the beginning"));
//! ```
//!
//! Out-of-range pages are request errors:
//!
//! ```
//! use babel_library::{BabelError, Library, LibraryConfig};
//!
//! let library = Library::new(LibraryConfig::default()).unwrap();
//! assert!(matches!(
//!     library.generate_book_page("7", 410),
//!     Err(BabelError::PageOutOfRange { page: 410, page_count: 410 })
//! ));
//! ```

#![deny(clippy::all)]

pub mod address;
pub mod alphabet;
pub mod cache;
pub mod config;
pub mod error;
pub mod library;
pub mod page;
pub mod scramble;
pub mod utils;

pub use address::{decode_address, encode_address, AddressPolicy, FixedBuffer};
pub use alphabet::Alphabet;
pub use cache::CachedLibrary;
pub use config::LibraryConfig;
pub use error::{BabelError, ConfigError};
pub use library::Library;
pub use page::render_page;
pub use scramble::Scrambler;

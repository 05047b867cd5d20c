//! Frozen-output regression tests for the public API.
//!
//! Every book's content is a pure function of its number and the library
//! constants, so any change to these expected values changes the text of
//! every book already handed out. All expected values are frozen snapshots:
//! any change in output is a regression.
//!
//! Coverage:
//! - `Scrambler` (two-pass CBC with reversal)
//! - `Library::generate_book_page` / `generate_book`
//! - `Library::locate`
//! - `LibraryConfig::default()` constants
//! - `encode_address` / `decode_address`

use babel_library::{
    decode_address, encode_address, AddressPolicy, FixedBuffer, Library, LibraryConfig, Scrambler,
};

const TEST_KEY: [u8; 16] = *b"0123456789abcdef";
const TEST_IV: [u8; 16] = *b"fedcba9876543210";

fn test_library(book_size: usize, page_size: usize) -> Library {
    let config = LibraryConfig::default()
        .with_book_size(book_size)
        .with_page_size(page_size)
        .with_key(TEST_KEY)
        .with_iv(TEST_IV);
    Library::new(config).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Scrambler — raw byte snapshots
// ═══════════════════════════════════════════════════════════════════════

/// Two zero blocks through the full transform.
#[test]
fn scramble_zero_blocks_frozen() {
    let scrambler = Scrambler::new(&TEST_KEY, &TEST_IV).unwrap();
    let mut bytes = [0u8; 32];
    scrambler.scramble_in_place(&mut bytes).unwrap();
    assert_eq!(
        hex::encode(bytes),
        "e042448d82003a9a76d8efebefe02bee73f98541667a12f6ba124d666f725230"
    );

    scrambler.unscramble_in_place(&mut bytes).unwrap();
    assert_eq!(bytes, [0u8; 32]);
}

// ═══════════════════════════════════════════════════════════════════════
// Library — page text snapshots (BookSize = 80, PageSize = 10)
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn book_zero_pages_frozen() {
    let library = test_library(80, 10);
    let expected = [
        "ibgabob.mu",
        "storoe,jte",
        "yuintzfg,d",
        "vdpoh,vjhm",
        "mgjymlxtta",
        "vfxoflftxf",
        "tpsjaxx rc",
        "n.sen jhec",
    ];
    for (page, text) in expected.iter().enumerate() {
        assert_eq!(
            library.generate_book_page("0", page as i64).unwrap(),
            *text,
            "book 0 page {} mismatch",
            page
        );
    }
}

#[test]
fn book_one_pages_frozen() {
    let library = test_library(80, 10);
    let expected = vec![
        "hxeshfeiom",
        "rfznknc ie",
        "fkbhdwcnpa",
        "pog,,qkzj ",
        " voajwbyj ",
        "hvle.qytgs",
        "bblemvivgl",
        "vurnxdmtka",
    ];
    assert_eq!(library.generate_book("1").unwrap(), expected);
}

#[test]
fn book_123456789_pages_frozen() {
    let library = test_library(80, 10);
    let expected = vec![
        "epv.j,daok",
        ".ear guo q",
        "y.vzadtuzd",
        "mh.h,.gvah",
        "urxqqfbmxf",
        "bbrtxoqula",
        "uupgurlimc",
        "mkzaelufqv",
    ];
    assert_eq!(library.generate_book("123456789").unwrap(), expected);
    assert_eq!(library.generate_book("000123456789").unwrap(), expected);
}

// ═══════════════════════════════════════════════════════════════════════
// Library::locate — book number snapshot (BookSize = 64, PageSize = 16)
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn locate_hello_world_frozen() {
    let library = test_library(64, 16);
    let book = library.locate("hello world", 2).unwrap();
    assert_eq!(
        book,
        "116846952739073169590725063274336175837175\
         132084675414382745163644623236873686654082\
         527899642444614725546824680262902286988132\
         75246782267798770767078959028"
    );
    let page = library.generate_book_page(&book, 2).unwrap();
    assert_eq!(&page[..11], "hello world");
    assert_eq!(&page[11..], "aaaaa");
}

// ═══════════════════════════════════════════════════════════════════════
// Default library — constants snapshot
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn default_library_first_and_last_page_frozen() {
    let library = Library::new(LibraryConfig::default()).unwrap();
    assert_eq!(library.book_size(), 1_312_000);
    assert_eq!(library.page_count(), 410);

    let pages = library.generate_book("0").unwrap();
    assert_eq!(pages.len(), 410);
    assert!(pages.iter().all(|page| page.chars().count() == 3200));
    assert_eq!(
        &pages[0][..64],
        "bpsp.urvh.jmboe,cbxixvn.tpalt,hgroexic,,jbu jibbwlo.fj ra mjdwxi"
    );
    assert_eq!(
        &pages[409][..64],
        "p.amdxytpyoqjmkxxubgxeoaheeclcx.dukmpuhztr mqvleianw,rjuq fauiyy"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Address encoding
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn address_layout_frozen() {
    let buffer = encode_address("123456789", 16, AddressPolicy::Reject).unwrap();
    assert_eq!(hex::encode(buffer.as_bytes()), "000000000000000000000000075bcd15");
    assert_eq!(decode_address(&buffer), "123456789");
}

#[test]
fn fixed_buffer_rejects_wrong_length() {
    assert!(FixedBuffer::from_bytes(vec![0; 79], 80).is_err());
}

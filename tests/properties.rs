//! Property tests: determinism, round trip, avalanche and locate/render
//! agreement over generated inputs.

use babel_library::{
    decode_address, encode_address, AddressPolicy, Library, LibraryConfig, Scrambler,
};
use proptest::prelude::*;

const BOOK_SIZE: usize = 80;
const PAGE_SIZE: usize = 10;
const SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz, .";

fn library() -> Library {
    let config = LibraryConfig::default()
        .with_book_size(BOOK_SIZE)
        .with_page_size(PAGE_SIZE)
        .with_key(*b"0123456789abcdef")
        .with_iv(*b"fedcba9876543210");
    Library::new(config).unwrap()
}

fn block_aligned_bytes() -> impl Strategy<Value = Vec<u8>> {
    (1usize..=8).prop_flat_map(|blocks| proptest::collection::vec(any::<u8>(), blocks * 16))
}

fn aes_key() -> impl Strategy<Value = Vec<u8>> {
    proptest::sample::select(vec![16usize, 24, 32])
        .prop_flat_map(|len| proptest::collection::vec(any::<u8>(), len))
}

fn page_text() -> impl Strategy<Value = String> {
    let glyphs: Vec<char> = SYMBOLS.chars().collect();
    proptest::collection::vec(proptest::sample::select(glyphs), 0..=PAGE_SIZE)
        .prop_map(|glyphs| glyphs.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unscramble_inverts_scramble(
        key in aes_key(),
        iv in proptest::collection::vec(any::<u8>(), 16),
        original in block_aligned_bytes(),
    ) {
        let scrambler = Scrambler::new(&key, &iv).unwrap();
        let mut bytes = original.clone();
        scrambler.scramble_in_place(&mut bytes).unwrap();
        scrambler.unscramble_in_place(&mut bytes).unwrap();
        prop_assert_eq!(bytes, original);
    }

    #[test]
    fn prop_generation_is_deterministic(book in "[0-9]{1,60}", page in 0i64..8) {
        let lib = library();
        let first = lib.generate_book_page(&book, page).unwrap();
        let second = lib.generate_book_page(&book, page).unwrap();
        prop_assert_eq!(first.chars().count(), PAGE_SIZE);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_single_byte_change_spreads_to_every_page(
        original in proptest::collection::vec(any::<u8>(), BOOK_SIZE),
        index in 0usize..BOOK_SIZE,
        flip in 1u8..=255,
    ) {
        let scrambler = Scrambler::new(b"0123456789abcdef", b"fedcba9876543210").unwrap();
        let mut a = original.clone();
        let mut b = original;
        b[index] ^= flip;
        scrambler.scramble_in_place(&mut a).unwrap();
        scrambler.scramble_in_place(&mut b).unwrap();

        let differing = a.iter().zip(&b).filter(|(x, y)| x != y).count();
        prop_assert!(differing > BOOK_SIZE / 2, "only {} bytes differ", differing);
        for (page, (pa, pb)) in a.chunks(PAGE_SIZE).zip(b.chunks(PAGE_SIZE)).enumerate() {
            prop_assert_ne!(pa, pb, "page {} unchanged", page);
        }
    }

    #[test]
    fn prop_located_book_renders_text(
        text in page_text(),
        page in 0i64..8,
    ) {
        let lib = library();
        let book = lib.locate(&text, page).unwrap();
        let rendered = lib.generate_book_page(&book, page).unwrap();
        prop_assert!(rendered.starts_with(&text), "{:?} does not start with {:?}", rendered, text);
    }

    #[test]
    fn prop_address_roundtrip(value in any::<u128>()) {
        let book = value.to_string();
        let buffer = encode_address(&book, 32, AddressPolicy::Reject).unwrap();
        prop_assert_eq!(&buffer.as_bytes()[..16], &[0u8; 16][..]);
        prop_assert_eq!(&buffer.as_bytes()[16..], &value.to_be_bytes()[..]);
        prop_assert_eq!(decode_address(&buffer), book);
    }
}

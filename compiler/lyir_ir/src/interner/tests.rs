use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_intern_and_get() {
    let mut interner = StringInterner::new();

    let hello = interner.intern("hello");
    let world = interner.intern("world");
    let hello2 = interner.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.get(hello), b"hello");
    assert_eq!(interner.get_str(world), Some("world"));
}

#[test]
fn test_empty_string() {
    let mut interner = StringInterner::new();
    assert!(interner.is_empty());

    let empty = interner.intern("");
    assert_eq!(empty, Symbol::EMPTY);
    assert_eq!(interner.get(Symbol::EMPTY), b"");
    assert!(interner.is_empty());
}

#[test]
fn test_find_does_not_insert() {
    let mut interner = StringInterner::new();
    assert_eq!(interner.find("missing"), None);
    assert_eq!(interner.len(), 1);

    let sym = interner.intern("present");
    assert_eq!(interner.find("present"), Some(sym));
}

#[test]
fn test_arbitrary_bytes() {
    let mut interner = StringInterner::new();
    let raw = interner.intern([0xFF_u8, 0xFE, b'a']);

    assert_eq!(interner.get(raw), &[0xFF, 0xFE, b'a']);
    assert_eq!(interner.get_str(raw), None);
}

#[test]
fn test_c_str_view() {
    let mut interner = StringInterner::new();
    let sym = interner.intern("main");

    let Some(c_str) = interner.get_c_str(sym) else {
        panic!("interned strings are NUL-terminated");
    };
    assert_eq!(c_str.to_bytes(), b"main");

    let embedded = interner.intern(b"a\0b");
    assert_eq!(interner.get_c_str(embedded), None);
}

#[test]
fn test_oversized_goes_to_heap() {
    let mut interner = StringInterner::with_max_size(8);

    // 7 bytes + NUL fits exactly.
    let fits = interner.intern("1234567");
    // 8 bytes + NUL does not.
    let big = interner.intern("12345678");

    let stats = interner.stats();
    assert_eq!(stats.oversized, 1);
    assert_eq!(stats.oversized_bytes, 9);
    assert_eq!(interner.get(fits), b"1234567");
    assert_eq!(interner.get(big), b"12345678");

    let Some(c_str) = interner.get_c_str(big) else {
        panic!("oversized strings are NUL-terminated too");
    };
    assert_eq!(c_str.to_bytes(), b"12345678");
}

#[test]
fn test_oversized_deduplicated() {
    let mut interner = StringInterner::with_max_size(4);
    let a = interner.intern("oversized content");
    let b = interner.intern("oversized content");

    assert_eq!(a, b);
    assert_eq!(interner.stats().oversized, 1);
}

#[test]
fn test_views_stable_across_rollover() {
    let mut interner = StringInterner::with_max_size(64);
    let first = interner.intern("first string");
    let first_view = interner.get(first).to_vec();

    let mut symbols = Vec::new();
    for i in 0..1_000 {
        symbols.push((i, interner.intern(format!("filler-{i}"))));
    }

    assert!(interner.stats().arena.blocks > 1);
    assert_eq!(interner.get(first), first_view.as_slice());
    for (i, sym) in symbols {
        assert_eq!(interner.get_str(sym), Some(format!("filler-{i}").as_str()));
    }
}

#[test]
fn test_intern_error_display() {
    let err = InternError::Overflow { count: 42 };
    assert!(err.to_string().contains("42"));
}

proptest! {
    #[test]
    fn interned_content_round_trips(
        strings in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..48), 1..64)
    ) {
        let mut interner = StringInterner::with_max_size(32);
        let symbols: Vec<_> = strings.iter().map(|s| interner.intern(s)).collect();

        for (content, sym) in strings.iter().zip(&symbols) {
            prop_assert_eq!(interner.get(*sym), content.as_slice());
            prop_assert_eq!(interner.find(content), Some(*sym));
        }
    }
}

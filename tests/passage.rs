use bibleref::{Canon, Error, Passage, Reference};
use proptest::prelude::*;

fn ends(text: &str) -> (String, String) {
    let p = Passage::parse(text).unwrap();
    (p.from().to_string(), p.to().to_string())
}

#[test]
fn citation_forms() {
    let cases = [
        ("Genesis", "Genesis", "Genesis"),
        ("Genesis 23", "Genesis 23", "Genesis 23"),
        ("Genesis 1:12", "Genesis 1:12", "Genesis 1:12"),
        ("Genesis 1:12-16", "Genesis 1:12", "Genesis 1:16"),
        ("Genesis 1-3", "Genesis 1", "Genesis 3"),
        ("Genesis 1:12-2:16", "Genesis 1:12", "Genesis 2:16"),
        ("Genesis 1-3:2", "Genesis 1", "Genesis 3:2"),
        ("Genesis 50:26-Exodus 1:1", "Genesis 50:26", "Exodus 1:1"),
        ("1 John 1:3", "1 John 1:3", "1 John 1:3"),
        ("Song of Solomon 2:1-4", "Song of Solomon 2:1", "Song of Solomon 2:4"),
    ];
    for (text, from, to) in cases {
        assert_eq!(ends(text), (from.to_string(), to.to_string()), "{text}");
    }
}

#[test]
fn zero_means_unspecified() {
    assert_eq!(ends("Genesis 0"), ("Genesis".into(), "Genesis".into()));
    assert_eq!(ends("Genesis 1:0"), ("Genesis 1".into(), "Genesis 1".into()));
    assert_eq!(ends("Genesis 0:5"), ("Genesis".into(), "Genesis".into()));
}

#[test]
fn longest_book_name_wins() {
    assert_eq!(ends("Judges 3"), ("Judges 3".into(), "Judges 3".into()));
    assert_eq!(ends("Jude 1:3"), ("Jude 1:3".into(), "Jude 1:3".into()));
    assert_eq!(ends("2 Kings 1"), ("2 Kings 1".into(), "2 Kings 1".into()));
}

#[test]
fn validation_boundaries() {
    assert!(Passage::parse("Genesis 50").is_ok());
    assert!(Passage::parse("Genesis 51").unwrap_err().is_validation());
    assert!(Passage::parse("Genesis 1:31").is_ok());
    assert!(Passage::parse("Genesis 1:32").unwrap_err().is_validation());
    assert!(Passage::parse("Revelation 22:21").is_ok());
    assert!(Passage::parse("Revelation 22:21-Genesis 1:1").is_ok());
    assert!(Passage::parse("Genesis 99999999999").unwrap_err().is_validation());
    assert!(Passage::parse("Genesis 1:99999999999").unwrap_err().is_validation());
    assert!(Passage::parse("Genesis 1-99999999999").unwrap_err().is_validation());
}

#[test]
fn trailing_whitespace_is_ignored() {
    for (text, shown) in [
        ("Genesis 1 ", "Genesis 1"),
        ("Genesis 1-3 ", "Genesis 1-3"),
        ("Genesis 1:2-3:4 ", "Genesis 1:2-3:4"),
        ("Genesis 1:12-2:16\t", "Genesis 1:12-2:16"),
        ("Genesis 50:26-Exodus 1:1  ", "Genesis 50:26-Exodus 1:1"),
    ] {
        assert_eq!(Passage::parse(text).unwrap().to_string(), shown, "{text:?}");
    }
}

#[test]
fn book_names_match_inside_words() {
    let found: Vec<String> = Passage::extract_all("Write it in Markdown").iter().map(ToString::to_string).collect();
    assert_eq!(found, ["Mark"]);
}

#[test]
fn syntax_errors() {
    for text in ["", "genesis 1", "Gen 1", "Genesis 1:", "Genesis 1-3 and more", "Genesis 1:2:3"] {
        let err = Passage::parse(text).unwrap_err();
        assert!(err.is_parse(), "{text}: {err:?}");
    }
}

#[test]
fn invalid_passage_keeps_the_failing_end() {
    let err = Passage::parse("Genesis 1-99").unwrap_err();
    let Error::InvalidPassage { passage, source } = &err else {
        panic!("expected InvalidPassage, got {err:?}");
    };
    assert_eq!(passage, "Genesis 1-Genesis 99");
    assert!(matches!(**source, Error::InvalidReference { ref reference } if reference == "Genesis 99"));
}

#[test]
fn extraction_in_prose() {
    let text = "Read Genesis 1:1-2:3 and Genesis 3:4-5:6, then Jude 1:3 and 1 John 9.";
    let found: Vec<String> = Passage::extract_all(text).iter().map(ToString::to_string).collect();
    assert_eq!(found, ["Genesis 1:1-2:3", "Genesis 3:4-5:6", "Jude 1:3"]);

    assert_eq!(Passage::extract(text).unwrap().to_string(), "Genesis 1:1-2:3");
    assert!(Passage::try_extract_all(text).unwrap_err().is_validation());
    assert!(Passage::extract("nothing here").is_none());
    assert!(Passage::extract("1 John 9 only").is_none());
}

#[test]
fn custom_canon() {
    let canon = Canon::from_json(r#"[{"book": "Letter", "chapters": [3, 2]}]"#).unwrap();
    let p = Passage::parse_with("Letter 1:2-2:2", &canon).unwrap();
    assert_eq!(p.to_string(), "Letter 1:2-2:2");
    assert!(Passage::parse_with("Genesis 1", &canon).unwrap_err().is_parse());
    assert!(Passage::parse_with("Letter 2:3", &canon).unwrap_err().is_validation());
}

/// A reference that exists in the standard canon, built from arbitrary seeds.
fn reference(book: usize, chapter: u32, verse: u32, depth: u8) -> Reference {
    let canon = Canon::standard();
    let b = canon.books().nth(book % canon.len()).unwrap();
    let chapter = chapter % b.chapter_count() + 1;
    let verse = verse % b.verse_count(chapter).unwrap() + 1;
    match depth % 3 {
        0 => Reference::new(canon, &b.name, None, None),
        1 => Reference::new(canon, &b.name, Some(chapter), None),
        _ => Reference::new(canon, &b.name, Some(chapter), Some(verse)),
    }
    .unwrap()
}

fn any_reference() -> impl Strategy<Value = Reference> {
    (any::<usize>(), any::<u32>(), any::<u32>(), any::<u8>())
        .prop_map(|(b, c, v, d)| reference(b, c, v, d))
}

fn any_passage() -> impl Strategy<Value = Passage> {
    prop_oneof![
        // same book, where the compact forms apply
        (any::<usize>(), any::<u32>(), any::<u32>(), any::<u8>(), any::<u32>(), any::<u32>(), any::<u8>())
            .prop_map(|(b, c1, v1, d1, c2, v2, d2)| {
                let from = reference(b, c1, v1, d1);
                let to = reference(b, c2, v2, d2);
                Passage::new(Canon::standard(), &from, &to).unwrap()
            }),
        (any_reference(), any_reference())
            .prop_map(|(from, to)| Passage::new(Canon::standard(), &from, &to).unwrap()),
    ]
}

proptest! {
    #[test]
    fn reference_display_reparses(r in any_reference()) {
        prop_assert_eq!(Reference::parse(&r.to_string()).unwrap(), r);
    }

    #[test]
    fn passage_display_reparses(p in any_passage()) {
        let shown = p.to_string();
        prop_assert_eq!(Passage::parse(&shown).unwrap(), p, "{}", shown);
    }

    #[test]
    fn rebuilding_a_passage_changes_nothing(p in any_passage()) {
        prop_assert_eq!(Passage::new(Canon::standard(), p.from(), p.to()).unwrap(), p);
    }

    #[test]
    fn extraction_finds_the_displayed_passage(p in any_passage()) {
        let text = format!("As written in {p}, so it is.");
        prop_assert_eq!(Passage::extract_all(&text), vec![p]);
    }

    #[test]
    fn parse_never_panics(s in "\\PC{0,40}") {
        let _ = Passage::parse(&s);
        let _ = Passage::extract_all(&s);
    }
}

use pdfemit::{Array, Dictionary, Document, Error, Object, dictionary};

mod utils;
use utils::*;

/// Page-like graph: two pages sharing one indirect font and one inline resource dict.
fn sample_document() -> (Document, pdfemit::NodeId) {
    let mut doc = Document::new();
    let font = doc.add(
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        }
        .with_indirect(true),
    );
    let fonts = doc.add(dictionary! { "F1" => font });
    let resources = doc.add(dictionary! { "Font" => fonts });
    let first = doc.add(dictionary! { "Type" => "Page", "Resources" => resources }.with_indirect(true));
    let second = doc.add(dictionary! { "Type" => "Page", "Resources" => resources }.with_indirect(true));
    let kids = doc.add(Array::new(vec![first.into(), second.into()]));
    let pages = doc.add(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => 2 }.with_indirect(true));
    for page in [first, second] {
        doc.get_dictionary_mut(page).unwrap().set("Parent", pages);
    }
    let catalog = doc.add(dictionary! { "Type" => "Catalog", "Pages" => pages }.with_indirect(true));
    let trailer = doc.add(dictionary! { "Root" => catalog });
    (doc, trailer)
}

#[test]
fn output_is_deterministic() {
    let (mut doc, trailer) = sample_document();
    let first = dump(&mut doc, trailer, &uncompressed());
    let second = dump(&mut doc, trailer, &uncompressed());
    assert_eq!(first, second);

    let (mut fresh, fresh_trailer) = sample_document();
    assert_eq!(first, dump(&mut fresh, fresh_trailer, &uncompressed()));
}

#[test]
fn objects_are_numbered_in_discovery_order() {
    let (mut doc, trailer) = sample_document();
    let output = dump(&mut doc, trailer, &uncompressed());
    let text = String::from_utf8_lossy(&output);

    // Catalog, Pages, first Page, shared Font, second Page.
    assert!(text.contains("1 0 obj\n<</Pages 2 0 R /Type /Catalog>>"));
    assert!(text.contains("2 0 obj\n<</Count 2 /Kids [3 0 R 5 0 R] /Type /Pages>>"));
    assert!(text.contains("3 0 obj\n<</Parent 2 0 R /Resources <</Font <</F1 4 0 R>>>> /Type /Page>>"));
    assert!(text.contains("4 0 obj\n<</BaseFont /Helvetica /Subtype /Type1 /Type /Font>>"));
    assert!(text.contains("5 0 obj\n<</Parent 2 0 R /Resources <</Font <</F1 4 0 R>>>> /Type /Page>>"));
    assert_eq!(count_occurrences(&output, b" 0 obj\n"), 5);
}

#[test]
fn shared_indirect_object_is_written_once() {
    let (mut doc, trailer) = sample_document();
    let output = dump(&mut doc, trailer, &uncompressed());
    assert_eq!(count_occurrences(&output, b"\n4 0 obj\n"), 1);
    assert_eq!(count_occurrences(&output, b"/F1 4 0 R"), 2);
    assert_eq!(count_occurrences(&output, b"/Helvetica"), 1);
}

#[test]
fn xref_offsets_match_object_positions() {
    let (mut doc, trailer) = sample_document();
    let output = dump(&mut doc, trailer, &uncompressed());
    let (xref_start, entries) = parse_xref(&output);

    assert_eq!(Some(xref_start), find(&output, b"xref\n0 6\n"));
    assert_eq!(entries.len(), 6);
    assert_eq!(
        entries[0],
        XrefLine {
            offset: 0,
            generation: 65535,
            kind: b'f'
        }
    );
    for (number, entry) in entries.iter().enumerate().skip(1) {
        let header = format!("{} 0 obj\n", number);
        assert!(output[entry.offset..].starts_with(header.as_bytes()), "bad offset for object {}", number);
        assert_eq!(entry.generation, 0);
        assert_eq!(entry.kind, b'n');
    }
    assert!(output.ends_with(format!("startxref\n{}\n%%EOF\n", xref_start).as_bytes()));
}

#[test]
fn xref_offsets_survive_binary_streams() {
    let mut doc = Document::new();
    let payload: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
    let image = doc.add(
        dictionary! { "Type" => "XObject", "Subtype" => "Image" }
            .with_stream(payload)
            .with_compression(false),
    );
    let other = doc.add(dictionary! { "Image" => image }.with_indirect(true));
    let trailer = doc.add(dictionary! { "Root" => other });

    let output = dump(&mut doc, trailer, &Default::default());
    let (_, entries) = parse_xref(&output);
    assert_eq!(entries.len(), 3);
    assert!(output[entries[1].offset..].starts_with(b"1 0 obj\n<</Image 2 0 R>>"));
    assert!(output[entries[2].offset..].starts_with(b"2 0 obj\n<</Length 3000 /Subtype /Image"));
}

#[test]
fn trailer_size_counts_free_head() {
    let (mut doc, trailer) = sample_document();
    let output = dump(&mut doc, trailer, &uncompressed());
    assert!(find(&output, b"trailer\n\n<</Root 1 0 R /Size 6>>\n").is_some());
    assert_eq!(doc.get_dictionary(trailer).unwrap().get(b"Size"), Some(&Object::Integer(6)));
}

#[test]
fn stale_size_is_replaced() {
    let mut doc = Document::new();
    let trailer = doc.add(dictionary! { "Size" => 99 });
    let output = dump(&mut doc, trailer, &uncompressed());
    assert!(output.ends_with(b"trailer\n\n<</Size 1>>\nstartxref\n15\n%%EOF\n"));
}

#[test]
fn keys_are_written_sorted() {
    let mut doc = Document::new();
    let names = ["Zebra", "Yak", "Walrus", "Moose", "Ibex", "Gnu", "Emu", "Cat", "Ape"];
    let dict: Dictionary = names.iter().map(|name| (*name, Object::Integer(1))).collect();
    let node = doc.add(dict.with_indirect(true));
    let trailer = doc.add(dictionary! { "Root" => node });

    let output = dump(&mut doc, trailer, &uncompressed());
    assert!(find(
        &output,
        b"<</Ape 1 /Cat 1 /Emu 1 /Gnu 1 /Ibex 1 /Moose 1 /Walrus 1 /Yak 1 /Zebra 1>>"
    )
    .is_some());
}

#[test]
fn long_arrays_wrap_with_indent() {
    let mut doc = Document::new();
    let numbers = doc.add((0..40).collect::<Array>().with_indirect(true));
    let trailer = doc.add(dictionary! { "Root" => numbers });
    let output = dump(&mut doc, trailer, &uncompressed());
    let text = String::from_utf8_lossy(&output);

    let body = text.split("1 0 obj\n").nth(1).unwrap().split("\nendobj").next().unwrap();
    assert!(body.starts_with("[0 1 2"));
    assert!(body.contains("\n  "));
    for line in body.lines() {
        assert!(line.len() <= 72, "line too long: {:?}", line);
    }
    let tokens: Vec<&str> = body.trim_matches(|c| c == '[' || c == ']').split_whitespace().collect();
    assert_eq!(tokens.len(), 40);
}

#[test]
fn inline_cycle_fails_and_indirect_link_fixes_it() {
    let build = |indirect: bool| {
        let mut doc = Document::new();
        let a = doc.add(Dictionary::new());
        let b = doc.add(Dictionary::new().with_indirect(indirect));
        let c = doc.add(dictionary! { "Next" => a });
        doc.get_dictionary_mut(a).unwrap().set("Next", b);
        doc.get_dictionary_mut(b).unwrap().set("Next", c);
        let trailer = doc.add(dictionary! { "Root" => a });
        (doc, trailer)
    };

    let (mut doc, trailer) = build(false);
    let mut output = Vec::new();
    let err = doc.dump(&mut output, trailer, &uncompressed()).unwrap_err();
    assert!(matches!(err, Error::CircularReference { .. }));
    assert!(err.to_string().starts_with("circular reference"));
    assert!(output.is_empty());

    let (mut doc, trailer) = build(true);
    let output = dump(&mut doc, trailer, &uncompressed());
    assert!(find(&output, b"1 0 obj\n<</Next <</Next <</Next 1 0 R>>>>>>\nendobj\n").is_some());
    assert!(find(&output, b"<</Root <</Next 1 0 R>> /Size 2>>").is_some());
}

#[test]
fn foreign_node_is_reported() {
    let mut other = Document::new();
    for _ in 0..5 {
        other.add(Dictionary::new());
    }
    let stray = other.add(Dictionary::new());

    let mut doc = Document::new();
    let trailer = doc.add(dictionary! { "Root" => stray });
    let mut output = Vec::new();
    let err = doc.dump(&mut output, trailer, &uncompressed()).unwrap_err();
    assert!(matches!(err, Error::NodeNotFound(id) if id == stray));
}

//! Cross-module tests: feeding each operation's output into the next and
//! checking the normalization invariants hold at every hand-off.

use crate::editing::{Document, apply_tag, extract, render};
use crate::models::{AttrMap, FormattingMap, SelectionRange, text_of};
use crate::parsing::parse;
use pretty_assertions::assert_eq;

/// Asserts every tag list is normalized: ascending starts, no overlap, no
/// equal-attrs touching pair, no inverted or empty interval.
pub fn assert_normalized(map: &FormattingMap) {
    for (tag, intervals) in map.iter() {
        for (index, interval) in intervals.iter().enumerate() {
            assert!(
                interval.start < interval.end,
                "<{tag}> interval {index} is empty or inverted"
            );
            if index > 0 {
                let prev = &intervals[index - 1];
                assert!(
                    prev.end <= interval.start,
                    "<{tag}> intervals {} and {index} overlap",
                    index - 1
                );
                assert!(
                    prev.end < interval.start || prev.attrs != interval.attrs,
                    "<{tag}> intervals {} and {index} touch with equal attrs",
                    index - 1
                );
            }
        }
    }
}

fn classed(value: &str) -> AttrMap {
    let mut attrs = AttrMap::new();
    attrs.insert("class".to_string(), value.to_string());
    attrs
}

#[test]
fn extract_output_is_always_normalized() {
    for markup in [
        "plain",
        "<strong>ab</strong><strong>cd</strong>e",
        "<strong>ab<strong>cd</strong></strong>",
        "a<u>b<em>c</em>d</u>e<em>f</em>",
    ] {
        let map = extract(&parse(markup).unwrap());
        assert_normalized(&map);
    }
}

#[test]
fn apply_output_is_always_normalized() {
    let mut map = FormattingMap::new();
    for (range, attrs, remove) in [
        ((2, 8), AttrMap::new(), false),
        ((5, 12), classed("x"), false),
        ((0, 3), AttrMap::new(), false),
        ((6, 9), AttrMap::new(), true),
        ((9, 12), classed("x"), false),
    ] {
        apply_tag(
            &mut map,
            "strong",
            SelectionRange::new(range.0, range.1),
            &attrs,
            remove,
        )
        .unwrap();
        assert_normalized(&map);
    }
}

#[test]
fn applying_the_same_edit_twice_changes_nothing() {
    let mut once = FormattingMap::new();
    apply_tag(
        &mut once,
        "strong",
        SelectionRange::new(3, 9),
        &classed("x"),
        false,
    )
    .unwrap();

    let mut twice = once.clone();
    apply_tag(
        &mut twice,
        "strong",
        SelectionRange::new(3, 9),
        &classed("x"),
        false,
    )
    .unwrap();
    assert_eq!(once, twice);
}

#[test]
fn render_then_parse_preserves_text_and_formatting() {
    let markup = "a<u>b<em>cd</em></u><em>ef</em>g";
    let tree = parse(markup).unwrap();
    let map = extract(&tree);
    let text = text_of(&tree);

    let rendered = render(&map, &text).unwrap();
    let reparsed = parse(&rendered).unwrap();
    assert_eq!(text_of(&reparsed), text);
    assert_eq!(extract(&reparsed), map);
}

#[test]
fn document_pipeline_applies_and_serializes() {
    let mut doc = Document::from_markup("text text text").unwrap();
    doc.apply_tag_at("strong", SelectionRange::new(5, 9), &AttrMap::new(), false)
        .unwrap();
    doc.apply_tag_at("em", SelectionRange::new(7, 12), &AttrMap::new(), false)
        .unwrap();

    let markup = doc.markup().unwrap();
    assert_eq!(markup, "text <strong>te<em>xt</em></strong><em> te</em>xt");
    assert_normalized(&doc.formatting());

    let back = Document::from_markup(&markup).unwrap();
    assert_eq!(back.formatting(), doc.formatting());
    assert_eq!(back.text(), "text text text");
}

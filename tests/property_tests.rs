//! Property tests over arbitrary and generated input.

use proptest::prelude::*;
use smartmark::tree::{Element, Node, Tag};
use smartmark::{Options, parse, parse_with_options};

fn smart() -> Options {
    Options {
        smart_punctuation: true,
        wiki_links: true,
        ..Options::default()
    }
}

/// Markup-heavy text: syntax characters mixed with words and line breaks.
fn markup_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("*".to_owned()),
            Just("_".to_owned()),
            Just("`".to_owned()),
            Just("[".to_owned()),
            Just("]".to_owned()),
            Just("(".to_owned()),
            Just(")".to_owned()),
            Just("<".to_owned()),
            Just(">".to_owned()),
            Just("&".to_owned()),
            Just("\"".to_owned()),
            Just("'".to_owned()),
            Just("--".to_owned()),
            Just("...".to_owned()),
            Just("\\".to_owned()),
            Just("  \n".to_owned()),
            Just("\n\n".to_owned()),
            Just("\n- ".to_owned()),
            Just("\n# ".to_owned()),
            Just("\n    ".to_owned()),
            Just("[^n]: ".to_owned()),
            "[a-zA-Z ]{1,8}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

/// Words separated by single spaces, free of any syntax character.
fn plain_words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 1..12).prop_map(|words| words.join(" "))
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) if !matches!(e.tag, Tag::Special(_)) => collect_text(e, out),
            _ => {}
        }
    }
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,200}") {
        let doc = parse(&input);
        let _ = doc.to_html();
        let _ = doc.to_xml();
        let _ = parse_with_options(&input, &smart()).to_html_document();
    }

    #[test]
    fn markup_input_never_panics(input in markup_text()) {
        let _ = parse(&input).to_html();
        let _ = parse_with_options(&input, &smart()).to_html();
    }

    #[test]
    fn rendering_is_idempotent(input in markup_text()) {
        let doc = parse_with_options(&input, &smart());
        prop_assert_eq!(doc.to_html(), doc.to_html());
        prop_assert_eq!(doc.to_xml(), doc.to_xml());
    }

    #[test]
    fn plain_paragraph_round_trips(text in plain_words()) {
        let doc = parse(&text);
        let mut out = String::new();
        collect_text(doc.body(), &mut out);
        prop_assert_eq!(out, text);
    }

    #[test]
    fn link_resolution_is_order_independent(
        label in "[a-z]{1,6}",
        url in "/[a-z]{1,10}",
        desc in "[a-z]{1,8}",
    ) {
        let reference = format!("See [{desc}][{label}].");
        let definition = format!("[{label}]: {url}");
        let before = parse(&format!("{definition}\n\n{reference}"));
        let after = parse(&format!("{reference}\n\n{definition}"));
        prop_assert_eq!(before.links().get(&label), after.links().get(&label));
        prop_assert_eq!(before.to_html(), after.to_html());
    }
}

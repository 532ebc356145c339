use smartmark::{DashStyle, Options, to_html_with_options};

fn smart() -> Options {
    Options {
        smart_punctuation: true,
        ..Options::default()
    }
}

/// Paragraph content rendered with smart punctuation.
fn render_with(input: &str, options: &Options) -> String {
    let html = to_html_with_options(input, options);
    html.strip_prefix("<p class=\"first\">")
        .and_then(|rest| rest.strip_suffix("</p>\n"))
        .unwrap_or_else(|| panic!("not a single paragraph: {html}"))
        .to_owned()
}

fn render(input: &str) -> String {
    render_with(input, &smart())
}

// --- Quotes ---

#[test]
fn double_quotes() {
    assert_eq!(render("\"Hello\""), "&#8220;Hello&#8221;");
}

#[test]
fn single_quotes_and_apostrophes() {
    assert_eq!(render("'tis 'quoted' don't"), "&#8216;tis &#8216;quoted&#8217; don't");
}

#[test]
fn quotes_around_emphasis() {
    assert_eq!(render("\"so *very*\" now"), "&#8220;so <em>very</em>&#8221; now");
}

#[test]
fn tex_quotes() {
    assert_eq!(render("``Yes,'' she said"), "&#8220;Yes,&#8221; she said");
}

#[test]
fn smart_off_leaves_quotes() {
    let html = to_html_with_options("\"Hello\" -- x...", &Options::default());
    assert_eq!(html, "<p class=\"first\">\"Hello\" -- x...</p>\n");
}

// --- Dashes ---

#[test]
fn default_dash_policy() {
    assert_eq!(render("a -- b"), "a&nbsp;&#8212;&nbsp;b");
    assert_eq!(render("1---2"), "1&#8211;2");
    assert_eq!(render("well-known"), "well-known");
}

#[test]
fn swapped_dash_policy() {
    let options = Options {
        dash_style: DashStyle::TripleEmdashDoubleEndash,
        ..smart()
    };
    assert_eq!(render_with("1--2 a --- b", &options), "1&#8211;2 a&nbsp;&#8212;&nbsp;b");
}

#[test]
fn no_endash_policy() {
    let options = Options {
        dash_style: DashStyle::DoubleEmdashNoEndash,
        ..smart()
    };
    assert_eq!(render_with("a--b c---d", &options), "a&nbsp;&#8212;&nbsp;b c---d");
}

#[test]
fn tight_dashes() {
    let options = Options {
        spaces_around_dashes: false,
        ..smart()
    };
    assert_eq!(render_with("a -- b", &options), "a &#8212; b");
}

// --- Ellipses and sentences ---

#[test]
fn ellipses() {
    assert_eq!(render("wait... and . . . go"), "wait&#8230; and &#8230; go");
}

#[test]
fn sentence_spacing() {
    assert_eq!(render("One. Two? 3 is! \"Four\""), "One.&nbsp;&nbsp;Two?&nbsp;&nbsp;3 is!&nbsp;&nbsp;&#8220;Four&#8221;");
}

#[test]
fn abbreviations_keep_single_space() {
    assert_eq!(render("Ask Dr. Who on p. 5."), "Ask Dr. Who on p. 5.");
}

#[test]
fn lowercase_does_not_start_sentence() {
    assert_eq!(render("e.g. this"), "e.g. this");
}

// --- Protected content ---

#[test]
fn code_is_untouched() {
    assert_eq!(render("`\"x\" -- y`"), "<code>\"x\" -- y</code>");
}

#[test]
fn escapes_protect_punctuation() {
    assert_eq!(render("\\\"a\\\" b\\--c"), "\"a\" b--c");
}

#[test]
fn links_are_smartened_inside() {
    assert_eq!(
        render("[\"x\"](/u)"),
        "<a class=\"link\" href=\"/u\">&#8220;x&#8221;</a>"
    );
}

#[test]
fn camel_case_wikilinks() {
    let options = Options {
        wiki_links: true,
        ..smart()
    };
    assert_eq!(
        render_with("See HomePage now", &options),
        "See <a class=\"wikilink\" href=\"HomePage\">HomePage</a> now"
    );
}

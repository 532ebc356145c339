//! Table-driven rendering cases from `tests/fixtures/cases.json`.

use serde::Deserialize;
use smartmark::{Options, to_html_with_options};
use std::fs;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    input: String,
    html: String,
    #[serde(default)]
    smart: bool,
    #[serde(default)]
    plain: bool,
    #[serde(default)]
    technical: bool,
}

impl Case {
    fn options(&self) -> Options {
        Options {
            smart_punctuation: self.smart,
            plain: self.plain,
            technical_style: self.technical,
            ..Options::default()
        }
    }
}

fn load_cases() -> Vec<Case> {
    let json = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cases.json"))
        .expect("Failed to read tests/fixtures/cases.json");
    serde_json::from_str(&json).expect("Failed to parse cases.json")
}

#[test]
fn fixture_cases() {
    let cases = load_cases();
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let output = to_html_with_options(&case.input, &case.options());
        if output != case.html {
            failures.push(format!(
                "{}\n  input:    {:?}\n  expected: {:?}\n  actual:   {:?}",
                case.name, case.input, case.html, output
            ));
        }
    }
    assert!(failures.is_empty(), "{} failing case(s):\n{}", failures.len(), failures.join("\n"));
}

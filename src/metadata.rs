//! Document metadata harvested from a leading `Key: value` block.

use crate::Options;
use crate::error::{MetadataError, Result};
use crate::tree::{Element, HeaderKind, Tag};

/// Key/value pairs in first-seen order. A repeated key keeps its position
/// and takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `metadata` header element with one `item` per entry.
    pub fn to_element(&self) -> Element {
        let mut metadata = Element::header(HeaderKind::Metadata);
        for (key, value) in self.iter() {
            let mut item = Element::with_text(Tag::Header(HeaderKind::Item), value);
            item.set_attr("id", key);
            metadata.push(item);
        }
        metadata
    }
}

/// Validate one entry and apply its side effect on `options`.
///
/// Known keys:
/// - `Style`: `technical` switches indented blocks to literal code.
/// - `Use WikiLinks`: boolean; also turns on smart punctuation.
/// - `Base Url`: wikilink URL template.
/// - `Date`: must be a `YYYY-MM-DD` date.
pub fn apply_entry(key: &str, value: &str, options: &mut Options) -> Result<()> {
    match key {
        "Style" => {
            if value.trim() == "technical" {
                options.technical_style = true;
            }
        }
        "Use WikiLinks" => {
            let enabled = parse_bool(key, value)?;
            options.smart_punctuation = true;
            options.wiki_links = enabled;
        }
        "Base Url" => options.wiki_link_format = value.trim().to_owned(),
        "Date" => {
            parse_date(key, value)?;
        }
        _ => {}
    }
    Ok(())
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(MetadataError::invalid_boolean(key, value))
    }
}

/// Parse `YYYY-MM-DD` into `(year, month, day)`.
pub fn parse_date(key: &str, value: &str) -> Result<(u16, u8, u8)> {
    let invalid = || MetadataError::invalid_date(key, value);
    let mut parts = value.trim().split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(invalid());
    }
    if !(y.bytes().chain(m.bytes()).chain(d.bytes())).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let year: u16 = y.parse().map_err(|_| invalid())?;
    let month: u8 = m.parse().map_err(|_| invalid())?;
    let day: u8 = d.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(invalid());
    }
    Ok((year, month, day))
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

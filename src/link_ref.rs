//! Link table.
//!
//! Definitions (`[id]: url "title"`) and references (`[text][id]`,
//! `[text](url)`) merge into one record per identifier, in whichever order
//! they appear. A record that is referenced but never defined stays
//! unresolved.

use rustc_hash::FxHashMap;

use crate::tree::{Element, HeaderKind, Node};

/// One link-table record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRecord {
    /// Normalized lookup key.
    pub id: String,
    /// Identifier as written by the author.
    pub ident: String,
    pub url: Option<String>,
    pub title: Option<String>,
    /// Display text of the last reference.
    pub text: Option<String>,
    pub is_image: bool,
    /// Set once a definition or an inline destination is seen.
    pub is_defined: bool,
}

/// Identifier-keyed store of link records, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    records: Vec<LinkRecord>,
    by_id: FxHashMap<String, usize>,
    anonymous: usize,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a definition or reference into the table.
    ///
    /// With no identifier the link is anonymous (an inline destination) and
    /// gets a fresh `#N` key. Non-empty URL and title values overwrite;
    /// the image and defined flags only ever turn on.
    pub fn define(
        &mut self,
        url: Option<&str>,
        title: Option<&str>,
        ident: Option<&str>,
        definition: bool,
        image: bool,
    ) -> &mut LinkRecord {
        let (id, ident) = match ident.filter(|i| !i.is_empty()) {
            Some(ident) => (normalize_label(ident), ident.to_owned()),
            None => {
                let id = format!("#{}", self.anonymous);
                self.anonymous += 1;
                (id.clone(), id)
            }
        };

        let index = match self.by_id.get(&id) {
            Some(&index) => index,
            None => {
                let index = self.records.len();
                self.records.push(LinkRecord {
                    id: id.clone(),
                    ident: ident.clone(),
                    ..LinkRecord::default()
                });
                self.by_id.insert(id, index);
                index
            }
        };

        let record = &mut self.records[index];
        if definition {
            record.ident = ident;
            record.is_defined = true;
        }
        if let Some(url) = url.map(strip_angle_brackets).filter(|u| !u.is_empty()) {
            record.url = Some(url.to_owned());
        }
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            record.title = Some(title.to_owned());
        }
        record.is_image |= image;
        tracing::trace!(id = %record.id, definition, "merged link record");
        record
    }

    pub fn get(&self, id: &str) -> Option<&LinkRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `links` header element with one `link` per record.
    pub fn to_element(&self) -> Element {
        let mut links = Element::header(HeaderKind::Links);
        for record in &self.records {
            let mut link = Element::header(HeaderKind::Link);
            link.set_attr("id", record.id.as_str());
            if let Some(url) = &record.url {
                link.set_attr("url", url.as_str());
            }
            if let Some(title) = &record.title {
                link.set_attr("title", title.as_str());
            }
            if record.is_image {
                link.set_attr("image", "true");
            }
            if let Some(text) = &record.text {
                link.push(Node::Text(text.clone()));
            }
            links.push(link);
        }
        links
    }
}

fn strip_angle_brackets(url: &str) -> &str {
    url.strip_prefix('<')
        .and_then(|u| u.strip_suffix('>'))
        .unwrap_or(url)
}

/// Reduce a label to its lookup key: letters, digits and `:_-#` survive,
/// lowercased. Also used for section ids.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_alphanumeric() || matches!(ch, ':' | '_' | '-' | '#') {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

//! URL field access on a single icon record.

use serde_json::Value;

/// The two spellings of the URL field seen in upstream feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlField {
    Lower,
    Capitalized,
}

impl UrlField {
    /// Lookup order: lowercase first.
    pub const ALL: [UrlField; 2] = [UrlField::Lower, UrlField::Capitalized];

    pub fn key(self) -> &'static str {
        match self {
            UrlField::Lower => "url",
            UrlField::Capitalized => "Url",
        }
    }
}

/// Source URL of `record`: the first non-empty string among `url`, `Url`.
pub fn source_url(record: &Value) -> Option<&str> {
    let map = record.as_object()?;
    UrlField::ALL
        .iter()
        .filter_map(|field| map.get(field.key()).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Overwrites every URL field present on `record` with `link`.
/// Never adds a field the record did not have. Returns how many were set.
pub fn set_url(record: &mut Value, link: &str) -> usize {
    let Some(map) = record.as_object_mut() else {
        return 0;
    };
    let mut set = 0;
    for field in UrlField::ALL {
        if let Some(slot) = map.get_mut(field.key()) {
            *slot = Value::String(link.to_string());
            set += 1;
        }
    }
    set
}

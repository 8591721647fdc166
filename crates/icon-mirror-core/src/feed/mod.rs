//! Icon feed document model.
//!
//! The feed is kept as a [`serde_json::Value`] so fields this tool does not
//! know about survive the rewrite untouched and in their original order.

mod fetch;
mod record;

pub use fetch::{fetch_feed, FeedError};
pub use record::{set_url, source_url, UrlField};

use serde_json::Value;

/// Key holding the icon list when the feed root is an object.
pub const ICONS_KEY: &str = "icons";

#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    root: Value,
}

impl FeedDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self::new)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Icon records: the root array, or the array under `icons`.
    /// Any other shape has no records.
    pub fn items(&self) -> &[Value] {
        match &self.root {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => match map.get(ICONS_KEY) {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            _ => &[],
        }
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<Value>> {
        match &mut self.root {
            Value::Array(items) => Some(items),
            Value::Object(map) => match map.get_mut(ICONS_KEY) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }
}

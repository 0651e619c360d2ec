use std::collections::HashMap;
use crate::api::types::BodyId;

/// Body → display text, filled at init and read on every click.
#[derive(Debug, Clone, Default)]
pub struct DescriptionIndex {
    entries: HashMap<BodyId, String>,
}

impl DescriptionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the text for a body. A second insert for the same body
    /// replaces the first.
    pub fn insert(&mut self, body: BodyId, text: impl Into<String>) {
        if self.entries.insert(body, text.into()).is_some() {
            log::warn!("descriptions: {:?} registered twice, keeping the latest text", body);
        }
    }

    pub fn get(&self, body: BodyId) -> Option<&str> {
        self.entries.get(&body).map(String::as_str)
    }

    pub fn contains(&self, body: BodyId) -> bool {
        self.entries.contains_key(&body)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

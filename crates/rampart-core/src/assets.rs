//! Visual key → handle mapping supplied by the presentation layer.
//!
//! The simulation only ever emits [`VisualKey`]s. A catalog is constructed
//! explicitly by the application root and passed to whoever draws; a key with
//! no registered handle resolves to the placeholder instead of failing.

use std::collections::HashMap;

use crate::enums::VisualKey;

/// Opaque handle understood by a renderer (texture path, atlas region, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VisualHandle {
    Asset(String),
    /// Draw a plain colored box.
    Placeholder,
}

#[derive(Debug, Clone, Default)]
pub struct VisualCatalog {
    handles: HashMap<VisualKey, String>,
}

impl VisualCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: VisualKey, handle: impl Into<String>) {
        self.handles.insert(key, handle.into());
    }

    pub fn resolve(&self, key: VisualKey) -> VisualHandle {
        match self.handles.get(&key) {
            Some(handle) => VisualHandle::Asset(handle.clone()),
            None => VisualHandle::Placeholder,
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

//! Symbol index.
//!
//! Built once per rendering pass and shared read-only by every component.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{RenderError, Result};
use crate::parser::types::{Symbol, SymbolKind};

/// Lookup from symbol id to symbol, preserving graph order.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    symbols: HashMap<String, Symbol>,
    // Ids in first-seen order; duplicates keep their first position
    order: Vec<String>,
    // Container id -> ids of the symbols it contains, in graph order
    children: HashMap<String, Vec<String>>,
    // Id without its kind prefix -> first id in graph order carrying it
    type_names: HashMap<String, String>,
}

impl SymbolIndex {
    /// Indexes `symbols`. A repeated id replaces the earlier entry.
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut index = SymbolIndex::default();

        for symbol in symbols {
            let id = symbol.id.clone();
            if index.symbols.insert(id.clone(), symbol).is_some() {
                debug!(id = %id, "duplicate symbol id, keeping last entry");
            } else {
                index.order.push(id);
            }
        }

        for id in &index.order {
            if let Some(container) = index.symbols[id].container_id.as_ref() {
                index
                    .children
                    .entry(container.clone())
                    .or_default()
                    .push(id.clone());
            }
            index
                .type_names
                .entry(strip_kind_prefix(id).to_string())
                .or_insert_with(|| id.clone());
        }

        index
    }

    /// Looks up a symbol that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] for unknown ids.
    pub fn get(&self, id: &str) -> Result<&Symbol> {
        self.symbols.get(id).ok_or_else(|| RenderError::NotFound { id: id.to_string() })
    }

    pub fn find(&self, id: &str) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All symbols in graph order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.order.iter().map(move |id| &self.symbols[id])
    }

    /// Namespace symbols in graph order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.iter().filter(|s| s.kind == SymbolKind::Namespace)
    }

    /// Symbols whose container is `id`, in graph order, without any filtering.
    pub fn children_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(move |child| &self.symbols[child])
    }

    /// Finds a symbol whose id, minus its two-character kind prefix, equals `name`.
    pub fn find_by_type_name(&self, name: &str) -> Option<&Symbol> {
        self.type_names.get(name).and_then(|id| self.symbols.get(id))
    }
}

/// Drops the `X:` kind prefix of a documentation id, if present.
pub fn strip_kind_prefix(id: &str) -> &str {
    match id.as_bytes() {
        [_, b':', ..] => &id[2..],
        _ => id,
    }
}

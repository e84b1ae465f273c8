use serde::Deserialize;

use crate::error::{RenderError, Result};
use crate::index::SymbolIndex;
use crate::parser::types::*;

/// Symbol graph as written by the extraction front end.
#[derive(Debug, Default, Deserialize)]
pub struct SymbolGraph {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl SymbolGraph {
    /// Parses a symbol graph document.
    ///
    /// Accepts either `{"symbols": [...]}` or a bare array of symbols.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSymbolGraph`] when the JSON does not
    /// describe a symbol graph.
    pub fn from_json(json: &str) -> Result<Self> {
        // Decode to a value first so the error comes from the real shape
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(RenderError::InvalidSymbolGraph)?;
        let graph = if value.is_array() {
            SymbolGraph {
                symbols: serde_json::from_value(value).map_err(RenderError::InvalidSymbolGraph)?,
            }
        } else {
            serde_json::from_value(value).map_err(RenderError::InvalidSymbolGraph)?
        };

        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Consumes the graph into a lookup index.
    pub fn into_index(self) -> SymbolIndex {
        SymbolIndex::new(self.symbols)
    }
}

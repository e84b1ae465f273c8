use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::index::{strip_kind_prefix, SymbolIndex};
use crate::parser::types::Symbol;

/// Read-only context for a rendering pass: the symbol index, the
/// configuration and the symbol whose documentation is being rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub index: &'a SymbolIndex,
    pub config: &'a RenderConfig,
    /// Id of the symbol owning the markup, for error reporting.
    pub origin: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(index: &'a SymbolIndex, config: &'a RenderConfig) -> Self {
        Self {
            index,
            config,
            origin: "",
        }
    }

    pub fn with_origin(&self, origin: &'a str) -> Self {
        Self {
            index: self.index,
            config: self.config,
            origin,
        }
    }

    /// Resolves a cross-reference id.
    ///
    /// Ids missing from the index resolve to [`Reference::External`] when they
    /// carry the `!:` unresolved marker or name an external namespace.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingReferenceTarget`] for any other unknown id.
    pub fn resolve(&self, id: &str) -> Result<Reference<'a>> {
        if let Some(symbol) = self.index.find(id) {
            return Ok(Reference::Symbol(symbol));
        }

        let name = strip_kind_prefix(id);
        if id.starts_with("!:") || self.config.is_external_name(name) {
            return Ok(Reference::External(name.to_string()));
        }

        Err(RenderError::MissingReferenceTarget {
            id: id.to_string(),
            referenced_from: self.origin.to_string(),
        })
    }
}

/// Outcome of resolving a cross-reference.
#[derive(Debug, Clone)]
pub enum Reference<'a> {
    Symbol(&'a Symbol),
    /// Not indexed but recognisably external; rendered as text only.
    External(String),
}

/// Core rendering trait for documentation markup.
pub trait Render {
    fn render(&self, context: &RenderContext) -> Result<String>;
}

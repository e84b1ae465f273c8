//! # symdoc
//!
//! Renders a resolved symbol graph, with XML documentation markup attached
//! to each symbol, into Markdown documents, an outline and a navigation
//! manifest. Rendering is pure: no component reads or writes files.
//!
//! ```
//! use symdoc::{RenderConfig, SiteRenderer, Symbol, SymbolIndex, SymbolKind};
//!
//! let index = SymbolIndex::new(vec![
//!     Symbol::new("N:Acme", SymbolKind::Namespace, "Acme").with_anchor("acme"),
//! ]);
//! let config = RenderConfig::default();
//! let site = SiteRenderer::new(&index, &config).render().unwrap();
//! assert_eq!(site.documents[0].path, "acme.md");
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod manifest;
pub mod parser;
pub mod renderer;

#[cfg(test)]
mod tests;

pub use config::{OutputFormat, RenderConfig};
pub use error::{RenderError, Result};
pub use index::SymbolIndex;
pub use manifest::{NavigationPage, NavigationRoot, NavigationSection};
pub use parser::{parse_markup, Document, Symbol, SymbolGraph, SymbolKind};
pub use renderer::{DocumentComposer, RenderedSite, SiteRenderer, TocRenderer};

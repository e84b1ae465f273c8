use std::collections::HashMap;

use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::index::SymbolIndex;
use crate::manifest::NavigationRoot;
use crate::parser::types::{Document, Symbol};
use crate::renderer::document::DocumentComposer;
use crate::renderer::toc::{TocRenderer, SUMMARY_PATH};

/// Everything produced by one rendering pass.
#[derive(Debug, Clone)]
pub struct RenderedSite {
    /// One document per emitted symbol, in graph order.
    pub documents: Vec<Document>,
    /// The outline document.
    pub toc: Document,
    pub manifest: NavigationRoot,
}

/// Renders a whole symbol graph.
pub struct SiteRenderer<'a> {
    index: &'a SymbolIndex,
    config: &'a RenderConfig,
}

impl<'a> SiteRenderer<'a> {
    pub fn new(index: &'a SymbolIndex, config: &'a RenderConfig) -> Self {
        Self { index, config }
    }

    /// Symbols that get a document of their own, in graph order.
    pub fn emitted_symbols(&self) -> Vec<&'a Symbol> {
        let index: &'a SymbolIndex = self.index;
        index
            .iter()
            .filter(|symbol| {
                if !symbol.is_containable() {
                    debug!(id = %symbol.id, "skipping private or unsupported symbol");
                    return false;
                }
                if symbol.anchor_name.is_none() {
                    debug!(id = %symbol.id, "skipping symbol without anchor");
                    return false;
                }
                if symbol.is_member() && !self.config.output_member_files {
                    debug!(id = %symbol.id, "member rendered inline in its container");
                    return false;
                }
                true
            })
            .collect()
    }

    /// Renders every document, the outline and the manifest.
    ///
    /// # Errors
    ///
    /// The first failing symbol aborts the whole batch; colliding output is
    /// reported as [`RenderError::ConfigurationInconsistency`].
    pub fn render(&self) -> Result<RenderedSite> {
        let symbols = self.emitted_symbols();
        self.check_consistency(&symbols)?;

        let composer = DocumentComposer::new(self.index, self.config);
        let documents = self.compose_all(&composer, &symbols)?;

        let toc = TocRenderer.render(self.index, self.config);
        let manifest = NavigationRoot::from_documents(&self.config.manifest_group, &documents);

        info!(
            symbols = self.index.len(),
            documents = documents.len(),
            "rendered symbol graph"
        );

        Ok(RenderedSite {
            documents,
            toc,
            manifest,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn compose_all(&self, composer: &DocumentComposer, symbols: &[&Symbol]) -> Result<Vec<Document>> {
        symbols.iter().map(|symbol| composer.compose(symbol)).collect()
    }

    #[cfg(feature = "parallel")]
    fn compose_all(&self, composer: &DocumentComposer, symbols: &[&Symbol]) -> Result<Vec<Document>> {
        symbols.par_iter().map(|symbol| composer.compose(symbol)).collect()
    }

    fn check_consistency(&self, symbols: &[&Symbol]) -> Result<()> {
        let composer = DocumentComposer::new(self.index, self.config);

        // Paths double as slugs, so one map covers both
        let mut seen: HashMap<String, &str> = HashMap::new();
        seen.insert(SUMMARY_PATH.to_lowercase(), "the outline");

        for symbol in symbols {
            let path = composer.path(symbol)?;
            if let Some(previous) = seen.insert(path.to_lowercase(), &symbol.id) {
                return Err(RenderError::ConfigurationInconsistency(format!(
                    "{} and {} both render to {}",
                    previous, symbol.id, path
                )));
            }

            if !self.config.output_member_files {
                self.check_inline_anchors(&composer, symbol)?;
            }
        }

        Ok(())
    }

    /// Inline member anchors share the container's page, so they must not
    /// shadow the page anchor or a group heading anchor.
    fn check_inline_anchors(&self, composer: &DocumentComposer, container: &Symbol) -> Result<()> {
        let container_anchor = container.anchor_name.as_deref().unwrap_or_default();
        let groups = composer.member_groups(container);
        let detail_anchors: Vec<String> = groups.keys().map(|group| format!("{}-detail", group)).collect();

        for member in groups.values().flatten().filter(|m| m.is_member()) {
            let Some(anchor) = member.anchor_name.as_deref() else {
                continue;
            };
            if anchor == container_anchor || detail_anchors.iter().any(|a| a == anchor) {
                return Err(RenderError::ConfigurationInconsistency(format!(
                    "inline member {} reuses anchor {} on the page of {}",
                    member.id, anchor, container.id
                )));
            }
        }

        Ok(())
    }
}

//! Table of contents: an indented outline of every namespace and its
//! descendants, written as a document of its own.

use crate::config::RenderConfig;
use crate::index::SymbolIndex;
use crate::parser::types::{Document, Symbol, SymbolKind};
use crate::renderer::components::*;

pub const SUMMARY_PATH: &str = "SUMMARY.md";
pub const SUMMARY_TITLE: &str = "Summary";

pub struct TocRenderer;

impl TocRenderer {
    /// Builds the outline document.
    ///
    /// Each namespace is a root, in graph order. Children are pushed onto the
    /// stack in descending id order; nested namespaces are only reachable as
    /// roots.
    pub fn render(&self, index: &SymbolIndex, config: &RenderConfig) -> Document {
        let mut output = String::new();

        if config.output_front_matter {
            output.push_str(&DocRenderer.front_matter(SUMMARY_TITLE, &config.slug("summary")));
        }

        let mut stack: Vec<(&Symbol, usize)> = Vec::new();

        for namespace in index.namespaces() {
            stack.push((namespace, 0));

            while let Some((symbol, level)) = stack.pop() {
                output.push_str(&self.line_item(symbol, level, config));
                output.push('\n');

                let mut children: Vec<&Symbol> = index
                    .children_of(&symbol.id)
                    .filter(|child| self.is_outlined(child, config))
                    .collect();
                children.sort_by(|a, b| b.id.cmp(&a.id));

                stack.extend(children.into_iter().map(|child| (child, level + 1)));
            }
        }

        Document {
            path: SUMMARY_PATH.to_string(),
            title: SUMMARY_TITLE.to_string(),
            content: output,
        }
    }

    fn is_outlined(&self, symbol: &Symbol, config: &RenderConfig) -> bool {
        symbol.kind != SymbolKind::Namespace
            && symbol.is_containable()
            // Inline members have no document to point at
            && (config.output_member_files || !symbol.is_member())
    }

    fn line_item(&self, symbol: &Symbol, level: usize, config: &RenderConfig) -> String {
        let label = match symbol.kind {
            SymbolKind::Namespace => format!("{} Namespace", symbol.display_name),
            _ => symbol.display_name.clone(),
        };

        format!(
            "{}{}* {}",
            " ".repeat(config.summary_indent_level),
            " ".repeat(level * 2),
            LinkRenderer.link(&label, symbol, config, None, false)
        )
    }
}

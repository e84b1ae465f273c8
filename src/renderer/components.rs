use crate::config::RenderConfig;
use crate::error::Result;
use crate::index::strip_kind_prefix;
use crate::parser::types::{Symbol, SymbolKind};
use crate::renderer::traits::*;

/// Characters with meaning in Markdown link and heading syntax.
const RESERVED: [char; 9] = ['\\', '<', '>', '(', ')', '#', '`', '[', ']'];

/// Backslash-escapes Markdown reserved characters in a single pass.
///
/// Applying it twice escapes the inserted backslashes again, so callers
/// escape raw text exactly once.
pub fn escape_markdown(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            output.push('\\');
        }
        output.push(c);
    }
    output
}

/// Removes leading spaces and tabs from every line.
pub fn strip_leading_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_start_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapses rendered text onto one line.
pub fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Makes rendered text safe inside a table cell.
pub fn table_cell(text: &str) -> String {
    one_line(text).replace('|', "\\|")
}

/// Helper for building links to symbols
pub struct LinkRenderer;

impl LinkRenderer {
    /// Link target of a symbol's document, or `None` when it is not linkable.
    pub fn href(&self, symbol: &Symbol, config: &RenderConfig) -> Option<String> {
        if !symbol.is_linkable() {
            return None;
        }
        let anchor = symbol.anchor_name.as_deref()?;
        Some(format!(
            "{}/{}{}",
            config.path_prefix,
            anchor,
            config.link_extension()
        ))
    }

    /// Renders `label` as a link to `symbol`, or as escaped text when the
    /// symbol cannot be linked. `local` overrides the computed target.
    pub fn link(
        &self,
        label: &str,
        symbol: &Symbol,
        config: &RenderConfig,
        local: Option<&str>,
        as_code: bool,
    ) -> String {
        let label = escape_markdown(label);

        let Some(href) = self.href(symbol, config) else {
            return label;
        };

        let link_text = if as_code { format!("`{}`", label) } else { label };
        match local {
            Some(local) => format!("[{}]({})", link_text, local),
            None => format!("[{}]({})", link_text, href),
        }
    }

    /// Link labelled with the symbol's short display name.
    pub fn symbol_link(&self, symbol: &Symbol, config: &RenderConfig) -> String {
        self.link(&symbol.display_name, symbol, config, None, false)
    }

    /// Link labelled with the symbol's fully qualified name.
    pub fn full_symbol_link(&self, symbol: &Symbol, config: &RenderConfig) -> String {
        self.link(&symbol.full_display_name, symbol, config, None, false)
    }

    /// Link to a child from its container's tables: a sibling file, or an
    /// in-page anchor when members are rendered inline.
    pub fn member_link(&self, symbol: &Symbol, config: &RenderConfig) -> String {
        let Some(anchor) = symbol.anchor_name.as_deref() else {
            return escape_markdown(&symbol.display_name);
        };

        let local = if config.output_member_files || !symbol.is_member() {
            format!("./{}{}", anchor, config.link_extension())
        } else {
            format!("#{}", anchor)
        };
        self.link(&symbol.display_name, symbol, config, Some(&local), false)
    }

    /// Renders a cross-reference id, with an optional explicit label.
    ///
    /// # Errors
    ///
    /// Fails when the id is neither indexed nor recognisably external.
    pub fn reference(&self, context: &RenderContext, id: &str, label: Option<&str>) -> Result<String> {
        let rendered = match context.resolve(id)? {
            Reference::Symbol(symbol) => {
                let label = label.unwrap_or(&symbol.display_name);
                self.link(label, symbol, context.config, None, false)
            }
            Reference::External(name) => {
                let label = match label {
                    Some(label) => label.to_string(),
                    None => TypeRenderer.normalize_type_name(&name),
                };
                escape_markdown(&label)
            }
        };
        Ok(rendered)
    }
}

/// Helper for rendering type names and member titles
pub struct TypeRenderer;

impl TypeRenderer {
    /// Maps framework type names to their language keywords, including
    /// inside generic argument lists.
    pub fn normalize_type_name(&self, type_name: &str) -> String {
        let mut output = String::with_capacity(type_name.len());
        let mut token = String::new();

        for c in type_name.chars() {
            if c.is_alphanumeric() || c == '.' || c == '_' || c == '`' {
                token.push(c);
            } else {
                output.push_str(keyword_for(&token).unwrap_or(token.as_str()));
                token.clear();
                output.push(c);
            }
        }
        output.push_str(keyword_for(&token).unwrap_or(token.as_str()));

        output
    }

    /// Renders a type name, linked when it names an indexed symbol.
    pub fn type_link(&self, context: &RenderContext, type_name: &str) -> String {
        let text = self.normalize_type_name(type_name);

        let base = type_name
            .split(['<', '(', '['])
            .next()
            .unwrap_or(type_name);
        let target = context
            .index
            .find_by_type_name(type_name)
            .or_else(|| context.index.find_by_type_name(base));

        match target {
            Some(symbol) => LinkRenderer.link(&text, symbol, context.config, None, false),
            None => escape_markdown(&text),
        }
    }

    /// Renders a parameter's type, preferring the resolved type id.
    pub fn parameter_type(
        &self,
        context: &RenderContext,
        type_id: Option<&str>,
        type_name: Option<&str>,
        as_code: bool,
    ) -> Option<String> {
        let symbol = type_id.and_then(|id| context.index.find(id));

        match (symbol, type_name) {
            (Some(symbol), Some(name)) => Some(LinkRenderer.link(
                &self.normalize_type_name(name),
                symbol,
                context.config,
                None,
                false,
            )),
            (Some(symbol), None) => Some(LinkRenderer.symbol_link(symbol, context.config)),
            (None, Some(name)) if as_code => Some(format!("`{}`", self.normalize_type_name(name))),
            (None, Some(name)) => Some(escape_markdown(&self.normalize_type_name(name))),
            (None, None) => None,
        }
    }

    /// Title of a method or constructor: name, type parameters and parameter list.
    pub fn method_title(&self, context: &RenderContext, symbol: &Symbol) -> String {
        let mut title = match symbol.kind {
            SymbolKind::Constructor => symbol
                .container_id
                .as_deref()
                .and_then(|id| context.index.find(id))
                .map(|container| container.display_name.clone())
                .unwrap_or_else(|| symbol.display_name.clone()),
            _ => symbol.display_name.clone(),
        };

        if !symbol.is_member() {
            return title;
        }

        if !symbol.type_parameters.is_empty() {
            let params: Vec<String> = symbol
                .type_parameters
                .iter()
                .map(|p| self.type_link(context, p))
                .collect();
            title.push_str(&format!("\\<{}\\>", params.join(", ")));
        }

        if matches!(symbol.kind, SymbolKind::Method | SymbolKind::Constructor) {
            let params: Vec<String> = symbol
                .parameters
                .iter()
                .map(|p| match &p.type_name {
                    Some(ty) => format!("{} {}", self.type_link(context, ty), p.name),
                    None => p.name.clone(),
                })
                .collect();
            title.push_str(&format!("({})", params.join(", ")));
        }

        title
    }

    /// Value type column of a member table row.
    pub fn member_type(&self, context: &RenderContext, symbol: &Symbol) -> String {
        match (&symbol.kind, &symbol.type_name) {
            (SymbolKind::Type, _) => symbol.kind_label().to_string(),
            (_, Some(type_name)) => self.type_link(context, type_name),
            (_, None) => String::new(),
        }
    }

    /// Label of a symbol's base type for the inheritance line, if it should be shown.
    pub fn base_type(&self, context: &RenderContext, base_type_id: &str) -> Option<String> {
        match context.index.find(base_type_id) {
            Some(base) => Some(LinkRenderer.link(
                &base.display_name,
                base,
                context.config,
                None,
                true,
            )),
            None => {
                let name = strip_kind_prefix(base_type_id);
                if context.config.is_external_name(name) {
                    None
                } else {
                    Some(escape_markdown(name))
                }
            }
        }
    }
}

fn keyword_for(name: &str) -> Option<&str> {
    let keyword = match name {
        "System.String" => "string",
        "System.Int32" => "int",
        "System.Int64" => "long",
        "System.Int16" => "short",
        "System.UInt32" => "uint",
        "System.UInt64" => "ulong",
        "System.UInt16" => "ushort",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.Single" => "float",
        "System.Double" => "double",
        "System.Decimal" => "decimal",
        "System.Boolean" => "bool",
        "System.Char" => "char",
        "System.Object" => "object",
        "System.Void" => "void",
        _ => return None,
    };
    Some(keyword)
}

/// Helper for fixed document fragments
pub struct DocRenderer;

impl DocRenderer {
    /// A styled callout block with its markers on their own lines.
    pub fn callout(&self, style: &str, body: &str) -> String {
        format!(
            "{{% hint style=\"{}\" %}}\n{}\n{{% endhint %}}",
            style,
            body.trim()
        )
    }

    pub fn front_matter(&self, title: &str, slug: &str) -> String {
        format!("---\ntitle: {}\nslug: {}\n---\n", title, slug)
    }

    /// Front matter or a top-level heading, depending on configuration.
    pub fn header(&self, config: &RenderConfig, title: &str, slug_name: &str) -> String {
        if config.output_front_matter {
            self.front_matter(title, &config.slug(slug_name))
        } else {
            format!("# {}\n", title)
        }
    }

    pub fn obsolete_notice(&self, symbol: &Symbol, config: &RenderConfig) -> String {
        let product = config
            .product_name
            .as_ref()
            .map(|name| format!(" of {}", name))
            .unwrap_or_default();
        self.callout(
            "warning",
            &format!(
                "This {} is **obsolete** and may be removed from a future version{}.",
                symbol.kind_label().to_lowercase(),
                product
            ),
        )
    }
}

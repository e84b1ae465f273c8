//! Per-symbol document composition.
//!
//! A document is assembled from ordered sections. Each section is a pure
//! function returning a text fragment; empty fragments are dropped and the
//! rest are joined once at the end.

use std::collections::BTreeMap;

use tracing::trace;

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::index::SymbolIndex;
use crate::parser::markup::parse_markup;
use crate::parser::types::{DocElement, Document, Symbol, SymbolKind};
use crate::renderer::components::*;
use crate::renderer::traits::*;

/// Assembles the full document for a single symbol.
pub struct DocumentComposer<'a> {
    context: RenderContext<'a>,
}

impl<'a> DocumentComposer<'a> {
    pub fn new(index: &'a SymbolIndex, config: &'a RenderConfig) -> Self {
        Self {
            context: RenderContext::new(index, config),
        }
    }

    fn config(&self) -> &'a RenderConfig {
        self.context.config
    }

    /// Children of `symbol` that take part in grouping, by group label, each
    /// group ordered by id.
    pub fn member_groups(&self, symbol: &Symbol) -> BTreeMap<&'static str, Vec<&'a Symbol>> {
        let mut groups: BTreeMap<&'static str, Vec<&'a Symbol>> = BTreeMap::new();
        for child in self.context.index.children_of(&symbol.id) {
            if child.is_containable() {
                groups.entry(child.group_label()).or_default().push(child);
            }
        }
        for members in groups.values_mut() {
            members.sort_by(|a, b| a.id.cmp(&b.id));
        }
        groups
    }

    /// Document title of a symbol.
    pub fn title(&self, symbol: &Symbol) -> String {
        match symbol.kind {
            SymbolKind::Namespace => format!("{} Namespace", symbol.full_display_name),
            SymbolKind::Method | SymbolKind::Constructor => {
                TypeRenderer.method_title(&self.context, symbol)
            }
            _ => symbol.full_display_name.clone(),
        }
    }

    /// Relative output path of a symbol's document.
    ///
    /// # Errors
    ///
    /// Fails for symbols without an anchor name, which cannot be addressed.
    pub fn path(&self, symbol: &Symbol) -> Result<String> {
        let anchor = symbol.anchor_name.as_deref().ok_or_else(|| {
            RenderError::ConfigurationInconsistency(format!(
                "{} has no anchor name and cannot be given a document",
                symbol.id
            ))
        })?;
        Ok(format!("{}{}", anchor, self.config().format.extension()))
    }

    /// Renders the document for `symbol`.
    ///
    /// # Errors
    ///
    /// Propagates malformed markup, unresolved cross-references and
    /// unaddressable symbols; no partial document is produced.
    pub fn compose(&self, symbol: &Symbol) -> Result<Document> {
        let context = self.context.with_origin(&symbol.id);
        let docs = parse_markup(&symbol.id, &symbol.documentation_markup)?;
        let path = self.path(symbol)?;
        let title = self.title(symbol);
        let anchor = symbol.anchor_name.as_deref().unwrap_or_default();

        let mut sections = vec![
            DocRenderer.header(self.config(), &title, anchor),
            self.container_line(symbol),
            self.inheritance_line(symbol),
        ];

        // Obsolescence notice comes before any documentation
        if symbol.is_obsolete {
            sections.push(DocRenderer.obsolete_notice(symbol, self.config()));
        }

        sections.push(self.summary(&context, &docs)?);

        // Show the declaration, if this is not a namespace
        if symbol.kind != SymbolKind::Namespace {
            sections.push(format!(
                "```{}\n{}\n```",
                self.config().declaration_language,
                symbol.declaration_text.trim_end()
            ));
        }

        sections.extend(self.detail_sections(&context, symbol, &docs, false)?);
        sections.extend(self.member_tables(symbol)?);
        sections.push(self.see_also(&context, &docs)?);

        if !self.config().output_member_files {
            sections.extend(self.inline_details(symbol)?);
        }

        trace!(id = %symbol.id, path = %path, "composed document");

        Ok(Document {
            path,
            title,
            content: join_sections(sections),
        })
    }

    fn container_line(&self, symbol: &Symbol) -> String {
        if !self.config().output_member_files || symbol.kind == SymbolKind::Namespace {
            return String::new();
        }

        symbol
            .container_id
            .as_deref()
            .and_then(|id| self.context.index.find(id))
            .map(|container| {
                format!(
                    "{} in {}",
                    symbol.kind_label(),
                    LinkRenderer.symbol_link(container, self.config())
                )
            })
            .unwrap_or_default()
    }

    fn inheritance_line(&self, symbol: &Symbol) -> String {
        symbol
            .base_type_id
            .as_deref()
            .and_then(|base| TypeRenderer.base_type(&self.context, base))
            .map(|base| format!("Inherits from {}", base))
            .unwrap_or_default()
    }

    fn summary(&self, context: &RenderContext, docs: &DocElement) -> Result<String> {
        match docs.element("summary") {
            Some(summary) => Ok(summary.render(context)?.trim().to_string()),
            None => Ok(String::new()),
        }
    }

    /// One-line summary of another symbol, as shown in tables and "See Also".
    fn summary_line(&self, symbol: &Symbol) -> Result<String> {
        let context = self.context.with_origin(&symbol.id);
        let docs = parse_markup(&symbol.id, &symbol.documentation_markup)?;
        Ok(one_line(&self.summary(&context, &docs)?))
    }

    /// Remarks, parameters, type parameters, returns and exceptions. Shared by
    /// documents and inline member details, which use deeper headings and
    /// plain-text parameter types.
    fn detail_sections(
        &self,
        context: &RenderContext,
        symbol: &Symbol,
        docs: &DocElement,
        inline: bool,
    ) -> Result<Vec<String>> {
        let level = if inline { "####" } else { "##" };
        let mut sections = Vec::new();

        // Add remarks, if present
        if let Some(remarks) = docs.element("remarks") {
            let remarks = remarks.render(context)?;
            if !remarks.trim().is_empty() {
                sections.push(format!("**Remarks**: {}", remarks.trim()));
            }
        }

        let params = docs
            .elements("param")
            .map(|param| self.parameter(context, symbol, param, !inline))
            .collect::<Result<Vec<_>>>()?;
        if !params.is_empty() {
            sections.push(format!("{} Parameters\n\n{}", level, params.join("\n\n")));
        }

        let type_params = docs
            .elements("typeparam")
            .map(|param| {
                let name = escape_markdown(param.attribute("name").unwrap_or_default());
                Ok(with_description(name, &param.render(context)?))
            })
            .collect::<Result<Vec<_>>>()?;
        if !type_params.is_empty() {
            sections.push(format!(
                "{} Type Parameters\n\n{}",
                level,
                type_params.join("\n\n")
            ));
        }

        // Generate a 'Returns' section only if we actually have content for it
        if let Some(returns) = docs.element("returns").filter(|r| r.has_children()) {
            let returns = returns.render(context)?;
            if !returns.trim().is_empty() {
                sections.push(format!("{} Returns\n\n{}", level, returns.trim()));
            }
        }

        let exceptions = docs
            .exceptions()
            .map(|exception| self.exception_row(context, exception))
            .collect::<Result<Vec<_>>>()?;
        if !exceptions.is_empty() {
            sections.push(format!(
                "{} Exceptions\n\n|Type|Description|\n|:---|:---|\n{}",
                level,
                exceptions.join("\n")
            ));
        }

        Ok(sections)
    }

    fn parameter(
        &self,
        context: &RenderContext,
        symbol: &Symbol,
        param: &DocElement,
        code_types: bool,
    ) -> Result<String> {
        let name = param.attribute("name").unwrap_or_default();
        let declared = symbol.parameters.iter().find(|p| p.name == name);

        let type_id = param
            .attribute("typeID")
            .or_else(|| declared.and_then(|p| p.type_id.as_deref()));
        let type_name = param
            .attribute("typeName")
            .or_else(|| declared.and_then(|p| p.type_name.as_deref()));

        let mut line = String::new();
        if let Some(ty) = TypeRenderer.parameter_type(context, type_id, type_name, code_types) {
            line.push_str(&ty);
            line.push(' ');
        }
        line.push_str(&escape_markdown(name));

        Ok(with_description(line, &param.render(context)?))
    }

    fn exception_row(&self, context: &RenderContext, exception: &DocElement) -> Result<String> {
        let cref = exception.attribute("cref").ok_or_else(|| RenderError::MalformedMarkup {
            id: context.origin.to_string(),
            message: "exception entry without cref".to_string(),
        })?;

        let exception_type = match context.resolve(cref)? {
            Reference::Symbol(target) => LinkRenderer.symbol_link(target, self.config()),
            Reference::External(name) => escape_markdown(&TypeRenderer.normalize_type_name(&name)),
        };

        Ok(format!(
            "|{}|{}|",
            exception_type,
            table_cell(&exception.render(context)?)
        ))
    }

    fn member_tables(&self, symbol: &Symbol) -> Result<Vec<String>> {
        let mut sections = Vec::new();

        for (group, members) in self.member_groups(symbol) {
            let has_type = group != "Constructors";

            let mut table = format!("## {}\n\n", group);
            if has_type {
                table.push_str("|Type|Name|Summary|\n|:---|:---|:---|");
            } else {
                table.push_str("|Name|Summary|\n|:---|:---|");
            }

            for member in members {
                let link = LinkRenderer.member_link(member, self.config());
                let summary = table_cell(&self.summary_line(member)?);

                if has_type {
                    let member_type = TypeRenderer.member_type(&self.context, member);
                    table.push_str(&format!("\n|{}|{}|{}|", member_type, link, summary));
                } else {
                    table.push_str(&format!("\n|{}|{}|", link, summary));
                }
            }

            sections.push(table);
        }

        Ok(sections)
    }

    fn see_also(&self, context: &RenderContext, docs: &DocElement) -> Result<String> {
        let mut entries = Vec::new();

        for see_also in docs.elements("seealso") {
            if let Some(cref) = see_also.attribute("cref") {
                let entry = match context.resolve(cref)? {
                    Reference::Symbol(target) => {
                        let mut entry =
                            format!("* {}", LinkRenderer.full_symbol_link(target, self.config()));
                        // Unresolved external markers have no summary to show
                        if !target.id.starts_with("!:") {
                            let summary = self.summary_line(target)?;
                            if !summary.is_empty() {
                                entry.push_str(&format!(": {}", summary));
                            }
                        }
                        entry
                    }
                    Reference::External(name) => {
                        format!("* {}", escape_markdown(&TypeRenderer.normalize_type_name(&name)))
                    }
                };
                entries.push(entry);
            } else if let Some(href) = see_also.attribute("href") {
                let text = one_line(&see_also.text());
                let label = if text.is_empty() { href } else { text.as_str() };
                entries.push(format!("* [{}]({})", escape_markdown(label), href));
            }
        }

        if entries.is_empty() {
            return Ok(String::new());
        }

        Ok(format!("## See Also\n\n{}", entries.join("\n")))
    }

    /// Full member documentation inside the container's document, used when
    /// members do not get files of their own.
    fn inline_details(&self, symbol: &Symbol) -> Result<Vec<String>> {
        let mut sections = Vec::new();

        for (group, members) in self.member_groups(symbol) {
            let members: Vec<_> = members.into_iter().filter(|m| m.is_member()).collect();
            if members.is_empty() {
                continue;
            }

            let mut blocks = Vec::new();
            for member in members {
                blocks.push(self.member_detail(member)?);
            }

            sections.push(format!(
                "## <a id='{}-detail' /> {}\n\n{}",
                group,
                group,
                blocks.join("\n\n---\n\n")
            ));
        }

        Ok(sections)
    }

    fn member_detail(&self, member: &Symbol) -> Result<String> {
        let context = self.context.with_origin(&member.id);
        let docs = parse_markup(&member.id, &member.documentation_markup)?;
        let anchor = member.anchor_name.as_deref().unwrap_or_default();

        let member_type = match member.kind {
            SymbolKind::Constructor => String::new(),
            _ => TypeRenderer.member_type(&context, member),
        };
        let name = match member.kind {
            SymbolKind::Method | SymbolKind::Constructor => {
                TypeRenderer.method_title(&context, member)
            }
            _ => escape_markdown(&member.display_name),
        };

        let mut parts = vec![
            format!("### <a id='{}'/>{} {}", anchor, member_type, name),
            one_line(&self.summary(&context, &docs)?),
        ];
        parts.extend(self.detail_sections(&context, member, &docs, true)?);

        Ok(join_sections(parts).trim_end().to_string())
    }
}

fn with_description(line: String, description: &str) -> String {
    let description = one_line(description);
    if description.is_empty() {
        line
    } else {
        format!("{} - {}", line, description)
    }
}

fn join_sections(sections: Vec<String>) -> String {
    let mut content = sections
        .iter()
        .map(|s| s.trim_end())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    content.push('\n');
    content
}

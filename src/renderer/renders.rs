//! Documentation markup translation.
//!
//! Markup trees are walked iteratively: an explicit stack of enter/leave
//! steps and a stack of output buffers, one per open element. Leaving an
//! element wraps its buffered content and appends it to the parent buffer.

use crate::error::Result;
use crate::parser::types::{DocElement, DocNode};
use crate::renderer::components::*;
use crate::renderer::traits::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    Bullet,
    Number,
    Table,
}

impl ListStyle {
    fn of(list: &DocElement) -> Self {
        match list.attribute("type") {
            Some("number") => ListStyle::Number,
            Some("table") => ListStyle::Table,
            _ => ListStyle::Bullet,
        }
    }
}

/// Where a node sits relative to an enclosing list.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Plain,
    // Direct child of a list or a non-table item; indentation text is dropped
    Layout,
    Item { style: ListStyle, ordinal: usize },
    Cell,
}

enum Step<'a> {
    Enter(&'a DocNode, Slot),
    Leave(&'a DocElement, Slot),
}

impl Render for DocElement {
    /// Translates the element's content; the element's own tag is not rendered.
    fn render(&self, context: &RenderContext) -> Result<String> {
        translate(&self.children, context)
    }
}

impl Render for DocNode {
    fn render(&self, context: &RenderContext) -> Result<String> {
        translate(std::slice::from_ref(self), context)
    }
}

fn translate(nodes: &[DocNode], context: &RenderContext) -> Result<String> {
    let mut buffers = vec![String::new()];
    let mut stack: Vec<Step> = nodes
        .iter()
        .rev()
        .map(|node| Step::Enter(node, Slot::Plain))
        .collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(DocNode::Text(text), Slot::Layout | Slot::Cell)
                if text.trim().is_empty() => {}
            Step::Enter(DocNode::Text(text), _) => {
                append(&mut buffers, &escape_markdown(text));
            }
            Step::Enter(DocNode::Element(element), slot) => {
                if let Some(rendered) = render_leaf(element, context)? {
                    append(&mut buffers, &rendered);
                    continue;
                }

                buffers.push(String::new());
                stack.push(Step::Leave(element, slot));
                let slots = child_slots(element, slot);
                for (child, child_slot) in element.children.iter().zip(slots).rev() {
                    stack.push(Step::Enter(child, child_slot));
                }
            }
            Step::Leave(element, slot) => {
                let inner = buffers.pop().unwrap_or_default();
                append(&mut buffers, &close_element(element, slot, &inner));
            }
        }
    }

    let output = buffers.pop().unwrap_or_default();
    Ok(strip_leading_whitespace(&output))
}

fn append(buffers: &mut [String], text: &str) {
    if let Some(buffer) = buffers.last_mut() {
        buffer.push_str(text);
    }
}

/// Slots for the children of `element`, in child order.
fn child_slots(element: &DocElement, slot: Slot) -> Vec<Slot> {
    match element.name.as_str() {
        "list" => {
            let style = ListStyle::of(element);
            let mut ordinal = 0;
            element
                .children
                .iter()
                .map(|child| match child {
                    DocNode::Element(item) if item.name == "item" => {
                        ordinal += 1;
                        Slot::Item { style, ordinal }
                    }
                    DocNode::Element(item) if item.name == "listheader" => {
                        Slot::Item { style, ordinal: 0 }
                    }
                    _ => Slot::Layout,
                })
                .collect()
        }
        "item" | "listheader" => match slot {
            Slot::Item {
                style: ListStyle::Table,
                ..
            } => vec![Slot::Cell; element.children.len()],
            Slot::Item { .. } => vec![Slot::Layout; element.children.len()],
            _ => vec![Slot::Plain; element.children.len()],
        },
        _ => vec![Slot::Plain; element.children.len()],
    }
}

/// Elements rendered from their attributes and raw text, without descending.
fn render_leaf(element: &DocElement, context: &RenderContext) -> Result<Option<String>> {
    let rendered = match element.name.as_str() {
        "see" | "seealso" => render_reference(element, context)?,
        "paramref" | "typeparamref" => {
            format!("`{}`", element.attribute("name").unwrap_or_default())
        }
        "c" => code_span(&element.text()),
        "code" => {
            let language = element
                .attribute("lang")
                .or_else(|| element.attribute("language"))
                .unwrap_or_default();
            format!("\n```{}\n{}\n```\n", language, element.text().trim_matches('\n'))
        }
        "br" => "\n".to_string(),
        "inheritdoc" => String::new(),
        _ => return Ok(None),
    };
    Ok(Some(rendered))
}

fn render_reference(element: &DocElement, context: &RenderContext) -> Result<String> {
    let text = one_line(&element.text());
    let label = (!text.is_empty()).then_some(text.as_str());

    if let Some(cref) = element.attribute("cref") {
        return LinkRenderer.reference(context, cref, label);
    }

    if let Some(href) = element.attribute("href") {
        return Ok(format!("[{}]({})", escape_markdown(label.unwrap_or(href)), href));
    }

    if let Some(word) = element.attribute("langword") {
        return Ok(code_span(word));
    }

    // Only a display name: never a link
    Ok(escape_markdown(&text))
}

fn code_span(code: &str) -> String {
    if code.contains('`') {
        format!("`` {} ``", code)
    } else {
        format!("`{}`", code)
    }
}

fn close_element(element: &DocElement, slot: Slot, inner: &str) -> String {
    match element.name.as_str() {
        "para" | "p" | "callout" => match element
            .attribute("style")
            .or_else(|| element.attribute("type"))
        {
            Some(style) => format!("\n{}\n", DocRenderer.callout(style, inner)),
            None => format!("\n\n{}\n\n", inner.trim()),
        },
        "b" | "strong" => format!("**{}**", inner),
        "i" | "em" => format!("*{}*", inner),
        "list" => match ListStyle::of(element) {
            ListStyle::Table => table(inner),
            _ => format!("\n\n{}\n", inner.trim()),
        },
        "item" | "listheader" => match slot {
            Slot::Item {
                style: ListStyle::Table,
                ..
            } => format!("{}|\n", inner.trim()),
            Slot::Item { ordinal: 0, .. } => format!("**{}**\n", inner.trim()),
            Slot::Item {
                style: ListStyle::Number,
                ordinal,
            } => format!("{}. {}\n", ordinal, inner.trim()),
            Slot::Item { .. } => format!("* {}\n", inner.trim()),
            _ => inner.to_string(),
        },
        "term" => match slot {
            Slot::Cell => format!("|{}", table_cell(inner)),
            _ => format!("**{}**: ", inner.trim()),
        },
        "description" => match slot {
            Slot::Cell => format!("|{}", table_cell(inner)),
            _ => inner.trim().to_string(),
        },
        _ => inner.to_string(),
    }
}

/// Turns table rows into a Markdown table, using the first row as header.
fn table(rows: &str) -> String {
    let mut lines = rows.lines().map(str::trim).filter(|line| !line.is_empty());
    let Some(header) = lines.next() else {
        return String::new();
    };

    let columns = header.matches('|').count().saturating_sub(1).max(1);
    let mut output = format!("\n\n{}\n{}|\n", header, "|:---".repeat(columns));
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output
}

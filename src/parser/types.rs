use serde::{Deserialize, Serialize};

/// Symbol kind, as resolved by the extraction front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Namespace,
    Type,
    Method,
    Property,
    Field,
    Event,
    Constructor,
    #[serde(other)]
    Other,
}

/// Declared accessibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    Internal,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

/// Finer classification of `Type` symbols, used for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Record,
}

/// A parameter of a method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterInfo {
    pub name: String,
    pub type_name: Option<String>,
    #[serde(rename = "typeID", alias = "typeId")]
    pub type_id: Option<String>,
}

/// A documented code entity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub id: String,
    pub kind: SymbolKind,
    pub display_name: String,
    pub full_display_name: String,
    #[serde(default, rename = "containerID", alias = "containerId")]
    pub container_id: Option<String>,
    #[serde(default, rename = "baseTypeID", alias = "baseTypeId")]
    pub base_type_id: Option<String>,
    #[serde(default)]
    pub anchor_name: Option<String>,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default, alias = "declaration")]
    pub declaration_text: String,
    /// Raw documentation markup, parsed on demand into a [`DocElement`].
    #[serde(default, alias = "documentation")]
    pub documentation_markup: String,
    #[serde(default, alias = "obsolete")]
    pub is_obsolete: bool,
    #[serde(default)]
    pub type_category: Option<TypeCategory>,
    /// Value type of a member: return, property, field or event type.
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
}

impl Symbol {
    /// Builds a public symbol with empty documentation.
    pub fn new(id: impl Into<String>, kind: SymbolKind, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id: id.into(),
            kind,
            full_display_name: display_name.clone(),
            display_name,
            container_id: None,
            base_type_id: None,
            anchor_name: None,
            accessibility: Accessibility::Public,
            declaration_text: String::new(),
            documentation_markup: String::new(),
            is_obsolete: false,
            type_category: None,
            type_name: None,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor_name = Some(anchor.into());
        self
    }

    pub fn with_full_name(mut self, full_display_name: impl Into<String>) -> Self {
        self.full_display_name = full_display_name.into();
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_docs(mut self, markup: impl Into<String>) -> Self {
        self.documentation_markup = markup.into();
        self
    }

    pub fn with_declaration(mut self, declaration: impl Into<String>) -> Self {
        self.declaration_text = declaration.into();
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_base_type(mut self, base_type_id: impl Into<String>) -> Self {
        self.base_type_id = Some(base_type_id.into());
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    /// Symbols that take part in grouping, outlines and document emission.
    pub fn is_containable(&self) -> bool {
        self.kind != SymbolKind::Other && self.accessibility != Accessibility::Private
    }

    /// Symbols that may appear as a link target.
    pub fn is_linkable(&self) -> bool {
        self.anchor_name.is_some() && self.is_containable()
    }

    /// Singular, human-readable kind label ("Method", "Class", ...).
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            SymbolKind::Namespace => "Namespace",
            SymbolKind::Type => match self.type_category {
                Some(TypeCategory::Class) => "Class",
                Some(TypeCategory::Struct) => "Struct",
                Some(TypeCategory::Interface) => "Interface",
                Some(TypeCategory::Enum) => "Enum",
                Some(TypeCategory::Delegate) => "Delegate",
                Some(TypeCategory::Record) => "Record",
                None => "Type",
            },
            SymbolKind::Method => "Method",
            SymbolKind::Property => "Property",
            SymbolKind::Field => "Field",
            SymbolKind::Event => "Event",
            SymbolKind::Constructor => "Constructor",
            SymbolKind::Other => "Item",
        }
    }

    /// Plural kind label used as a member group heading.
    pub fn group_label(&self) -> &'static str {
        match self.kind {
            SymbolKind::Namespace => "Namespaces",
            SymbolKind::Type => match self.type_category {
                Some(TypeCategory::Class) => "Classes",
                Some(TypeCategory::Struct) => "Structs",
                Some(TypeCategory::Interface) => "Interfaces",
                Some(TypeCategory::Enum) => "Enums",
                Some(TypeCategory::Delegate) => "Delegates",
                Some(TypeCategory::Record) => "Records",
                None => "Types",
            },
            SymbolKind::Method => "Methods",
            SymbolKind::Property => "Properties",
            SymbolKind::Field => "Fields",
            SymbolKind::Event => "Events",
            SymbolKind::Constructor => "Constructors",
            SymbolKind::Other => "Other",
        }
    }

    /// Members only get their own document when member files are enabled.
    pub fn is_member(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Method
                | SymbolKind::Property
                | SymbolKind::Field
                | SymbolKind::Event
                | SymbolKind::Constructor
        )
    }
}

/// A node of parsed documentation markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    Text(String),
    Element(DocElement),
}

/// A tagged element of documentation markup with its attributes and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<DocNode>,
}

impl DocElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child element with the given tag name.
    pub fn element(&self, name: &str) -> Option<&DocElement> {
        self.children.iter().find_map(|child| match child {
            DocNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Direct child elements with the given tag name, in document order.
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocElement> + 'a {
        self.children.iter().filter_map(move |child| match child {
            DocNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Exception entries, accepting both `exception` and `except` tags.
    pub fn exceptions(&self) -> impl Iterator<Item = &DocElement> + '_ {
        self.children.iter().filter_map(|child| match child {
            DocNode::Element(element) if element.name == "exception" || element.name == "except" => {
                Some(element)
            }
            _ => None,
        })
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut output = String::new();
        let mut stack: Vec<&DocNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                DocNode::Text(text) => output.push_str(text),
                DocNode::Element(element) => stack.extend(element.children.iter().rev()),
            }
        }
        output
    }
}

/// One rendered output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Relative file path.
    pub path: String,
    pub title: String,
    /// Fully rendered body.
    pub content: String,
}

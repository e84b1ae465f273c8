use serde::Deserialize;

/// Immutable options consumed throughout a rendering pass.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Base path prepended to every symbol link.
    pub path_prefix: String,
    /// Routing prefix used for front-matter slugs.
    pub slug_prefix: String,
    /// Emit a front-matter block instead of a top-level heading.
    pub output_front_matter: bool,
    /// One document per member, or inline detail sections in the parent.
    pub output_member_files: bool,
    pub strip_extension_from_links: bool,
    /// Base indentation (in spaces) of the outline.
    pub summary_indent_level: usize,
    /// Product named in obsolescence notices.
    pub product_name: Option<String>,
    /// Info string of the declaration code fence.
    pub declaration_language: String,
    /// Id name prefixes treated as external, unlinkable types.
    pub external_namespaces: Vec<String>,
    /// Section label for the generated pages in the navigation manifest.
    pub manifest_group: String,
    pub format: OutputFormat,
}

impl RenderConfig {
    /// Link suffix for generated documents, honouring `strip_extension_from_links`.
    pub fn link_extension(&self) -> &'static str {
        if self.strip_extension_from_links {
            ""
        } else {
            self.format.extension()
        }
    }

    /// Whether a type name (id without its kind prefix) belongs to an external namespace.
    pub fn is_external_name(&self, name: &str) -> bool {
        self.external_namespaces
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Joins the slug prefix and a page name the way front matter expects.
    pub fn slug(&self, name: &str) -> String {
        format!("{}/{}", self.slug_prefix, name)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            path_prefix: String::new(),
            slug_prefix: String::new(),
            output_front_matter: false,
            output_member_files: true,
            strip_extension_from_links: false,
            summary_indent_level: 0,
            product_name: None,
            declaration_language: "csharp".to_string(),
            external_namespaces: vec!["System.".to_string()],
            manifest_group: "API Documentation".to_string(),
            format: OutputFormat::Markdown,
        }
    }
}

/// Output format configuration
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    // Future: Html
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => ".md",
        }
    }
}

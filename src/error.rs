//! Error types for the rendering engine.

/// Error raised while indexing or rendering a symbol graph.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A lookup asked for an id that is not in the symbol index.
    #[error("symbol not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A documentation cross-reference points at an id the index does not know.
    #[error("missing reference target {id} (referenced from {referenced_from})")]
    MissingReferenceTarget {
        /// The unresolved target id.
        id: String,
        /// The symbol whose documentation holds the reference.
        referenced_from: String,
    },

    /// Documentation markup that is not well-formed.
    #[error("malformed documentation markup on {id}: {message}")]
    MalformedMarkup {
        /// The symbol carrying the markup.
        id: String,
        /// Parser diagnostic.
        message: String,
    },

    /// Options or data that would produce colliding output.
    #[error("configuration inconsistency: {0}")]
    ConfigurationInconsistency(String),

    /// The symbol graph JSON could not be decoded.
    #[error("invalid symbol graph")]
    InvalidSymbolGraph(#[source] serde_json::Error),

    /// A navigation manifest could not be decoded or encoded.
    #[error("invalid navigation manifest")]
    InvalidManifest(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

//! Navigation manifest consumed by the documentation site.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::parser::types::Document;

/// A single navigable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPage {
    pub title: String,
    pub path: String,
}

/// A named group of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSection {
    pub group: String,
    pub pages: Vec<NavigationPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRoot {
    pub navigation: Vec<NavigationSection>,
}

impl NavigationRoot {
    /// One section holding every document, in the order given.
    pub fn from_documents<'a>(group: &str, documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let pages = documents
            .into_iter()
            .map(|doc| NavigationPage {
                title: doc.title.clone(),
                path: doc.path.clone(),
            })
            .collect();

        Self {
            navigation: vec![NavigationSection {
                group: group.to_string(),
                pages,
            }],
        }
    }

    /// Loads a hand-authored manifest, such as the guide pages.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidManifest`] if `json` is not a manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RenderError::InvalidManifest)
    }

    /// Puts the sections of `other` before this manifest's own.
    pub fn prepend(&mut self, other: NavigationRoot) {
        let own = std::mem::replace(&mut self.navigation, other.navigation);
        self.navigation.extend(own);
    }

    pub fn page_count(&self) -> usize {
        self.navigation.iter().map(|section| section.pages.len()).sum()
    }

    /// Serializes with indentation.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidManifest`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RenderError::InvalidManifest)
    }
}

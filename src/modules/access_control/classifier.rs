//! Asset classification by request path.

/// Outcome of classifying a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    /// Non-page asset; passes without any check.
    Exempt,
    /// Page request; goes through the allow-list and override checks.
    NeedsCheck,
}

/// Textual asset rule: a path containing `.` that does not end in the index
/// document is an asset (stylesheet, script, image, ...).
#[derive(Debug, Clone)]
pub struct AssetClassifier {
    index_document: String,
}

impl AssetClassifier {
    /// Create a classifier that always checks `index_document`.
    #[must_use]
    pub fn new(index_document: impl Into<String>) -> Self {
        Self {
            index_document: index_document.into(),
        }
    }

    /// Classify a request path.
    #[must_use]
    pub fn classify(&self, path: &str) -> AssetClass {
        if path.contains('.') && !path.ends_with(&self.index_document) {
            AssetClass::Exempt
        } else {
            AssetClass::NeedsCheck
        }
    }
}

impl Default for AssetClassifier {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_INDEX_DOCUMENT)
    }
}

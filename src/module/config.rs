//! Module configuration handed to `init`.

/// Configuration passed to a module at initialisation.
///
/// Carries the raw TOML text of the gate configuration. An empty config
/// means "keep the configuration the module was constructed with".
#[derive(Debug, Clone, Default)]
pub struct ModuleConfig {
    raw: Option<String>,
}

impl ModuleConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from a raw TOML string.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    /// Gets the raw configuration string.
    #[must_use]
    pub fn raw_config(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

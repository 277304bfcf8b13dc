//! Module status reporting.

/// Represents the current status of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    /// Configuration accepted, stores not yet connected.
    Initializing,

    /// Handling requests.
    Running,

    /// Module is stopped.
    Stopped,

    /// Module encountered an error.
    Error {
        /// Error message.
        message: String,
    },
}

impl ModuleStatus {
    /// Returns `true` if the module is in a healthy state.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns `true` if the module is stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Error { message } => write!(f, "error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(ModuleStatus::Running.is_healthy());
        assert!(!ModuleStatus::Initializing.is_healthy());
        assert!(ModuleStatus::Stopped.is_stopped());
        assert!(!ModuleStatus::Error {
            message: "x".to_string()
        }
        .is_healthy());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ModuleStatus::Running.to_string(), "running");
        let status = ModuleStatus::Error {
            message: "store unreachable".to_string(),
        };
        assert_eq!(status.to_string(), "error: store unreachable");
    }
}

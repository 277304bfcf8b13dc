//! Configuration validation system.

use super::types::GateConfig;
use crate::modules::access_control::{AllowListBackend, AssetClass, AssetClassifier};

/// A single validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// Error message.
    pub message: String,
    /// Severity level.
    pub severity: ValidationSeverity,
}

impl ValidationError {
    /// Create a new error.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }

    /// Create a new warning.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Severity of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Error - configuration is invalid.
    Error,
    /// Warning - configuration may have issues.
    Warning,
}

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if the validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self
            .errors
            .iter()
            .any(|e| e.severity == ValidationSeverity::Error)
    }

    /// Get all validation issues.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get only errors (not warnings).
    #[must_use]
    pub fn errors_only(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Error)
            .collect()
    }

    /// Get only warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Warning)
            .collect()
    }

    /// Merge another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }
}

/// Trait for configuration validators.
pub trait Validator: std::fmt::Debug + Send + Sync {
    /// Validate a configuration and return any errors.
    fn validate(&self, config: &GateConfig) -> ValidationResult;
}

/// Runs each section's own checks and collects every failure.
#[derive(Debug, Default)]
pub struct BasicValidator;

impl BasicValidator {
    /// Create a new basic validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Validator for BasicValidator {
    fn validate(&self, config: &GateConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        let sections = [
            ("gate", config.gate.validate()),
            ("allow_list", config.allow_list.validate()),
            ("secret", config.secret.validate()),
            ("logging", config.logging.validate()),
        ];

        for (field, outcome) in sections {
            if let Err(message) = outcome {
                result.add_error(ValidationError::error(field, message));
            }
        }

        result
    }
}

/// Flags policies that would loop restricted requests back through the checks.
#[derive(Debug, Default)]
pub struct RestrictedPathValidator;

impl RestrictedPathValidator {
    /// Create a new restricted path validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Validator for RestrictedPathValidator {
    fn validate(&self, config: &GateConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        let classifier = AssetClassifier::new(&config.gate.index_document);
        if classifier.classify(&config.gate.restricted_path) == AssetClass::NeedsCheck {
            result.add_error(ValidationError::warning(
                "gate.restricted_path",
                format!(
                    "'{}' is not an exempt asset; restricted requests will be checked again on re-entry",
                    config.gate.restricted_path
                ),
            ));
        }

        if let AllowListBackend::Memory { addresses } = &config.allow_list.backend {
            if addresses.is_empty() {
                result.add_error(ValidationError::warning(
                    "allow_list.backend",
                    "allow-list is empty; every page request will require the override token",
                ));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_validator_valid() {
        let config = GateConfig::default();
        let validator = BasicValidator::new();
        let result = validator.validate(&config);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_basic_validator_collects_all_sections() {
        let mut config = GateConfig::default();
        config.gate.name = String::new();
        config.secret.parameter = String::new();

        let validator = BasicValidator::new();
        let result = validator.validate(&config);

        assert!(!result.is_valid());
        assert_eq!(result.errors_only().len(), 2);
        assert!(result.errors()[0].message.contains("name cannot be empty"));
        assert_eq!(result.errors()[1].field, "secret");
    }

    #[test]
    fn test_restricted_path_validator_warns() {
        let mut config = GateConfig::default();
        config.gate.restricted_path = "/restricted".to_string();

        let result = RestrictedPathValidator::new().validate(&config);

        assert!(result.is_valid());
        assert!(result
            .warnings()
            .iter()
            .any(|w| w.field == "gate.restricted_path"));
    }

    #[test]
    fn test_restricted_path_validator_default_path_is_exempt() {
        let mut config = GateConfig::default();
        config.allow_list.backend = AllowListBackend::Memory {
            addresses: vec!["10.0.0.5".to_string()],
        };

        let result = RestrictedPathValidator::new().validate(&config);
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result1 = ValidationResult::new();
        result1.add_error(ValidationError::error("field1", "error1"));

        let mut result2 = ValidationResult::new();
        result2.add_error(ValidationError::warning("field2", "warning1"));

        result1.merge(result2);
        assert_eq!(result1.errors().len(), 2);
        assert_eq!(result1.warnings().len(), 1);
        assert_eq!(result1.errors()[0].to_string(), "field1: error1");
    }
}

//! checkgen - compile host and check assignments into monitoring configuration
//!
//! Two small texts go in: a catalog of check templates with `$N`
//! placeholders, and an assignment file mapping hosts (and reusable groups)
//! to checks with arguments. One fully expanded configuration text comes out.
//!
//! # Example
//!
//! ```rust
//! use checkgen::compile;
//!
//! let catalog = "$ping\ndefine service {\n host $1\n}\n";
//! let assignments = "@default $ping\n10.1.214.30 @default\n";
//!
//! let output = compile(catalog, assignments).unwrap();
//! assert!(output.ends_with("define service {\n host 10.1.214.30\n}\n\n"));
//! ```

pub mod assignment;
pub mod emitter;
pub mod error;
pub mod parser;
pub mod run;
pub mod settings;
pub mod template;

pub use assignment::{resolve_assignments, ResolvedModel};
pub use emitter::HeaderConfig;
pub use error::ValidationError;
pub use settings::Settings;
pub use template::{parse_catalog, Catalog};

use thiserror::Error;

/// Errors that can occur during compilation
#[derive(Debug, Error)]
pub enum CompileError {
    /// The catalog text has invalid template headers
    #[error("catalog errors: {}", format_errors(.0))]
    Catalog(Vec<ValidationError>),

    /// The assignment text references unknown checks or groups
    #[error("assignment errors: {}", format_errors(.0))]
    Assignment(Vec<ValidationError>),
}

impl CompileError {
    /// All validation errors, in the order they were found
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            CompileError::Catalog(errors) | CompileError::Assignment(errors) => errors,
        }
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the compile pipeline
#[derive(Debug, Clone, Default)]
pub struct CompileConfig {
    /// Header options
    pub header: HeaderConfig,
    /// Timestamp text for the header, supplied by the caller
    pub generated_at: Option<String>,
}

impl CompileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header configuration
    pub fn with_header(mut self, header: HeaderConfig) -> Self {
        self.header = header;
        self
    }

    /// Set the generation timestamp shown in the header
    pub fn with_generated_at(mut self, at: impl Into<String>) -> Self {
        self.generated_at = Some(at.into());
        self
    }
}

/// A validated catalog and host model, ready to render
#[derive(Debug)]
pub struct Compilation {
    pub catalog: Catalog,
    pub model: ResolvedModel,
}

impl Compilation {
    /// Parse and validate both sources
    ///
    /// Catalog errors stop before the assignments are looked at.
    pub fn new(catalog: &str, assignments: &str) -> Result<Self, CompileError> {
        let catalog = parse_catalog(catalog).map_err(CompileError::Catalog)?;
        tracing::info!(templates = catalog.len(), "catalog parsed");
        let model = resolve_assignments(assignments, &catalog).map_err(CompileError::Assignment)?;
        Ok(Self { catalog, model })
    }

    /// Render header and body
    pub fn render(&self, config: &CompileConfig) -> String {
        emitter::emit(
            &self.model,
            &self.catalog,
            &config.header,
            config.generated_at.as_deref(),
        )
    }
}

/// Compile with the default configuration (no timestamp)
pub fn compile(catalog: &str, assignments: &str) -> Result<String, CompileError> {
    compile_with_config(catalog, assignments, &CompileConfig::default())
}

/// Compile with a custom configuration
///
/// # Example
///
/// ```rust
/// use checkgen::{compile_with_config, CompileConfig, HeaderConfig};
///
/// let config = CompileConfig::new()
///     .with_header(HeaderConfig::default().with_generator("ops"))
///     .with_generated_at("2024-05-01 12:00:00 +0000");
///
/// let output = compile_with_config("$c\ncheck $1\n", "h $c\n", &config).unwrap();
/// assert!(output.starts_with("# Generated by ops on 2024-05-01 12:00:00 +0000\n"));
/// ```
pub fn compile_with_config(
    catalog: &str,
    assignments: &str,
    config: &CompileConfig,
) -> Result<String, CompileError> {
    Ok(Compilation::new(catalog, assignments)?.render(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = "$ping\ndefine service {\n host $1\n}\n";

    #[test]
    fn test_compile_end_to_end() {
        let output = compile(CATALOG, "@default $ping\n10.1.214.30 @default\n").unwrap();
        assert_eq!(
            output,
            "# Generated by checkgen\n\
             # DO NOT EDIT: this file is auto-generated and will be overwritten.\n\
             \n\
             define service {\n host 10.1.214.30\n}\n\n"
        );
    }

    #[test]
    fn test_catalog_error_skips_assignments() {
        let err = compile("$a\n$a\n", "h $missing\n").unwrap_err();
        assert!(matches!(err, CompileError::Catalog(_)));
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_assignment_errors_reported_together() {
        let err = compile(CATALOG, "a $x\nb $y\n").unwrap_err();
        assert!(matches!(err, CompileError::Assignment(_)));
        assert_eq!(err.errors().len(), 2);
        let message = err.to_string();
        assert!(message.contains("'$x'"));
        assert!(message.contains("'$y'"));
    }

    #[test]
    fn test_compilation_counts() {
        let compiled = Compilation::new(CATALOG, "a $ping, $ping\nb $ping\n").unwrap();
        assert_eq!(compiled.model.host_count(), 2);
        assert_eq!(compiled.model.invocation_count(), 3);
    }
}

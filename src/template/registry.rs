//! Check template catalog

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Location, ValidationError};
use crate::parser::lines;

/// A named block of output text with `$N` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTemplate {
    /// Template name, without the leading `$`
    pub name: String,
    /// Body text, each line verbatim including its newline
    pub body: String,
    /// Line of the `$name` header
    pub line: usize,
}

/// The set of check templates, keyed by name
#[derive(Debug, Default)]
pub struct Catalog {
    templates: HashMap<String, CheckTemplate>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, rejecting duplicate names
    pub fn register(&mut self, template: CheckTemplate) -> Result<(), CheckTemplate> {
        if self.templates.contains_key(&template.name) {
            return Err(template);
        }
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&CheckTemplate> {
        self.templates.get(name)
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Get all template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Parse catalog text into a [`Catalog`]
///
/// A line starting with `$` opens a template whose name is the rest of the
/// line. Following lines up to the next header form its body. Lines before
/// the first header are ignored.
pub fn parse_catalog(source: &str) -> Result<Catalog, Vec<ValidationError>> {
    let mut catalog = Catalog::new();
    let mut errors = Vec::new();
    let mut current: Option<CheckTemplate> = None;

    for line in lines(source) {
        let Some(name) = line.raw.strip_prefix('$') else {
            if let Some(template) = current.as_mut() {
                template.body.push_str(line.raw);
            }
            continue;
        };

        if let Some(done) = current.take() {
            finish(&mut catalog, done, source, &mut errors);
        }

        let name = name.trim_end();
        if name.is_empty() {
            let error = ValidationError::EmptyTemplateName {
                location: Location::new(line.number, line.span()),
            };
            debug!(%error, "catalog error");
            errors.push(error);
            continue;
        }

        current = Some(CheckTemplate {
            name: name.to_string(),
            body: String::new(),
            line: line.number,
        });
    }

    if let Some(done) = current.take() {
        finish(&mut catalog, done, source, &mut errors);
    }

    if errors.is_empty() {
        Ok(catalog)
    } else {
        Err(errors)
    }
}

fn finish(
    catalog: &mut Catalog,
    template: CheckTemplate,
    source: &str,
    errors: &mut Vec<ValidationError>,
) {
    debug!(name = %template.name, bytes = template.body.len(), "parsed check template");
    if let Err(duplicate) = catalog.register(template) {
        let span = lines(source)
            .nth(duplicate.line - 1)
            .map(|l| l.span())
            .unwrap_or(0..0);
        let error = ValidationError::DuplicateTemplate {
            name: duplicate.name,
            location: Location::new(duplicate.line, span),
        };
        debug!(%error, "catalog error");
        errors.push(error);
    }
}

//! File-level pipeline: read inputs, compile, write output

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::{Compilation, CompileConfig, CompileError, ValidationError};

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' failed validation with {} error(s)", .path.display(), .errors.len())]
    Invalid {
        path: PathBuf,
        /// Text of the invalid file, for rendering reports
        text: String,
        errors: Vec<ValidationError>,
    },

    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    /// Render every validation error with source context
    pub fn reports(&self) -> Vec<String> {
        match self {
            RunError::Invalid { path, text, errors } => {
                let filename = path.display().to_string();
                errors.iter().map(|e| e.format(text, &filename)).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Inputs for a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub catalog: PathBuf,
    pub assignments: PathBuf,
    pub output: PathBuf,
    /// Validate only, write nothing
    pub dry_run: bool,
    pub config: CompileConfig,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub hosts: usize,
    pub invocations: usize,
    pub bytes: usize,
    pub written: bool,
}

/// Read file by path
pub fn read_source(path: &Path) -> Result<String, RunError> {
    debug!(path = %path.display(), "reading");
    fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write output text to path
pub fn write_output(path: &Path, text: &str) -> Result<(), RunError> {
    fs::write(path, text).map_err(|source| RunError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the whole pipeline once
pub fn run(options: &RunOptions) -> Result<RunSummary, RunError> {
    let catalog = read_source(&options.catalog)?;
    let assignments = read_source(&options.assignments)?;

    let compiled = Compilation::new(&catalog, &assignments).map_err(|err| match err {
        CompileError::Catalog(errors) => RunError::Invalid {
            path: options.catalog.clone(),
            text: catalog.clone(),
            errors,
        },
        CompileError::Assignment(errors) => RunError::Invalid {
            path: options.assignments.clone(),
            text: assignments.clone(),
            errors,
        },
    })?;

    let output = compiled.render(&options.config);
    let mut summary = RunSummary {
        hosts: compiled.model.host_count(),
        invocations: compiled.model.invocation_count(),
        bytes: output.len(),
        written: false,
    };

    if options.dry_run {
        info!(hosts = summary.hosts, "dry run, output not written");
        return Ok(summary);
    }

    write_output(&options.output, &output)?;
    summary.written = true;
    info!(
        path = %options.output.display(),
        bytes = summary.bytes,
        "output written"
    );
    Ok(summary)
}

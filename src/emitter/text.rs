//! Output text generation

use crate::assignment::ResolvedModel;
use crate::template::{render, Catalog};

use super::config::HeaderConfig;

/// Render the header block, ending with a blank line
pub fn header(config: &HeaderConfig, generated_at: Option<&str>) -> String {
    let mut out = match generated_at.filter(|_| config.timestamp) {
        Some(at) => format!("# Generated by {} on {}\n", config.generator, at),
        None => format!("# Generated by {}\n", config.generator),
    };
    out.push_str("# DO NOT EDIT: this file is auto-generated and will be overwritten.\n");
    for line in &config.notice {
        out.push_str(&format!("# {}\n", line));
    }
    out.push('\n');
    out
}

/// Render every invocation, hosts in byte order, each followed by a blank line
///
/// `model` must have been resolved against `catalog`.
pub(crate) fn render_body(model: &ResolvedModel, catalog: &Catalog) -> String {
    let mut out = String::new();
    for (_, host) in model.hosts() {
        for invocation in &host.invocations {
            let Some(template) = catalog.get(&invocation.check) else {
                debug_assert!(false, "unresolved check '{}'", invocation.check);
                continue;
            };
            out.push_str(&render(&template.body, &invocation.args));
            out.push('\n');
        }
    }
    out
}

/// Header followed by the rendered body
///
/// `model` must have been resolved against `catalog`; see [`crate::Compilation`].
pub fn emit(
    model: &ResolvedModel,
    catalog: &Catalog,
    config: &HeaderConfig,
    generated_at: Option<&str>,
) -> String {
    let mut out = header(config, generated_at);
    out.push_str(&render_body(model, catalog));
    out
}

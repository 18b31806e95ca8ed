//! Assignment resolution - expands groups and validates check references

use tracing::{debug, info};

use crate::error::{Location, Owner, ValidationError};
use crate::parser::{lines, CheckRef, Line};
use crate::template::Catalog;

use super::model::{Invocation, ResolvedModel};

/// Resolve assignment text against `catalog`
///
/// Every line is processed even after an error so all invalid references
/// are reported in one pass. Any error discards the whole model.
pub fn resolve_assignments(
    source: &str,
    catalog: &Catalog,
) -> Result<ResolvedModel, Vec<ValidationError>> {
    let mut resolver = Resolver::new(catalog);
    for line in lines(source) {
        resolver.line(line);
    }
    resolver.finish()
}

/// Single-pass resolver state
struct Resolver<'c> {
    catalog: &'c Catalog,
    model: ResolvedModel,
    errors: Vec<ValidationError>,
}

impl<'c> Resolver<'c> {
    fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            model: ResolvedModel::default(),
            errors: Vec::new(),
        }
    }

    fn error(&mut self, error: ValidationError) {
        debug!(%error, "assignment error");
        self.errors.push(error);
    }

    fn line(&mut self, line: Line<'_>) {
        let text = line.text().trim();
        if text.is_empty() || text.starts_with('#') {
            return;
        }

        match text.strip_prefix('@') {
            Some(def) => self.group_line(line, def),
            None => self.host_line(line, text),
        }
    }

    /// `@<group> <refs>`
    fn group_line(&mut self, line: Line<'_>, def: &str) {
        let Some((name, refs)) = split_definition(def) else {
            self.error(ValidationError::MalformedLine {
                reason: "expected '@<group> <check refs>'".to_string(),
                location: Location::new(line.number, line.span()),
            });
            return;
        };

        debug!(group = name, line = line.number, "group definition");
        // The group exists once its line is seen, even if every ref is invalid.
        self.model.groups.entry(name.to_string()).or_default();
        for segment in refs.split(',').map(str::trim) {
            let Some(check) = self.check_ref(line, segment) else {
                continue;
            };
            if !self.catalog.contains(&check.name) {
                self.error(ValidationError::UnknownCheck {
                    owner: Owner::Group(name.to_string()),
                    check: check.name,
                    location: Location::new(line.number, line.span_of(segment)),
                });
                continue;
            }
            self.model
                .groups
                .entry(name.to_string())
                .or_default()
                .checks
                .insert(check.name, check.args);
        }
    }

    /// `<host> <refs>`
    fn host_line(&mut self, line: Line<'_>, text: &str) {
        let Some((host, refs)) = split_definition(text) else {
            self.error(ValidationError::MalformedLine {
                reason: "expected '<host> <check refs>'".to_string(),
                location: Location::new(line.number, line.span()),
            });
            return;
        };

        debug!(host, line = line.number, "host assignment");
        let mut invocations = Vec::new();
        for segment in refs.split(',').map(str::trim) {
            if let Some(group_name) = segment.strip_prefix('@') {
                let expanded: Option<Vec<Invocation>> =
                    self.model.groups.get(group_name).map(|group| {
                        group
                            .checks
                            .iter()
                            .map(|(check, args)| Invocation::new(check.clone(), host, args))
                            .collect()
                    });
                match expanded {
                    Some(group_invocations) => invocations.extend(group_invocations),
                    None => self.error(ValidationError::UnknownGroup {
                        host: host.to_string(),
                        group: group_name.to_string(),
                        location: Location::new(line.number, line.span_of(segment)),
                    }),
                }
                continue;
            }

            let Some(check) = self.check_ref(line, segment) else {
                continue;
            };
            if !self.catalog.contains(&check.name) {
                self.error(ValidationError::UnknownCheck {
                    owner: Owner::Host(host.to_string()),
                    check: check.name,
                    location: Location::new(line.number, line.span_of(segment)),
                });
                continue;
            }
            invocations.push(Invocation::new(check.name, host, &check.args));
        }

        self.model
            .hosts
            .entry(host.to_string())
            .or_default()
            .invocations
            .extend(invocations);
    }

    fn check_ref(&mut self, line: Line<'_>, segment: &str) -> Option<CheckRef> {
        match CheckRef::parse(segment) {
            Ok(check) => Some(check),
            Err(_) => {
                self.error(ValidationError::InvalidReference {
                    reference: segment.to_string(),
                    location: Location::new(line.number, line.span_of(segment)),
                });
                None
            }
        }
    }

    fn finish(self) -> Result<ResolvedModel, Vec<ValidationError>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        info!(
            groups = self.model.groups.len(),
            hosts = self.model.host_count(),
            invocations = self.model.invocation_count(),
            "assignments resolved"
        );
        Ok(self.model)
    }
}

/// Split `<name> <refs>` at the first space
fn split_definition(text: &str) -> Option<(&str, &str)> {
    let (name, refs) = text.split_once(' ')?;
    if name.is_empty() || refs.trim().is_empty() {
        return None;
    }
    Some((name, refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_catalog;

    fn catalog(names: &[&str]) -> Catalog {
        let text: String = names.iter().map(|n| format!("${}\nbody {}\n", n, n)).collect();
        parse_catalog(&text).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_group_expansion_order() {
        let model =
            resolve_assignments("@g $a 1, $b 2\nh @g\n", &catalog(&["a", "b"])).unwrap();
        let host = model.host("h").unwrap();
        assert_eq!(
            host.invocations,
            vec![
                Invocation {
                    check: "a".to_string(),
                    args: strings(&["h", "1"])
                },
                Invocation {
                    check: "b".to_string(),
                    args: strings(&["h", "2"])
                },
            ]
        );
    }

    #[test]
    fn test_direct_checks_with_quoted_args() {
        let model = resolve_assignments(
            r#"db1 $mysql "MySQL Server" 3306, $ping"#,
            &catalog(&["mysql", "ping"]),
        )
        .unwrap();
        let host = model.host("db1").unwrap();
        assert_eq!(host.invocations[0].args, strings(&["db1", "MySQL Server", "3306"]));
        assert_eq!(host.invocations[1].check, "ping");
        assert_eq!(host.invocations[1].args, strings(&["db1"]));
    }

    #[test]
    fn test_group_redeclaration_overwrites_in_place() {
        let src = "@g $a 1, $b 2\n@g $a 9\nh @g\n";
        let model = resolve_assignments(src, &catalog(&["a", "b"])).unwrap();
        let checks: Vec<_> = model
            .host("h")
            .unwrap()
            .invocations
            .iter()
            .map(|i| (i.check.as_str(), i.args[1].as_str()))
            .collect();
        assert_eq!(checks, vec![("a", "9"), ("b", "2")]);
        assert_eq!(model.group("g").unwrap().checks.len(), 2);
    }

    #[test]
    fn test_mixed_group_and_direct_order() {
        let src = "@base $a, $b\nweb $c, @base, $a x\n";
        let model = resolve_assignments(src, &catalog(&["a", "b", "c"])).unwrap();
        let order: Vec<&str> = model
            .host("web")
            .unwrap()
            .invocations
            .iter()
            .map(|i| i.check.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b", "a"]);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let src = "# header\n\n   # indented comment\n   \nh $a\n";
        let model = resolve_assignments(src, &catalog(&["a"])).unwrap();
        assert_eq!(model.host_count(), 1);
    }

    #[test]
    fn test_host_on_several_lines_accumulates() {
        let src = "h $a\nother $a\nh $b\n";
        let model = resolve_assignments(src, &catalog(&["a", "b"])).unwrap();
        let order: Vec<&str> = model
            .host("h")
            .unwrap()
            .invocations
            .iter()
            .map(|i| i.check.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_all_errors_collected() {
        let src = "@g $a, $missing1\nh1 @nogroup, $a\nh2 $missing2, noprefix\n";
        let errors = resolve_assignments(src, &catalog(&["a"])).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(
            &errors[0],
            ValidationError::UnknownCheck { owner: Owner::Group(g), check, .. }
                if g == "g" && check == "missing1"
        ));
        assert!(matches!(
            &errors[1],
            ValidationError::UnknownGroup { host, group, .. } if host == "h1" && group == "nogroup"
        ));
        assert!(matches!(
            &errors[2],
            ValidationError::UnknownCheck { owner: Owner::Host(h), check, .. }
                if h == "h2" && check == "missing2"
        ));
        assert!(matches!(
            &errors[3],
            ValidationError::InvalidReference { reference, .. } if reference == "noprefix"
        ));
    }

    #[test]
    fn test_group_must_be_defined_before_use() {
        let src = "h @late\n@late $a\n";
        let errors = resolve_assignments(src, &catalog(&["a"])).unwrap_err();
        assert!(matches!(errors[0], ValidationError::UnknownGroup { .. }));
    }

    #[test]
    fn test_group_with_only_invalid_refs_still_defined() {
        let src = "@g $nope\nh @g\n";
        let errors = resolve_assignments(src, &catalog(&["a"])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::UnknownCheck { owner: Owner::Group(g), check, .. }
                if g == "g" && check == "nope"
        ));
    }

    #[test]
    fn test_malformed_lines() {
        let src = "lonelyhost\n@g\n@ $a\n";
        let errors = resolve_assignments(src, &catalog(&["a"])).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::MalformedLine { .. })));
    }

    #[test]
    fn test_trailing_comma_is_invalid_reference() {
        let errors = resolve_assignments("h $a,\n", &catalog(&["a"])).unwrap_err();
        assert!(matches!(
            &errors[0],
            ValidationError::InvalidReference { reference, .. } if reference.is_empty()
        ));
    }

    #[test]
    fn test_error_span_points_at_segment() {
        let src = "h $a, $zz 1\n";
        let errors = resolve_assignments(src, &catalog(&["a"])).unwrap_err();
        let location = errors[0].location();
        assert_eq!(location.line, 1);
        assert_eq!(&src[location.span.clone()], "$zz 1");
    }
}

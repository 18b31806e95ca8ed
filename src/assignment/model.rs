//! Resolved host model

use indexmap::IndexMap;

/// A named, ordered set of checks with fixed arguments
#[derive(Debug, Clone, Default)]
pub struct Group {
    /// check name -> declared arguments
    ///
    /// Re-inserting a check replaces its arguments and keeps its position.
    pub checks: IndexMap<String, Vec<String>>,
}

/// One application of a check to a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub check: String,
    /// Host name followed by the declared arguments
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation, prepending `host` to `declared`
    pub fn new(check: impl Into<String>, host: &str, declared: &[String]) -> Self {
        let mut args = Vec::with_capacity(declared.len() + 1);
        args.push(host.to_string());
        args.extend(declared.iter().cloned());
        Self {
            check: check.into(),
            args,
        }
    }
}

/// A monitored host and its checks, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Host {
    pub invocations: Vec<Invocation>,
}

/// All hosts after successful resolution
#[derive(Debug, Clone, Default)]
pub struct ResolvedModel {
    pub(crate) hosts: IndexMap<String, Host>,
    pub(crate) groups: IndexMap<String, Group>,
}

impl ResolvedModel {
    /// Hosts sorted by name in byte order
    pub fn hosts(&self) -> Vec<(&str, &Host)> {
        let mut hosts: Vec<(&str, &Host)> =
            self.hosts.iter().map(|(k, v)| (k.as_str(), v)).collect();
        hosts.sort_unstable_by(|a, b| a.0.cmp(b.0));
        hosts
    }

    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn invocation_count(&self) -> usize {
        self.hosts.values().map(|h| h.invocations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_reinsert_keeps_first_position() {
        let mut group = Group::default();
        group.checks.insert("b".to_string(), vec!["1".to_string()]);
        group.checks.insert("a".to_string(), vec!["2".to_string()]);
        group.checks.insert("b".to_string(), vec!["3".to_string()]);
        let entries: Vec<(&str, &str)> = group
            .checks
            .iter()
            .map(|(k, v)| (k.as_str(), v[0].as_str()))
            .collect();
        assert_eq!(entries, vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn test_invocation_prepends_host() {
        let inv = Invocation::new("mysql", "db1", &["MySQL".to_string(), "3306".to_string()]);
        assert_eq!(inv.args, vec!["db1", "MySQL", "3306"]);
    }

    #[test]
    fn test_hosts_sorted_by_bytes() {
        let mut model = ResolvedModel::default();
        for name in ["web", "Zeta", "10.0.0.2", "10.0.0.10"] {
            model.hosts.entry(name.to_string()).or_default();
        }
        let names: Vec<&str> = model.hosts().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["10.0.0.10", "10.0.0.2", "Zeta", "web"]);
    }
}

//! Configuration for the generated file header

/// Header options for emitted output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Name written in the generation notice
    pub generator: String,

    /// Whether to include the generation timestamp
    pub timestamp: bool,

    /// Extra comment lines appended after the warning
    pub notice: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            generator: env!("CARGO_PKG_NAME").to_string(),
            timestamp: true,
            notice: Vec::new(),
        }
    }
}

impl HeaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generator name
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Set whether the timestamp is included
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Append an extra notice line
    pub fn with_notice(mut self, line: impl Into<String>) -> Self {
        self.notice.push(line.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeaderConfig::default();
        assert_eq!(config.generator, "checkgen");
        assert!(config.timestamp);
        assert!(config.notice.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let config = HeaderConfig::new()
            .with_generator("ops")
            .with_timestamp(false)
            .with_notice("owned by infra");

        assert_eq!(config.generator, "ops");
        assert!(!config.timestamp);
        assert_eq!(config.notice, vec!["owned by infra".to_string()]);
    }
}

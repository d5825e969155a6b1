use serde::Deserialize;

pub const DEFAULT_CHECK_PREFIX: &str = "# CHECK";
pub const DEFAULT_SOURCE_DELIM_REGEX: &str = "(^(module|func)|^// -----)";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CheckGenConfig {
    /// Prefix of every emitted assertion, e.g. `// CHECK`
    pub check_prefix: String,
    /// Nesting depth at which top-level constructs begin
    pub starts_from_scope: usize,
    /// Regex splitting the original source into segments when interleaving
    pub source_delim_regex: String,
    /// Tool name written into the autogenerated note, if any
    pub banner: Option<String>,
}

impl Default for CheckGenConfig {
    fn default() -> Self {
        Self {
            check_prefix: DEFAULT_CHECK_PREFIX.to_string(),
            starts_from_scope: 0,
            source_delim_regex: DEFAULT_SOURCE_DELIM_REGEX.to_string(),
            banner: None,
        }
    }
}

impl CheckGenConfig {
    pub fn with_check_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.check_prefix = prefix.into();
        self
    }

    pub const fn with_starts_from_scope(mut self, depth: usize) -> Self {
        self.starts_from_scope = depth;
        self
    }

    pub fn with_source_delim_regex(mut self, regex: impl Into<String>) -> Self {
        self.source_delim_regex = regex.into();
        self
    }

    pub fn with_banner(mut self, tool: impl Into<String>) -> Self {
        self.banner = Some(tool.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckGenConfig::default();
        assert_eq!(config.check_prefix, "# CHECK");
        assert_eq!(config.starts_from_scope, 0);
        assert_eq!(config.source_delim_regex, DEFAULT_SOURCE_DELIM_REGEX);
        assert_eq!(config.banner, None);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: CheckGenConfig = toml::from_str(
            r#"
            check-prefix = "// CHECK"
            starts-from-scope = 1
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            CheckGenConfig::default()
                .with_check_prefix("// CHECK")
                .with_starts_from_scope(1)
        );
    }
}

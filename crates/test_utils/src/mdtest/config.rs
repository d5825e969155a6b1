use std::fmt;

use serde::Deserialize;

/// Configuration carried by a `toml` block of a markdown test file. It
/// applies to every following test of the file until replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MdTestConfig {
    #[serde(default)]
    pub checkgen: CheckGenSection,
}

/// Generator options; unset fields keep the generator defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CheckGenSection {
    pub check_prefix: Option<String>,
    pub starts_from_scope: Option<usize>,
    pub source_delim_regex: Option<String>,
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TestMetadata {
    pub expected_error: Option<String>,
    pub ignore: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

impl Location {
    pub const fn new(file: String, line: usize) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

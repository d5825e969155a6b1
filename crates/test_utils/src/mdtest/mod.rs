pub mod config;
pub mod parser;
pub mod runner;

pub use config::{CheckGenSection, Location, MdTestConfig, TestMetadata};
pub use parser::{extract_tests, MdTest, ParseError};
pub use runner::{MdTestRunner, TestOutcome};

use std::path::{Path, PathBuf};

/// Discover all markdown test files in the mdtest directory
pub fn discover_markdown_files() -> Vec<PathBuf> {
    let mdtest_dir = crate::mdtest_path();
    let mut files = Vec::new();

    if mdtest_dir.exists() {
        discover_files_recursive(&mdtest_dir, &mut files);
    }

    files.sort();
    files
}

fn discover_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                discover_files_recursive(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("md") {
                files.push(path);
            }
        }
    }
}

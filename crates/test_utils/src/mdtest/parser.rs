//! Extraction of generator tests from markdown files.
//!
//! Each test lives under a heading and is made of fenced code blocks:
//! - `mlir`: the IR listing fed to the generator (starts a new test)
//! - `source`: optional test file to interleave the checks with
//! - `check`: the expected generator output
//! - `toml`: configuration applying to the following tests
//!
//! Lines of the `mlir` block starting with `//!` are annotations
//! (`error:`, `ignore:`) and are removed from the listing.

use crate::mdtest::config::{Location, MdTestConfig, TestMetadata};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML config: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Invalid test annotation at line {line}: {message}")]
    InvalidAnnotation { line: usize, message: String },
}

#[derive(Debug, Clone)]
pub struct MdTest {
    pub name: String,
    pub ir_source: String,
    pub source: Option<String>,
    pub expected: Option<String>,
    pub metadata: TestMetadata,
    pub location: Location,
    pub config: Option<MdTestConfig>,
}

#[derive(Debug)]
struct PendingTest {
    ir_source: String,
    source: Option<String>,
    expected: Option<String>,
    metadata: TestMetadata,
    location: Location,
}

impl PendingTest {
    fn finish(self, name: String, config: Option<MdTestConfig>) -> MdTest {
        MdTest {
            name,
            ir_source: self.ir_source,
            source: self.source,
            expected: self.expected,
            metadata: self.metadata,
            location: self.location,
            config,
        }
    }
}

pub fn extract_tests(markdown_path: &Path) -> Result<Vec<MdTest>, ParseError> {
    let content = std::fs::read_to_string(markdown_path)?;
    extract_tests_from_str(&content, &markdown_path.to_string_lossy())
}

pub fn extract_tests_from_str(content: &str, file_name: &str) -> Result<Vec<MdTest>, ParseError> {
    let mut tests = Vec::new();

    // Track section headings
    let mut current_h1 = String::new();
    let mut current_h2 = String::new();

    let mut current_config: Option<MdTestConfig> = None;
    let mut pending: Option<PendingTest> = None;

    let mut in_heading = false;
    let mut heading_level = 0;
    let mut in_code_block = false;
    let mut code_block_lang = String::new();
    let mut code_block_content = String::new();
    let mut line_number = 1;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                // A new section closes the current test
                if let Some(test) = pending.take() {
                    let name = format_test_name(&current_h1, &current_h2);
                    tests.push(test.finish(name, current_config.clone()));
                }

                in_heading = true;
                heading_level = level as usize;
            }
            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
            }
            Event::Text(ref text) if in_heading => match heading_level {
                1 => {
                    current_h1 = text.to_string();
                    current_h2.clear();
                }
                2 => {
                    current_h2 = text.to_string();
                }
                _ => {}
            },
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang))) => {
                in_code_block = true;
                code_block_lang = lang.to_string();
                code_block_content.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                match code_block_lang.as_str() {
                    "mlir" => {
                        if let Some(test) = pending.take() {
                            let name = format_test_name(&current_h1, &current_h2);
                            tests.push(test.finish(name, current_config.clone()));
                        }

                        if current_h1.is_empty() {
                            warn!(
                                line = line_number,
                                file = file_name,
                                "IR block appears before any heading"
                            );
                        }

                        let (ir_source, metadata) =
                            parse_annotations(&code_block_content, line_number)?;
                        pending = Some(PendingTest {
                            ir_source,
                            source: None,
                            expected: None,
                            metadata,
                            location: Location::new(file_name.to_string(), line_number),
                        });
                    }
                    "source" | "check" => {
                        let Some(test) = pending.as_mut() else {
                            return Err(ParseError::InvalidAnnotation {
                                line: line_number,
                                message: format!(
                                    "`{code_block_lang}` block without a preceding `mlir` block"
                                ),
                            });
                        };
                        if code_block_lang == "source" {
                            test.source = Some(code_block_content.clone());
                        } else {
                            test.expected = Some(code_block_content.clone());
                        }
                    }
                    "toml" => {
                        current_config = Some(toml::from_str(&code_block_content)?);
                    }
                    _ => {}
                }

                in_code_block = false;
                code_block_content.clear();
            }
            Event::Text(ref text) if in_code_block => {
                code_block_content.push_str(text);
            }
            _ => {}
        }

        // Approximate line counting
        if let Event::Text(ref text) = event {
            line_number += text.chars().filter(|&c| c == '\n').count();
        }
    }

    if let Some(test) = pending {
        let name = format_test_name(&current_h1, &current_h2);
        tests.push(test.finish(name, current_config));
    }

    Ok(tests)
}

fn format_test_name(h1: &str, h2: &str) -> String {
    match (h1.is_empty(), h2.is_empty()) {
        (true, _) => "Orphaned Test (no heading)".to_string(),
        (false, true) => h1.to_string(),
        (false, false) => format!("{} - {}", h1, h2),
    }
}

fn parse_annotations(code: &str, line_number: usize) -> Result<(String, TestMetadata), ParseError> {
    let mut metadata = TestMetadata::default();
    let mut source_lines = Vec::new();

    for (offset, line) in code.lines().enumerate() {
        let Some(annotation) = line.trim_start().strip_prefix("//!") else {
            source_lines.push(line);
            continue;
        };
        let annotation = annotation.trim();

        if let Some(error) = annotation.strip_prefix("error:") {
            metadata.expected_error = Some(error.trim().trim_matches('"').to_string());
        } else if let Some(ignore) = annotation.strip_prefix("ignore:") {
            metadata.ignore = Some(ignore.trim().to_string());
        } else {
            return Err(ParseError::InvalidAnnotation {
                line: line_number + offset,
                message: format!("unknown annotation `{annotation}`"),
            });
        }
    }

    Ok((source_lines.join("\n"), metadata))
}

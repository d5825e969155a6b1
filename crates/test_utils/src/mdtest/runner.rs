use super::parser::{extract_tests, MdTest};
use std::path::Path;

type ProcessorType<'a> = Box<dyn Fn(&MdTest) -> Result<String, String> + 'a>;

/// Generic mdtest runner, parameterized by the function producing the output
/// of a test
pub struct MdTestRunner<'a> {
    /// Function to process a test and return its output
    pub processor: ProcessorType<'a>,
}

/// Result of running one markdown test.
#[derive(Debug)]
pub struct TestOutcome {
    pub name: String,
    pub location: String,
    /// `None` when the outcome matched the expectation
    pub failure: Option<String>,
}

impl<'a> MdTestRunner<'a> {
    pub fn new(processor: impl Fn(&MdTest) -> Result<String, String> + 'a) -> Self {
        Self {
            processor: Box::new(processor),
        }
    }

    /// Run all tests of a markdown file
    pub fn run_file(&self, path: &Path) -> Vec<TestOutcome> {
        let tests = match extract_tests(path) {
            Ok(tests) => tests,
            Err(e) => {
                panic!("Failed to parse markdown file {}: {}", path.display(), e);
            }
        };

        tests
            .into_iter()
            .filter_map(|test| self.process_test(test))
            .collect()
    }

    fn process_test(&self, test: MdTest) -> Option<TestOutcome> {
        // Skip ignored tests
        if test.metadata.ignore.is_some() {
            return None;
        }

        let result = (self.processor)(&test);

        let failure = match (result, test.metadata.expected_error.as_deref()) {
            (Ok(output), None) => match test.expected.as_deref() {
                Some(expected) if normalize(expected) != normalize(&output) => Some(format!(
                    "Output mismatch\n{}\nExpected:\n{}\n{}\nGenerated:\n{}",
                    "=".repeat(60),
                    expected,
                    "=".repeat(60),
                    output
                )),
                Some(_) => None,
                None => Some(format!(
                    "Missing `check` block; generated:\n{}",
                    output
                )),
            },
            (Ok(output), Some(_)) => Some(format!(
                "Expected to fail but succeeded with:\n{}",
                output
            )),
            (Err(e), Some(expected_error)) if !e.contains(expected_error) => Some(format!(
                "Expected error containing `{}`, got:\n{}",
                expected_error, e
            )),
            (Err(_), Some(_)) => None,
            (Err(e), None) => Some(format!("UNEXPECTED ERROR\n{}", e)),
        };

        Some(TestOutcome {
            name: test.name,
            location: test.location.to_string(),
            failure,
        })
    }
}

/// Leading and trailing blank lines of fenced blocks are not significant.
fn normalize(text: &str) -> &str {
    text.trim_matches('\n')
}

//! The note written at the top of generated output.

const NOTE_BEGIN: &str = "// NOTE: Assertions have been autogenerated by ";
const NOTE_END: &str = "
// The script is designed to make adding checks to
// a test case fast, it is *not* designed to be authoritative
// about what constitutes a good test! The CHECK should be
// minimized and named to reflect the test intent.
";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    text: String,
}

impl Banner {
    pub fn new(tool: &str) -> Self {
        Self {
            text: format!("{NOTE_BEGIN}{tool}\n{NOTE_END}"),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether `line` is one of the non-empty lines of this note, so that a
    /// previous run's note can be dropped from the input.
    pub fn contains_line(&self, line: &str) -> bool {
        !line.is_empty() && self.text.lines().any(|banner_line| banner_line == line)
    }
}

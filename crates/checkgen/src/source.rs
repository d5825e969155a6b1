//! Segmentation of the original test file for interleaved output.

use regex::Regex;

use crate::banner::Banner;
use crate::error::Result;

/// Split `source` into segments, starting a new one at every line matching
/// `delim_regex`. Lines of a previous run (assertions and the note) are
/// dropped, and a note heading the file is removed whole. The first segment
/// holds everything before the first delimiter and may be empty.
pub fn split_source_segments(
    source: &str,
    delim_regex: &str,
    check_prefix: &str,
    banner: Option<&Banner>,
) -> Result<Vec<Vec<String>>> {
    let source_split_re = Regex::new(delim_regex)?;
    let source = banner
        .and_then(|banner| source.strip_prefix(banner.text()))
        .unwrap_or(source);

    let mut segments = vec![Vec::new()];
    for line in source.lines() {
        if banner.is_some_and(|banner| banner.contains_line(line)) {
            continue;
        }
        if line.contains(check_prefix) {
            continue;
        }
        if source_split_re.is_match(line) {
            segments.push(Vec::new());
        }
        if let Some(segment) = segments.last_mut() {
            segment.push(line.to_string());
        }
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SOURCE_DELIM_REGEX;

    #[test]
    fn test_split_at_delimiters() {
        let source = "// RUN: opt %s\n\nfunc.func @a() {\n}\n// -----\nfunc.func @b() {\n}\n";
        let segments =
            split_source_segments(source, DEFAULT_SOURCE_DELIM_REGEX, "// CHECK", None).unwrap();

        assert_eq!(
            segments,
            vec![
                vec!["// RUN: opt %s".to_string(), String::new()],
                vec!["func.func @a() {".to_string(), "}".to_string()],
                vec!["// -----".to_string()],
                vec!["func.func @b() {".to_string(), "}".to_string()],
            ]
        );
    }

    #[test]
    fn test_previous_checks_and_note_are_dropped() {
        let banner = Banner::new("checkgen");
        let source = format!(
            "{}// CHECK-LABEL: func @a\nfunc @a() {{\n// CHECK: return\n}}\n",
            banner.text()
        );
        let segments =
            split_source_segments(&source, "^func", "// CHECK", Some(&banner)).unwrap();

        assert_eq!(
            segments,
            vec![
                vec![],
                vec!["func @a() {".to_string(), "}".to_string()],
            ]
        );
    }

    #[test]
    fn test_stray_note_lines_are_dropped() {
        let banner = Banner::new("checkgen");
        let source = "func @a() {\n// NOTE: Assertions have been autogenerated by checkgen\n}\n";
        let segments = split_source_segments(source, "^func", "// CHECK", Some(&banner)).unwrap();

        assert_eq!(
            segments,
            vec![
                vec![],
                vec!["func @a() {".to_string(), "}".to_string()],
            ]
        );
    }

    #[test]
    fn test_invalid_regex() {
        assert!(split_source_segments("x", "(", "# CHECK", None).is_err());
    }
}

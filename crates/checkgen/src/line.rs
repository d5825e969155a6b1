//! Helpers operating on a single line of IR text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::namer::ScopeNamer;

/// Sigil introducing an SSA value name.
pub const SSA_SIGIL: char = '%';

/// Lexical pattern of an SSA value name following the sigil.
pub const SSA_RE_STR: &str = "[0-9]+|[a-zA-Z$._-][a-zA-Z0-9$._-]*";

static SSA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{SSA_RE_STR})")).expect("SSA identifier regex is valid")
});

/// Return the SSA name at the very start of `chunk`, if any.
pub fn match_ssa_name(chunk: &str) -> Option<&str> {
    SSA_RE.find(chunk).map(|m| m.as_str())
}

/// Whether a line opens a basic block (`^bb0(...):`).
pub fn is_block_label(line: &str) -> bool {
    line.trim_start().starts_with('^')
}

/// Drop the trailing `// pred: ...` comment of a block label line.
pub fn strip_block_comment(line: &str) -> &str {
    match line.rfind("//") {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

/// Escape character sequences FileCheck would otherwise read as variable
/// syntax.
///
/// `[[` starts a FileCheck variable. `[%` becomes `[[` once the SSA name is
/// substituted, so it is escaped as well.
pub fn escape_filecheck(line: &str) -> String {
    line.replace("[[", "{{\\[\\[}}").replace("[%", "{{\\[}}%")
}

/// Split a line at every SSA sigil. The first element never holds an SSA
/// name; every following one starts with one.
pub fn split_at_sigil(line: &str) -> Vec<&str> {
    line.split(SSA_SIGIL).collect()
}

/// Rewrite chunks produced by [`split_at_sigil`] (without the leading
/// chunk), replacing each SSA name with its FileCheck variable.
///
/// Returns `None` if a chunk does not start with an SSA name.
pub fn substitute_chunks(chunks: &[&str], namer: &mut ScopeNamer) -> Option<String> {
    let mut output = String::new();

    for chunk in chunks {
        let ssa_name = match_ssa_name(chunk)?;
        let binding = namer.bind_or_resolve(ssa_name);
        output.push_str(&binding.to_string());
        output.push_str(&chunk[ssa_name.len()..]);
    }

    output.truncate(output.trim_end().len());
    Some(output)
}

//! Scoped naming of SSA values.
//!
//! Every SSA name seen in the input is mapped to a FileCheck variable
//! (`VAL_0`, `VAL_1`, ...). Bindings live in a stack of frames that mirrors
//! the `{` / `}` nesting of the listing, so a name bound inside a region is
//! forgotten once that region closes.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::trace;

/// Result of looking up an SSA name in a [`ScopeNamer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// FileCheck variable name, e.g. `VAL_3`
    pub variable: String,
    /// Whether this occurrence introduced the variable
    pub fresh: bool,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fresh {
            write!(f, "%[[{}:.*]]", self.variable)
        } else {
            write!(f, "%[[{}]]", self.variable)
        }
    }
}

/// Error returned when popping a scope that was never pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeUnderflow;

/// Stack of name-binding frames with a monotonically increasing counter.
///
/// The bottom frame is implicit and can never be popped; it holds bindings
/// made outside any block. [`ScopeNamer::depth`] only counts pushed frames.
#[derive(Debug)]
pub struct ScopeNamer {
    scopes: Vec<FxHashMap<String, String>>,
    name_counter: usize,
}

impl Default for ScopeNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeNamer {
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
            name_counter: 0,
        }
    }

    /// Open a new, empty frame.
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Discard the innermost frame together with its bindings.
    pub fn pop_scope(&mut self) -> Result<(), ScopeUnderflow> {
        if self.depth() == 0 {
            return Err(ScopeUnderflow);
        }
        self.scopes.pop();
        Ok(())
    }

    /// Number of pushed frames.
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Restart variable numbering at `VAL_0`. Existing bindings are kept.
    pub fn reset_counter(&mut self) {
        self.name_counter = 0;
    }

    /// Look `ssa_name` up from the innermost frame outwards, binding a fresh
    /// variable in the innermost frame if no frame knows it.
    pub fn bind_or_resolve(&mut self, ssa_name: &str) -> Binding {
        if let Some(variable) = self.resolve(ssa_name) {
            return Binding {
                variable: variable.to_string(),
                fresh: false,
            };
        }

        let variable = format!("VAL_{}", self.name_counter);
        self.name_counter += 1;
        trace!(ssa_name, %variable, depth = self.depth(), "bound ssa value");
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(ssa_name.to_string(), variable.clone());
        }

        Binding {
            variable,
            fresh: true,
        }
    }

    fn resolve(&self, ssa_name: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(ssa_name))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_binds_later_sightings_resolve() {
        let mut namer = ScopeNamer::new();
        let first = namer.bind_or_resolve("0");
        let second = namer.bind_or_resolve("arg0");
        let again = namer.bind_or_resolve("0");

        assert_eq!(first.to_string(), "%[[VAL_0:.*]]");
        assert_eq!(second.to_string(), "%[[VAL_1:.*]]");
        assert_eq!(again.to_string(), "%[[VAL_0]]");
        assert!(!again.fresh);
    }

    #[test]
    fn test_nested_scope_sees_outer_bindings() {
        let mut namer = ScopeNamer::new();
        namer.push_scope();
        namer.bind_or_resolve("x");
        namer.push_scope();
        assert_eq!(namer.depth(), 2);

        let inner = namer.bind_or_resolve("x");
        assert_eq!(inner.variable, "VAL_0");
        assert!(!inner.fresh);
    }

    #[test]
    fn test_sibling_scope_rebinds_name() {
        let mut namer = ScopeNamer::new();
        namer.push_scope();
        namer.push_scope();
        namer.bind_or_resolve("x");
        namer.pop_scope().unwrap();
        namer.push_scope();

        let sibling = namer.bind_or_resolve("x");
        assert_eq!(sibling.variable, "VAL_1");
        assert!(sibling.fresh);
    }

    #[test]
    fn test_reset_counter_keeps_bindings() {
        let mut namer = ScopeNamer::new();
        namer.bind_or_resolve("a");
        namer.bind_or_resolve("b");
        namer.reset_counter();

        assert_eq!(namer.bind_or_resolve("a").variable, "VAL_0");
        assert_eq!(namer.bind_or_resolve("c").variable, "VAL_0");
    }

    #[test]
    fn test_pop_without_push_underflows() {
        let mut namer = ScopeNamer::new();
        assert_eq!(namer.pop_scope(), Err(ScopeUnderflow));

        namer.push_scope();
        assert_eq!(namer.pop_scope(), Ok(()));
        assert_eq!(namer.depth(), 0);
        assert_eq!(namer.pop_scope(), Err(ScopeUnderflow));
    }
}

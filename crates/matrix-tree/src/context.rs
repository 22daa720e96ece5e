//! Traversal context configuration

/// Default limit on collapse recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration for recursive traversals.
///
/// Passed to `Node::collapse_with` and the `multiply_collapsed*_with`
/// family to bound how deep a collapse may recurse before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeContext {
    /// Maximum nesting depth (stack overflow protection).
    /// A lone leaf has depth 0.
    pub max_depth: usize,
}

impl Default for TreeContext {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Whether a traversal at `depth` is still within the limit.
    pub fn allows(&self, depth: usize) -> bool {
        depth <= self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(TreeContext::new().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_allows_boundary() {
        let ctx = TreeContext::with_max_depth(2);
        assert!(ctx.allows(0));
        assert!(ctx.allows(2));
        assert!(!ctx.allows(3));
    }
}

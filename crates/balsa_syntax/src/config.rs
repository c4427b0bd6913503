//! Parser configuration.

/// Default bound on the rule-context stack depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest rule-context stack the parser descends into. Past it, recovery discards tokens
    /// instead of recursing, so adversarial nesting cannot exhaust the native stack.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting bound. Values below 8 are raised to 8 so that the contexts a fragment
    /// entry point seeds always fit.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth.max(8);
        self
    }
}

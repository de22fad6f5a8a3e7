//! Parsing and lowering configuration.

/// What lowering does when a token declares the same option twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateOptionPolicy {
    /// Later declaration overwrites the earlier one.
    #[default]
    LastWins,
    /// Earlier declaration is kept, later ones are ignored.
    FirstWins,
    /// Fail with [`LowerError::DuplicateOption`](crate::LowerError::DuplicateOption).
    Reject,
}

/// Configuration for parsing and lowering.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Handling of repeated option names on one token
    pub(crate) duplicate_options: DuplicateOptionPolicy,
    /// Whether regex option values must be valid patterns
    pub(crate) validate_regex: bool,
    /// Whether CST kinds without a lowering rule are rejected instead of passed through
    pub(crate) strict: bool,
    /// Maximum expression nesting, `None` for unbounded. Bounds the parser and lowering alike.
    pub(crate) recursion_fuel: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duplicate_options: DuplicateOptionPolicy::default(),
            validate_regex: true,
            strict: false,
            recursion_fuel: Some(256),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duplicate_options(mut self, policy: DuplicateOptionPolicy) -> Self {
        self.duplicate_options = policy;
        self
    }

    pub fn validate_regex(mut self, value: bool) -> Self {
        self.validate_regex = value;
        self
    }

    /// Reject unknown CST node kinds instead of passing them through unchanged.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Caps expression nesting: each body expression and each parenthesized group spends one
    /// unit. The parser fails with [`Error::RecursionLimitExceeded`](crate::Error) and lowering
    /// with [`LowerError::NestingTooDeep`](crate::LowerError::NestingTooDeep) beyond it.
    pub fn recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }
}

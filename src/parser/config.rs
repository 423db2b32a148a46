/// What to do with parentheses that never find their partner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BalancePolicy {
    /// Unclosed `(` and stray `)` are errors
    #[default]
    Strict,
    /// End of input closes every open list; a stray top-level `)` ends the
    /// top-level sequence and the rest of the input is left unread
    Lenient,
}

/// How tokens travel from the scanner to the parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamMode {
    /// The parser drives the scanner directly, one token per pull
    #[default]
    Pull,
    /// The scanner runs on its own scoped thread behind a zero-capacity
    /// channel
    Rendezvous,
}

/// Configuration for a parse
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Unbalanced parenthesis handling (default: strict)
    pub policy: BalancePolicy,
    /// Scanner-to-parser hand-off (default: pull)
    pub stream: StreamMode,
}

impl ParserConfig {
    /// Replaces the balance policy
    pub fn with_policy(mut self, policy: BalancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the token hand-off mode
    pub fn with_stream(mut self, stream: StreamMode) -> Self {
        self.stream = stream;
        self
    }
}

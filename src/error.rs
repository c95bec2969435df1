use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The baseline assignment model itself has no solutions. This cannot
    /// happen for valid inputs and is treated as a fatal configuration error.
    #[error("baseline model is structurally infeasible: {0}")]
    StructuralInfeasibility(String),

    /// The candidate budget ran out before the clue set pinned down a unique
    /// solution. A failed attempt, not a fatal error; retry with a new seed.
    #[error("candidate budget of {budget} exhausted with {accepted} clues accepted")]
    SynthesisExhausted { budget: usize, accepted: usize },

    /// Too many consecutive candidates were rejected as infeasible. Sampled
    /// clues are true of the planted solution by construction, so a long
    /// rejection streak points at the encoder, not at bad luck.
    #[error(
        "{streak} consecutive candidates rejected as infeasible ({accepted} clues accepted); \
         suspected encoding defect"
    )]
    RejectionStorm { streak: usize, accepted: usize },

    /// The backing solver failed or exceeded its budget mid-check.
    #[error("oracle failure with {accepted} clues accepted over {variables} variables: {reason}")]
    Oracle {
        reason: String,
        variables: usize,
        accepted: usize,
    },

    /// An illegal edit of the constraint log, e.g. retracting anything other
    /// than the most recently added handle.
    #[error("illegal model edit: {0}")]
    ModelEdit(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("entity store: {0}")]
    Store(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<GenerateError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<GenerateError> for Error {
    fn from(inner: GenerateError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The underlying domain error, for callers that branch on failure kind.
    pub fn kind(&self) -> &GenerateError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }

    /// True for failures that should sink a whole batch rather than a single
    /// attempt.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            GenerateError::StructuralInfeasibility(_)
                | GenerateError::InvalidConfig(_)
                | GenerateError::Store(_)
        )
    }
}

use thiserror::Error;

/// Exit status when the log file beside the binary cannot be opened.
pub const EXIT_LOG_OPEN: u8 = 12;

/// Every way a hook invocation can fail. Each kind maps to its own exit
/// status so the calling ACME client can tell them apart.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("Argument number {index} required, but {provided} provided")]
    MissingArgument { index: usize, provided: usize },

    #[error("Argument number {0} can not be empty")]
    EmptyArgument(usize),

    #[error("Environment variable {name} required; alternately, use '{program}.env' file")]
    MissingEnv { name: &'static str, program: String },

    #[error("Invalid LEGO verb {0} ('present' or 'cleanup' required)")]
    InvalidVerb(String),

    #[error("Error creating request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    #[error("Error contacting DNS server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error reading response: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("Called in unsupported 'RAW' mode")]
    RawMode,
}

impl HookError {
    /// Process exit status for this failure.
    ///
    /// Status 9 (response body close) is reserved: dropping a `reqwest`
    /// response cannot fail, so no variant produces it.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UpdateFailed(_) => 2,
            Self::MissingArgument { .. } => 3,
            Self::EmptyArgument(_) => 4,
            Self::MissingEnv { .. } => 5,
            Self::InvalidVerb(_) => 6,
            Self::BuildRequest(_) => 7,
            Self::Transport(_) => 8,
            Self::ReadBody(_) => 10,
            Self::RawMode => 11,
        }
    }

    /// Whether the caller got the command line wrong.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. } | Self::EmptyArgument(_) | Self::InvalidVerb(_) | Self::RawMode
        )
    }
}

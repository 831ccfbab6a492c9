/// Core error type for the dispatch path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("no handler implemented for tool '{0}'")]
    HandlerMissing(String),

    #[error("invalid params for tool '{tool}': {reason}")]
    InvalidParams { tool: String, reason: String },

    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for an invalid-params error.
    pub fn invalid_params(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}

/// Startup configuration errors. All of them are fatal: the server refuses
/// to start on any of these rather than running with partial state.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {doc} document: {source}")]
    Parse {
        doc: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

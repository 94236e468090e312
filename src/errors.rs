use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for supervisor operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No record matches the given name or id.
    #[error("\"{0}\" not found")]
    NotFound(String),

    /// Start was attempted on a name that already belongs to a live record.
    #[error("\"{name}\" is already running (pid {pid})")]
    DuplicateRunning { name: String, pid: i32 },

    /// The OS refused to spawn the child.
    #[error("failed to launch \"{program}\": {source}")]
    LaunchFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file passed to `startfile` does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The config file exists but is not valid JSON.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A command-runner step exited non-zero or could not be executed.
    #[error("step \"{title}\" failed: {detail}")]
    CommandFailure { title: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_quotes_name() {
        let err = Error::NotFound("web".into());
        assert_eq!(err.to_string(), "\"web\" not found");
    }

    #[test]
    fn test_duplicate_running_message() {
        let err = Error::DuplicateRunning {
            name: "web".into(),
            pid: 4242,
        };
        assert_eq!(err.to_string(), "\"web\" is already running (pid 4242)");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("container build tool `{program}` could not be started — is it installed and on PATH?")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("container build tool `{program}` could not be started")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} command failed: {args:?}\n{status}")]
    CommandFailed {
        program: String,
        args: Vec<String>,
        status: String,
    },
}

impl DockerError {
    /// Classify a failure to start `program`.
    pub(crate) fn spawn(program: &str, source: std::io::Error) -> Self {
        let program = program.to_owned();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { program, source },
            _ => Self::Spawn { program, source },
        }
    }
}

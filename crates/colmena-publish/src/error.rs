use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GrpcError {
    #[error("grpcurl not found — install: https://github.com/fullstorydev/grpcurl")]
    NotFound { source: std::io::Error },

    #[error("grpcurl `{program}` could not be started")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("grpcurl command failed ({status}): {args:?}\n{stderr}")]
    CommandFailed {
        args: Vec<String>,
        status: String,
        stderr: String,
    },

    #[error("grpcurl output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("cannot publish service definition without a service id")]
    MissingServiceId { source: colmena_core::Error },

    #[error("failed to load zenoh config from {path}: {detail}")]
    ZenohConfig { path: PathBuf, detail: String },

    #[error("failed to open zenoh session: {detail}")]
    ZenohSession { detail: String },

    #[error("failed to put service definition under {key}: {detail}")]
    ZenohPut { key: String, detail: String },

    #[error("DCP AddService call to {endpoint} failed")]
    Rpc { endpoint: String, source: GrpcError },

    #[error("DCP AddService returned a non-JSON response")]
    InvalidResponse { source: serde_json::Error },
}

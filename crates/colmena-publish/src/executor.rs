use std::process::Stdio;

use crate::error::GrpcError;

/// Abstraction over grpcurl execution for testability.
///
/// Production code uses [`Grpcurl`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait GrpcExecutor: Send + Sync {
    /// Execute a grpcurl command and capture stdout.
    async fn exec(&self, args: &[String]) -> Result<String, GrpcError>;
}

/// Real grpcurl CLI executor.
#[derive(Debug, Clone)]
pub struct Grpcurl {
    program: String,
}

impl Grpcurl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Grpcurl {
    fn default() -> Self {
        Self::new("grpcurl")
    }
}

impl GrpcExecutor for Grpcurl {
    async fn exec(&self, args: &[String]) -> Result<String, GrpcError> {
        tracing::debug!(program = %self.program, ?args, "spawning");

        // Payload goes in argv; stdin stays closed.
        let output = tokio::process::Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => GrpcError::NotFound { source: e },
                _ => GrpcError::Spawn {
                    program: self.program.clone(),
                    source: e,
                },
            })?;

        if !output.status.success() {
            return Err(GrpcError::CommandFailed {
                args: args.to_vec(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| GrpcError::InvalidUtf8 { source: e })
    }
}

use std::process::Stdio;

use colmena_core::BuildConfig;

use crate::command::{BuildSpec, push_args};
use crate::docker::DockerError;

/// Abstraction over the container build tool for testability.
///
/// Production code uses [`DockerCli`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ContainerBuilder: Send + Sync {
    /// Run one image build, streaming tool output to the terminal.
    async fn build(&self, spec: &BuildSpec) -> Result<(), DockerError>;

    /// Push an image that is already in the local store.
    async fn push(&self, tag: &str) -> Result<(), DockerError>;
}

/// Real `docker` CLI builder.
///
/// Each invocation is a direct child process with an argument vector; no
/// shell is involved. `DOCKER_BUILDKIT=1` is set on the child only.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
    buildkit: bool,
}

impl DockerCli {
    pub fn new(program: impl Into<String>, buildkit: bool) -> Self {
        Self {
            program: program.into(),
            buildkit,
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.program.clone(), config.buildkit)
    }

    async fn run(&self, args: &[String]) -> Result<(), DockerError> {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if self.buildkit {
            command.env("DOCKER_BUILDKIT", "1");
        }

        tracing::debug!(program = %self.program, ?args, "spawning");

        let status = command
            .status()
            .await
            .map_err(|e| DockerError::spawn(&self.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(DockerError::CommandFailed {
                program: self.program.clone(),
                args: args.to_vec(),
                status: status.to_string(),
            })
        }
    }
}

impl ContainerBuilder for DockerCli {
    async fn build(&self, spec: &BuildSpec) -> Result<(), DockerError> {
        self.run(&spec.args()).await
    }

    async fn push(&self, tag: &str) -> Result<(), DockerError> {
        self.run(&push_args(tag)).await
    }
}

use std::path::PathBuf;

use colmena_core::{BuildConfig, BuildJob};

use crate::builder::{ContainerBuilder, DockerCli};
use crate::command::{BuildMode, BuildSpec};
use crate::docker::DockerError;

/// Builds and pushes planned images, parameterized over the builder for testability.
pub struct ImagePublisher<B: ContainerBuilder = DockerCli> {
    builder: B,
}

impl ImagePublisher<DockerCli> {
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            builder: DockerCli::from_config(config),
        }
    }
}

impl<B: ContainerBuilder> ImagePublisher<B> {
    pub fn with_builder(builder: B) -> Self {
        Self { builder }
    }

    /// Build every job in order. Stops at the first failure.
    pub async fn build_images(&self, jobs: &[BuildJob], mode: &BuildMode) -> Result<(), BuildError> {
        for job in jobs {
            let spec = BuildSpec::new(job, mode)?;
            tracing::info!(tag = %job.tag, path = %job.path.display(), "building image");

            self.builder
                .build(&spec)
                .await
                .map_err(|e| BuildError::Build {
                    tag: job.tag.clone(),
                    source: e,
                })?;

            if mode.pushes_separately() {
                self.push(&job.tag).await?;
            }
        }

        Ok(())
    }

    async fn push(&self, tag: &str) -> Result<(), BuildError> {
        tracing::info!(tag = %tag, "pushing image");
        self.builder
            .push(tag)
            .await
            .map_err(|e| BuildError::Push {
                tag: tag.to_owned(),
                source: e,
            })
    }
}

/// Verify that every job has a `Dockerfile` in its build context.
pub fn check_build_contexts(jobs: &[BuildJob]) -> Result<(), BuildError> {
    for job in jobs {
        let dockerfile = job.dockerfile();
        if !dockerfile.is_file() {
            return Err(BuildError::MissingDockerfile {
                kind: job.kind.to_string(),
                id: job.id.clone(),
                path: dockerfile,
            });
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no Dockerfile for {kind} '{id}' at {path}")]
    MissingDockerfile {
        kind: String,
        id: String,
        path: PathBuf,
    },

    #[error("`--load` accepts one platform, got '{platform}'; use the buildx push strategy for multi-platform images")]
    MultiPlatformLoad { platform: String },

    #[error("build path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("failed to build image {tag}")]
    Build { tag: String, source: DockerError },

    #[error("failed to push image {tag}")]
    Push { tag: String, source: DockerError },
}

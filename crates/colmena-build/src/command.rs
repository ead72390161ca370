use colmena_core::{BuildConfig, BuildJob, PushStrategy};

use crate::publisher::BuildError;

/// How a built image reaches its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildMode {
    /// Build for the host platform and load into the local image store.
    LocalDebug,
    /// Build for `platform` (possibly a comma-separated list) and push from buildx.
    Publish { platform: String },
    /// Build for a single `platform`, load, then push with a separate `image push`.
    LoadThenPush { platform: String },
}

impl BuildMode {
    /// Pick the mode from the `--local_debug` / `--platform` flags and colmena.toml.
    ///
    /// `--platform` falls back to `build.platform`. The `image-push` strategy
    /// loads into the local store, so it takes a single platform only.
    pub fn resolve(
        local_debug: bool,
        platform: Option<&str>,
        config: &BuildConfig,
    ) -> Result<Self, BuildError> {
        if local_debug {
            if let Some(platform) = platform {
                tracing::warn!(platform, "--local_debug builds for the host; ignoring --platform");
            }
            return Ok(Self::LocalDebug);
        }
        let platform = platform.unwrap_or(&config.platform).to_owned();
        match config.push_strategy {
            PushStrategy::Buildx => Ok(Self::Publish { platform }),
            PushStrategy::ImagePush if platform.contains(',') => {
                Err(BuildError::MultiPlatformLoad { platform })
            }
            PushStrategy::ImagePush => Ok(Self::LoadThenPush { platform }),
        }
    }

    /// Whether a separate `image push` must follow each build.
    pub fn pushes_separately(&self) -> bool {
        matches!(self, Self::LoadThenPush { .. })
    }
}

/// A single `buildx build` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    pub tag: String,
    pub dockerfile: String,
    pub context: String,
    pub mode: BuildMode,
}

impl BuildSpec {
    pub fn new(job: &BuildJob, mode: &BuildMode) -> Result<Self, BuildError> {
        let context = job
            .path
            .to_str()
            .ok_or_else(|| BuildError::InvalidPath(job.path.clone()))?;
        let dockerfile_path = job.dockerfile();
        let dockerfile = dockerfile_path
            .to_str()
            .ok_or_else(|| BuildError::InvalidPath(dockerfile_path.clone()))?;

        Ok(Self {
            tag: job.tag.clone(),
            dockerfile: dockerfile.to_owned(),
            context: context.to_owned(),
            mode: mode.clone(),
        })
    }

    /// Arguments passed to the build tool (program name excluded).
    ///
    /// Layer caching is always disabled so every deployment gets a fresh image.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "buildx".to_owned(),
            "build".to_owned(),
            "--no-cache".to_owned(),
            "-t".to_owned(),
            self.tag.clone(),
            "-f".to_owned(),
            self.dockerfile.clone(),
        ];

        match &self.mode {
            BuildMode::LocalDebug => args.push("--load".to_owned()),
            BuildMode::LoadThenPush { platform } => {
                args.push("--platform".to_owned());
                args.push(platform.clone());
                args.push("--load".to_owned());
            }
            BuildMode::Publish { platform } => {
                args.push("--platform".to_owned());
                args.push(platform.clone());
                args.push("--push".to_owned());
            }
        }

        args.push(self.context.clone());
        args
    }
}

/// Arguments for pushing an already-built tag.
pub fn push_args(tag: &str) -> Vec<String> {
    vec!["image".to_owned(), "push".to_owned(), tag.to_owned()]
}

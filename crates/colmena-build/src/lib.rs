//! Container image build and push for colmena-deploy.
//!
//! # Image pipeline
//!
//! ```text
//! colmena-deploy
//!   1. Plan      ── colmena_core::plan_images (roles, then contexts)
//!   2. Check     ── <path>/Dockerfile exists for every job
//!   3. Build     ── docker buildx build --no-cache -t <tag> -f <path>/Dockerfile ... <path>
//!   4. Push      ── only for `LoadThenPush`: docker image push <tag>
//! ```
//!
//! # Build modes
//!
//! - **LocalDebug**: `--load` into the local image store, never pushed
//! - **Publish**: `--platform <platforms> --push`, never loaded
//! - **LoadThenPush**: `--platform <platform> --load` (one platform), then a separate `image push`
//!
//! Jobs run one at a time in plan order. The first failing invocation
//! aborts the run; images pushed before it stay in the registry.

pub mod builder;
pub mod command;
pub mod docker;
pub mod publisher;

pub use builder::{ContainerBuilder, DockerCli};
pub use command::{BuildMode, BuildSpec};
pub use docker::DockerError;
pub use publisher::{BuildError, ImagePublisher, check_build_contexts};

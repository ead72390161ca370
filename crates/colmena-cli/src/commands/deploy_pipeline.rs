use std::path::PathBuf;

use colmena_build::{BuildMode, ContainerBuilder, ImagePublisher, check_build_contexts};
use colmena_core::{BuildJob, ServiceDescription, plan_images};
use colmena_publish::{PublishSink, publish_definition};

pub(crate) struct DeployOptions {
    pub build_path: PathBuf,
    pub user: String,
    pub mode: BuildMode,
    pub skip_build: bool,
    pub key_prefix: String,
}

/// Result of a successful deploy pipeline run.
#[derive(Debug)]
pub(crate) struct DeployOutcome {
    pub steps: Vec<String>,
    pub jobs: Vec<BuildJob>,
    /// The description as published, image ids rewritten.
    pub description: ServiceDescription,
}

/// Run the full deploy pipeline: load → plan/rewrite → build → publish.
///
/// Loading, planning and the service id check all happen before the first
/// build tool invocation. Images are built only when `skip_build` is false,
/// but tags are rewritten either way.
pub(crate) async fn run<B: ContainerBuilder, S: PublishSink>(
    options: &DeployOptions,
    publisher: &ImagePublisher<B>,
    sink: &S,
) -> anyhow::Result<DeployOutcome> {
    let mut steps = Vec::new();

    // Load
    let mut description = ServiceDescription::load(&options.build_path)?;
    let service_id = description.service_id()?.to_owned();
    steps.push(format!("Loaded service description for {service_id}"));

    // Plan and rewrite image references
    let jobs = plan_images(&mut description, &options.build_path, &options.user)?;
    steps.push(format!("Planned {} image(s) under {}/", jobs.len(), options.user));

    // Build
    if options.skip_build {
        steps.push("Skipped building images".to_string());
    } else {
        check_build_contexts(&jobs)?;
        publisher.build_images(&jobs, &options.mode).await?;
        steps.push(match options.mode {
            BuildMode::LocalDebug => "Built and loaded images into the local store".to_string(),
            _ => "Built and published images".to_string(),
        });
    }

    // Publish
    let published = publish_definition(sink, &description, &options.key_prefix).await?;
    steps.push(format!("Published service definition to {}", published.key));

    Ok(DeployOutcome {
        steps,
        jobs,
        description,
    })
}

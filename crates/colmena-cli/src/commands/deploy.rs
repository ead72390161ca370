use std::path::PathBuf;

use colmena_build::{BuildMode, ImagePublisher};
use colmena_core::{DeployConfig, SinkKind};
use colmena_publish::{ConfiguredSink, DcpSink, ZenohSink};

use super::deploy_pipeline::{self, DeployOptions};

/// Command-line inputs for one deployment.
pub struct DeployRequest {
    pub build_path: PathBuf,
    pub user: String,
    pub platform: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub skip_build: bool,
    pub local_debug: bool,
    pub pretty_print: bool,
    pub sink: Option<SinkKind>,
    pub zenoh_config: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Execute the full deploy pipeline.
pub async fn deploy(request: DeployRequest) -> anyhow::Result<()> {
    let mut config = match &request.config {
        Some(path) => DeployConfig::load_file(path)?,
        None => DeployConfig::load(&request.build_path)?,
    };

    // Flags win over colmena.toml
    if let Some(sink) = request.sink {
        config.publish.sink = sink;
    }
    if let Some(path) = request.zenoh_config {
        config.publish.zenoh_config = Some(path);
    }
    if let Some(host) = request.host {
        config.publish.dcp.host = Some(host);
    }
    if let Some(port) = request.port {
        config.publish.dcp.port = Some(port);
    }

    let mode = BuildMode::resolve(
        request.local_debug,
        request.platform.as_deref(),
        &config.build,
    )?;
    let options = DeployOptions {
        build_path: request.build_path,
        user: request.user,
        mode,
        skip_build: request.skip_build,
        key_prefix: config.publish.key_prefix.clone(),
    };

    let publisher = ImagePublisher::new(&config.build);
    let sink = match config.publish.sink {
        SinkKind::Zenoh => ConfiguredSink::Zenoh(ZenohSink::from_config_path(
            config.publish.zenoh_config.as_deref(),
        )),
        SinkKind::Dcp => ConfiguredSink::Dcp(DcpSink::new(&config.publish.dcp)),
    };

    let outcome = deploy_pipeline::run(&options, &publisher, &sink).await?;

    for step in &outcome.steps {
        println!("{step}");
    }
    for job in &outcome.jobs {
        println!("  {tag} ({kind} {id})", tag = job.tag, kind = job.kind, id = job.id);
    }

    if request.pretty_print {
        println!();
        println!("{}", outcome.description.to_pretty_json()?);
    }

    Ok(())
}

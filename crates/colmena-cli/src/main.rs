mod commands;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colmena_core::SinkKind;

#[derive(Parser)]
#[command(
    name = "colmena-deploy",
    about = "Build COLMENA service images and publish the service definition"
)]
#[command(version)]
struct Cli {
    /// Path to build folder
    #[arg(long = "build_path")]
    build_path: PathBuf,
    /// Docker buildx architectures (e.g. linux/amd64,linux/arm64)
    #[arg(long)]
    platform: Option<String>,
    /// DCP host for deployment
    #[arg(long)]
    host: Option<String>,
    /// DCP port for deployment
    #[arg(long)]
    port: Option<u16>,
    /// DockerHub username
    #[arg(long)]
    user: String,
    /// Skip building Docker images
    #[arg(long = "skip_build")]
    skip_build: bool,
    /// Build and load image into local store
    #[arg(long = "local_debug")]
    local_debug: bool,
    /// Pretty print colmena service description
    #[arg(long = "pretty-print")]
    pretty_print: bool,
    /// Where to publish the service definition (overrides colmena.toml)
    #[arg(long, value_enum)]
    sink: Option<SinkArg>,
    /// Zenoh JSON5 config file (overrides colmena.toml)
    #[arg(long = "zenoh_config")]
    zenoh_config: Option<PathBuf>,
    /// Deploy config file (defaults to <build_path>/colmena.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SinkArg {
    Zenoh,
    Dcp,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Zenoh => SinkKind::Zenoh,
            SinkArg::Dcp => SinkKind::Dcp,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    commands::deploy(commands::DeployRequest {
        build_path: cli.build_path,
        user: cli.user,
        platform: cli.platform,
        host: cli.host,
        port: cli.port,
        skip_build: cli.skip_build,
        local_debug: cli.local_debug,
        pretty_print: cli.pretty_print,
        sink: cli.sink.map(SinkKind::from),
        zenoh_config: cli.zenoh_config,
        config: cli.config,
    })
    .await
}

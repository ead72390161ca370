use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the optional deploy configuration inside a build directory.
pub const CONFIG_FILE: &str = "colmena.toml";

/// Default key expression prefix for published service definitions.
pub const DEFINITIONS_KEY_PREFIX: &str = "colmena_service_definitions";

/// colmena.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Container build tool
    #[serde(default = "default_program")]
    pub program: String,
    /// buildx platform list used when `--platform` is not given
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Pass DOCKER_BUILDKIT=1 to every build invocation
    #[serde(default = "default_true")]
    pub buildkit: bool,
    /// How images reach the registry outside local-debug mode
    #[serde(default)]
    pub push_strategy: PushStrategy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushStrategy {
    /// `buildx build --platform <p> --push`
    #[default]
    Buildx,
    /// `buildx build --load`, then `image push <tag>`
    ImagePush,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    #[serde(default)]
    pub sink: SinkKind,
    /// Key expression prefix; the service id is appended after a `/`
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Zenoh JSON5 config (defaults to zenoh_config.json5 next to the executable)
    #[serde(default)]
    pub zenoh_config: Option<PathBuf>,
    #[serde(default)]
    pub dcp: DcpConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkKind {
    #[default]
    Zenoh,
    Dcp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DcpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            platform: default_platform(),
            buildkit: true,
            push_strategy: PushStrategy::default(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            key_prefix: default_key_prefix(),
            zenoh_config: None,
            dcp: DcpConfig::default(),
        }
    }
}

impl DeployConfig {
    /// Load from colmena.toml in the build directory, or return defaults if not found.
    pub fn load(build_path: &Path) -> crate::Result<Self> {
        let config_path = build_path.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path; the file must exist.
    pub fn load_file(config_path: &Path) -> crate::Result<Self> {
        tracing::debug!(path = %config_path.display(), "loading deploy config");
        let content =
            std::fs::read_to_string(config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }
}

fn default_program() -> String {
    "docker".to_owned()
}

fn default_platform() -> String {
    "linux/amd64".to_owned()
}

fn default_key_prefix() -> String {
    DEFINITIONS_KEY_PREFIX.to_owned()
}

fn default_true() -> bool {
    true
}

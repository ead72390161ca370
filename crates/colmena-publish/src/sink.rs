use colmena_core::ServiceDescription;

use crate::dcp::DcpSink;
use crate::error::PublishError;
use crate::zenoh_sink::ZenohSink;

/// A service definition ready to hand to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedDefinition {
    pub service_id: String,
    /// `<prefix>/<service id>`, used verbatim as the key expression.
    pub key: String,
    /// Compact JSON of the rewritten description.
    pub payload: String,
}

impl PublishedDefinition {
    pub fn new(description: &ServiceDescription, key_prefix: &str) -> Result<Self, PublishError> {
        let service_id = description
            .service_id()
            .map_err(|e| PublishError::MissingServiceId { source: e })?;

        Ok(Self {
            service_id: service_id.to_owned(),
            key: format!("{key_prefix}/{service_id}"),
            payload: description.to_json(),
        })
    }
}

/// Destination for the finalized service description.
#[allow(async_fn_in_trait)]
pub trait PublishSink: Send + Sync {
    /// Deliver one definition. Called exactly once per deployment.
    async fn publish(&self, definition: &PublishedDefinition) -> Result<(), PublishError>;
}

/// The sink selected by colmena.toml / `--sink`.
pub enum ConfiguredSink {
    Zenoh(ZenohSink),
    Dcp(DcpSink),
}

impl PublishSink for ConfiguredSink {
    async fn publish(&self, definition: &PublishedDefinition) -> Result<(), PublishError> {
        match self {
            Self::Zenoh(sink) => sink.publish(definition).await,
            Self::Dcp(sink) => sink.publish(definition).await,
        }
    }
}

/// Serialize `description` and publish it under `<key_prefix>/<service id>`.
///
/// Returns what was published.
pub async fn publish_definition<S: PublishSink>(
    sink: &S,
    description: &ServiceDescription,
    key_prefix: &str,
) -> Result<PublishedDefinition, PublishError> {
    let definition = PublishedDefinition::new(description, key_prefix)?;
    tracing::info!(service = %definition.service_id, key = %definition.key, "publishing service definition");

    sink.publish(&definition).await?;
    Ok(definition)
}

use colmena_core::DcpConfig;

use crate::error::PublishError;
use crate::executor::{GrpcExecutor, Grpcurl};
use crate::sink::{PublishSink, PublishedDefinition};

pub const DEFAULT_DCP_HOST: &str = "localhost";
pub const DEFAULT_DCP_PORT: u16 = 5555;

/// Full gRPC method name registering a service with the DCP.
pub const ADD_SERVICE_METHOD: &str = "ColmenaPlatform/AddService";

/// Publishes the definition through the DCP `AddService` RPC, parameterized
/// over the executor for testability.
pub struct DcpSink<E: GrpcExecutor = Grpcurl> {
    endpoint: String,
    executor: E,
}

impl DcpSink<Grpcurl> {
    pub fn new(config: &DcpConfig) -> Self {
        Self::with_executor(config, Grpcurl::default())
    }
}

impl<E: GrpcExecutor> DcpSink<E> {
    /// Missing host or port fall back to `localhost:5555`, with a warning.
    pub fn with_executor(config: &DcpConfig, executor: E) -> Self {
        let host = config.host.as_deref().unwrap_or_else(|| {
            tracing::warn!("DCP host not set, defaulting to {DEFAULT_DCP_HOST}");
            DEFAULT_DCP_HOST
        });
        let port = config.port.unwrap_or_else(|| {
            tracing::warn!("DCP port not set, defaulting to {DEFAULT_DCP_PORT}");
            DEFAULT_DCP_PORT
        });

        Self {
            endpoint: format!("{host}:{port}"),
            executor,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<E: GrpcExecutor> PublishSink for DcpSink<E> {
    async fn publish(&self, definition: &PublishedDefinition) -> Result<(), PublishError> {
        let args = vec![
            "--plaintext".to_owned(),
            "-d".to_owned(),
            definition.payload.clone(),
            self.endpoint.clone(),
            ADD_SERVICE_METHOD.to_owned(),
        ];

        let output = self
            .executor
            .exec(&args)
            .await
            .map_err(|e| PublishError::Rpc {
                endpoint: self.endpoint.clone(),
                source: e,
            })?;

        let response: serde_json::Value = serde_json::from_str(&output)
            .map_err(|e| PublishError::InvalidResponse { source: e })?;
        tracing::info!(endpoint = %self.endpoint, %response, "DCP accepted service definition");

        Ok(())
    }
}

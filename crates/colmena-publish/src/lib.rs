pub mod dcp;
pub mod error;
pub mod executor;
pub mod sink;
pub mod zenoh_sink;

pub use dcp::{ADD_SERVICE_METHOD, DEFAULT_DCP_HOST, DEFAULT_DCP_PORT, DcpSink};
pub use error::{GrpcError, PublishError};
pub use executor::{GrpcExecutor, Grpcurl};
pub use sink::{ConfiguredSink, PublishSink, PublishedDefinition, publish_definition};
pub use zenoh_sink::{ZENOH_CONFIG_FILE, ZenohSink};

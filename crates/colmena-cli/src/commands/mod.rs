mod deploy;
mod deploy_pipeline;

pub use deploy::{DeployRequest, deploy};

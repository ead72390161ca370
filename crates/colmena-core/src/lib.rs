//! Core types and configuration for colmena-deploy.
//!
//! This crate defines the service description document
//! ([`ServiceDescription`]), the image plan derived from it
//! ([`BuildJob`], [`plan_images`]), the optional `colmena.toml` schema
//! ([`DeployConfig`]), and shared error types.

pub mod config;
pub mod description;
pub mod error;
pub mod plan;

pub use config::{
    BuildConfig, CONFIG_FILE, DEFINITIONS_KEY_PREFIX, DcpConfig, DeployConfig, PublishConfig,
    PushStrategy, SinkKind,
};
pub use description::{DESCRIPTION_FILE, ServiceDescription};
pub use error::{Error, Result};
pub use plan::{BuildJob, DefinitionKind, plan_images, registry_tag};

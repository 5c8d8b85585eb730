//! Release pipeline stages
//!
//! Each stage is a small module consumed by the orchestrator in strict
//! sequence:
//!
//! - **version**: target version and publish timestamp validation
//! - **manifests**: version propagation across the three manifest files
//! - **build**: installer build invocation
//! - **artifact**: installer discovery and signature binding
//! - **feed**: update-feed mutation and download-URL rewriting
//! - **hosting**: hosted release creation through the GitHub CLI

pub mod artifact;
pub mod build;
pub mod feed;
pub mod hosting;
pub mod manifests;
pub mod version;

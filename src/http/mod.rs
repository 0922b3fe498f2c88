// file: src/http/mod.rs
// description: http pipeline module exports
// reference: internal module structure

pub mod pipeline;
pub mod policy;

pub use pipeline::{Pipeline, PipelineOptions, TransportOptions};
pub use policy::{LoggingPolicy, Next, Policy, RequestIdPolicy};

// file: src/demo/mod.rs
// description: demo workflow module exports
// reference: internal module structure

pub mod orchestrator;
pub mod progress;

pub use orchestrator::{
    DemoOrchestrator, DemoSettings, IndexStatus, RunReport, Step, sample_document,
};
pub use progress::settle;

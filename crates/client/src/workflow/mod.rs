//! Device and donation-request lifecycle workflows

mod engine;
mod refresh;

pub use engine::WorkflowEngine;
pub use refresh::HistoryPoller;

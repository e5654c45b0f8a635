pub mod config;
pub mod error;
pub mod frontend;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod tasks;
pub mod telemetry;

pub use config::Config;

use pipeline::Orchestrator;
use tasks::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub tasks: TaskStore,
}

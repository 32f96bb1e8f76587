pub mod config;
pub mod context;
pub mod detection;
pub mod handler;
pub mod tools;

pub use config::Config;
pub use handler::OdocsHandler;
pub use tools::{ServerState, ToolHandler};

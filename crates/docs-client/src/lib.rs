pub mod config;
pub mod resolver;
pub mod source;

pub use config::ClientConfig;
pub use resolver::DocsResolver;
pub use source::{DocSource, LocalPathSource, RemoteOriginSource, SourceChain, SourceError};

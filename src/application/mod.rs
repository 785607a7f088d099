// Application layer - use cases and orchestration over the domain and storage

pub mod config;
pub mod error;
pub mod input;
pub mod service;

pub use config::*;
pub use error::*;
pub use input::*;
pub use service::*;

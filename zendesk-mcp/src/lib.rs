pub mod client;
pub mod config;
pub mod server;
pub mod tools;

pub use client::{Params, RateLimitState, ZendeskClient, ZendeskError};
pub use config::{Config, ConfigError, Credentials};
pub use server::McpServer;
pub use tools::{Tool, ToolError, ToolRegistry};

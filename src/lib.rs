pub mod augment;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod fetch;
pub mod logging;
pub mod manifest;
pub mod mapping;
pub mod material;
pub mod schema;

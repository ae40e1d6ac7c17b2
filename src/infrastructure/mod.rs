// src/infrastructure/mod.rs
mod auth;
pub mod config;
pub mod file_api;
pub mod fs_storage;
pub mod graphql;
pub mod http_storage;
pub mod renderer;

pub use config::Config;
pub use file_api::FileNoteApi;
pub use fs_storage::FsObjectStorage;
pub use graphql::GraphQlNoteApi;
pub use http_storage::HttpObjectStorage;

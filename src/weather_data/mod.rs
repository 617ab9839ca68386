pub mod archive_client;
pub mod cache_builder;
pub mod error;
pub mod lookup;
mod response;

//! Search backend implementations.

pub mod http;

pub use http::HttpSearchClient;

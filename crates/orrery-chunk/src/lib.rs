//! Resident-chunk cache and observer-driven streaming.
#![forbid(unsafe_code)]

mod cache;
pub mod stream;

pub use cache::{ChunkCache, ChunkCacheStats};

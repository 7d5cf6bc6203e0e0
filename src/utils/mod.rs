//! Utility helpers shared by the scanning pipeline.

pub mod parallel;

pub use parallel::{parallelism_enabled, preferred_chunk_size, set_parallelism, ParallelismGuard};

//! # lift-client
//!
//! Extraction and load collaborators for Planlift.
//!
//! The engine core depends only on the two port traits in [`ports`]; this
//! crate supplies the implementations:
//! - [`HttpExtraction`] / [`FileExtraction`] for the source system
//! - [`HttpLoad`] for the target worksheet platform
//! - [`MemoryLoad`] for tests and dry-run rehearsals
//!
//! Every HTTP call runs under one shared [`ResiliencePolicy`]: bounded retry,
//! exponential backoff, and a rolling per-minute rate-limit window.

mod error;
mod extraction;
mod http;
mod load;
pub mod memory;
mod ports;
mod resilience;

pub use error::ClientError;
pub use extraction::{FileExtraction, HttpExtraction};
pub use load::HttpLoad;
pub use memory::MemoryLoad;
pub use ports::{ClientResult, ExtractionClient, LoadClient};
pub use resilience::{RateLimiter, ResiliencePolicy};

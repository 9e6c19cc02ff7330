//! Model implementations for the pipeline.
//!
//! This module provides reference implementations of the model traits.
//! Users can use these directly or implement their own.

#[cfg(feature = "huggingface")]
mod huggingface;

#[cfg(feature = "huggingface")]
pub use huggingface::HuggingFace;

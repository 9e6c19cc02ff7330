//! Trait seams between the pipeline and its collaborators.
//!
//! Applications implement these to plug in an HTTP stack, a hosted or local
//! model, or a different tokenizer.

pub mod fetcher;
pub mod inference;
pub mod tokenizer;

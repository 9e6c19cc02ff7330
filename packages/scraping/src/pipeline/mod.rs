//! Pipeline stages and their orchestration.

pub mod chunking;
pub mod extract;
pub mod listing;
pub mod normalize;
pub mod prompts;
pub mod runner;
pub mod translate;

pub use chunking::{chunk_tokens, split_text, TokenChunk};
pub use extract::Extractor;
pub use listing::discover_products;
pub use normalize::normalize;
pub use prompts::{
    build_extraction_prompt, CHARACTERISTICS_TEMPLATE, CHARACTERISTIC_FIELDS,
    EXTRACT_CHARACTERISTICS_PROMPT,
};
pub use runner::Pipeline;
pub use translate::Translator;

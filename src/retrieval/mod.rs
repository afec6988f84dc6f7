//! Vector index and retrieval

mod index;
mod search;

pub use index::{cosine_similarity, VectorIndex};
pub use search::Retriever;

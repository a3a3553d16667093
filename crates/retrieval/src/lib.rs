//! Keyword document index supplying context for chat answers.
//!
//! [`DocumentIndex`] loads plain-text documents from a file or directory at
//! startup and answers queries with the best-scoring snippets plus source
//! attributions. Scoring is token occurrence counting - no embeddings, no
//! external services - which is enough to ground answers in the indexed
//! material.

mod index;

pub use index::{ContextBundle, DocumentIndex, IndexError, SourceRef};

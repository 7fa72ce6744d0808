//! Hosted retrieval index client for docdex.
//!
//! The retrieval/ranking/synthesis pipeline lives entirely inside the remote
//! managed service; this module only configures a handle to a named index,
//! forwards queries, and returns the answer text. The [`QueryEngine`] trait
//! is the seam the server and CLI layers program against.

pub mod cloud;
pub mod config;
pub mod engine;
pub mod tool;

pub use cloud::CloudIndex;
pub use config::RetrievalConfig;
pub use engine::{QueryEngine, QueryRequest, QueryResponse};
pub use tool::{ANSWER_STYLE_SUFFIX, search_docs};

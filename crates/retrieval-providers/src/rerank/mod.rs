//! Reranker Provider
//!
//! | Item | Description |
//! |------|-------------|
//! | [`HttpReranker`] | OpenAI-compatible `/rerank` HTTP client |

mod http;

pub use http::HttpReranker;

//! Vector Store Adapters
//!
//! | Adapter | Use |
//! |---------|-----|
//! | [`PrimaryVectorStore`] | Qdrant-style REST backend, named dense/sparse vectors |
//! | [`MemoryVectorStore`] | in-process brute-force test double |

mod memory;
mod primary;

pub use memory::MemoryVectorStore;
pub use primary::PrimaryVectorStore;

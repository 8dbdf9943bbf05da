//! # Reconciliation Core
//!
//! A library for reconciling bank statements against an internal ledger:
//! similarity scoring, greedy best-match pairing, and run summary reporting.
//!
//! ## Features
//!
//! - **Similarity scoring**: Tiered, explainable match scores over amount,
//!   date, kind, and description
//! - **Greedy matching**: Deterministic best-match assignment with mutual
//!   pairing and a documented tie-break
//! - **Run summaries**: Counts and monetary aggregates for every run,
//!   appended to history
//! - **CSV ingestion**: Statement import with per-row validation and
//!   skip-and-count error handling
//! - **Storage abstraction**: Database-agnostic design with trait-based
//!   storage and an in-memory implementation
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{MemoryStorage, Reconciler};
//!
//! # async fn demo() -> reconciliation_core::ReconResult<()> {
//! let storage = MemoryStorage::new();
//! let mut reconciler = Reconciler::new(storage);
//! let summary = reconciler.run().await?;
//! assert_eq!(summary.matched_count, 0);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod ingest;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use engine::*;
pub use ingest::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_storage::MemoryStorage;

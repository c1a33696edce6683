//! Incremental-search selection engine
//!
//! Turns a cancelable, paginated remote query into a live candidate list and
//! resolves the operator's pick to an authoritative record.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────┐
//! │        Selection          │  prepare → prompt → refetch → remember
//! └─────────────┬─────────────┘
//!               │ feeds
//!               ▼
//! ┌───────────────────────────┐     ┌──────────────┐
//! │    SuggestionPipeline     │────▶│ RecentsStore │
//! │  (one cycle per query)    │     └──────────────┘
//! └─────────────┬─────────────┘
//!               │ calls
//!      ┌────────┴────────┐
//!      ▼                 ▼
//! ┌──────────┐     ┌───────────┐
//! │ Selector │     │ RowLayout │
//! └──────────┘     └───────────┘
//! ```
//!
//! Every query change starts a new suggestion cycle with a fresh
//! [`CancellationToken`]; the prompt cancels the previous token, which kills
//! the previous cycle's in-flight remote call.

mod cancel;
mod candidate;
mod engine;
mod error;
mod selector;
mod suggest;

pub use cancel::CancellationToken;
pub use candidate::{Candidate, Choice};
pub use engine::{SelectContext, Selection, default_message};
pub use error::SelectError;
pub use selector::{PageRequest, RefetchRequest, Selector};
pub use suggest::{ItemFilter, SuggestionPipeline, SuggestionSource, Suggestions};

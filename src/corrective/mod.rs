//! Corrective relevance filtering.
//!
//! Each document is graded 0–100 by a [`RelevanceOracle`] (typically an LLM). The
//! filter then keeps documents scoring at least
//! `max(min_score, mean_score * 0.6)`, so the bar follows the strength of the batch:
//! a weak batch lowers it (never below `min_score`) and a strong batch raises it.
//!
//! Failure handling is lenient. An oracle error or a reply without a number grades
//! the document `(relevant, 70)` instead of rejecting it, and a batch where fewer than
//! two documents clear the threshold falls back to its two best documents.

pub mod error;
pub mod filter;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod oracle;
pub mod parse;
pub mod policy;
pub mod types;


pub use error::{FilterPolicyError, OracleError};
pub use filter::RelevanceFilter;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockOracle;
pub use oracle::{DEFAULT_ORACLE_MODEL, GenaiOracle, RelevanceOracle, grading_prompt};
pub use parse::parse_relevance_reply;
pub use policy::FilterPolicy;
pub use types::{FilterOutcome, RelevanceVerdict};

//! Cursor-based pagination over GraphQL connections.
//!
//! [`PaginationEngine`] drives repeated queries, a [`PageExtractor`] turns
//! each decoded page into items plus the cursor for the next one, and the
//! result comes back as a [`FetchOutcome`] recording whether every page was
//! fetched.

pub mod engine;
pub mod extractor;
pub mod outcome;

pub use engine::{build_variables, PaginationEngine};
pub use extractor::{
    CommitsExtractor, ContributorsExtractor, ExtractionResult, IssuesExtractor, PageExtractor,
    ReleasesExtractor,
};
pub use outcome::FetchOutcome;

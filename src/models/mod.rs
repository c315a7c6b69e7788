pub mod commit;
pub mod contributor;
pub mod graphql;
pub mod issue;
pub mod release;
pub mod repository;

// Re-export commonly used types
pub use commit::CommitRecord;
pub use contributor::{ContributorMap, ContributorRecord};
pub use graphql::{graphql_error_messages, GraphQLError, GraphQLRequest, PageInfo};
pub use issue::{IssueRecord, IssueState};
pub use release::Release;
pub use repository::{LicenseRecord, RootFile};

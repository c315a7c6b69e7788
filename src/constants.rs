pub const GITHUB_API_URL: &str = "https://api.github.com/graphql";
pub const CONFIG_FILE: &str = "repo-metrics.json";
pub const HOME_CONFIG_FILE: &str = ".repo-metrics.json";

pub const DEFAULT_DATE_RANGE_DAYS: i64 = 365;
pub const DEFAULT_PAGINATION_LIMIT: u32 = 100;
pub const MAX_PAGINATION_LIMIT: u32 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ROOT_MD_FILES_OUTPUT: &str = "root_md_files.jsonl";
pub const LICENSE_OUTPUT: &str = "license.jsonl";
pub const RELEASES_OUTPUT: &str = "releases.jsonl";
pub const CONTRIBUTORS_OUTPUT: &str = "contributors.jsonl";
pub const COMMITS_OUTPUT: &str = "commits.jsonl";
pub const ISSUES_OUTPUT: &str = "issues.jsonl";

/// Placeholder written when the repository reports no license.
pub const NO_LICENSE: &str = "None";
pub const UNNAMED_RELEASE: &str = "Unnamed release";
pub const UNKNOWN_AUTHOR: &str = "Unknown";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// Query documents. Owner and name always travel as variables.
pub const ROOT_FILES_QUERY: &str = r#"
    query($owner: String!, $name: String!) {
        repository(owner: $owner, name: $name) {
            object(expression: "HEAD:") {
                ... on Tree {
                    entries {
                        name
                    }
                }
            }
        }
    }
"#;

pub const LICENSE_QUERY: &str = r#"
    query($owner: String!, $name: String!) {
        repository(owner: $owner, name: $name) {
            licenseInfo {
                name
            }
        }
    }
"#;

pub const RELEASES_QUERY: &str = r#"
    query($owner: String!, $name: String!, $first: Int!, $cursor: String) {
        repository(owner: $owner, name: $name) {
            releases(first: $first, orderBy: {field: CREATED_AT, direction: DESC}, after: $cursor) {
                edges {
                    node {
                        name
                        publishedAt
                    }
                    cursor
                }
                pageInfo {
                    hasNextPage
                    endCursor
                }
            }
        }
    }
"#;

/// Shared by the commits and contributors fetchers.
pub const COMMIT_HISTORY_QUERY: &str = r#"
    query($owner: String!, $name: String!, $first: Int!, $cursor: String, $since: GitTimestamp!) {
        repository(owner: $owner, name: $name) {
            defaultBranchRef {
                target {
                    ... on Commit {
                        history(first: $first, since: $since, after: $cursor) {
                            nodes {
                                messageHeadline
                                committedDate
                                author {
                                    name
                                    user {
                                        login
                                    }
                                }
                            }
                            pageInfo {
                                hasNextPage
                                endCursor
                            }
                        }
                    }
                }
            }
        }
    }
"#;

pub const ISSUES_QUERY: &str = r#"
    query($owner: String!, $name: String!, $first: Int!, $cursor: String) {
        repository(owner: $owner, name: $name) {
            issues(first: $first, states: [OPEN, CLOSED], after: $cursor, orderBy: {field: CREATED_AT, direction: DESC}) {
                nodes {
                    title
                    state
                    author {
                        login
                    }
                    createdAt
                }
                pageInfo {
                    hasNextPage
                    endCursor
                }
            }
        }
    }
"#;

mod common;

use std::fs;

use common::RoutedExecutor;
use repo_metrics::commands::collect::collect_into;
use repo_metrics::writer::read_jsonl;
use repo_metrics::{
    CommitRecord, Config, ContributorRecord, FetchSettings, IssueRecord, JsonlWriter,
    MetricsFetcher, QueryFailure, Release,
};
use serde_json::{json, Value};

const CUTOFF: &str = "2024-04-15T00:00:00Z";

fn settings() -> FetchSettings {
    FetchSettings {
        owner: "acme".to_string(),
        repo_name: "widget".to_string(),
        page_size: 2,
        cutoff: CUTOFF.to_string(),
    }
}

fn writer_in(dir: &std::path::Path) -> JsonlWriter {
    JsonlWriter::new(&Config {
        output_dir: dir.to_path_buf(),
        ..Config::default()
    })
}

fn tree(names: &[&str]) -> Value {
    let entries: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
    json!({ "data": { "repository": { "object": { "entries": entries } } } })
}

fn history(nodes: Value, next: Option<&str>) -> Value {
    json!({ "data": { "repository": { "defaultBranchRef": { "target": { "history": {
        "nodes": nodes,
        "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next }
    }}}}}})
}

fn full_repository() -> RoutedExecutor {
    let releases = json!({ "data": { "repository": { "releases": {
        "edges": [
            { "node": { "name": "v2.0.0", "publishedAt": "2024-06-01T10:00:00Z" }, "cursor": "r1" },
            { "node": { "name": "", "publishedAt": "2024-05-01T10:00:00Z" }, "cursor": "r2" }
        ],
        "pageInfo": { "hasNextPage": true, "endCursor": "r2" }
    }}}});
    let old_releases = json!({ "data": { "repository": { "releases": {
        "edges": [{ "node": { "name": "v1.0.0", "publishedAt": "2023-01-01T10:00:00Z" }, "cursor": "r3" }],
        "pageInfo": { "hasNextPage": true, "endCursor": "r3" }
    }}}});
    let commits_page_1 = history(
        json!([
            { "messageHeadline": "Add parser", "committedDate": "2024-06-02T00:00:00Z",
              "author": { "name": "Alice", "user": { "login": "alice" } } },
            { "messageHeadline": "Fix docs", "committedDate": "2024-05-02T00:00:00Z",
              "author": { "name": "Bob", "user": { "login": "bob" } } }
        ]),
        Some("h1"),
    );
    let commits_page_2 = history(
        json!([
            { "messageHeadline": "Initial import", "committedDate": "2024-04-20T00:00:00Z",
              "author": { "name": "Alice", "user": { "login": "alice" } } },
            { "messageHeadline": "Vendored change", "committedDate": "2024-04-19T00:00:00Z",
              "author": null }
        ]),
        None,
    );
    let issues = json!({ "data": { "repository": { "issues": {
        "nodes": [
            { "title": "Crash on empty input", "state": "OPEN", "author": { "login": "dave" }, "createdAt": "2024-06-03T00:00:00Z" },
            { "title": "Ghost issue", "state": "CLOSED", "author": null, "createdAt": "2024-05-03T00:00:00Z" }
        ],
        "pageInfo": { "hasNextPage": false, "endCursor": null }
    }}}});

    RoutedExecutor::new()
        .route("entries", vec![Ok(tree(&["README.md", "notes.md", "LICENSE"]))])
        .route("licenseInfo", vec![Ok(json!({ "data": { "repository": { "licenseInfo": { "name": "MIT License" } } } }))])
        .route("releases(", vec![Ok(releases), Ok(old_releases)])
        .route(
            "history(",
            vec![
                Ok(commits_page_1.clone()),
                Ok(commits_page_2.clone()),
                Ok(commits_page_1),
                Ok(commits_page_2),
            ],
        )
        .route("issues(", vec![Ok(issues)])
}

#[tokio::test]
async fn test_root_md_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = MetricsFetcher::new(full_repository(), settings());
    let writer = writer_in(dir.path());

    let files = fetcher.get_root_md_files().await;
    let path = writer.write_root_md_files(files.data()).unwrap();

    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec![r#"{"file":"README.md"}"#, r#"{"file":"notes.md"}"#]);
}

#[tokio::test]
async fn test_collect_writes_every_resource() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = MetricsFetcher::new(full_repository(), settings());

    let metrics = collect_into(&fetcher, &writer_in(dir.path())).await.unwrap();
    assert!(metrics.is_complete());

    let license = fs::read_to_string(dir.path().join("license.jsonl")).unwrap();
    assert_eq!(license, "{\"license\":\"MIT License\"}\n");

    let releases: Vec<Release> = read_jsonl(&dir.path().join("releases.jsonl")).unwrap();
    assert_eq!(releases.len(), 2);
    assert_eq!(releases[1].name, "Unnamed release");
    // The second releases page crossed the cutoff; no third request was made.
    assert_eq!(fetcher.executor().calls("releases("), 2);

    let contributors: Vec<ContributorRecord> =
        read_jsonl(&dir.path().join("contributors.jsonl")).unwrap();
    assert_eq!(
        contributors,
        vec![
            ContributorRecord {
                login: "alice".to_string(),
                last_contribution: "2024-06-02T00:00:00Z".to_string(),
            },
            ContributorRecord {
                login: "bob".to_string(),
                last_contribution: "2024-05-02T00:00:00Z".to_string(),
            },
        ]
    );

    let commits: Vec<CommitRecord> = read_jsonl(&dir.path().join("commits.jsonl")).unwrap();
    assert_eq!(commits.len(), 4);
    assert_eq!(commits[3].author, "Unknown");

    let issues: Vec<IssueRecord> = read_jsonl(&dir.path().join("issues.jsonl")).unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[1].author, "Unknown");
}

#[tokio::test]
async fn test_collect_writes_partial_data_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let executor = RoutedExecutor::new()
        .route("entries", vec![Err(QueryFailure::Status { status: 502 })])
        .route("licenseInfo", vec![Ok(json!({ "data": { "repository": { "licenseInfo": null } } }))])
        .route("releases(", vec![Ok(json!({ "data": { "repository": { "releases": null } } }))])
        .route(
            "history(",
            vec![
                Ok(history(json!([]), None)),
                Ok(history(
                    json!([
                        { "messageHeadline": "One", "committedDate": "2024-06-01T00:00:00Z", "author": { "name": "A" } },
                        { "messageHeadline": "Two", "committedDate": "2024-05-01T00:00:00Z", "author": { "name": "B" } }
                    ]),
                    Some("h1"),
                )),
                Err(QueryFailure::Transport { cause: "timed out".to_string() }),
            ],
        )
        .route("issues(", vec![Ok(json!({ "data": { "repository": { "issues": { "nodes": [], "pageInfo": { "hasNextPage": false } } } } }))]);
    let fetcher = MetricsFetcher::new(executor, settings());

    let metrics = collect_into(&fetcher, &writer_in(dir.path())).await.unwrap();

    assert!(!metrics.is_complete());
    assert!(!metrics.root_md_files.is_complete());
    assert!(!metrics.commits.is_complete());
    assert!(metrics.releases.is_complete());

    let commits: Vec<CommitRecord> = read_jsonl(&dir.path().join("commits.jsonl")).unwrap();
    assert_eq!(commits.len(), 2);
    let root = fs::read_to_string(dir.path().join("root_md_files.jsonl")).unwrap();
    assert!(root.is_empty());
    let license = fs::read_to_string(dir.path().join("license.jsonl")).unwrap();
    assert_eq!(license, "{\"license\":\"None\"}\n");
}

//! Newline-delimited JSON output, one file per resource.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, OutputFiles};
use crate::error::{MetricsError, MetricsResult};
use crate::models::{CommitRecord, ContributorMap, IssueRecord, LicenseRecord, Release, RootFile};

/// Write `items` to `path`, one JSON object per line, replacing any existing file.
pub fn write_jsonl<'a, T, I>(path: &Path, items: I) -> MetricsResult<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = BufWriter::new(File::create(path)?);
    let mut written = 0;
    for item in items {
        serde_json::to_writer(&mut out, item)?;
        out.write_all(b"\n")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Parse a JSONL file back into records. Blank lines are skipped.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> MetricsResult<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            MetricsError::ParseError(format!("{} line {}: {}", path.display(), index + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

pub struct JsonlWriter {
    output_dir: PathBuf,
    files: OutputFiles,
}

impl JsonlWriter {
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            files: config.outputs.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn prepare(&self, file_name: &str) -> MetricsResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.join(file_name))
    }

    pub fn write_root_md_files(&self, md_files: &[String]) -> MetricsResult<PathBuf> {
        let path = self.prepare(&self.files.root_md_files)?;
        tracing::info!(count = md_files.len(), path = %path.display(), "Writing .md files");
        let records: Vec<RootFile> = md_files
            .iter()
            .map(|file| RootFile { file: file.clone() })
            .collect();
        write_jsonl(&path, &records)?;
        Ok(path)
    }

    pub fn write_license(&self, license_name: &str) -> MetricsResult<PathBuf> {
        let path = self.prepare(&self.files.license)?;
        tracing::info!(license = license_name, path = %path.display(), "Writing license");
        let record = LicenseRecord {
            license: license_name.to_string(),
        };
        write_jsonl(&path, [&record])?;
        Ok(path)
    }

    pub fn write_releases(&self, releases: &[Release]) -> MetricsResult<PathBuf> {
        let path = self.prepare(&self.files.releases)?;
        tracing::info!(count = releases.len(), path = %path.display(), "Writing releases");
        write_jsonl(&path, releases)?;
        Ok(path)
    }

    pub fn write_contributors(&self, contributors: &ContributorMap) -> MetricsResult<PathBuf> {
        let path = self.prepare(&self.files.contributors)?;
        tracing::info!(count = contributors.len(), path = %path.display(), "Writing contributors");
        write_jsonl(&path, &contributors.to_records())?;
        Ok(path)
    }

    pub fn write_commits(&self, commits: &[CommitRecord]) -> MetricsResult<PathBuf> {
        let path = self.prepare(&self.files.commits)?;
        tracing::info!(count = commits.len(), path = %path.display(), "Writing commits");
        write_jsonl(&path, commits)?;
        Ok(path)
    }

    pub fn write_issues(&self, issues: &[IssueRecord]) -> MetricsResult<PathBuf> {
        let path = self.prepare(&self.files.issues)?;
        tracing::info!(count = issues.len(), path = %path.display(), "Writing issues");
        write_jsonl(&path, issues)?;
        Ok(path)
    }
}

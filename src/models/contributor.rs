use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Login to the most recent contribution timestamp seen for it.
///
/// Timestamps compare as strings, which orders correctly only because the
/// API always returns the same fixed-width ISO-8601 form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorMap {
    latest: BTreeMap<String, String>,
}

impl ContributorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contribution, keeping whichever date is later.
    pub fn record(&mut self, login: &str, date: &str) {
        match self.latest.get_mut(login) {
            Some(existing) if existing.as_str() >= date => {}
            Some(existing) => *existing = date.to_string(),
            None => {
                self.latest.insert(login.to_string(), date.to_string());
            }
        }
    }

    pub fn merge(&mut self, other: ContributorMap) {
        for (login, date) in other.latest {
            self.record(&login, &date);
        }
    }

    pub fn get(&self, login: &str) -> Option<&str> {
        self.latest.get(login).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.latest.iter().map(|(l, d)| (l.as_str(), d.as_str()))
    }

    /// One record per login, ordered by login.
    pub fn to_records(&self) -> Vec<ContributorRecord> {
        self.iter()
            .map(|(login, date)| ContributorRecord {
                login: login.to_string(),
                last_contribution: date.to_string(),
            })
            .collect()
    }
}

impl FromIterator<ContributorMap> for ContributorMap {
    fn from_iter<I: IntoIterator<Item = ContributorMap>>(iter: I) -> Self {
        let mut merged = ContributorMap::new();
        for map in iter {
            merged.merge(map);
        }
        merged
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ContributorRecord {
    pub login: String,
    pub last_contribution: String,
}

use serde::{Deserialize, Serialize};

use crate::constants::UNNAMED_RELEASE;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

impl Release {
    pub fn new(name: Option<&str>, published_at: &str) -> Self {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => UNNAMED_RELEASE.to_string(),
        };
        Self {
            name,
            published_at: published_at.to_string(),
        }
    }
}

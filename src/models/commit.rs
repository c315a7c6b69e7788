use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub message: String,
    pub date: String,
    pub author: String,
}

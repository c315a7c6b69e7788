use serde::{Deserialize, Serialize};

/// One markdown file found in the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RootFile {
    pub file: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LicenseRecord {
    pub license: String,
}

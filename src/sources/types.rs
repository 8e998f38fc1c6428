use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize)]
pub struct SourceList {
    pub path: String,
    pub sources: Vec<SourceConfig>,
}

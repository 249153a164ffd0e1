use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A certificate submitted by a student and reviewed by a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: i64,
    #[serde(default, alias = "titulo")]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "nomeAluno")]
    pub student_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "dataEnvio")]
    pub submitted_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Certificate {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            status: None,
            student_name: None,
            submitted_at: None,
            extra: Map::new(),
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type NoticeId = i64;

/// A server-defined announcement with a read/unread status.
///
/// Fields the client does not interpret are kept in `extra` so nothing the
/// server sends is lost when the collection is handed to a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: NoticeId,
    #[serde(default, alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "conteudo")]
    pub content: String,
    #[serde(default, alias = "lido")]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "dataCriacao")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notice {
    pub fn new(id: NoticeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            read: false,
            created_at: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_kept() {
        let json = r#"{"id":7,"title":"Exam week","read":true,"priority":"HIGH"}"#;
        let notice: Notice = serde_json::from_str(json).unwrap();
        assert_eq!(notice.id, 7);
        assert!(notice.read);
        assert_eq!(notice.extra.get("priority"), Some(&Value::from("HIGH")));
    }

    #[test]
    fn test_minimal_notice() {
        let notice: Notice = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(notice, Notice::new(1, ""));
    }
}

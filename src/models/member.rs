use serde::Serialize;

/// One row of the membership roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub id: String,
}

impl Member {
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            id: id.trim().to_string(),
        }
    }

    /// Case-insensitive substring match on name or id. `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.id.to_lowercase().contains(query)
    }
}

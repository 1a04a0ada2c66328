use serde::{Deserialize, Serialize};

/// What the upsert executor did for a given natural key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertAction {
    Created,
    Updated,
}

/// Response body of every upsert endpoint: the action taken and the id of
/// the record that now holds the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertOutcome {
    pub action: UpsertAction,
    pub name: String,
}

impl UpsertOutcome {
    pub fn created(name: String) -> Self {
        Self {
            action: UpsertAction::Created,
            name,
        }
    }

    pub fn updated(name: String) -> Self {
        Self {
            action: UpsertAction::Updated,
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_lowercase() {
        let outcome = UpsertOutcome::created("abc".into());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["action"], "created");
        assert_eq!(json["name"], "abc");
    }
}

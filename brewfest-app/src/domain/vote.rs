use super::Rating;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: uuid::Uuid,
    pub voter_identity: String,
    /// `None` only for legacy records written before ids were stored.
    pub target_id: Option<uuid::Uuid>,
    pub target_name: String,
    pub rating: Rating,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Vote {
    pub fn new(
        voter_identity: String,
        target_id: uuid::Uuid,
        target_name: String,
        rating: Rating,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            voter_identity,
            target_id: Some(target_id),
            target_name,
            rating,
            submitted_at: None,
        }
    }
}

/// Vote payload as sent by a client, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteSubmission {
    pub voter_identity: String,
    pub target_id: uuid::Uuid,
    #[serde(default)]
    pub target_name: Option<String>,
    pub rating: i32,
}

/// Identity handed to visitors who vote without logging in.
pub fn anonymous_voter_token() -> String {
    format!("anon_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_tokens_are_unique() {
        let a = anonymous_voter_token();
        let b = anonymous_voter_token();
        assert!(a.starts_with("anon_"));
        assert_ne!(a, b);
    }
}

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

/// Public view of the user who posted an ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdAuthor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    New,
    #[default]
    Used,
    Broken,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Used, Condition::Broken];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
            Condition::Broken => "broken",
        }
    }

    /// Human readable label shown next to the stored value.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::Broken => "Broken",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown condition: {0}")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCondition(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct Ad {
    pub id: i64,
    pub author: AdAuthor,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: Option<Category>,
    pub condition: Condition,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Ad {
    pub const TITLE_MAX_LEN: usize = 100;
    pub const DESCRIPTION_MAX_LEN: usize = 500;
    pub const IMAGE_URL_MAX_LEN: usize = 100;

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author.id == user_id
    }
}

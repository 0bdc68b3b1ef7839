use crate::application::validation::FieldErrors;
use crate::domain::ads::ad::{Ad, Condition};

/// Raw list filters as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct AdQuery {
    pub category: Option<String>,
    pub condition: Option<String>,
    pub search: Option<String>,
}

/// Validated list filters. Only active ads are ever listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdFilter {
    pub category_id: Option<i64>,
    pub condition: Option<Condition>,
    pub search: Option<String>,
}

/// Category reference in a write payload: absent, explicitly null, or an id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryRef {
    #[default]
    Unchanged,
    Clear,
    Set(i64),
}

/// Unvalidated create/update input.
#[derive(Debug, Clone, Default)]
pub struct AdDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: CategoryRef,
    pub condition: Option<String>,
    pub is_active: Option<bool>,
    /// Fields whose JSON value had the wrong type; their value above is `None`.
    pub malformed: FieldErrors,
}

/// Input that passed field validation; omitted optional fields stay `None`.
#[derive(Debug, Clone)]
pub struct ValidatedAd {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: CategoryRef,
    pub condition: Option<Condition>,
    pub is_active: Option<bool>,
}

/// Complete column values written by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdFields {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<i64>,
    pub condition: Condition,
    pub is_active: bool,
}

impl ValidatedAd {
    pub fn for_create(self) -> AdFields {
        AdFields {
            title: self.title,
            description: self.description,
            image_url: self.image_url.unwrap_or_default(),
            category_id: match self.category {
                CategoryRef::Set(id) => Some(id),
                CategoryRef::Unchanged | CategoryRef::Clear => None,
            },
            condition: self.condition.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
        }
    }

    pub fn for_update(self, current: &Ad) -> AdFields {
        AdFields {
            title: self.title,
            description: self.description,
            image_url: self.image_url.unwrap_or_else(|| current.image_url.clone()),
            category_id: match self.category {
                CategoryRef::Set(id) => Some(id),
                CategoryRef::Clear => None,
                CategoryRef::Unchanged => current.category.as_ref().map(|c| c.id),
            },
            condition: self.condition.unwrap_or(current.condition),
            is_active: self.is_active.unwrap_or(current.is_active),
        }
    }
}

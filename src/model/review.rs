use super::Rating;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an authenticated user, as issued by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(pub String);

impl AuthorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signed-in user submitting a review.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: AuthorId,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl Author {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: AuthorId::new(id),
            display_name: None,
            email: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name shown next to a review: the display name, else the email.
    pub fn shown_name(&self) -> Option<String> {
        self.display_name.clone().or_else(|| self.email.clone())
    }
}

/// One immutable entry of a resource's review log.
///
/// The store assigns the record id and creation time when the review is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: Rating,
    pub review_text: String,
    pub author_id: AuthorId,
    pub author_name: Option<String>,
}

impl Review {
    pub fn new(rating: Rating, review_text: impl Into<String>, author: &Author) -> Self {
        Self {
            rating,
            review_text: review_text.into(),
            author_id: author.id.clone(),
            author_name: author.shown_name(),
        }
    }
}

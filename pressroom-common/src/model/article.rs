use crate::model::{Id, user::UserMarker};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ArticleMarker;

/// Who a record belongs to and how that person is displayed.
///
/// Raw records may already carry a display name. Decoration fills in (or overwrites) the
/// display name and avatar but never touches `owner_id`. A record whose owner could not be read
/// has no `owner_id` and belongs to nobody, the current user included.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Byline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Id<UserMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Id<ArticleMarker>,
    #[serde(flatten)]
    pub byline: Byline,
    pub title: String,
    pub content: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub likers: Vec<LikeUser>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(flatten)]
    pub byline: Byline,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    #[serde(default)]
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeUser {
    #[serde(flatten)]
    pub byline: Byline,
}

/// A record that belongs to a user and can be decorated with that user's display info.
pub trait Owned {
    fn byline(&self) -> &Byline;

    #[must_use]
    fn with_byline(self, byline: Byline) -> Self;

    fn owner_id(&self) -> Option<Id<UserMarker>> {
        self.byline().owner_id
    }
}

impl Owned for Article {
    fn byline(&self) -> &Byline {
        &self.byline
    }

    fn with_byline(self, byline: Byline) -> Self {
        Self { byline, ..self }
    }
}

impl Owned for Comment {
    fn byline(&self) -> &Byline {
        &self.byline
    }

    fn with_byline(self, byline: Byline) -> Self {
        Self { byline, ..self }
    }
}

impl Owned for LikeUser {
    fn byline(&self) -> &Byline {
        &self.byline
    }

    fn with_byline(self, byline: Byline) -> Self {
        Self { byline }
    }
}

impl Article {
    #[must_use]
    pub fn liker_count(&self) -> usize {
        self.likers.len()
    }

    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Date of the most recently appended comment, if there is one and it has a date.
    #[must_use]
    pub fn last_comment_date(&self) -> Option<OffsetDateTime> {
        self.comments.last().and_then(|comment| comment.date)
    }
}

use crate::StoreError;
use pressroom_common::model::{
    Id, InvalidIdError, ModelValidationError,
    article::{Article, Byline, Comment, LikeUser},
    state::State,
    user::{DEFAULT_CURRENT_USER_ID, User, UserMarker},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Number, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::warn;

/// Ids arrive either as JSON numbers or as text.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdRecord {
    Number(Number),
    Text(String),
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub(crate) struct StateRecord {
    pub user: Option<UserRecord>,
    pub articles: Option<Value>,
    pub origin: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct UserRecord {
    pub id: Option<IdRecord>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticleRecord {
    #[serde(alias = "id")]
    pub article_id: IdRecord,
    #[serde(alias = "ownerId")]
    pub uid: Option<Value>,
    pub uname: Option<String>,
    pub uavatar: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub comments: Option<Value>,
    #[serde(alias = "likers")]
    pub like_users: Option<Value>,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub(crate) struct CommentRecord {
    #[serde(alias = "ownerId")]
    pub uid: Option<Value>,
    pub uname: Option<String>,
    pub uavatar: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub(crate) struct LikeUserRecord {
    #[serde(alias = "ownerId")]
    pub uid: Option<Value>,
    pub uname: Option<String>,
    pub uavatar: Option<String>,
}

impl<Marker> TryFrom<IdRecord> for Id<Marker> {
    type Error = InvalidIdError;

    fn try_from(value: IdRecord) -> Result<Self, Self::Error> {
        // Fractional numbers keep their integer part, like text ids do.
        match value {
            IdRecord::Number(number) => Id::parse_leading(&number.to_string()),
            IdRecord::Text(text) => Id::parse_leading(&text),
        }
    }
}

/// Reads a field that should hold a list. Anything that is not an array counts as no list.
fn lenient_list<T: DeserializeOwned>(
    value: Option<Value>,
    field: &'static str,
) -> Result<Option<Vec<T>>, serde_json::Error> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map(Some),
        None | Some(Value::Null) => Ok(None),
        Some(other) => {
            warn!(field, kind = json_kind(&other), "Ignoring non-list value");
            Ok(None)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_date(date: Option<String>) -> Option<OffsetDateTime> {
    let date = date?;
    OffsetDateTime::parse(&date, &Rfc3339)
        .inspect_err(|err| warn!(%date, %err, "Ignoring unparseable date"))
        .ok()
}

/// Reads an owner id. One that is missing or unreadable leaves the record without an owner.
fn owner_id(uid: Option<Value>) -> Option<Id<UserMarker>> {
    let uid = uid.filter(|uid| !uid.is_null())?;
    let owner_id = IdRecord::deserialize(&uid)
        .ok()
        .and_then(|record| Id::try_from(record).ok());
    if owner_id.is_none() {
        warn!(%uid, "Ignoring unreadable owner id");
    }
    owner_id
}

fn byline(uid: Option<Value>, uname: Option<String>, uavatar: Option<String>) -> Byline {
    Byline {
        owner_id: owner_id(uid),
        display_name: uname,
        avatar_url: uavatar,
    }
}

impl TryFrom<UserRecord> for User {
    type Error = ModelValidationError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value
                .id
                .map(Id::try_from)
                .transpose()?
                .unwrap_or(Id::new(DEFAULT_CURRENT_USER_ID)),
            name: value.name.unwrap_or_default(),
            avatar: value.avatar.unwrap_or_default(),
        })
    }
}

impl From<CommentRecord> for Comment {
    fn from(value: CommentRecord) -> Self {
        Self {
            byline: byline(value.uid, value.uname, value.uavatar),
            date: parse_date(value.date),
            content: value.content.unwrap_or_default(),
        }
    }
}

impl From<LikeUserRecord> for LikeUser {
    fn from(value: LikeUserRecord) -> Self {
        Self {
            byline: byline(value.uid, value.uname, value.uavatar),
        }
    }
}

impl TryFrom<ArticleRecord> for Article {
    type Error = StoreError;

    fn try_from(value: ArticleRecord) -> Result<Self, Self::Error> {
        let comments = lenient_list::<CommentRecord>(value.comments, "comments")?
            .unwrap_or_default()
            .into_iter()
            .map(Comment::from)
            .collect();
        let likers = lenient_list::<LikeUserRecord>(value.like_users, "likeUsers")?
            .unwrap_or_default()
            .into_iter()
            .map(LikeUser::from)
            .collect();

        Ok(Self {
            id: Id::try_from(value.article_id).map_err(ModelValidationError::from)?,
            byline: byline(value.uid, value.uname, value.uavatar),
            title: value.title.unwrap_or_default(),
            content: value.content.unwrap_or_default(),
            date: parse_date(value.date),
            comments,
            likers,
        })
    }
}

impl TryFrom<StateRecord> for State {
    type Error = StoreError;

    fn try_from(value: StateRecord) -> Result<Self, Self::Error> {
        let articles = lenient_list::<ArticleRecord>(value.articles, "articles")?
            .map(|records| {
                records
                    .into_iter()
                    .map(Article::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            articles,
            user: value.user.map(User::try_from).transpose()?,
            origin: value.origin.unwrap_or_default(),
        })
    }
}

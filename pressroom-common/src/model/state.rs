use crate::model::{article::Article, user::User};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of the client store that every view is derived from.
///
/// `articles` is `None` when the store holds no article list at all, which is distinct from
/// an empty list only for logging purposes: both derive to empty views.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct State {
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub origin: String,
}

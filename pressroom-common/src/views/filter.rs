use crate::model::{
    Id,
    article::{Article, Owned},
    user::UserMarker,
};
use std::{cmp::Reverse, convert::Infallible, fmt::Display, str::FromStr};

/// How a list of articles is narrowed down or reordered for display.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum ArticleFilter {
    /// Only the current user's articles.
    Excellent,
    /// Most liked first.
    Vote,
    /// Input order reversed; the input is expected to be oldest first.
    Recent,
    /// Fewest comments first.
    NoReply,
    /// Uncommented articles first, then by the date of the last comment, newest first.
    #[default]
    LatestReply,
}

impl ArticleFilter {
    /// Maps a filter name to a filter. Unknown names select the default ordering.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "excellent" => Self::Excellent,
            "vote" => Self::Vote,
            "recent" => Self::Recent,
            "noreply" => Self::NoReply,
            _ => Self::LatestReply,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Vote => "vote",
            Self::Recent => "recent",
            Self::NoReply => "noreply",
            Self::LatestReply => "default",
        }
    }
}

impl FromStr for ArticleFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl Display for ArticleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Articles owned by `owner_id`.
///
/// A `display_name` takes precedence: the owner of the first article displayed under that
/// name is used instead. If no article carries the name, `owner_id` stands. When that first
/// article has no owner, nothing matches.
#[must_use]
pub fn articles_by_owner(
    decorated: &[Article],
    owner_id: Id<UserMarker>,
    display_name: Option<&str>,
) -> Vec<Article> {
    let owner_id = display_name
        .and_then(|name| {
            decorated
                .iter()
                .find(|article| article.byline.display_name.as_deref() == Some(name))
        })
        .map_or(Some(owner_id), Owned::owner_id);

    decorated
        .iter()
        .filter(|article| owner_id.is_some() && article.owner_id() == owner_id)
        .cloned()
        .collect()
}

/// Applies `filter` to a copy of `decorated`.
#[must_use]
pub fn articles_by_filter(
    decorated: &[Article],
    filter: ArticleFilter,
    current_user_id: Id<UserMarker>,
) -> Vec<Article> {
    match filter {
        ArticleFilter::Excellent => articles_by_owner(decorated, current_user_id, None),
        ArticleFilter::Vote => sorted_by_key(decorated, |article| Reverse(article.liker_count())),
        ArticleFilter::Recent => decorated.iter().rev().cloned().collect(),
        ArticleFilter::NoReply => sorted_by_key(decorated, Article::comment_count),
        ArticleFilter::LatestReply => sorted_by_key(decorated, |article| {
            (
                !article.comments.is_empty(),
                Reverse(article.last_comment_date()),
            )
        }),
    }
}

fn sorted_by_key<K, F>(articles: &[Article], key: F) -> Vec<Article>
where
    K: Ord,
    F: FnMut(&Article) -> K,
{
    let mut sorted = articles.to_vec();
    sorted.sort_by_key(key);
    sorted
}

//! Presentation views derived from a [`State`] snapshot.
//!
//! Every view starts from the decorated article list and is recomputed on each call; nothing
//! is cached between calls because the snapshot may have been replaced in the meantime.

pub mod decorate;
pub mod filter;
pub mod search;

use crate::{
    model::{
        Id,
        article::Article,
        state::State,
        user::{DEFAULT_CURRENT_USER_ID, UserMarker},
    },
    views::{
        decorate::build_decorated_articles,
        filter::{ArticleFilter, articles_by_filter, articles_by_owner},
        search::{SearchResult, SearchSort, search_articles},
    },
};
use tracing::trace;

pub const DEFAULT_AVATAR_BASE_URL: &str = "https://api.adorable.io/avatars/200/";

/// Session-level settings shared by all views.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct ViewConfig {
    pub current_user_id: Id<UserMarker>,
    /// Prefix of generated avatars, followed directly by the display name.
    pub avatar_base_url: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            current_user_id: Id::new(DEFAULT_CURRENT_USER_ID),
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_owned(),
        }
    }
}

impl ViewConfig {
    /// Uses the snapshot's user as the current user, if it has one.
    #[must_use]
    pub fn for_state(state: &State) -> Self {
        let mut config = Self::default();
        if let Some(user) = &state.user {
            config.current_user_id = user.id;
        }
        config
    }
}

/// Getter-style access to the views of one snapshot.
#[derive(Copy, Clone, Debug)]
pub struct Getters<'s> {
    state: &'s State,
    config: &'s ViewConfig,
}

impl<'s> Getters<'s> {
    #[must_use]
    pub fn new(state: &'s State, config: &'s ViewConfig) -> Self {
        Self { state, config }
    }

    #[must_use]
    pub fn current_user_id(self) -> Id<UserMarker> {
        self.config.current_user_id
    }

    #[must_use]
    pub fn computed_articles(self) -> Vec<Article> {
        build_decorated_articles(self.state, self.config)
    }

    #[must_use]
    pub fn articles_by_owner(
        self,
        owner_id: Id<UserMarker>,
        display_name: Option<&str>,
    ) -> Vec<Article> {
        let articles = articles_by_owner(&self.computed_articles(), owner_id, display_name);
        trace!(%owner_id, ?display_name, count = articles.len(), "Articles by owner");
        articles
    }

    #[must_use]
    pub fn articles_by_filter(self, filter: ArticleFilter) -> Vec<Article> {
        let articles = articles_by_filter(
            &self.computed_articles(),
            filter,
            self.config.current_user_id,
        );
        trace!(%filter, count = articles.len(), "Articles by filter");
        articles
    }

    #[must_use]
    pub fn articles_by_keyword(self, keyword: &str, sort: SearchSort) -> Vec<SearchResult> {
        let results = search_articles(
            &self.computed_articles(),
            keyword,
            sort,
            &self.state.origin,
        );
        trace!(keyword, ?sort, count = results.len(), "Articles by keyword");
        results
    }
}

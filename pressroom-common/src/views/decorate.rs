use crate::{
    model::{
        article::{Article, Byline, Owned},
        state::State,
        user::User,
    },
    views::ViewConfig,
};
use tracing::debug;

/// Returns a copy of `entity` whose byline shows who owns it.
///
/// Records of the current user take the current user's name and avatar; when the snapshot has
/// no user both end up absent. Everyone else keeps their own display name and gets an avatar
/// generated from it.
#[must_use]
pub fn decorate_entity<T>(
    entity: &T,
    is_current_user: bool,
    current_user: Option<&User>,
    avatar_base_url: &str,
) -> T
where
    T: Owned + Clone,
{
    let byline = entity.byline();

    let decorated = if is_current_user {
        Byline {
            owner_id: byline.owner_id,
            display_name: current_user.map(|user| user.name.clone()),
            avatar_url: current_user.map(|user| user.avatar.clone()),
        }
    } else {
        let name = byline.display_name.as_deref().unwrap_or_default();
        Byline {
            owner_id: byline.owner_id,
            display_name: byline.display_name.clone(),
            avatar_url: Some(format!("{avatar_base_url}{name}")),
        }
    };

    entity.clone().with_byline(decorated)
}

/// Clones every article of the snapshot and decorates it together with its comments and
/// likers. The snapshot itself is left untouched.
#[must_use]
pub fn build_decorated_articles(state: &State, config: &ViewConfig) -> Vec<Article> {
    let Some(articles) = &state.articles else {
        debug!("Snapshot has no article list, deriving empty views");
        return Vec::new();
    };

    let current_user = state.user.as_ref();

    articles
        .iter()
        .map(|article| {
            let mut decorated = decorate_one(article, config, current_user);
            decorated.comments = article
                .comments
                .iter()
                .map(|comment| decorate_one(comment, config, current_user))
                .collect();
            decorated.likers = article
                .likers
                .iter()
                .map(|liker| decorate_one(liker, config, current_user))
                .collect();
            decorated
        })
        .collect()
}

fn decorate_one<T>(entity: &T, config: &ViewConfig, current_user: Option<&User>) -> T
where
    T: Owned + Clone,
{
    let is_current_user = entity.owner_id() == Some(config.current_user_id);
    decorate_entity(entity, is_current_user, current_user, &config.avatar_base_url)
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{
            Id,
            article::{Article, Owned},
            state::State,
        },
        views::{
            DEFAULT_AVATAR_BASE_URL, ViewConfig,
            decorate::{build_decorated_articles, decorate_entity},
            tests::{alice, blog_state, byline, liker},
        },
    };

    fn owners<T: Owned>(entities: &[T]) -> Vec<Option<u64>> {
        entities
            .iter()
            .map(|entity| entity.owner_id().map(Id::get))
            .collect()
    }

    #[test]
    fn current_user_takes_session_profile() {
        let decorated =
            decorate_entity(&liker(1, "Stale name"), true, Some(&alice()), "https://a/");

        assert_eq!(decorated.byline.owner_id, Some(Id::new(1)));
        assert_eq!(decorated.byline.display_name.as_deref(), Some("Alice"));
        assert_eq!(
            decorated.byline.avatar_url.as_deref(),
            Some("https://example.com/alice.png")
        );
    }

    #[test]
    fn current_user_without_session_profile() {
        let decorated = decorate_entity(&liker(1, "Alice"), true, None, "https://a/");

        assert_eq!(decorated.byline.display_name, None);
        assert_eq!(decorated.byline.avatar_url, None);
    }

    #[test]
    fn other_users_get_generated_avatar() {
        let decorated = decorate_entity(&liker(2, "Bob"), false, Some(&alice()), "https://a/");

        assert_eq!(decorated.byline.display_name.as_deref(), Some("Bob"));
        assert_eq!(decorated.byline.avatar_url.as_deref(), Some("https://a/Bob"));

        let nameless = Article {
            byline: byline(5, None),
            ..Article::default()
        };
        let decorated = decorate_entity(&nameless, false, Some(&alice()), "https://a/");
        assert_eq!(decorated.byline.display_name, None);
        assert_eq!(decorated.byline.avatar_url.as_deref(), Some("https://a/"));
    }

    #[test]
    fn decorates_articles_comments_and_likers() {
        let state = blog_state();
        let decorated = build_decorated_articles(&state, &ViewConfig::default());

        assert_eq!(decorated.len(), 4);

        let first = &decorated[0];
        assert_eq!(first.byline.display_name.as_deref(), Some("Alice"));
        assert_eq!(
            first.byline.avatar_url.as_deref(),
            Some("https://example.com/alice.png")
        );
        assert_eq!(
            first.likers[0].byline.avatar_url,
            Some(format!("{DEFAULT_AVATAR_BASE_URL}Bob"))
        );

        let bob_comment = &decorated[2].comments[0];
        assert_eq!(bob_comment.byline.display_name.as_deref(), Some("Bob"));
        let alice_liker = &decorated[2].likers[0];
        assert_eq!(
            alice_liker.byline.avatar_url.as_deref(),
            Some("https://example.com/alice.png")
        );
    }

    #[test]
    fn snapshot_is_left_untouched() {
        let state = blog_state();
        let before = state.clone();

        let decorated = build_decorated_articles(&state, &ViewConfig::default());

        assert_ne!(decorated, *before.articles.as_ref().unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn decoration_keeps_identity_fields() {
        let state = blog_state();
        let config = ViewConfig::default();
        let once = build_decorated_articles(&state, &config);
        let twice = build_decorated_articles(
            &State {
                articles: Some(once.clone()),
                ..state.clone()
            },
            &config,
        );

        let raw_articles = state.articles.unwrap();
        for ((raw, once), twice) in raw_articles.iter().zip(&once).zip(&twice) {
            assert_eq!(raw.id, twice.id);
            assert_eq!(raw.owner_id(), twice.owner_id());
            assert_eq!(owners(&raw.comments), owners(&twice.comments));
            assert_eq!(owners(&raw.likers), owners(&twice.likers));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn custom_current_user_id() {
        let config = ViewConfig {
            current_user_id: Id::new(2),
            ..ViewConfig::default()
        };
        let decorated = build_decorated_articles(&blog_state(), &config);

        // Bob's articles now show the session profile, Alice's are treated as anyone else's.
        assert_eq!(decorated[1].byline.display_name.as_deref(), Some("Alice"));
        assert_eq!(decorated[0].byline.display_name, None);
        assert_eq!(
            decorated[0].byline.avatar_url,
            Some(DEFAULT_AVATAR_BASE_URL.to_owned())
        );
    }

    #[test]
    fn ownerless_records_belong_to_nobody() {
        let mut state = blog_state();
        if let Some(articles) = &mut state.articles {
            articles[0].likers[0].byline.owner_id = None;
        }
        let decorated = build_decorated_articles(&state, &ViewConfig::default());

        let liker = &decorated[0].likers[0];
        assert_eq!(liker.byline.owner_id, None);
        assert_eq!(liker.byline.display_name.as_deref(), Some("Bob"));
        assert_eq!(
            liker.byline.avatar_url,
            Some(format!("{DEFAULT_AVATAR_BASE_URL}Bob"))
        );
    }

    #[test]
    fn missing_article_list_decorates_to_nothing() {
        let state = State {
            articles: None,
            ..blog_state()
        };

        assert!(build_decorated_articles(&state, &ViewConfig::default()).is_empty());
    }
}

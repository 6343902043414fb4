//! Static route table of the blog client.
//!
//! Only the table itself lives here. Matching URLs and enforcing `auth` is up to whoever
//! consumes it.

use crate::model::{Id, article::ArticleMarker};
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub enum View {
    Register,
    Login,
    Home,
    EditUser,
    EditProfile,
    EditAvatar,
    EditPassword,
    /// Used both for writing a new article and for editing an existing one.
    ArticleEditor,
    ArticleContent,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteTarget {
    View(View),
    Redirect(&'static str),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct Route {
    /// Path pattern; `:name` segments are parameters and `*` matches anything.
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    /// Whether the route is only reachable when signed in.
    pub auth: bool,
    #[serde(skip_serializing_if = "has_no_children")]
    pub children: &'static [Route],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn has_no_children(children: &&'static [Route]) -> bool {
    children.is_empty()
}

const fn view(path: &'static str, name: &'static str, view: View, auth: bool) -> Route {
    Route {
        path,
        name: Some(name),
        target: RouteTarget::View(view),
        auth,
        children: &[],
    }
}

pub const REGISTER: Route = view("/auth/register", "Register", View::Register, false);
pub const LOGIN: Route = view("/auth/login", "Login", View::Login, false);
pub const HOME: Route = view("/", "Home", View::Home, false);
pub const ARTICLE_CREATE: Route = view("/articles/create", "Create", View::ArticleEditor, true);
pub const ARTICLE_CONTENT: Route = view(
    "/articles/:articleId/content",
    "Content",
    View::ArticleContent,
    false,
);
pub const ARTICLE_EDIT: Route = view("/articles/:articleId/edit", "Edit", View::ArticleEditor, true);

const FALLBACK: Route = Route {
    path: "*",
    name: None,
    target: RouteTarget::Redirect(HOME.path),
    auth: false,
    children: &[],
};

// The parent has a default child, so navigation targets the child's name instead.
const EDIT_USER: Route = Route {
    path: "/users/:userId/edit",
    name: None,
    target: RouteTarget::View(View::EditUser),
    auth: false,
    children: &[
        view("", "EditProfile", View::EditProfile, true),
        view(
            "/users/:userId/edit_avatar",
            "EditAvatar",
            View::EditAvatar,
            true,
        ),
        view(
            "/users/:userId/edit_password",
            "EditPassword",
            View::EditPassword,
            true,
        ),
    ],
};

pub static ROUTES: &[Route] = &[
    REGISTER,
    LOGIN,
    HOME,
    FALLBACK,
    EDIT_USER,
    ARTICLE_CREATE,
    ARTICLE_CONTENT,
    ARTICLE_EDIT,
];

/// Looks a named route up, including nested child routes.
#[must_use]
pub fn find_by_name(name: &str) -> Option<&'static Route> {
    fn find_in(routes: &'static [Route], name: &str) -> Option<&'static Route> {
        routes.iter().find_map(|route| {
            if route.name == Some(name) {
                Some(route)
            } else {
                find_in(route.children, name)
            }
        })
    }

    find_in(ROUTES, name)
}

impl Route {
    /// Fills the `:name` segments of the path from `params`. Segments without a value are
    /// left as they are.
    #[must_use]
    pub fn href(&self, params: &[(&str, &str)]) -> String {
        self.path
            .split('/')
            .map(|segment| {
                segment
                    .strip_prefix(':')
                    .and_then(|param| {
                        params
                            .iter()
                            .find(|(key, _)| *key == param)
                            .map(|(_, value)| *value)
                    })
                    .unwrap_or(segment)
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Path of the page showing an article, relative to the site origin.
#[must_use]
pub fn article_content_path(id: Id<ArticleMarker>) -> String {
    ARTICLE_CONTENT.href(&[("articleId", &id.to_string())])
}

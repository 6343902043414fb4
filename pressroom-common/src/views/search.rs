use crate::{model::article::Article, routes};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::{cmp::Reverse, convert::Infallible, ops::Range, str::FromStr};
use tracing::debug;

pub const HIGHLIGHT_OPEN: &str = r#"<span class="highlight">"#;
pub const HIGHLIGHT_CLOSE: &str = "</span>";
/// Number of content characters kept in a search result.
pub const CONTENT_PREVIEW_CHARS: usize = 100;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum SearchSort {
    /// Most liked first.
    Vote,
    /// Title matches first, earliest title match first, then content-only matches.
    #[default]
    Relevance,
}

impl SearchSort {
    /// Unknown names select relevance ordering.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "vote" => Self::Vote,
            _ => Self::Relevance,
        }
    }
}

impl FromStr for SearchSort {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// An article that matched a search, with its title and content preview highlighted.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(flatten)]
    pub article: Article,
}

#[derive(Clone, Debug)]
enum Matcher {
    Pattern(Regex),
    /// Lowercased keyword, for keywords too large to compile into a pattern.
    Lowercase(String),
}

/// Case-insensitive literal matcher for one keyword.
#[derive(Clone, Debug)]
pub struct Highlighter {
    matcher: Matcher,
}

impl Highlighter {
    /// Returns `None` for an empty keyword, which matches nothing.
    #[must_use]
    pub fn new(keyword: &str) -> Option<Self> {
        if keyword.is_empty() {
            return None;
        }

        let matcher = match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Matcher::Pattern(pattern),
            Err(err) => {
                debug!(%err, "Searching for lowercased keyword instead");
                Matcher::Lowercase(keyword.to_lowercase())
            }
        };
        Some(Self { matcher })
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.position(text).is_some()
    }

    /// Byte offset of the first match in `text`.
    #[must_use]
    pub fn position(&self, text: &str) -> Option<usize> {
        match &self.matcher {
            Matcher::Pattern(pattern) => pattern.find(text).map(|found| found.start()),
            Matcher::Lowercase(keyword) => lowercase_matches(text, keyword)
                .first()
                .map(|range| range.start),
        }
    }

    /// Wraps every match in highlight markup, keeping the matched text as written.
    #[must_use]
    pub fn highlight(&self, text: &str) -> String {
        let ranges: Vec<Range<usize>> = match &self.matcher {
            Matcher::Pattern(pattern) => {
                pattern.find_iter(text).map(|found| found.range()).collect()
            }
            Matcher::Lowercase(keyword) => lowercase_matches(text, keyword),
        };

        let mut highlighted = String::with_capacity(text.len());
        let mut end = 0;
        for range in ranges {
            highlighted.push_str(&text[end..range.start]);
            highlighted.push_str(HIGHLIGHT_OPEN);
            highlighted.push_str(&text[range.start..range.end]);
            highlighted.push_str(HIGHLIGHT_CLOSE);
            end = range.end;
        }
        highlighted.push_str(&text[end..]);
        highlighted
    }
}

/// Non-overlapping occurrences of the lowercase `keyword` in the lowercased `text`, as byte
/// ranges of `text` widened to whole characters.
fn lowercase_matches(text: &str, keyword: &str) -> Vec<Range<usize>> {
    let mut lowered = String::with_capacity(text.len());
    // Character of `text` that produced each byte of `lowered`.
    let mut sources: Vec<Range<usize>> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let source = start..start + c.len_utf8();
        for lower in c.to_lowercase() {
            lowered.push(lower);
            sources.resize(lowered.len(), source.clone());
        }
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (start, found) in lowered.match_indices(keyword) {
        let range = sources[start].start..sources[start + found.len() - 1].end;
        if ranges.last().is_none_or(|last| last.end <= range.start) {
            ranges.push(range);
        }
    }
    ranges
}

/// Articles whose title or content contains `keyword`, ignoring case.
///
/// Each result links to the article page under `base_url`. Its title is highlighted and its
/// content is cut to [`CONTENT_PREVIEW_CHARS`] characters before highlighting.
#[must_use]
pub fn search_articles(
    decorated: &[Article],
    keyword: &str,
    sort: SearchSort,
    base_url: &str,
) -> Vec<SearchResult> {
    let Some(highlighter) = Highlighter::new(keyword) else {
        return Vec::new();
    };

    let mut matches: Vec<(Option<usize>, SearchResult)> = decorated
        .iter()
        .filter(|article| {
            highlighter.is_match(&article.title) || highlighter.is_match(&article.content)
        })
        .map(|article| {
            let title_match = highlighter.position(&article.title);
            let preview: String = article.content.chars().take(CONTENT_PREVIEW_CHARS).collect();
            let result = SearchResult {
                url: format!("{base_url}{}", routes::article_content_path(article.id)),
                article: Article {
                    title: highlighter.highlight(&article.title),
                    content: highlighter.highlight(&preview),
                    ..article.clone()
                },
            };
            (title_match, result)
        })
        .collect();

    match sort {
        SearchSort::Vote => {
            matches.sort_by_key(|(_, result)| Reverse(result.article.liker_count()));
        }
        SearchSort::Relevance => {
            matches.sort_by_key(|(title_match, _)| (title_match.is_none(), *title_match));
        }
    }

    matches.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{Id, article::Article},
        views::{
            ViewConfig,
            decorate::build_decorated_articles,
            search::{
                CONTENT_PREVIEW_CHARS, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN, Highlighter, Matcher,
                SearchResult, SearchSort, lowercase_matches, search_articles,
            },
            tests::{blog_state, two_article_state},
        },
    };

    fn result_ids(results: &[SearchResult]) -> Vec<u64> {
        results.iter().map(|result| result.article.id.get()).collect()
    }

    fn decorated() -> Vec<Article> {
        build_decorated_articles(&blog_state(), &ViewConfig::default())
    }

    #[test]
    fn highlights_every_match_keeping_case() {
        let highlighter = Highlighter::new("rust").unwrap();

        assert_eq!(
            highlighter.highlight("Rust and rust and RUST"),
            format!(
                "{HIGHLIGHT_OPEN}Rust{HIGHLIGHT_CLOSE} and \
                {HIGHLIGHT_OPEN}rust{HIGHLIGHT_CLOSE} and \
                {HIGHLIGHT_OPEN}RUST{HIGHLIGHT_CLOSE}"
            )
        );
        assert_eq!(highlighter.highlight("nothing here"), "nothing here");
    }

    #[test]
    fn keyword_is_matched_literally() {
        let highlighter = Highlighter::new("a.b").unwrap();

        assert!(highlighter.is_match("see a.b here"));
        assert!(!highlighter.is_match("see axb here"));
        assert!(Highlighter::new("(").is_some());
    }

    #[test]
    fn lowercase_matches_map_back_to_text() {
        assert_eq!(lowercase_matches("Rust and RUST", "rust"), [0..4, 9..13]);
        assert_eq!(lowercase_matches("ÉCOLE école", "école"), [0..6, 7..13]);
        assert!(lowercase_matches("nothing here", "rust").is_empty());
    }

    #[test]
    fn lowercase_matcher_highlights_like_pattern() {
        let text = "Rust and rust and RUST";
        let lowercase = Highlighter {
            matcher: Matcher::Lowercase("rust".to_owned()),
        };

        assert_eq!(
            lowercase.highlight(text),
            Highlighter::new("rust").unwrap().highlight(text)
        );
        assert_eq!(lowercase.position("a RUST"), Some(2));
        assert!(!lowercase.is_match("no match"));
    }

    #[test]
    fn oversized_keyword_still_matches() {
        let keyword = "é".repeat(200_000);
        let title = keyword.to_uppercase();
        let articles = [Article {
            id: Id::new(1),
            title: title.clone(),
            ..Article::default()
        }];

        let results = search_articles(&articles, &keyword, SearchSort::Relevance, "");

        assert_eq!(result_ids(&results), [1]);
        assert_eq!(
            results[0].article.title,
            format!("{HIGHLIGHT_OPEN}{title}{HIGHLIGHT_CLOSE}")
        );
    }

    #[test]
    fn empty_keyword_finds_nothing() {
        assert!(Highlighter::new("").is_none());
        assert!(search_articles(&decorated(), "", SearchSort::Relevance, "https://x").is_empty());
    }

    #[test]
    fn search_without_articles() {
        assert!(search_articles(&[], "hello", SearchSort::Vote, "https://x").is_empty());
    }

    #[test]
    fn hello_scenario() {
        let articles = build_decorated_articles(&two_article_state(), &ViewConfig::default());
        let results = search_articles(&articles, "hello", SearchSort::Relevance, "https://x");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://x/articles/1/content");
        assert_eq!(
            results[0].article.title,
            r#"<span class="highlight">Hello</span> World"#
        );
    }

    #[test]
    fn results_keep_other_fields() {
        let articles = decorated();
        let results = search_articles(&articles, "borrow", SearchSort::Relevance, "https://x");

        assert_eq!(result_ids(&results), [4]);
        let original = &articles[3];
        let found = &results[0].article;
        assert_eq!(found.id, original.id);
        assert_eq!(found.byline, original.byline);
        assert_eq!(found.comments, original.comments);
        assert_eq!(found.likers, original.likers);
    }

    #[test]
    fn content_preview_is_cut_before_highlighting() {
        let mut articles = decorated();
        articles[0].content = format!("{}needle{}", "é".repeat(98), "x".repeat(50));

        let results = search_articles(&articles, "needle", SearchSort::Relevance, "");

        assert_eq!(result_ids(&results), [1]);
        let content = &results[0].article.content;
        assert_eq!(content, &format!("{}ne", "é".repeat(98)));
        assert!(content.chars().count() <= CONTENT_PREVIEW_CHARS);
    }

    #[test]
    fn relevance_puts_title_matches_first() {
        let results = search_articles(&decorated(), "own", SearchSort::Relevance, "");

        // "Own" opens the title of 3, article 2 only mentions it in its content.
        assert_eq!(result_ids(&results), [3, 2]);
    }

    #[test]
    fn vote_orders_results_by_likers() {
        let results = search_articles(&decorated(), "o", SearchSort::Vote, "");

        assert_eq!(result_ids(&results), [3, 1, 2, 4]);
        assert!(
            results
                .windows(2)
                .all(|pair| pair[0].article.liker_count() >= pair[1].article.liker_count())
        );
    }

    #[test]
    fn every_result_contains_keyword() {
        let articles = decorated();
        let keyword = "RUST";
        let results = search_articles(&articles, keyword, SearchSort::Relevance, "");

        assert!(!results.is_empty());
        for result in &results {
            let original = articles
                .iter()
                .find(|article| article.id == result.article.id)
                .unwrap();
            let haystack = format!("{} {}", original.title, original.content).to_lowercase();
            assert!(haystack.contains(&keyword.to_lowercase()));
        }
    }

    #[test]
    fn sort_names() {
        assert_eq!(SearchSort::from_name("vote"), SearchSort::Vote);
        assert_eq!(SearchSort::from_name("title"), SearchSort::Relevance);
        assert_eq!("".parse::<SearchSort>(), Ok(SearchSort::Relevance));
    }
}

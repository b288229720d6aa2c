//! Request path construction for the search and answers endpoints.
//!
//! Paths are relative to the API root configured on the transport adapter.
//! Construction is pure: defaults are applied from an explicit
//! [`QueryDefaults`] value and the caller's [`QuerySpecification`] is never
//! mutated.

use std::borrow::Cow;
use std::sync::Arc;

use url::form_urlencoded;

use super::QuerySpecification;

/// API version segment prefixed to every request path.
pub const API_VERSION_PATH: &str = "/2.2";
/// Response-shaping filter for search results: question fields plus owner.
pub const SEARCH_FILTER: &str = "!-MOdcb64tAbSDB630lrfCo5NzmAoAybzt";
/// Response-shaping filter for the answers endpoint: additionally surfaces
/// answer bodies and acceptance flags.
pub const ANSWERS_FILTER: &str = ")3so9SF-6Is5yiSumyL5a1r9-087in*H4yg-LXvJ6eI8PiyjAosj3iz)";

const DEFAULT_IN_TITLE: &str = "";
const DEFAULT_PAGE_SIZE: u32 = 5;
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_SITE: &str = "stackoverflow";
const TAG_SEPARATOR: &str = ";";

/// Fallback values applied to unset query fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefaults {
    in_title: String,
    page_size: u32,
    page: u32,
    site: Arc<str>,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            in_title: DEFAULT_IN_TITLE.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
            site: Arc::from(DEFAULT_SITE),
        }
    }
}

impl QueryDefaults {
    /// Build defaults with an explicit site and page size.
    ///
    /// A blank site or a zero page size keeps the built-in fallback.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackexchange_client::domain::QueryDefaults;
    ///
    /// let defaults = QueryDefaults::new("superuser", 10);
    /// assert_eq!(defaults.site().as_ref(), "superuser");
    /// assert_eq!(defaults.page_size(), 10);
    /// ```
    #[must_use]
    pub fn new(site: &str, page_size: u32) -> Self {
        let fallback = Self::default();
        let trimmed = site.trim();
        Self {
            site: if trimmed.is_empty() {
                fallback.site
            } else {
                Arc::from(trimmed)
            },
            page_size: if page_size == 0 {
                fallback.page_size
            } else {
                page_size
            },
            ..fallback
        }
    }

    /// Shared handle onto the default site name.
    #[must_use]
    pub const fn site(&self) -> &Arc<str> {
        &self.site
    }

    /// Default results per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Apply defaults to every unset field of `spec`.
    #[must_use]
    pub fn resolve(&self, spec: &QuerySpecification) -> ResolvedQuery {
        let site = match spec.site.as_deref().map(str::trim) {
            Some(site) if !site.is_empty() && site != self.site.as_ref() => Arc::from(site),
            _ => Arc::clone(&self.site),
        };
        ResolvedQuery {
            in_title: spec
                .in_title
                .clone()
                .unwrap_or_else(|| self.in_title.clone()),
            page_size: non_zero_or(spec.page_size, self.page_size),
            page: non_zero_or(spec.page, self.page),
            tags: spec.tags.clone(),
            site,
        }
    }

    /// Return `site` when set, otherwise the default site handle.
    #[must_use]
    pub fn site_or_default(&self, site: Option<&Arc<str>>) -> Arc<str> {
        site.filter(|site| !site.trim().is_empty())
            .map_or_else(|| Arc::clone(&self.site), Arc::clone)
    }
}

const fn non_zero_or(value: u32, fallback: u32) -> u32 {
    if value == 0 { fallback } else { value }
}

/// A query with every field defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// Title substring filter; may be empty.
    pub in_title: String,
    /// Results per page.
    pub page_size: u32,
    /// One-based page number.
    pub page: u32,
    /// Required tags.
    pub tags: Vec<String>,
    /// Site to search.
    pub site: Arc<str>,
}

/// Ordered path segments whose total length is known before allocation.
#[derive(Debug, Default)]
struct PathSegments<'a> {
    segments: Vec<Cow<'a, str>>,
}

impl<'a> PathSegments<'a> {
    fn literal(mut self, text: &'static str) -> Self {
        self.segments.push(Cow::Borrowed(text));
        self
    }

    fn number(mut self, value: impl ToString) -> Self {
        self.segments.push(Cow::Owned(value.to_string()));
        self
    }

    fn encoded(mut self, value: &'a str) -> Self {
        self.segments.push(encode_component(value));
        self
    }

    fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.len()).sum()
    }

    fn build(self) -> String {
        let mut path = String::with_capacity(self.len());
        for segment in &self.segments {
            path.push_str(segment);
        }
        path
    }
}

fn encode_component(value: &str) -> Cow<'_, str> {
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    if encoded == value {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(encoded)
    }
}

fn search_segments(query: &ResolvedQuery) -> PathSegments<'_> {
    let mut segments = PathSegments::default()
        .literal(API_VERSION_PATH)
        .literal("/search?page=")
        .number(query.page)
        .literal("&pagesize=")
        .number(query.page_size)
        .literal("&order=desc&sort=votes&intitle=")
        .encoded(&query.in_title)
        .literal("&site=")
        .encoded(&query.site)
        .literal("&filter=")
        .literal(SEARCH_FILTER)
        .literal("&tagged=");
    for tag in &query.tags {
        segments = segments.encoded(tag).literal(TAG_SEPARATOR);
    }
    segments
}

fn answers_segments(post_id: u64, site: &str) -> PathSegments<'_> {
    PathSegments::default()
        .literal(API_VERSION_PATH)
        .literal("/questions/")
        .number(post_id)
        .literal("?order=desc&sort=votes&site=")
        .encoded(site)
        .literal("&filter=")
        .literal(ANSWERS_FILTER)
}

/// Build the search endpoint path for a resolved query.
///
/// Every tag is followed by a `;` separator, so an empty tag set leaves the
/// `tagged=` parameter empty.
///
/// # Examples
///
/// ```
/// use stackexchange_client::domain::{QueryDefaults, QuerySpecification, build_search_path};
///
/// let mut spec = QuerySpecification {
///     in_title: Some("makefile".to_owned()),
///     ..QuerySpecification::default()
/// };
/// spec.add_tag("gcc");
/// let path = build_search_path(&QueryDefaults::default().resolve(&spec));
/// assert!(path.starts_with("/2.2/search?page=1&pagesize=5&order=desc&sort=votes&intitle=makefile"));
/// assert!(path.ends_with("&tagged=gcc;"));
/// ```
#[must_use]
pub fn build_search_path(query: &ResolvedQuery) -> String {
    search_segments(query).build()
}

/// Exact byte length of [`build_search_path`] for `query`.
#[must_use]
pub fn search_path_len(query: &ResolvedQuery) -> usize {
    search_segments(query).len()
}

/// Build the answers endpoint path for one question.
///
/// # Examples
///
/// ```
/// use stackexchange_client::domain::build_answers_path;
///
/// let path = build_answers_path(42, "stackoverflow");
/// assert!(path.starts_with("/2.2/questions/42?order=desc&sort=votes&site=stackoverflow&filter="));
/// ```
#[must_use]
pub fn build_answers_path(post_id: u64, site: &str) -> String {
    answers_segments(post_id, site).build()
}

/// Exact byte length of [`build_answers_path`].
#[must_use]
pub fn answers_path_len(post_id: u64, site: &str) -> usize {
    answers_segments(post_id, site).len()
}

//! Domain model and orchestration for StackExchange searches.
//!
//! Purpose: Define the question graph returned by searches, the pure path
//! and hydration logic that produces it, and the service that drives both
//! through the [`ports::HttpTransport`] port. Nothing here performs I/O
//! directly.
//!
//! Public surface:
//! - [`Question`], [`Answer`], [`Post`], [`User`]: the hydrated graph.
//! - [`SearchResultSet`]: ordered owner of a search's questions.
//! - [`QuerySpecification`] and [`QueryDefaults`]: caller intent and the
//!   fallbacks applied to it.
//! - [`StackSearchService`]: search and answer enrichment.
//! - [`release_question`] and [`SearchResultSet::release`]: teardown.

pub mod error;
pub mod hydrate;
pub mod lifecycle;
pub mod model;
pub mod ports;
pub mod query;
pub mod search_service;

pub use self::error::SearchError;
pub use self::hydrate::{
    AnswerFields, PostFields, QuestionFields, UserFields, hydrate_answer, hydrate_post,
    hydrate_question, hydrate_user, merge_answer, merge_post, merge_question, merge_user,
};
pub use self::lifecycle::{ReleaseSummary, release_question};
pub use self::model::{Answer, Post, QuerySpecification, Question, SearchResultSet, User};
pub use self::query::{
    ANSWERS_FILTER, API_VERSION_PATH, QueryDefaults, ResolvedQuery, SEARCH_FILTER,
    answers_path_len, build_answers_path, build_search_path, search_path_len,
};
pub use self::search_service::StackSearchService;

//! Hydration of API JSON items into the question graph.
//!
//! Hydration runs in two steps. [`fields`] reads whatever the payload carries
//! into `*Fields` values, skipping absent or mistyped keys. [`merge`] then
//! folds those values into an entity, allocating a zeroed one when the caller
//! has none. Hydration never fails: it fills in as much as the payload allows.

mod fields;
mod merge;

use serde_json::Value;

use crate::domain::{Answer, Post, Question, User};

pub use fields::{AnswerFields, PostFields, QuestionFields, UserFields};
pub use merge::{merge_answer, merge_post, merge_question, merge_user};

/// Hydrate a user from an `owner` object into `existing` or a fresh user.
#[must_use]
pub fn hydrate_user(value: &Value, existing: Option<User>) -> User {
    let fields = value
        .as_object()
        .map(UserFields::from_json)
        .unwrap_or_default();
    merge_user(existing.unwrap_or_default(), fields)
}

/// Hydrate a post (and its owner) from a question or answer object.
#[must_use]
pub fn hydrate_post(value: &Value, existing: Option<Post>) -> Post {
    let fields = value
        .as_object()
        .map(PostFields::from_json)
        .unwrap_or_default();
    merge_post(existing.unwrap_or_default(), fields)
}

/// Hydrate an answer from an answer object.
#[must_use]
pub fn hydrate_answer(value: &Value, existing: Option<Answer>) -> Answer {
    let fields = value
        .as_object()
        .map(AnswerFields::from_json)
        .unwrap_or_default();
    merge_answer(existing.unwrap_or_default(), fields)
}

/// Hydrate a question, its post, owner, answers, and tags from one item.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stackexchange_client::domain::hydrate_question;
///
/// let question = hydrate_question(&json!({ "question_id": 5, "tags": ["c"] }), None);
/// assert_eq!(question.post.post_id, 5);
/// assert_eq!(question.tags, vec!["c".to_owned()]);
/// ```
#[must_use]
pub fn hydrate_question(value: &Value, existing: Option<Question>) -> Question {
    merge_question(existing.unwrap_or_default(), QuestionFields::from_json(value))
}

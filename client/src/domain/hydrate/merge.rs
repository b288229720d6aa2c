//! Merge rules applied when extracted fields land on an existing entity.
//!
//! - scalars are overwritten whenever the incoming payload carries them
//! - strings are written only while the current value is unset or empty
//! - the answer list keeps the length it was first declared with and merges
//!   index by index
//! - the tag list is replaced wholesale

use super::fields::{AnswerFields, PostFields, QuestionFields, UserFields};
use crate::domain::{Answer, Post, Question, User};

/// Merge `incoming` into `existing`, returning the updated user.
#[must_use]
pub fn merge_user(mut existing: User, incoming: UserFields) -> User {
    overwrite(&mut existing.reputation, incoming.reputation);
    overwrite(&mut existing.user_id, incoming.user_id);
    fill_if_empty(&mut existing.display_name, incoming.display_name);
    existing
}

/// Merge `incoming` into `existing`, returning the updated post.
#[must_use]
pub fn merge_post(mut existing: Post, incoming: PostFields) -> Post {
    if let Some(owner) = incoming.owner {
        existing.owner = Some(merge_user(existing.owner.unwrap_or_default(), owner));
    }
    fill_if_empty(&mut existing.body, incoming.body);
    overwrite(&mut existing.post_id, incoming.post_id);
    overwrite(&mut existing.score, incoming.score);
    existing
}

/// Merge `incoming` into `existing`, returning the updated answer.
#[must_use]
pub fn merge_answer(mut existing: Answer, incoming: AnswerFields) -> Answer {
    existing.post = merge_post(existing.post, incoming.post);
    overwrite(&mut existing.is_accepted, incoming.is_accepted);
    existing
}

/// Merge `incoming` into `existing`, returning the updated question.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stackexchange_client::domain::{Question, QuestionFields, merge_question};
///
/// let first = merge_question(
///     Question::default(),
///     QuestionFields::from_json(&json!({ "title": "Foo", "question_id": 1 })),
/// );
/// let second = merge_question(
///     first,
///     QuestionFields::from_json(&json!({ "title": "Bar", "answers": [{ "answer_id": 2 }] })),
/// );
/// assert_eq!(second.title.as_deref(), Some("Foo"));
/// assert_eq!(second.answer_count(), 1);
/// ```
#[must_use]
pub fn merge_question(mut existing: Question, incoming: QuestionFields) -> Question {
    existing.post = merge_post(existing.post, incoming.post);
    fill_if_empty(&mut existing.title, incoming.title);
    fill_if_empty(&mut existing.link, incoming.link);
    if let Some(answers) = incoming.answers {
        existing.answers = Some(merge_answers(existing.answers.take(), answers));
    }
    overwrite(&mut existing.is_answered, incoming.is_answered);
    overwrite(&mut existing.view_count, incoming.view_count);
    if let Some(tags) = incoming.tags {
        existing.tags = tags;
    }
    link_answers(&mut existing);
    existing
}

fn merge_answers(
    existing: Option<Vec<Option<Answer>>>,
    incoming: Vec<Option<AnswerFields>>,
) -> Vec<Option<Answer>> {
    let Some(slots) = existing else {
        return incoming
            .into_iter()
            .map(|fields| fields.map(|fields| merge_answer(Answer::default(), fields)))
            .collect();
    };

    // The declared length wins; surplus incoming answers are dropped and
    // missing ones leave their slots as they were.
    let mut incoming = incoming.into_iter();
    slots
        .into_iter()
        .map(|slot| match incoming.next().flatten() {
            Some(fields) => Some(merge_answer(slot.unwrap_or_default(), fields)),
            None => slot,
        })
        .collect()
}

fn link_answers(question: &mut Question) {
    let question_id = question.post.post_id;
    if question_id == 0 {
        return;
    }
    for answer in question.answers.iter_mut().flatten().flatten() {
        answer.question_id = Some(question_id);
    }
}

fn overwrite<T>(target: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *target = value;
    }
}

fn fill_if_empty(target: &mut Option<String>, incoming: Option<String>) {
    if target.as_deref().is_some_and(|current| !current.is_empty()) {
        return;
    }
    if let Some(value) = incoming {
        *target = Some(value);
    }
}

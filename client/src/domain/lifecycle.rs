//! Teardown of question graphs.
//!
//! Every node is owned by exactly one parent, so releasing consumes the graph
//! by value and drops children before the node that held them. The site name
//! is a shared handle; releasing a question only gives up its reference.

use std::ops::AddAssign;

use tracing::trace;

use super::{Answer, Post, Question, SearchResultSet};

/// Counts of nodes released by one teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Questions released.
    pub questions: usize,
    /// Posts released, one per question and per hydrated answer.
    pub posts: usize,
    /// Users released.
    pub users: usize,
    /// Answers released.
    pub answers: usize,
    /// Tag strings released.
    pub tags: usize,
}

impl AddAssign for ReleaseSummary {
    fn add_assign(&mut self, other: Self) {
        self.questions += other.questions;
        self.posts += other.posts;
        self.users += other.users;
        self.answers += other.answers;
        self.tags += other.tags;
    }
}

fn release_post(post: Post) -> ReleaseSummary {
    let Post { owner, body, .. } = post;
    let users = usize::from(owner.is_some());
    drop(owner);
    drop(body);
    ReleaseSummary {
        posts: 1,
        users,
        ..ReleaseSummary::default()
    }
}

fn release_answer(answer: Answer) -> ReleaseSummary {
    let mut summary = release_post(answer.post);
    summary.answers = 1;
    summary
}

/// Release a question and everything it owns.
///
/// # Examples
///
/// ```
/// use stackexchange_client::domain::{Question, release_question};
///
/// let question = Question {
///     tags: vec!["c".to_owned()],
///     ..Question::default()
/// };
/// let summary = release_question(question);
/// assert_eq!(summary.posts, 1);
/// assert_eq!(summary.tags, 1);
/// ```
pub fn release_question(question: Question) -> ReleaseSummary {
    let Question {
        post,
        answers,
        tags,
        site,
        title,
        link,
        ..
    } = question;
    let post_id = post.post_id;

    let mut summary = release_post(post);
    for answer in answers.into_iter().flatten().flatten() {
        summary += release_answer(answer);
    }
    summary.tags = tags.len();
    drop(tags);
    drop(title);
    drop(link);
    // Only the handle goes; the site string stays with the query defaults.
    drop(site);
    summary.questions = 1;

    trace!(
        post_id,
        answers = summary.answers,
        tags = summary.tags,
        "released question"
    );
    summary
}

impl SearchResultSet {
    /// Release every question in the set, then the set itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackexchange_client::domain::{Question, SearchResultSet};
    ///
    /// let set = SearchResultSet::new(vec![Question::default(), Question::default()]);
    /// assert_eq!(set.release().questions, 2);
    /// ```
    pub fn release(self) -> ReleaseSummary {
        let mut summary = ReleaseSummary::default();
        for question in self.into_questions() {
            summary += release_question(question);
        }
        summary
    }
}

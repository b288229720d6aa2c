//! Question graph entities hydrated from search and answer payloads.
//!
//! Ownership follows the shape of the graph: a question owns its post, its
//! answers, and its tags; every post owns its user. The only shared value is
//! the site name, which is a handle onto the configured defaults and outlives
//! any single question.

use std::sync::Arc;

/// Author of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Reputation score; may be negative on some sites.
    pub reputation: i32,
    /// Site-local account identifier.
    pub user_id: u64,
    /// Public display name, if the payload carried one.
    pub display_name: Option<String>,
}

/// Data shared by questions and answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    /// Markdown body.
    pub body: Option<String>,
    /// Post author, exclusively owned by this post.
    pub owner: Option<User>,
    /// Post identifier; zero until a payload supplies one.
    pub post_id: u64,
    /// Net vote score.
    pub score: i32,
}

/// One answer to a question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    /// Answer body and author.
    pub post: Post,
    /// Identifier of the question this answer belongs to.
    ///
    /// This is a lookup key only; the question owns the answer, never the
    /// other way round.
    pub question_id: Option<u64>,
    /// Whether the asker accepted this answer.
    pub is_accepted: bool,
}

/// A question together with whatever answers have been fetched for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question {
    /// Question body and author.
    pub post: Post,
    /// Question title.
    pub title: Option<String>,
    /// Canonical link to the question page.
    pub link: Option<String>,
    /// Answer slots in API response order.
    ///
    /// `None` means no payload has declared an answer list yet. Once
    /// declared, the number of slots never changes; a slot is `None` until
    /// an answer object is hydrated into it.
    pub answers: Option<Vec<Option<Answer>>>,
    /// Whether the question has an upvoted or accepted answer.
    pub is_answered: bool,
    /// Number of page views.
    pub view_count: u32,
    /// Tags in API response order.
    pub tags: Vec<String>,
    /// Site the question was fetched from, shared with the query defaults.
    pub site: Option<Arc<str>>,
}

impl Question {
    /// Number of declared answer slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackexchange_client::domain::Question;
    ///
    /// let question = Question::default();
    /// assert_eq!(question.answer_count(), 0);
    /// ```
    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.answers.as_ref().map_or(0, Vec::len)
    }

    /// Iterate over the hydrated answers, skipping empty slots.
    pub fn hydrated_answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().flatten().flatten()
    }

    /// The accepted answer, if one has been fetched.
    #[must_use]
    pub fn accepted_answer(&self) -> Option<&Answer> {
        self.hydrated_answers().find(|answer| answer.is_accepted)
    }
}

/// Questions returned by one search call, in API relevance order.
///
/// The result set is the sole owner of its questions. Take them out with
/// [`SearchResultSet::into_questions`] or tear the whole set down with
/// [`SearchResultSet::release`]; either consumes the set, so a question can
/// never be released twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultSet {
    questions: Vec<Question>,
}

impl SearchResultSet {
    /// Wrap an ordered list of questions.
    #[must_use]
    pub const fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Number of questions in the set.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Borrow the questions in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Mutably borrow the questions, e.g. to enrich them in place.
    pub fn questions_mut(&mut self) -> &mut [Question] {
        &mut self.questions
    }

    /// Transfer ownership of the questions to the caller.
    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

impl IntoIterator for SearchResultSet {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.into_iter()
    }
}

/// Caller-supplied search filters. Unset fields are defaulted by
/// [`QueryDefaults`](super::QueryDefaults).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpecification {
    /// Substring that must appear in the question title.
    pub in_title: Option<String>,
    /// Results per page; `0` selects the default.
    pub page_size: u32,
    /// One-based page number; `0` selects the default.
    pub page: u32,
    /// Tags every result must carry.
    pub tags: Vec<String>,
    /// Site to search, e.g. `stackoverflow`.
    pub site: Option<String>,
}

impl QuerySpecification {
    /// Require results to carry `tag`.
    ///
    /// Blank tags are ignored and a tag already present is not added twice.
    /// Returns whether the tag set changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackexchange_client::domain::QuerySpecification;
    ///
    /// let mut query = QuerySpecification::default();
    /// assert!(query.add_tag("gcc"));
    /// assert!(!query.add_tag("gcc"));
    /// assert_eq!(query.tags, vec!["gcc".to_owned()]);
    /// ```
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|existing| existing == trimmed) {
            return false;
        }
        self.tags.push(trimmed.to_owned());
        true
    }
}

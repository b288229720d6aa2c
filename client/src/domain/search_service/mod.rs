//! Search and answer-enrichment orchestration.
//!
//! One request is issued per call and awaited before the call returns; the
//! service holds no state between calls beyond its transport and defaults.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::ports::{HttpResponse, HttpTransport};
use super::{
    Question, QueryDefaults, QuestionFields, QuerySpecification, SearchError, SearchResultSet,
    build_answers_path, build_search_path, hydrate_question, merge_question,
};

/// Issues searches and answer fetches through an [`HttpTransport`].
pub struct StackSearchService {
    transport: Arc<dyn HttpTransport>,
    defaults: QueryDefaults,
}

impl StackSearchService {
    /// Build a service over `transport` using `defaults` for unset fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use stackexchange_client::domain::ports::FixtureHttpTransport;
    /// use stackexchange_client::domain::{QueryDefaults, StackSearchService};
    ///
    /// let service = StackSearchService::new(Arc::new(FixtureHttpTransport), QueryDefaults::default());
    /// assert_eq!(service.defaults().page_size(), 5);
    /// ```
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, defaults: QueryDefaults) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    /// Defaults applied to unset query fields.
    #[must_use]
    pub const fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    /// Run one search and hydrate a fresh question per result item.
    ///
    /// Questions keep the API's order and share the resolved site handle.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when the request fails, the API answers with
    /// a non-success status, the body is not JSON, or the body has no
    /// `items` array. No partial result set is ever returned.
    pub async fn search(&self, spec: &QuerySpecification) -> Result<SearchResultSet, SearchError> {
        let query = self.defaults.resolve(spec);
        let path = build_search_path(&query);
        debug!(path = %path, "issuing search request");

        let root = self.fetch_json(&path).await?;
        let items = items_array(&root)?;
        let questions = items
            .iter()
            .map(|item| Question {
                site: Some(Arc::clone(&query.site)),
                ..hydrate_question(item, None)
            })
            .collect::<Vec<_>>();

        debug!(count = questions.len(), site = %query.site, "search hydrated");
        Ok(SearchResultSet::new(questions))
    }

    /// Fetch the answers payload for `question` and extract its fields.
    ///
    /// Only the first item is used; it describes the same question.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingPostId`] when the question has no
    /// identifier, [`SearchError::MissingItems`] when `items` is absent or
    /// empty, and the same errors as [`Self::search`] otherwise.
    pub async fn fetch_answers(&self, question: &Question) -> Result<QuestionFields, SearchError> {
        let post_id = question.post.post_id;
        if post_id == 0 {
            return Err(SearchError::MissingPostId);
        }
        let site = self.defaults.site_or_default(question.site.as_ref());
        let path = build_answers_path(post_id, &site);
        debug!(post_id, path = %path, "issuing answers request");

        let root = self.fetch_json(&path).await?;
        let first = items_array(&root)?
            .first()
            .ok_or(SearchError::MissingItems)?;
        Ok(QuestionFields::from_json(first))
    }

    /// Merge the question's answers into it.
    ///
    /// The question's site is defaulted when unset. Any failure leaves the
    /// rest of the question as it was; the cause is logged, not returned.
    pub async fn fill_answers(&self, mut question: Question) -> Question {
        if question.site.is_none() {
            question.site = Some(Arc::clone(self.defaults.site()));
        }
        match self.fetch_answers(&question).await {
            Ok(fields) => {
                let merged = merge_question(question, fields);
                debug!(
                    post_id = merged.post.post_id,
                    answers = merged.answer_count(),
                    "answers merged"
                );
                merged
            }
            Err(error) => {
                warn!(post_id = question.post.post_id, error = %error, "answers fetch skipped");
                question
            }
        }
    }

    async fn fetch_json(&self, path: &str) -> Result<Value, SearchError> {
        let response = self.transport.get(path).await.map_err(|error| {
            warn!(kind = error.kind(), error = %error, "api transport failed");
            SearchError::from(error)
        })?;
        if !response.is_success() {
            warn!(status = response.status, "api returned non-success status");
            return Err(status_error(&response));
        }
        debug!(bytes = response.length(), "api response received");
        serde_json::from_slice(&response.body).map_err(|error| SearchError::Decode {
            message: error.to_string(),
        })
    }
}

fn items_array(root: &Value) -> Result<&Vec<Value>, SearchError> {
    root.get("items")
        .and_then(Value::as_array)
        .ok_or(SearchError::MissingItems)
}

fn status_error(response: &HttpResponse) -> SearchError {
    SearchError::Status {
        status: response.status,
        message: body_preview(&response.body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

//! Behaviour-driven tests for the search-then-enrich flow.
//!
//! A scripted transport replays canned API responses in order so each
//! scenario exercises the real service, hydrator, and lifecycle code.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};
use stackexchange_client::domain::ports::{HttpResponse, HttpTransport, TransportError};
use stackexchange_client::domain::{
    QueryDefaults, QuerySpecification, ReleaseSummary, SearchError, SearchResultSet,
    StackSearchService,
};
use tokio::runtime::{Builder, Runtime};

#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

type ScriptedResponse = Result<HttpResponse, TransportError>;

/// Transport that replays queued responses and records request paths.
#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests mutex").clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, path_and_query: &str) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests mutex")
            .push(path_and_query.to_owned());
        self.responses
            .lock()
            .expect("responses mutex")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::transport("no scripted response left")))
    }
}

fn ok_json(body: &Value) -> ScriptedResponse {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string().into_bytes(),
    })
}

fn one_search_result() -> ScriptedResponse {
    ok_json(&json!({
        "items": [{
            "question_id": 77,
            "title": "Foo",
            "tags": ["makefile"],
            "owner": { "user_id": 5, "reputation": 10, "display_name": "Jane" }
        }]
    }))
}

fn answers_payload() -> ScriptedResponse {
    ok_json(&json!({
        "items": [{
            "question_id": 77,
            "title": "Bar",
            "tags": ["gcc", "c"],
            "answers": [{
                "answer_id": 900,
                "is_accepted": true,
                "score": 4,
                "owner": { "display_name": "Ann" }
            }]
        }]
    }))
}

#[derive(Default, ScenarioState)]
struct SearchEnrichmentWorld {
    runtime: Slot<RuntimeHandle>,
    transport: Slot<Arc<ScriptedTransport>>,
    service: Slot<Arc<StackSearchService>>,
    search_result: Slot<Result<SearchResultSet, SearchError>>,
    summary: Slot<ReleaseSummary>,
}

impl SearchEnrichmentWorld {
    fn script(&self, responses: Vec<ScriptedResponse>) {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("create runtime");
        let transport = Arc::new(ScriptedTransport::new(responses));
        let port: Arc<dyn HttpTransport> = transport.clone();
        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.transport.set(transport);
        self.service.set(Arc::new(StackSearchService::new(
            port,
            QueryDefaults::default(),
        )));
    }

    fn runtime(&self) -> Arc<Runtime> {
        self.runtime.get().expect("runtime should be set").0
    }

    fn service(&self) -> Arc<StackSearchService> {
        self.service.get().expect("service should be set")
    }

    fn results(&self) -> SearchResultSet {
        self.search_result
            .get()
            .expect("search should have run")
            .expect("search should succeed")
    }
}

#[fixture]
fn world() -> SearchEnrichmentWorld {
    SearchEnrichmentWorld::default()
}

#[given("a scripted API returning three search results")]
fn a_scripted_api_returning_three_search_results(world: &SearchEnrichmentWorld) {
    world.script(vec![ok_json(&json!({
        "items": [
            { "question_id": 1, "title": "first" },
            { "question_id": 2, "title": "second" },
            { "question_id": 3, "title": "third" }
        ]
    }))]);
}

#[given("a scripted API returning one search result and its answers")]
fn a_scripted_api_returning_one_search_result_and_its_answers(world: &SearchEnrichmentWorld) {
    world.script(vec![one_search_result(), answers_payload()]);
}

#[given("a scripted API returning one search result and a failing answers request")]
fn a_scripted_api_returning_one_search_result_and_a_failing_answers_request(
    world: &SearchEnrichmentWorld,
) {
    world.script(vec![
        one_search_result(),
        Err(TransportError::timeout("answers request elapsed")),
    ]);
}

#[given("a scripted API that rejects the search with status {status}")]
fn a_scripted_api_that_rejects_the_search_with_status(world: &SearchEnrichmentWorld, status: u16) {
    world.script(vec![Ok(HttpResponse {
        status,
        body: br#"{"error_name":"temporarily_unavailable"}"#.to_vec(),
    })]);
}

#[when("the client searches titles containing {title}")]
fn the_client_searches_titles_containing(world: &SearchEnrichmentWorld, title: String) {
    let mut spec = QuerySpecification {
        in_title: Some(title),
        ..QuerySpecification::default()
    };
    spec.add_tag("gcc");
    spec.add_tag("c");

    let service = world.service();
    let result = world.runtime().block_on(service.search(&spec));
    world.search_result.set(result);
}

#[when("the client fills answers for the first question")]
fn the_client_fills_answers_for_the_first_question(world: &SearchEnrichmentWorld) {
    let mut questions = world.results().into_questions();
    assert!(!questions.is_empty(), "search should return a question");
    let first = questions.remove(0);

    let service = world.service();
    let filled = world.runtime().block_on(service.fill_answers(first));
    questions.insert(0, filled);
    world.search_result.set(Ok(SearchResultSet::new(questions)));
}

#[when("the result set is released")]
fn the_result_set_is_released(world: &SearchEnrichmentWorld) {
    world.summary.set(world.results().release());
}

#[then("the result set holds {count} questions")]
fn the_result_set_holds_questions(world: &SearchEnrichmentWorld, count: usize) {
    assert_eq!(world.results().question_count(), count);
}

#[then("the questions keep the API order")]
fn the_questions_keep_the_api_order(world: &SearchEnrichmentWorld) {
    let titles = world
        .results()
        .into_iter()
        .map(|question| question.title.unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[then("every question belongs to the {site} site")]
fn every_question_belongs_to_the_site(world: &SearchEnrichmentWorld, site: String) {
    assert!(
        world
            .results()
            .questions()
            .iter()
            .all(|question| question.site.as_deref() == Some(site.as_str())),
        "every question should carry the resolved site"
    );
}

#[then("the search request was tagged gcc;c;")]
fn the_search_request_was_tagged(world: &SearchEnrichmentWorld) {
    let requests = world
        .transport
        .get()
        .expect("transport should be set")
        .requests();
    let search = requests.first().expect("a search request");
    assert!(search.starts_with("/2.2/search?page=1&pagesize=5"));
    assert!(search.ends_with("&tagged=gcc;c;"));
}

#[then("the first question keeps the title {title}")]
fn the_first_question_keeps_the_title(world: &SearchEnrichmentWorld, title: String) {
    let results = world.results();
    let first = results.questions().first().expect("a question");
    assert_eq!(first.title.as_deref(), Some(title.as_str()));
    assert_eq!(
        first
            .post
            .owner
            .as_ref()
            .and_then(|owner| owner.display_name.as_deref()),
        Some("Jane")
    );
}

#[then("the first question has {count} hydrated answers")]
fn the_first_question_has_hydrated_answers(world: &SearchEnrichmentWorld, count: usize) {
    let results = world.results();
    let first = results.questions().first().expect("a question");
    assert_eq!(first.hydrated_answers().count(), count);
    for answer in first.hydrated_answers() {
        assert_eq!(answer.question_id, Some(first.post.post_id));
    }
}

#[then("the first question's tags are replaced by the answers payload")]
fn the_first_questions_tags_are_replaced(world: &SearchEnrichmentWorld) {
    let results = world.results();
    let first = results.questions().first().expect("a question");
    assert_eq!(first.tags, vec!["gcc".to_owned(), "c".to_owned()]);
}

#[then("the search fails with status {status}")]
fn the_search_fails_with_status(world: &SearchEnrichmentWorld, status: u16) {
    let result = world.search_result.get().expect("search should have run");
    match result {
        Err(SearchError::Status { status: actual, .. }) => assert_eq!(actual, status),
        other => panic!("expected a status failure, got {other:?}"),
    }
}

#[then("the release summary counts {questions} questions and {answers} answers")]
fn the_release_summary_counts(world: &SearchEnrichmentWorld, questions: usize, answers: usize) {
    let summary = world.summary.get().expect("results should be released");
    assert_eq!(summary.questions, questions);
    assert_eq!(summary.answers, answers);
    assert_eq!(summary.posts, questions + answers);
}

#[scenario(
    path = "tests/features/search_enrichment.feature",
    name = "Search hydrates every result in order"
)]
fn search_hydrates_every_result_in_order(world: SearchEnrichmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_enrichment.feature",
    name = "Answer enrichment preserves hydrated strings"
)]
fn answer_enrichment_preserves_hydrated_strings(world: SearchEnrichmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_enrichment.feature",
    name = "A rejected search yields no result set"
)]
fn a_rejected_search_yields_no_result_set(world: SearchEnrichmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_enrichment.feature",
    name = "A failed answers fetch leaves the question unchanged"
)]
fn a_failed_answers_fetch_leaves_the_question_unchanged(world: SearchEnrichmentWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_enrichment.feature",
    name = "Releasing results accounts for every node"
)]
fn releasing_results_accounts_for_every_node(world: SearchEnrichmentWorld) {
    drop(world);
}

//! Search a StackExchange site and print each result's title and author.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use stackexchange_client::config::ClientSettings;
use stackexchange_client::domain::{
    QuerySpecification, Question, SearchResultSet, StackSearchService,
};
use stackexchange_client::outbound::stackexchange::ReqwestTransport;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `stack-search` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stack-search",
    about = "Search a StackExchange site and print matching question titles",
    version
)]
struct CliArgs {
    /// Text that must appear in question titles.
    #[arg(long = "in-title", value_name = "text")]
    in_title: Option<String>,
    /// Tag every result must carry; repeat for several tags.
    #[arg(long = "tag", value_name = "tag")]
    tags: Vec<String>,
    /// One-based result page.
    #[arg(long = "page", value_name = "n", default_value_t = 0)]
    page: u32,
    /// Results per page. Zero uses the configured default.
    #[arg(long = "page-size", value_name = "n", default_value_t = 0)]
    page_size: u32,
    /// Site to search. Falls back to the configured default site.
    #[arg(long = "site", value_name = "site")]
    site: Option<String>,
    /// Fetch and print answers for every result.
    #[arg(long = "answers")]
    answers: bool,
}

impl CliArgs {
    fn query(&self) -> QuerySpecification {
        let mut spec = QuerySpecification {
            in_title: self.in_title.clone(),
            page_size: self.page_size,
            page: self.page,
            tags: Vec::with_capacity(self.tags.len()),
            site: self.site.clone(),
        };
        for tag in &self.tags {
            if !spec.add_tag(tag) {
                warn!(tag = %tag, "ignoring blank or duplicate tag");
            }
        }
        spec
    }
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ClientSettings::load_from_iter([OsString::from("stack-search")])
        .map_err(|error| io::Error::other(format!("load client settings: {error}")))?;

    let api_root = settings
        .api_root()
        .map_err(|error| io::Error::other(format!("parse api root: {error}")))?;
    let transport =
        ReqwestTransport::with_identity(api_root, settings.request_timeout(), settings.identity())
            .map_err(|error| io::Error::other(format!("create http client: {error}")))?;
    let service = StackSearchService::new(Arc::new(transport), settings.query_defaults());

    let results = service
        .search(&args.query())
        .await
        .map_err(|error| io::Error::other(format!("search failed: {error}")))?;

    let mut questions = Vec::with_capacity(results.question_count());
    for question in results.into_questions() {
        let question = if args.answers {
            service.fill_answers(question).await
        } else {
            question
        };
        questions.push(question);
    }

    let mut stdout = io::stdout().lock();
    for question in &questions {
        stdout.write_all(render_question(question, args.answers).as_bytes())?;
    }
    stdout.flush()?;

    let summary = SearchResultSet::new(questions).release();
    info!(
        questions = summary.questions,
        answers = summary.answers,
        users = summary.users,
        "search results released"
    );
    Ok(())
}

fn render_question(question: &Question, with_answers: bool) -> String {
    let author = question
        .post
        .owner
        .as_ref()
        .and_then(|owner| owner.display_name.as_deref())
        .unwrap_or_default();
    let mut out = format!(
        "TITLE: {}\nUSER: {author}\n",
        question.title.as_deref().unwrap_or_default()
    );
    if with_answers {
        for answer in question.hydrated_answers() {
            let marker = if answer.is_accepted { " (accepted)" } else { "" };
            let author = answer
                .post
                .owner
                .as_ref()
                .and_then(|owner| owner.display_name.as_deref())
                .unwrap_or_default();
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "  ANSWER: {} score={}{marker} by {author}",
                answer.post.post_id, answer.post.score
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument mapping and result rendering.

    use super::*;
    use rstest::rstest;
    use stackexchange_client::domain::{Answer, Post, User};

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("stack-search").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    fn user(name: &str) -> Option<User> {
        Some(User {
            display_name: Some(name.to_owned()),
            ..User::default()
        })
    }

    #[rstest]
    fn repeated_tags_build_one_query() {
        let args = parse(&[
            "--in-title",
            "makefile",
            "--tag",
            "gcc",
            "--tag",
            "c",
            "--tag",
            "gcc",
            "--page-size",
            "5",
        ]);
        let spec = args.query();

        assert_eq!(spec.in_title.as_deref(), Some("makefile"));
        assert_eq!(spec.tags, vec!["gcc".to_owned(), "c".to_owned()]);
        assert_eq!(spec.page_size, 5);
        assert_eq!(spec.page, 0);
        assert!(spec.site.is_none());
    }

    #[rstest]
    fn renders_title_and_user_lines() {
        let question = Question {
            post: Post {
                owner: user("Jane"),
                ..Post::default()
            },
            title: Some("Makefile basics".to_owned()),
            ..Question::default()
        };
        assert_eq!(
            render_question(&question, false),
            "TITLE: Makefile basics\nUSER: Jane\n"
        );
    }

    #[rstest]
    fn missing_fields_render_empty() {
        assert_eq!(
            render_question(&Question::default(), true),
            "TITLE: \nUSER: \n"
        );
    }

    #[rstest]
    fn answers_are_listed_when_requested() {
        let question = Question {
            title: Some("Foo".to_owned()),
            answers: Some(vec![
                Some(Answer {
                    post: Post {
                        post_id: 11,
                        score: 3,
                        owner: user("Ann"),
                        ..Post::default()
                    },
                    is_accepted: true,
                    ..Answer::default()
                }),
                None,
            ]),
            ..Question::default()
        };
        let rendered = render_question(&question, true);
        assert_eq!(
            rendered,
            "TITLE: Foo\nUSER: \n  ANSWER: 11 score=3 (accepted) by Ann\n"
        );
        assert!(!render_question(&question, false).contains("ANSWER"));
    }
}

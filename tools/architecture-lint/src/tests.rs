//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::fixture;
use rstest::rstest;

use super::*;

#[derive(Clone, Copy)]
struct LintSingle;

impl LintSingle {
    fn lint(self, file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
        lint_sources(&[LintSource {
            file: PathBuf::from(file),
            contents: contents.to_owned(),
        }])
    }
}

#[fixture]
fn lint_single() -> LintSingle {
    LintSingle
}

#[rstest]
#[case::domain_uses_its_port(
    "domain/search_service/mod.rs",
    "use super::ports::HttpTransport; fn run(_t: &dyn HttpTransport) {}",
    true
)]
#[case::domain_uses_serde_json(
    "domain/hydrate/fields.rs",
    "use serde_json::Value; fn read(_v: &Value) {}",
    true
)]
#[case::domain_reaches_outbound(
    "domain/search_service/mod.rs",
    "use crate::outbound::stackexchange::ReqwestTransport; fn f() { let _ = 1; }",
    false
)]
#[case::domain_reaches_outbound_by_crate_name(
    "domain/search_service/mod.rs",
    "use stackexchange_client::outbound::stackexchange; fn f() {}",
    false
)]
#[case::domain_reaches_config(
    "domain/query.rs",
    "fn f() { let _ = crate::config::ClientSettings::default; }",
    false
)]
#[case::domain_names_reqwest(
    "domain/search_service/mod.rs",
    "fn f() -> reqwest::Client { reqwest::Client::new() }",
    false
)]
#[case::domain_names_tokio(
    "domain/lifecycle.rs",
    "use tokio::runtime::Runtime; fn f() {}",
    false
)]
#[case::domain_test_module_may_use_tokio(
    "domain/lifecycle.rs",
    "#[cfg(test)] mod tests { #[tokio::test] async fn t() {} }",
    true
)]
#[case::outbound_uses_domain_port(
    "outbound/stackexchange/http_transport.rs",
    "use crate::domain::ports::{HttpResponse, HttpTransport}; use reqwest::Client; fn f() {}",
    true
)]
#[case::outbound_reaches_config(
    "outbound/stackexchange/http_transport.rs",
    "use crate::config::ClientSettings; fn f() {}",
    false
)]
#[case::outbound_parses_cli(
    "outbound/stackexchange/http_transport.rs",
    "use clap::Parser; fn f() {}",
    false
)]
fn detects_boundary_violations(
    lint_single: LintSingle,
    #[case] file: &str,
    #[case] contents: &str,
    #[case] ok: bool,
) {
    let result = lint_single.lint(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn reports_each_rule_once_per_file(lint_single: LintSingle) {
    let result = lint_single.lint(
        "domain/query.rs",
        "use reqwest::Url; fn f(_u: reqwest::Url) -> reqwest::Url { todo!() }",
    );
    let Err(ArchitectureLintError::Violations(violations)) = result else {
        panic!("expected violations, got {result:?}");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "domain module must not depend on external crate `reqwest`"
    );
}

#[rstest]
fn rejects_files_outside_linted_layers(lint_single: LintSingle) {
    let result = lint_single.lint("config.rs", "fn f() {}");
    assert!(
        matches!(result, Err(ArchitectureLintError::Parse { .. })),
        "result: {result:?}"
    );
}

#[rstest]
#[case(&["crate", "outbound", "x"], Some(PathRoot::Module("outbound")))]
#[case(&["super", "super", "config"], Some(PathRoot::Module("config")))]
#[case(&["super", "ports"], None)]
#[case(&["stackexchange_client", "domain"], Some(PathRoot::Module("domain")))]
#[case(&["tokio", "spawn"], Some(PathRoot::Crate("tokio")))]
fn classifies_path_roots(#[case] segments: &[&str], #[case] expected: Option<PathRoot<'static>>) {
    let owned = segments
        .iter()
        .map(|segment| (*segment).to_owned())
        .collect::<Vec<_>>();
    assert_eq!(classify(&owned), expected);
}

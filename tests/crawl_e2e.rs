//! End-to-end runs of the pipeline against a `wiremock` server.
//!
//! The server mimics the three page levels of the results site: the national
//! index, one unit page and the municipality results pages.

use std::path::Path;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use volby_scraper::error::AppError;
use volby_scraper::models::{Config, CrawlerConfig, HeaderPolicy};
use volby_scraper::pipeline::run_pipeline;
use volby_scraper::services::HttpFetcher;
use volby_scraper::utils::http::create_async_client;

const INDEX_PATH: &str = "/pls/ps2017nss/ps3";
const UNIT_PATH: &str = "/pls/ps2017nss/ps32";
const DETAIL_PATH: &str = "/pls/ps2017nss/ps311";

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.crawler = CrawlerConfig {
        user_agent: "volby-scraper-test/0.1".to_string(),
        timeout_secs: 5,
        request_delay_ms: 0,
    };
    config.source.index_url = format!("{}{INDEX_PATH}?xjazyk=CZ", server.uri());
    config
}

fn test_fetcher(config: &Config) -> HttpFetcher {
    HttpFetcher::new(create_async_client(&config.crawler).expect("failed to build client"))
}

fn unit_url(server: &MockServer) -> String {
    format!("{}{UNIT_PATH}?xjazyk=CZ&xnumnuts=2101", server.uri())
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8")
}

fn index_page() -> String {
    r#"<html><body>
    <table>
      <tr><th colspan="4">Středočeský kraj</th></tr>
      <tr><th>Kód</th><th>Název</th><th>Výběr obce</th><th>Výběr okrsku</th></tr>
      <tr><td>CZ0201</td><td>Benešov</td><td><a href="ps33?xnumnuts=2101">X</a></td>
          <td><a href="ps32?xjazyk=CZ&amp;xnumnuts=2101">X</a></td></tr>
      <tr><td>CZ0202</td><td>Beroun</td><td>X</td>
          <td><a href="ps32?xjazyk=CZ&amp;xnumnuts=2102">X</a></td></tr>
      <tr><td>-</td><td>Celkem</td><td>-</td><td>-</td></tr>
    </table>
    </body></html>"#
        .to_string()
}

fn unit_page(codes: &[(&str, &str)]) -> String {
    let rows: String = codes
        .iter()
        .map(|(code, name)| {
            format!(
                "<tr><td><a href=\"ps311?xjazyk=CZ&amp;xobec={code}\">{code}</a></td>\
                 <td>{name}</td><td><a href=\"ps33?xobec={code}\">X</a></td></tr>"
            )
        })
        .collect();
    format!(
        "<table><tr><th colspan=\"3\">Okres Benešov</th></tr>\
         <tr><th>číslo</th><th>název</th><th>Výběr okrsku</th></tr>{rows}\
         <tr><td>-</td><td>-</td><td>-</td></tr></table>"
    )
}

fn detail_page(turnout: [&str; 3], parties: &[(&str, &str, &str)]) -> String {
    let [voters, envelopes, valid] = turnout;
    let rows: String = parties
        .iter()
        .map(|(n, name, votes)| format!("<tr><td>{n}</td><td>{name}</td><td>{votes}</td><td>1,0</td></tr>"))
        .collect();
    format!(
        "<table>\
           <tr><th>Okrsky</th></tr><tr><th>celkem</th></tr>\
           <tr><td>1</td><td>1</td><td>100,00</td><td>{voters}</td><td>{envelopes}</td>\
               <td>60,0</td><td>{envelopes}</td><td>{valid}</td><td>99,0</td></tr>\
         </table>\
         <table><tr><th>Strana</th></tr><tr><th>číslo</th></tr>{rows}</table>\
         <table><tr><th>Strana</th></tr><tr><th>číslo</th></tr>\
           <tr><td>-</td><td>-</td><td>-</td><td>-</td></tr></table>"
    )
}

async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .respond_with(html(index_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(UNIT_PATH))
        .and(query_param("xnumnuts", "2101"))
        .respond_with(html(unit_page(&[
            ("529303", "Benešov"),
            ("532568", "Bernartice"),
            ("530743", "Bílkovice"),
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .and(query_param("xobec", "529303"))
        .respond_with(html(detail_page(
            ["13\u{a0}104", "8\u{a0}485", "8\u{a0}445"],
            &[
                ("1", "Občanská demokratická strana", "1\u{a0}052"),
                ("2", "ANO 2011", "2\u{a0}577"),
            ],
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .and(query_param("xobec", "532568"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .and(query_param("xobec", "530743"))
        .respond_with(html(detail_page(
            ["170", "121", "118"],
            &[
                ("1", "Občanská demokratická strana", "17"),
                ("3", "Česká pirátská strana", "9"),
            ],
        )))
        .mount(server)
        .await;
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("output file should exist")
}

#[tokio::test]
async fn pipeline_writes_one_row_per_municipality() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let config = test_config(&server);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("benesov.csv");

    let summary = run_pipeline(&config, &test_fetcher(&config), &unit_url(&server), &output)
        .await
        .expect("pipeline should succeed");

    assert_eq!(summary.unit.name, "Benešov");
    assert_eq!(summary.municipality_count, 3);
    assert_eq!(summary.detail_failures, 1);

    let written = summary.written.expect("records should be written");
    assert_eq!(written.row_count, 3);
    assert_eq!(written.dropped_columns, vec!["Česká pirátská strana".to_string()]);

    let content = read(&output);
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "kod_obce;nazev;voters_registered;envelopes_issued;valid_votes;\
             Občanská demokratická strana;ANO 2011",
            "529303;Benešov;13104;8485;8445;1052;2577",
            "532568;Bernartice;;;;;",
            "530743;Bílkovice;170;121;118;17;",
        ]
    );
    assert!(!content.contains('\u{a0}'));
}

#[tokio::test]
async fn pipeline_union_header_keeps_every_party() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let mut config = test_config(&server);
    config.output.header = HeaderPolicy::Union;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("benesov.csv");

    run_pipeline(&config, &test_fetcher(&config), &unit_url(&server), &output)
        .await
        .expect("pipeline should succeed");

    let content = read(&output);
    assert!(content.lines().next().unwrap().ends_with(";Česká pirátská strana"));
    assert!(content.contains("530743;Bílkovice;170;121;118;17;;9"));
}

#[tokio::test]
async fn pipeline_rejects_url_missing_from_index() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let config = test_config(&server);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let foreign = format!("{}{UNIT_PATH}?xjazyk=CZ&xnumnuts=9999", server.uri());
    let err = run_pipeline(&config, &test_fetcher(&config), &foreign, &output)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn pipeline_rejects_non_csv_output_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(index_page()))
        .expect(0)
        .mount(&server)
        .await;
    let config = test_config(&server);
    let dir = tempfile::tempdir().unwrap();

    let err = run_pipeline(
        &config,
        &test_fetcher(&config),
        &unit_url(&server),
        &dir.path().join("out.xlsx"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn pipeline_fails_when_unit_page_lists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .respond_with(html(index_page()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(UNIT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let config = test_config(&server);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let err = run_pipeline(&config, &test_fetcher(&config), &unit_url(&server), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Crawl { .. }));
    assert!(!output.exists());
}

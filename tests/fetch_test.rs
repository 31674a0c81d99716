//! Fetch behavior against a local HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};

use page_digest::{Analyzer, Error, OpenAiCompatEnhancer, Options};

const ARTICLE: &str = r#"<html><head>
    <title>Local Article</title>
    <meta property="og:description" content="Served from a test server.">
    </head><body><p>server server fixture fixture</p></body></html>"#;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn pages() -> Router {
    Router::new()
        .route("/article", get(|| async { Html(ARTICLE) }))
        .route(
            "/big",
            get(|| async { Html(format!("<p>{}</p>", "word ".repeat(120_000))) }),
        )
        .route(
            "/missing",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Html(r#"<meta name="description" content="Page not found.">"#),
                )
            }),
        )
        .route("/old", get(|| async { Redirect::permanent("/article") }))
        .route(
            "/latin1",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=iso-8859-1")],
                    b"<meta name=\"description\" content=\"Caf\xE9 au lait.\">".to_vec(),
                )
                    .into_response()
            }),
        )
}

#[tokio::test]
async fn analyzes_a_served_page() {
    let addr = serve(pages()).await;
    let analysis = Analyzer::new()
        .expect("analyzer")
        .analyze(&format!("http://{addr}/article"))
        .await
        .expect("analysis");

    assert_eq!(analysis.summary, "Served from a test server.");
    assert_eq!(analysis.keywords, vec!["server", "fixture"]);
}

#[tokio::test]
async fn free_function_uses_defaults() {
    let addr = serve(pages()).await;
    let analysis = page_digest::analyze(&format!("http://{addr}/article"))
        .await
        .expect("analysis");
    assert_eq!(analysis.summary, "Served from a test server.");
}

#[tokio::test]
async fn oversized_body_is_cut_at_the_cap() {
    let addr = serve(pages()).await;
    let report = Analyzer::new()
        .expect("analyzer")
        .analyze_detailed(&format!("http://{addr}/big"))
        .await
        .expect("truncation is not an error");

    assert!(report.truncated);
    assert_eq!(report.bytes_read, 500_000);
    assert_eq!(report.status, 200);
    assert!(!report.analysis.summary.is_empty());
    assert_eq!(report.analysis.keywords, vec!["word"]);
}

#[tokio::test]
async fn custom_cap_applies() {
    let addr = serve(pages()).await;
    let analyzer = Analyzer::with_options(Options {
        max_body_bytes: 1_000,
        ..Options::default()
    })
    .expect("analyzer");
    let page = analyzer
        .fetch_page(&format!("http://{addr}/big"))
        .await
        .expect("page");

    assert!(page.truncated);
    assert_eq!(page.bytes.len(), 1_000);
}

#[tokio::test]
async fn small_body_is_not_truncated() {
    let addr = serve(pages()).await;
    let report = Analyzer::new()
        .expect("analyzer")
        .analyze_detailed(&format!("http://{addr}/article"))
        .await
        .expect("report");

    assert!(!report.truncated);
    assert_eq!(report.bytes_read, ARTICLE.len());
    assert_eq!(report.metadata.title.as_deref(), Some("Local Article"));
}

#[tokio::test]
async fn error_statuses_are_still_analyzed() {
    let addr = serve(pages()).await;
    let report = Analyzer::new()
        .expect("analyzer")
        .analyze_detailed(&format!("http://{addr}/missing"))
        .await
        .expect("non-2xx is not an error");

    assert_eq!(report.status, 404);
    assert_eq!(report.analysis.summary, "Page not found.");
}

#[tokio::test]
async fn redirects_are_followed() {
    let addr = serve(pages()).await;
    let report = Analyzer::new()
        .expect("analyzer")
        .analyze_detailed(&format!("http://{addr}/old"))
        .await
        .expect("report");

    assert_eq!(report.final_url, format!("http://{addr}/article"));
    assert_eq!(report.analysis.summary, "Served from a test server.");
}

#[tokio::test]
async fn header_charset_is_honored() {
    let addr = serve(pages()).await;
    let analysis = Analyzer::new()
        .expect("analyzer")
        .analyze(&format!("http://{addr}/latin1"))
        .await
        .expect("analysis");
    assert_eq!(analysis.summary, "Caf\u{e9} au lait.");
}

#[tokio::test]
async fn connection_refused_is_a_fetch_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = Analyzer::new()
        .expect("analyzer")
        .analyze(&format!("http://{addr}/"))
        .await
        .expect_err("nothing is listening");

    match err {
        Error::Fetch(inner) => assert!(inner.is_connect() || inner.is_request()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_url_is_a_fetch_error() {
    let err = Analyzer::new()
        .expect("analyzer")
        .analyze("not a url")
        .await
        .expect_err("invalid url");
    assert!(matches!(err, Error::Fetch(_)));
}

fn chat_completions(reply: &'static str) -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            Json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": reply}}]
            }))
        }),
    )
}

#[tokio::test]
async fn enhancer_replaces_summary() {
    let pages_addr = serve(pages()).await;
    let llm_addr = serve(chat_completions(" A short article served for tests. ")).await;

    let analyzer = Analyzer::new().expect("analyzer");
    let enhancer = OpenAiCompatEnhancer::new(analyzer.client().clone(), format!("http://{llm_addr}"));
    let analysis = analyzer
        .with_enhancer(Arc::new(enhancer))
        .analyze(&format!("http://{pages_addr}/article"))
        .await
        .expect("analysis");

    assert_eq!(analysis.summary, "A short article served for tests.");
    assert_eq!(analysis.keywords, vec!["server", "fixture"]);
}

#[tokio::test]
async fn enhancer_output_with_code_is_ignored() {
    let pages_addr = serve(pages()).await;
    let llm_addr = serve(chat_completions("function() { return 1; }")).await;

    let analyzer = Analyzer::new().expect("analyzer");
    let enhancer = OpenAiCompatEnhancer::new(analyzer.client().clone(), format!("http://{llm_addr}"));
    let analysis = analyzer
        .with_enhancer(Arc::new(enhancer))
        .analyze(&format!("http://{pages_addr}/article"))
        .await
        .expect("analysis");

    assert_eq!(analysis.summary, "Served from a test server.");
}

#[tokio::test]
async fn failing_enhancer_keeps_heuristic_summary() {
    let pages_addr = serve(pages()).await;
    let llm_addr = serve(Router::new().route(
        "/v1/chat/completions",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;

    let analyzer = Analyzer::new().expect("analyzer");
    let enhancer = OpenAiCompatEnhancer::new(analyzer.client().clone(), format!("http://{llm_addr}/"))
        .with_api_key("test-key");
    let analysis = analyzer
        .with_enhancer(Arc::new(enhancer))
        .analyze(&format!("http://{pages_addr}/article"))
        .await
        .expect("enhancer failure is not an analysis failure");

    assert_eq!(analysis.summary, "Served from a test server.");
}

#[tokio::test]
async fn saved_html_is_enhanced_too() {
    let llm_addr = serve(chat_completions("A saved page, summarized.")).await;
    let html = r#"<meta name="description" content="Saved to disk.">
        <p>archive archive copy copy</p>"#;

    let analyzer = Analyzer::new().expect("analyzer");
    let enhancer = OpenAiCompatEnhancer::new(analyzer.client().clone(), format!("http://{llm_addr}"));
    let analyzer = analyzer.with_enhancer(Arc::new(enhancer));

    assert_eq!(analyzer.analyze_html(html, "").summary, "Saved to disk.");
    let analysis = analyzer.analyze_html_enhanced(html, "").await;
    assert_eq!(analysis.summary, "A saved page, summarized.");
    assert_eq!(analysis.keywords, vec!["archive", "copy"]);
}

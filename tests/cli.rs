//! `product-parser extract` run as a child process against a wiremock shop.

use std::process::{Command, Output};
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─────────────────────── helpers ───────────────────────

const CONFIG_ENV: &[&str] = &[
    "PORT",
    "PRODUCT_PARSER_HOST",
    "PRODUCT_PARSER_TIMEOUT_SECS",
    "PRODUCT_PARSER_USER_AGENT",
    "PRODUCT_PARSER_MAX_REDIRECTS",
    "PRODUCT_PARSER_MAX_BODY_BYTES",
];

/// Run the binary with `args` off the async runtime so the mock shop keeps serving.
async fn run(args: &[&str]) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_product-parser"));
        for key in CONFIG_ENV {
            cmd.env_remove(key);
        }
        cmd.env("RUST_LOG", "warn").args(&args).output().unwrap()
    })
    .await
    .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn html_delayed(body: &str, delay: Duration) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(body.to_owned(), "text/html")
        .set_delay(delay)
}

// ─────────────────────── tests ───────────────────────

#[tokio::test]
async fn extract_prints_result_json() {
    let shop = MockServer::start().await;
    serve(
        &shop,
        "/p/boots",
        ResponseTemplate::new(200).set_body_raw(
            r#"<meta property="og:title" content="Hiking Boots">
               <meta property="og:image" content="https://x/boots.jpg">
               <span itemprop="price" content="120.00">$120</span>"#,
            "text/html",
        ),
    )
    .await;

    let url = format!("{}/p/boots", shop.uri());
    let output = run(&["extract", &url]).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout_json(&output),
        json!({
            "url": url,
            "title": "Hiking Boots",
            "image": "https://x/boots.jpg",
            "price": "120.00",
        })
    );
}

#[tokio::test]
async fn extract_failure_exits_nonzero() {
    let shop = MockServer::start().await;
    serve(&shop, "/gone", ResponseTemplate::new(404)).await;

    let url = format!("{}/gone", shop.uri());
    let output = run(&["extract", &url]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains(&format!("failed to fetch {url}: HTTP status 404")));
}

#[tokio::test]
async fn user_agent_flag_is_sent() {
    let shop = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/p/hat"))
        .and(header("user-agent", "ClosetBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<title>Hat</title>", "text/html"))
        .expect(1)
        .mount(&shop)
        .await;

    let url = format!("{}/p/hat", shop.uri());
    let output = run(&["extract", &url, "--user-agent", "ClosetBot/1.0"]).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout_json(&output)["title"], "Hat");
}

#[tokio::test]
async fn timeout_flag_is_applied() {
    let shop = MockServer::start().await;
    serve(
        &shop,
        "/slow",
        html_delayed("<title>Too Late</title>", Duration::from_secs(3)),
    )
    .await;

    let url = format!("{}/slow", shop.uri());
    let output = run(&["extract", &url, "--timeout-secs", "1"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("request timed out"));
}

#[tokio::test]
async fn body_cap_flag_is_applied() {
    let shop = MockServer::start().await;
    let page = format!("<title>Catalog</title>{}", "x".repeat(512));
    serve(
        &shop,
        "/catalog",
        ResponseTemplate::new(200).set_body_raw(page, "text/html"),
    )
    .await;

    let url = format!("{}/catalog", shop.uri());
    let output = run(&["extract", &url, "--max-body-bytes", "64"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("response body exceeds 64 bytes"));
}

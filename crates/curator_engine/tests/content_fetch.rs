use curator_core::NormalizedContent;
use curator_engine::{
    ClientSettings, ContentFetchOrchestrator, ContentResource, ContentSource, RemoteClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orchestrator(settings: ClientSettings) -> ContentFetchOrchestrator {
    ContentFetchOrchestrator::new(RemoteClient::new(settings).unwrap())
}

fn for_server(server: &MockServer) -> ContentFetchOrchestrator {
    orchestrator(ClientSettings::new(server.uri()))
}

#[tokio::test]
async fn raw_page_is_located_and_converted() {
    let server = MockServer::start().await;
    let page = r#"<html><head><title>T</title><script>track()</script></head>
        <body><nav>menu</nav>
        <div class="post-content"><h2>Heading</h2><p>Read <a href="/next">more</a></p></div>
        </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let url = format!("{}/story", server.uri());
    let content = for_server(&server)
        .fetch(&ContentSource::RawHtml { url })
        .await;

    let md = content.markdown().unwrap_or_default();
    assert!(md.starts_with("## Heading"), "unexpected content: {content:?}");
    assert!(
        md.contains(&format!("Read [more]({}/next)", server.uri())),
        "unexpected content: {content:?}"
    );
    assert!(!md.contains("menu") && !md.contains("track()"));
}

#[tokio::test]
async fn malformed_bytes_in_a_successful_page_are_replaced() {
    let server = MockServer::start().await;
    let mut page = b"<article><p>Hello world</p>".to_vec();
    page.push(0xff);
    page.extend_from_slice(b"</article>");
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let url = format!("{}/broken", server.uri());
    let content = for_server(&server)
        .fetch(&ContentSource::RawHtml { url })
        .await;

    let md = content.markdown().unwrap_or_default();
    assert!(md.contains("Hello world"), "unexpected content: {content:?}");
    assert!(md.contains('\u{FFFD}'), "unexpected content: {content:?}");
}

#[tokio::test]
async fn raw_page_http_failure_is_an_error_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone", server.uri());
    let content = for_server(&server)
        .fetch(&ContentSource::RawHtml { url })
        .await;
    assert_eq!(
        content,
        NormalizedContent::Error("Failed to fetch article: 404 Not Found".to_string())
    );
}

#[tokio::test]
async fn transport_failure_is_an_error_value() {
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let fetcher = orchestrator(ClientSettings::new(&uri));
    let raw = fetcher
        .fetch(&ContentSource::RawHtml {
            url: format!("{uri}/page"),
        })
        .await;
    assert!(raw
        .error()
        .is_some_and(|msg| msg.starts_with("Failed to fetch article: ")));

    let normalized = fetcher
        .fetch(&ContentSource::Normalized {
            resource: ContentResource::Uri,
            id: 3,
        })
        .await;
    assert!(normalized
        .error()
        .is_some_and(|msg| msg.starts_with("Failed to fetch URI content: ")));
}

#[tokio::test]
async fn oversized_or_non_html_pages_are_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("x".repeat(64), "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/file.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF", "application/pdf"))
        .mount(&server)
        .await;

    let mut settings = ClientSettings::new(server.uri());
    settings.max_content_bytes = 16;
    let fetcher = orchestrator(settings);

    let big = fetcher
        .fetch(&ContentSource::RawHtml {
            url: format!("{}/big", server.uri()),
        })
        .await;
    assert!(big.error().is_some_and(|msg| msg.contains("too large")));

    let pdf = fetcher
        .fetch(&ContentSource::RawHtml {
            url: format!("{}/file.pdf", server.uri()),
        })
        .await;
    assert!(pdf
        .error()
        .is_some_and(|msg| msg.contains("unsupported content type application/pdf")));
}

#[tokio::test]
async fn normalized_payload_passes_through_untouched() {
    let server = MockServer::start().await;
    let long = format!("# Title\n\n{}", "word ".repeat(400));
    Mock::given(method("GET"))
        .and(path("/uris/42/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "markdown": long })))
        .mount(&server)
        .await;

    let content = for_server(&server)
        .fetch(&ContentSource::Normalized {
            resource: ContentResource::Uri,
            id: 42,
        })
        .await;
    // No truncation at this layer.
    assert_eq!(content, NormalizedContent::Markdown(long));
}

#[tokio::test]
async fn normalized_error_payloads_become_error_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uris/1/content"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "extraction failed" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/uris/2/content"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({ "error": "upstream timeout" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/3/content"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = for_server(&server);
    let fetch = |resource: ContentResource, id: u64| {
        let fetcher = fetcher.clone();
        async move {
            fetcher
                .fetch(&ContentSource::Normalized { resource, id })
                .await
        }
    };

    assert_eq!(
        fetch(ContentResource::Uri, 1).await,
        NormalizedContent::Error("extraction failed".to_string())
    );
    assert_eq!(
        fetch(ContentResource::Uri, 2).await,
        NormalizedContent::Error("upstream timeout".to_string())
    );
    assert_eq!(
        fetch(ContentResource::Article, 3).await,
        NormalizedContent::Error("500 Internal Server Error".to_string())
    );
}

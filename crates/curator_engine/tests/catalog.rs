use curator_core::TagId;
use curator_engine::{ClientSettings, FailureKind, RemoteClient, TagCatalog};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer) -> TagCatalog {
    TagCatalog::new(RemoteClient::new(ClientSettings::new(server.uri())).unwrap())
}

fn page_body(page: u32, total_pages: u32, ids: &[u64]) -> serde_json::Value {
    json!({
        "data": ids
            .iter()
            .map(|id| json!({ "id": id, "name": format!("tag-{id}") }))
            .collect::<Vec<_>>(),
        "page": page,
        "per_page": 100,
        "total": 3,
        "total_pages": total_pages,
    })
}

#[tokio::test]
async fn list_all_walks_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 2, &[1, 2])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tags"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(2, 2, &[3])))
        .expect(1)
        .mount(&server)
        .await;

    let all = catalog_for(&server).list_all(None).await.unwrap();
    let ids: Vec<_> = all.iter().map(|t| t.id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn page_forwards_the_search_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags"))
        .and(query_param("query", "rust"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1, &[7])))
        .expect(1)
        .mount(&server)
        .await;

    let page = catalog_for(&server)
        .page(1, 20, Some(" rust "))
        .await
        .unwrap();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.data[0].name, "tag-7");
}

#[tokio::test]
async fn create_rename_and_delete_hit_the_tag_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tags"))
        .and(body_json(json!({ "name": "reading" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 5, "name": "reading" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tags/5"))
        .and(body_json(json!({ "name": "later" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "name": "later" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tags/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let created = catalog.create("  reading ").await.unwrap();
    assert_eq!(created.id, TagId::new(5).unwrap());
    let renamed = catalog.rename(created.id, "later").await.unwrap();
    assert_eq!(renamed.name, "later");
    catalog.delete(created.id).await.unwrap();
}

#[tokio::test]
async fn blank_names_are_rejected_before_any_request() {
    let server = MockServer::start().await;
    let err = catalog_for(&server).create("   ").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidPayload);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

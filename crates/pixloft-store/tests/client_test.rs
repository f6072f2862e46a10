//! Store client tests against a fake store server.

use futures::TryStreamExt;
use mockito::Matcher;
use pixloft_core::config::StoreSettings;
use pixloft_core::models::MediaRecord;
use pixloft_store::{NewFile, Query, StoreClient, StoreError, StoreId};

fn settings_for(server: &mockito::Server) -> StoreSettings {
    StoreSettings {
        endpoint: server.url(),
        project_id: "p1".to_string(),
        api_key: Some("k1".to_string()),
        bucket_id: "b1".to_string(),
        database_id: "db1".to_string(),
        media_collection_id: "media".to_string(),
        posts_collection_id: "posts".to_string(),
    }
}

fn client_for(server: &mockito::Server) -> StoreClient {
    StoreClient::new(settings_for(server)).unwrap()
}

#[tokio::test]
async fn test_create_file_uploads_multipart_with_id_and_permissions() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/storage/buckets/b1/files")
        .match_header("X-Store-Project", "p1")
        .match_header("X-Store-Key", "k1")
        .match_body(Matcher::Regex(r#"unique\(\)"#.to_string()))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"$id":"f77","name":"sunset.png","mimeType":"image/png","sizeOriginal":7}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let record = client
        .create_file(
            &StoreId::unique(),
            NewFile::public_read("sunset.png", "image/png", b"PNGDATA".to_vec()),
        )
        .await
        .unwrap();

    assert_eq!(record.id, "f77");
    assert_eq!(record.mime_type, "image/png");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_open_file_streams_bytes_and_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/storage/buckets/b1/files/f77/view")
        .match_query(Matcher::UrlEncoded("project".into(), "p1".into()))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(b"PNGDATA".to_vec())
        .create_async()
        .await;

    let client = client_for(&server);
    let view = client.open_file("f77").await.unwrap();
    assert_eq!(view.status().as_u16(), 200);
    assert_eq!(view.content_type(), Some("image/png"));

    let chunks: Vec<bytes::Bytes> = view.into_byte_stream().try_collect().await.unwrap();
    let body: Vec<u8> = chunks.concat();
    assert_eq!(body, b"PNGDATA");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_open_file_maps_missing_file_to_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/storage/buckets/b1/files/nope/view")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"File not found","code":404,"type":"storage_file_not_found"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.open_file("nope").await.unwrap_err();
    match err {
        StoreError::NotFound(message) => {
            assert!(message.contains("File not found"));
            assert!(message.contains("storage_file_not_found"));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_file_handles_empty_success_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/storage/buckets/b1/files/f77")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    client.delete_file("f77").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_documents_sends_encoded_queries() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/databases/db1/collections/media/documents")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("queries[]".into(), r#"equal("userId",["u1"])"#.into()),
            Matcher::UrlEncoded("queries[]".into(), "limit(9)".into()),
            Matcher::UrlEncoded("queries[]".into(), "offset(0)".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "total": 1,
                "documents": [
                    {"$id":"d1","fileId":"f1","userId":"u1","name":"sunset"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let page = client
        .list_documents::<MediaRecord>(
            "media",
            &[
                Query::equal("userId", "u1"),
                Query::limit(9),
                Query::offset(0),
            ],
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.documents[0].data.file_id, "f1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_document_wraps_payload_in_data_envelope() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/databases/db1/collections/media/documents")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "documentId": "unique()",
            "data": {"fileId": "f77", "userId": "u1", "name": "sunset"}
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"$id":"d9","fileId":"f77","userId":"u1","name":"sunset"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let record = MediaRecord {
        file_id: "f77".to_string(),
        user_id: "u1".to_string(),
        name: "sunset".to_string(),
    };
    let doc = client
        .create_document("media", &StoreId::unique(), &record)
        .await
        .unwrap();

    assert_eq!(doc.id, "d9");
    assert_eq!(doc.data.file_id, "f77");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_document_patches_only_given_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/databases/db1/collections/posts/documents/d3")
        .match_body(Matcher::Json(serde_json::json!({
            "data": {"title": "New title"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "$id":"d3","title":"New title","content":"body","userId":"u1",
                "createdAt":"2024-03-01T10:00:00Z","slug":"abc123"
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let patch = pixloft_core::PostPatch {
        title: Some("New title".to_string()),
        content: None,
    };
    let doc = client
        .update_document::<pixloft_core::models::PostRecord, _>("posts", "d3", &patch)
        .await
        .unwrap();

    assert_eq!(doc.data.title, "New title");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_body_is_parsed_into_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/databases/db1/collections/media/documents/d1")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Server busy","code":500,"type":"general_error"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.delete_document("media", "d1").await.unwrap_err();
    match err {
        StoreError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Server busy (general_error)");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_account_maps_anonymous_to_permission_denied() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/account")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"User (role: guests) missing scope (account)","code":401,"type":"general_unauthorized_scope"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_account().await.unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_get_account_parses_current_user() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/account")
        .match_header("X-Store-Project", "p1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"$id":"u42","name":"Ada","email":"ada@example.com"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let account = client.get_account().await.unwrap();
    assert_eq!(account.id, "u42");
    assert_eq!(account.name, "Ada");
}

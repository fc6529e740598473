//! Media CRUD integration tests.
//!
//! Run with: `cargo test -p mediahub-api --test media_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{file_form, list, media_path, setup_test_app, upload, MEDIA_PATH};
use serde_json::{json, Value};
use std::collections::HashSet;

#[tokio::test]
async fn test_upload_without_file_is_rejected_without_side_effects() {
    let app = setup_test_app();
    let client = app.client();

    let form = MultipartForm::new()
        .add_text("title", "Holiday")
        .add_text("userId", "alice");
    let response = client.post(MEDIA_PATH).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file provided");
    assert_eq!(body["code"], "INVALID_INPUT");

    assert!(app.blob_store.list().await.unwrap().is_empty());
    assert!(app.metadata_store.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_file_part_without_filename_counts_as_missing() {
    let app = setup_test_app();

    let form = MultipartForm::new().add_part("file", Part::bytes(b"abc".to_vec()));
    let response = app.client().post(MEDIA_PATH).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert!(app.blob_store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_without_multipart_body_is_missing_file() {
    let app = setup_test_app();
    let client = app.client();

    let bare = client.post(MEDIA_PATH).await;
    let json_body = client.post(MEDIA_PATH).json(&json!({ "title": "x" })).await;

    for response in [bare, json_body] {
        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], "No file provided");
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    assert!(app.blob_store.list().await.unwrap().is_empty());
    assert!(app.metadata_store.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_stores_blob_and_matching_record() {
    let app = setup_test_app();

    let form = file_form("beach.jpg", "image/jpeg", b"\xff\xd8\xff\xe0jpeg")
        .add_text("title", "Holiday")
        .add_text("userId", "alice");
    let response = app.client().post(MEDIA_PATH).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "Upload successful");

    let metadata = &body["metadata"];
    assert_eq!(metadata["userId"], "alice");
    assert_eq!(metadata["title"], "Holiday");
    assert_eq!(metadata["fileName"], "beach.jpg");

    let blob_name = metadata["blobName"].as_str().unwrap();
    assert!(blob_name.ends_with("_beach.jpg"));

    assert_eq!(app.blob_store.list().await.unwrap(), vec![blob_name.to_string()]);
    assert_eq!(
        app.blob_store.download(blob_name).await.unwrap().as_ref(),
        b"\xff\xd8\xff\xe0jpeg"
    );
    assert_eq!(
        app.blob_store.content_type(blob_name).await.unwrap().as_deref(),
        Some("image/jpeg")
    );

    let records = app.metadata_store.read_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].blob_name, blob_name);
    assert_eq!(records[0].id, metadata["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_upload_blob_key_matches_recorded_blob_name() {
    let app = setup_test_app();

    let metadata = upload(
        app.client(),
        file_form("photo [1] #2 50%.jpg", "image/jpeg", b"jpeg"),
    )
    .await;

    assert_eq!(metadata["fileName"], "photo [1] #2 50%.jpg");
    let blob_name = metadata["blobName"].as_str().unwrap();
    assert!(blob_name.ends_with("_photo [1] #2 50%.jpg"));
    assert_eq!(app.blob_store.list().await.unwrap(), vec![blob_name.to_string()]);
    assert_eq!(app.blob_store.download(blob_name).await.unwrap().as_ref(), b"jpeg");
}

#[tokio::test]
async fn test_upload_filename_unusable_as_key_is_rejected() {
    let app = setup_test_app();

    let response = app
        .client()
        .post(MEDIA_PATH)
        .multipart(file_form("a//b.txt", "text/plain", b"x"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(app.blob_store.list().await.unwrap().is_empty());
    assert!(app.metadata_store.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_blob_names_are_unique_per_call() {
    let app = setup_test_app();
    let client = app.client();

    let mut blob_names = HashSet::new();
    for _ in 0..5 {
        let metadata = upload(client, file_form("same.png", "image/png", b"png")).await;
        blob_names.insert(metadata["blobName"].as_str().unwrap().to_string());
    }

    assert_eq!(blob_names.len(), 5);
    let stored: HashSet<String> = app.blob_store.list().await.unwrap().into_iter().collect();
    assert_eq!(stored, blob_names);
}

#[tokio::test]
async fn test_upload_applies_defaults_for_absent_fields_only() {
    let app = setup_test_app();
    let client = app.client();

    let defaulted = upload(client, file_form("a.txt", "text/plain", b"a")).await;
    assert_eq!(defaulted["userId"], "default_user");
    assert_eq!(defaulted["title"], "Untitled");

    let empty_title = upload(
        client,
        file_form("b.txt", "text/plain", b"b").add_text("title", ""),
    )
    .await;
    assert_eq!(empty_title["title"], "");
}

#[tokio::test]
async fn test_list_returns_every_record_across_partitions() {
    let app = setup_test_app();
    let client = app.client();

    let mut expected = HashSet::new();
    for user in ["alice", "bob", "default_user", "alice"] {
        let metadata = upload(
            client,
            file_form("f.bin", "application/octet-stream", b"x").add_text("userId", user),
        )
        .await;
        expected.insert(metadata["id"].as_str().unwrap().to_string());
    }

    let items = list(client).await;
    assert_eq!(items.len(), 4);
    let ids: HashSet<String> = items
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = setup_test_app();
    let client = app.client();

    let original = upload(
        client,
        file_form("cat.gif", "image/gif", b"gif")
            .add_text("title", "Cat")
            .add_text("userId", "alice"),
    )
    .await;
    let id = original["id"].as_str().unwrap();

    let response = client
        .put(&media_path(id))
        .json(&json!({ "title": "New", "userId": "alice" }))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["message"], "Update successful");

    let items = list(client).await;
    assert_eq!(items.len(), 1);
    let updated = &items[0];
    assert_eq!(updated["title"], "New");
    assert_eq!(updated["id"], original["id"]);
    assert_eq!(updated["userId"], original["userId"]);
    assert_eq!(updated["blobName"], original["blobName"]);
    assert_eq!(updated["fileName"], original["fileName"]);
}

#[tokio::test]
async fn test_update_without_user_id_uses_default_partition() {
    let app = setup_test_app();
    let client = app.client();

    let original = upload(client, file_form("a.txt", "text/plain", b"a")).await;
    let id = original["id"].as_str().unwrap();

    let response = client
        .put(&media_path(id))
        .json(&json!({ "title": "Renamed", "tags": ["x"] }))
        .await;
    assert_eq!(response.status_code(), 200);

    let items = list(client).await;
    assert_eq!(items[0]["title"], "Renamed");
    assert_eq!(items[0]["tags"], json!(["x"]));
}

#[tokio::test]
async fn test_update_missing_or_wrong_partition_is_storage_failure() {
    let app = setup_test_app();
    let client = app.client();

    let original = upload(
        client,
        file_form("a.txt", "text/plain", b"a").add_text("userId", "alice"),
    )
    .await;
    let id = original["id"].as_str().unwrap();

    // Record lives in "alice"; no userId means the default partition
    let wrong_partition = client
        .put(&media_path(id))
        .json(&json!({ "title": "New" }))
        .await;
    assert_eq!(wrong_partition.status_code(), 500);
    let body: Value = wrong_partition.json();
    assert_eq!(body["code"], "METADATA_STORE_ERROR");
    assert!(!body["error"].as_str().unwrap().is_empty());

    let missing = client
        .put(&media_path("does-not-exist"))
        .json(&json!({ "title": "New", "userId": "alice" }))
        .await;
    assert_eq!(missing.status_code(), 500);

    let items = list(client).await;
    assert_eq!(items[0]["title"], "Untitled");
}

#[tokio::test]
async fn test_update_ignores_id_in_body() {
    let app = setup_test_app();
    let client = app.client();

    let original = upload(client, file_form("a.txt", "text/plain", b"a")).await;
    let id = original["id"].as_str().unwrap();

    let response = client
        .put(&media_path(id))
        .json(&json!({ "id": "hijacked", "title": "Same record" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let items = list(client).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], original["id"]);
    assert_eq!(items[0]["title"], "Same record");
}

#[tokio::test]
async fn test_update_rejects_malformed_bodies() {
    let app = setup_test_app();
    let client = app.client();

    let original = upload(client, file_form("a.txt", "text/plain", b"a")).await;
    let id = original["id"].as_str().unwrap();

    let not_json = client.put(&media_path(id)).text("title=New").await;
    assert_eq!(not_json.status_code(), 400);

    let not_object = client.put(&media_path(id)).json(&json!(["title"])).await;
    assert_eq!(not_object.status_code(), 400);

    let wrong_type = client
        .put(&media_path(id))
        .json(&json!({ "title": 5 }))
        .await;
    assert_eq!(wrong_type.status_code(), 400);
    assert_eq!(wrong_type.json::<Value>()["code"], "INVALID_INPUT");

    let items = list(client).await;
    assert_eq!(items[0]["title"], "Untitled");
}

#[tokio::test]
async fn test_delete_removes_record_but_keeps_blob() {
    let app = setup_test_app();
    let client = app.client();

    let metadata = upload(client, file_form("keep.mp4", "video/mp4", b"mp4")).await;
    let id = metadata["id"].as_str().unwrap();
    let blob_name = metadata["blobName"].as_str().unwrap();

    let response = client.delete(&media_path(id)).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["message"], "Deletion successful");

    assert!(list(client).await.is_empty());
    assert!(app.blob_store.exists(blob_name).await.unwrap());
}

#[tokio::test]
async fn test_delete_only_reaches_default_partition_without_user_id() {
    let app = setup_test_app();
    let client = app.client();

    let metadata = upload(
        client,
        file_form("a.txt", "text/plain", b"a").add_text("userId", "bob"),
    )
    .await;
    let id = metadata["id"].as_str().unwrap();

    let response = client.delete(&media_path(id)).await;
    assert_eq!(response.status_code(), 500);
    assert_eq!(response.json::<Value>()["code"], "METADATA_STORE_ERROR");
    assert_eq!(list(client).await.len(), 1);

    let response = client
        .delete(&media_path(id))
        .add_query_param("userId", "bob")
        .await;
    assert_eq!(response.status_code(), 200);
    assert!(list(client).await.is_empty());
}

#[tokio::test]
async fn test_delete_missing_record_is_storage_failure() {
    let app = setup_test_app();

    let response = app.client().delete(&media_path("nope")).await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.json::<Value>()["code"], "METADATA_STORE_ERROR");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app();

    let response = app
        .client()
        .get(MEDIA_PATH)
        .add_header("X-Request-ID", "req-123")
        .await;

    assert_eq!(response.header("X-Request-ID"), "req-123");
}

//! Integration tests for the remote service client.
//!
//! These tests run against a wiremock HTTP server standing in for the
//! real persistence and mail-transport service.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use mailroster_remote::{
    Error, FilePart, GroupRecord, RemoteClient, SendRequest, Snapshot,
};

fn client_for(server: &MockServer) -> RemoteClient {
    RemoteClient::new(server.uri())
}

#[tokio::test]
async fn fetch_data_returns_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "emails": ["a@example.com", "b@example.com"],
            "groups": [{"id": "g1", "name": "Team", "emails": ["a@example.com"]}],
        })))
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_data().await.unwrap();
    assert_eq!(snapshot.emails, vec!["a@example.com", "b@example.com"]);
    assert_eq!(snapshot.groups.len(), 1);
    assert_eq!(snapshot.groups[0].name, "Team");
}

#[tokio::test]
async fn fetch_data_tolerates_missing_collections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_data().await.unwrap();
    assert!(snapshot.emails.is_empty());
    assert!(snapshot.groups.is_empty());
}

#[tokio::test]
async fn fetch_data_surfaces_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "storage offline",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_data().await.unwrap_err();
    assert!(err.is_service_error());
    assert!(err.to_string().contains("storage offline"));
}

#[tokio::test]
async fn fetch_data_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_data().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn save_data_posts_complete_snapshot() {
    let snapshot = Snapshot {
        emails: vec!["a@example.com".to_string()],
        groups: vec![GroupRecord {
            id: "g1".to_string(),
            name: "Team".to_string(),
            emails: vec!["a@example.com".to_string()],
        }],
    };

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/save-data"))
        .and(body_json(json!({
            "emails": ["a@example.com"],
            "groups": [{"id": "g1", "name": "Team", "emails": ["a@example.com"]}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).save_data(&snapshot).await.unwrap();
}

#[tokio::test]
async fn save_data_surfaces_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/save-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "disk full",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .save_data(&Snapshot::default())
        .await
        .unwrap_err();
    assert!(err.is_service_error());
}

#[tokio::test]
async fn clear_data_accepts_any_response_shape() {
    // The caller empties local state no matter what the service answers,
    // so even an unsuccessful body counts as acknowledged.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clear-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).clear_data().await.unwrap();
}

#[tokio::test]
async fn clear_data_fails_on_transport_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    // No mock mounted: wiremock answers 404, which is still a response,
    // so force a real connection failure by dropping the server.
    drop(server);

    let err = client.clear_data().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn upload_file_returns_extracted_addresses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "emails": ["a@example.com", "b@example.com", "a@example.com"],
        })))
        .mount(&server)
        .await;

    let extracted = client_for(&server)
        .upload_file("list.csv", b"Emails\na@example.com\n".to_vec())
        .await
        .unwrap();
    // Extraction is the service's job; duplicates come back untouched.
    assert_eq!(extracted.len(), 3);
}

#[tokio::test]
async fn upload_file_surfaces_unreadable_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "unsupported file format",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload_file("notes.txt", b"hello".to_vec())
        .await
        .unwrap_err();
    assert!(err.is_service_error());
    assert!(err.to_string().contains("unsupported file format"));
}

#[tokio::test]
async fn send_emails_encodes_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/send-emails"))
        .respond_with(move |request: &Request| {
            let body = String::from_utf8_lossy(&request.body);
            // Multipart field order and content, including the JSON-encoded
            // recipient list and the numbered attachment part.
            assert!(body.contains("name=\"subject\""));
            assert!(body.contains("Launch update"));
            assert!(body.contains("name=\"content\""));
            assert!(body.contains("name=\"emails\""));
            assert!(body.contains(r#"["a@example.com","b@example.com"]"#));
            assert!(body.contains("name=\"attachment0\""));
            assert!(body.contains("filename=\"notes.pdf\""));
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "sent": 2}))
        })
        .expect(1)
        .mount(&server)
        .await;

    let sent = client_for(&server)
        .send_emails(SendRequest {
            subject: "Launch update".to_string(),
            content: "The launch is on schedule.".to_string(),
            recipients: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            attachments: vec![FilePart {
                name: "notes.pdf".to_string(),
                bytes: vec![1, 2, 3],
            }],
        })
        .await
        .unwrap();
    assert_eq!(sent, 2);
}

#[tokio::test]
async fn send_emails_falls_back_to_recipient_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/send-emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let sent = client_for(&server)
        .send_emails(SendRequest {
            recipients: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sent, 2);
}

#[tokio::test]
async fn send_emails_surfaces_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/send-emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "smtp relay refused",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_emails(SendRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_service_error());
    assert!(err.to_string().contains("smtp relay refused"));
}

//! REST plumbing against a mock backend

use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use hris_client::error::GENERIC_FAILURE;
use hris_client::http::{FilePart, METHOD_OVERRIDE_FIELD};
use hris_client::resource::{self, Documents, Kasbons, Leaves};
use hris_client::session::{self, FileSessionStore};
use hris_client::{Alert, ClientConfig, ClientError, HttpClient, NetworkHttpClient};
use shared::access::{Action, Scope};
use shared::models::DocumentCreate;
use shared::types::RecordId;

fn client(server: &MockServer) -> NetworkHttpClient {
    ClientConfig::new(server.url("/api"))
        .build_http_client()
        .unwrap()
        .with_token("tok-123")
}

fn kasbon_json(id: i64, employee: i64) -> serde_json::Value {
    json!({
        "id": id,
        "employee_id": employee,
        "company_id": 3,
        "employee_name": "Dewi",
        "tanggal": "2025-05-02",
        "jumlah": "500000",
        "status": "pending"
    })
}

#[tokio::test]
async fn test_company_scope_sends_company_id_and_bearer() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/kasbon")
            .query_param("company_id", "3")
            .header("authorization", "Bearer tok-123");
        then.status(200)
            .json_body(json!({ "data": [kasbon_json(1, 10), kasbon_json(2, 11)] }));
    });

    let http = client(&server);
    let items = resource::fetch_list::<Kasbons, _>(&http, &Scope::Company(RecordId::from(3)))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].employee_id, Some(RecordId::from(11)));
}

#[tokio::test]
async fn test_own_scope_hits_me_and_accepts_bare_array() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/cuti/me");
        then.status(200).json_body(json!([{
            "id": "7",
            "employee_id": 10,
            "jenis_cuti": "tahunan",
            "tanggal_mulai": "2025-03-01",
            "tanggal_selesai": "2025-03-03",
            "status": "approve"
        }]));
    });

    let http = client(&server);
    let items = resource::fetch_list::<Leaves, _>(&http, &Scope::Mine).await.unwrap();

    mock.assert();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].days(), 3);
}

#[tokio::test]
async fn test_server_message_reaches_alert_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/kasbon/4");
        then.status(422)
            .json_body(json!({ "message": "Kasbon sudah dibayar" }));
    });

    let http = client(&server);
    let err = resource::delete::<Kasbons, _>(&http, &RecordId::from(4))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Server { status: 422, .. }));
    assert_eq!(Alert::failure(&err).message, "Kasbon sudah dibayar");
}

#[tokio::test]
async fn test_unreadable_error_body_uses_generic_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/kasbon");
        then.status(500).body("<html>Server Error</html>");
    });

    let http = client(&server);
    let err = resource::fetch_list::<Kasbons, _>(&http, &Scope::All)
        .await
        .unwrap_err();

    assert_eq!(err.alert_message(), GENERIC_FAILURE);
}

#[tokio::test]
async fn test_bare_401_is_unauthorized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/kasbon/me");
        then.status(401);
    });

    let http = client(&server);
    let err = resource::fetch_list::<Kasbons, _>(&http, &Scope::Mine)
        .await
        .unwrap_err();

    assert!(err.is_auth());
}

#[tokio::test]
async fn test_fetch_one_unwraps_data_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/kasbon/1")
            .header("authorization", "Bearer tok-123");
        then.status(200).json_body(json!({ "data": kasbon_json(1, 10) }));
    });

    let http = client(&server);
    let kasbon = resource::fetch_one::<Kasbons, _>(&http, &RecordId::from(1))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(kasbon.id, RecordId::from(1));
    assert_eq!(kasbon.employee_id, Some(RecordId::from(10)));
    assert_eq!(kasbon.employee_name.as_deref(), Some("Dewi"));
}

fn document_payload() -> DocumentCreate {
    DocumentCreate {
        company_id: Some(RecordId::from(1)),
        employee_id: Some(RecordId::from(10)),
        nama_dokumen: "Kontrak Kerja".into(),
    }
}

fn pdf_part() -> FilePart {
    FilePart {
        field: "file".into(),
        file_name: "kontrak.pdf".into(),
        mime: "application/pdf".into(),
        bytes: b"%PDF-1.4".to_vec(),
    }
}

#[tokio::test]
async fn test_create_with_file_posts_multipart() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/dokumen")
            .body_includes("name=\"nama_dokumen\"")
            .body_includes("Kontrak Kerja")
            .body_includes("name=\"file\"")
            .body_includes("filename=\"kontrak.pdf\"")
            .body_includes("%PDF-1.4");
        then.status(201).json_body(json!({ "message": "Dokumen ditambahkan" }));
    });

    let http = client(&server);
    let result =
        resource::create_with_files::<Documents, _>(&http, &document_payload(), vec![pdf_part()])
            .await;

    mock.assert();
    let alert = Alert::from_result(&result, "Dokumen disimpan");
    assert!(alert.is_success());
    assert_eq!(result.unwrap().message.as_deref(), Some("Dokumen ditambahkan"));
}

#[tokio::test]
async fn test_update_without_file_puts_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/api/dokumen/4").json_body(json!({
            "company_id": 1,
            "employee_id": 10,
            "nama_dokumen": "Kontrak Kerja"
        }));
        then.status(200).json_body(json!({ "message": "Dokumen diperbarui" }));
    });

    let http = client(&server);
    let response = resource::update::<Documents, _>(&http, &RecordId::from(4), &document_payload())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.message.as_deref(), Some("Dokumen diperbarui"));
}

#[tokio::test]
async fn test_update_with_file_posts_method_override() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/dokumen/4")
            .body_includes(format!("name=\"{METHOD_OVERRIDE_FIELD}\""))
            .body_includes("PUT")
            .body_includes("name=\"file\"")
            .body_includes("Kontrak Kerja");
        then.status(200).json_body(json!({ "message": "Dokumen diperbarui" }));
    });

    let http = client(&server);
    let response = resource::update_with_files::<Documents, _>(
        &http,
        &RecordId::from(4),
        &document_payload(),
        vec![pdf_part()],
    )
    .await
    .unwrap();

    mock.assert();
    assert_eq!(response.message.as_deref(), Some("Dokumen diperbarui"));
}

#[tokio::test]
async fn test_status_change_sends_wire_value() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/kasbon/9")
            .json_body(json!({ "status": "paid" }));
        then.status(200).body("");
    });

    let http = client(&server);
    let response = resource::set_status::<Kasbons, _>(&http, &RecordId::from(9), Action::Pay)
        .await
        .unwrap();

    mock.assert();
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_login_persists_session_and_logout_always_clears() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/login")
            .json_body(json!({ "email": "sari@example.com", "password": "rahasia" }));
        then.status(200).json_body(json!({
            "token": "tok-login",
            "user": { "id": 7, "name": "Sari", "role": "admin", "company_id": 2 }
        }));
    });
    let logout = server.mock(|when, then| {
        when.method(POST)
            .path("/api/logout")
            .header("authorization", "Bearer tok-login");
        then.status(500);
    });

    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path());
    let mut http = ClientConfig::new(server.url("/api")).build_http_client().unwrap();

    let session = session::login(&mut http, &store, "sari@example.com", "rahasia")
        .await
        .unwrap();
    login.assert();
    assert_eq!(http.token(), Some("tok-login"));
    assert_eq!(session.identity.company_id, Some(RecordId::from(2)));

    let restored = session::restore(&store).unwrap();
    assert_eq!(restored.identity, session.identity);

    session::logout(&mut http, &store).await.unwrap();
    logout.assert();
    assert!(http.token().is_none());
    assert!(matches!(session::restore(&store), Err(ClientError::Unauthorized)));
}

#[tokio::test]
async fn test_login_rejection_keeps_no_session() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/login");
        then.status(401)
            .json_body(json!({ "message": "Email atau password salah" }));
    });

    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(dir.path());
    let mut http = ClientConfig::new(server.url("/api")).build_http_client().unwrap();

    let err = session::login(&mut http, &store, "x@example.com", "salah")
        .await
        .unwrap_err();

    assert_eq!(err.alert_message(), "Email atau password salah");
    assert!(!store.exists());
    assert!(http.token().is_none());
}

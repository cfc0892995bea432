//! Screen flows end to end: list delete, master data, claim form, capture

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use httpmock::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use hris_client::capture::{
    Camera, CaptureError, CapturePurpose, CaptureSession, CaptureState, DeviceError, Facing,
    Frame, GeoFix, Locator, MediaStream, SubmitRequest,
};
use hris_client::forms::ClaimForm;
use hris_client::list_view::DELETE_SUCCESS;
use hris_client::resource::{self, Kasbons};
use hris_client::{ClientConfig, ClientError, ListView, MasterData, NetworkHttpClient};
use shared::access::Scope;
use shared::cascade::{CascadeState, DependentKind};
use shared::listing::ListFilter;
use shared::models::{Identity, KasbonCreate, PunchKind, Role};
use shared::types::RecordId;

fn client(server: &MockServer) -> NetworkHttpClient {
    ClientConfig::new(server.url("/api"))
        .build_http_client()
        .unwrap()
        .with_token("tok")
}

fn admin() -> Identity {
    Identity {
        id: RecordId::from(7),
        name: "Sari".into(),
        role: Role::Admin,
        company_id: Some(RecordId::from(1)),
        email: None,
    }
}

fn pegawai() -> Identity {
    Identity {
        id: RecordId::from(10),
        name: "Budi".into(),
        role: Role::Pegawai,
        company_id: Some(RecordId::from(1)),
        email: None,
    }
}

fn mock_kasbon_list(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/kasbon").query_param("company_id", "1");
        then.status(200).json_body(json!({ "data": [
            { "id": 1, "employee_id": 10, "employee_name": "Budi", "tanggal": "2025-05-02",
              "keperluan": "Transport", "status": "pending" },
            { "id": 2, "employee_id": 11, "employee_name": "Dewi", "tanggal": "2025-06-10",
              "keperluan": "Makan", "status": "approve" }
        ]}));
    });
}

// ---- list + delete ----

#[tokio::test]
async fn test_failed_delete_restores_row() {
    let server = MockServer::start();
    mock_kasbon_list(&server);
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/kasbon/1");
        then.status(500).json_body(json!({ "message": "Gagal menghapus data" }));
    });

    let http = client(&server);
    let mut view = ListView::<Kasbons>::new(admin().scope_query());
    assert_eq!(view.refresh(&http).await.unwrap(), 2);

    let id = RecordId::from(1);
    view.ask_delete(&id).unwrap();
    let alert = view.confirm_delete(&http).await;

    delete.assert();
    assert!(!alert.is_success());
    assert_eq!(alert.message, "Gagal menghapus data");
    assert!(view.contains(&id));
    assert_eq!(view.rows().len(), 2);
}

#[tokio::test]
async fn test_successful_delete_drops_row() {
    let server = MockServer::start();
    mock_kasbon_list(&server);
    server.mock(|when, then| {
        when.method(DELETE).path("/api/kasbon/2");
        then.status(200).json_body(json!({ "message": "ok" }));
    });

    let http = client(&server);
    let mut view = ListView::<Kasbons>::new(Scope::Company(RecordId::from(1)));
    view.refresh(&http).await.unwrap();

    let id = RecordId::from(2);
    view.ask_delete(&id).unwrap();
    let pending = view.begin_delete().unwrap();
    // Row is hidden while the request is in flight
    assert!(view.rows().iter().all(|row| row.id != pending));

    let result = resource::delete::<Kasbons, _>(&http, &pending).await;
    let alert = view.finish_delete(&pending, &result);

    assert!(alert.is_success());
    assert_eq!(alert.message, DELETE_SUCCESS);
    assert!(!view.contains(&id));
}

#[tokio::test]
async fn test_list_filter_runs_client_side() {
    let server = MockServer::start();
    mock_kasbon_list(&server);

    let http = client(&server);
    let mut view = ListView::<Kasbons>::new(admin().scope_query());
    view.refresh(&http).await.unwrap();

    view.set_filter(ListFilter::new().query("makan"));
    let rows = view.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, RecordId::from(2));

    view.set_filter(
        ListFilter::new().from(chrono::NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()).to(
            chrono::NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
        ),
    );
    assert_eq!(view.rows().len(), 1);
}

#[tokio::test]
async fn test_timestamp_dates_load_alongside_plain_dates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/kasbon").query_param("company_id", "1");
        then.status(200).json_body(json!({ "data": [
            { "id": 1, "employee_id": 10, "tanggal": "2025-05-02", "status": "pending" },
            { "id": 2, "employee_id": 11, "tanggal": "2025-05-03T00:00:00.000000Z",
              "status": "pending" }
        ]}));
    });

    let http = client(&server);
    let mut view = ListView::<Kasbons>::new(admin().scope_query());
    assert_eq!(view.refresh(&http).await.unwrap(), 2);

    let day = chrono::NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
    view.set_filter(ListFilter::new().from(day).to(day));
    let rows = view.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, RecordId::from(2));
}

// ---- master data ----

fn mock_master(server: &MockServer, failing: &str) {
    let bodies = [
        ("divisions", json!([{ "id": 1, "name": "Keuangan", "company_id": 1 }])),
        ("locations", json!([{ "id": 2, "name": "Kantor Pusat", "company_id": 1 }])),
        ("shifts", json!([{ "id": 3, "name": "Pagi", "company_id": 1 }])),
        (
            "categories",
            json!([
                { "id": 5, "name": "Transport", "company_id": 1, "jumlah": 500000 },
                { "id": 6, "name": "Makan", "company_id": 1, "jumlah": "200000" }
            ]),
        ),
        ("employees", json!([{ "id": 10, "name": "Budi", "company_id": 1 }])),
    ];
    server.mock(|when, then| {
        when.method(GET).path("/api/companies");
        then.status(200).json_body(json!({ "data": [{ "id": 1, "name": "PT Maju" }] }));
    });
    for (endpoint, body) in bodies {
        server.mock(|when, then| {
            when.method(GET)
                .path(format!("/api/{endpoint}"))
                .query_param("company_id", "1");
            if endpoint == failing {
                then.status(500);
            } else {
                then.status(200).json_body(body.clone());
            }
        });
    }
}

#[tokio::test]
async fn test_master_data_settles_each_collection_independently() {
    let server = MockServer::start();
    mock_master(&server, "divisions");

    let http = client(&server);
    let master = MasterData::load(&http, &admin()).await;

    assert!(master.divisions.is_empty());
    assert_eq!(master.companies.len(), 1);
    assert_eq!(master.locations.len(), 1);
    assert_eq!(master.categories.len(), 2);
    assert_eq!(master.employees.len(), 1);

    let cascade = CascadeState::for_identity(&admin());
    assert!(master.options(&cascade, DependentKind::Division).is_empty());
    let shifts = master.options(&cascade, DependentKind::Shift);
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].label, "Pagi");
}

// ---- claim form ----

#[tokio::test]
async fn test_kasbon_form_posts_derived_amounts() {
    let server = MockServer::start();
    mock_master(&server, "");
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/kasbon")
            .body_includes("\"employee_id\":10")
            .body_includes("\"category_id\":5");
        then.status(201).json_body(json!({ "message": "Kasbon dibuat" }));
    });

    let http = client(&server);
    let me = pegawai();
    let master = MasterData::load(&http, &me).await;

    let mut form = ClaimForm::for_identity(&me);
    form.select_category(&master, Some(&RecordId::from(5)));
    form.set_terpakai("125000");
    assert_eq!(form.total(), Some(Decimal::from(375_000)));
    assert_eq!(form.sisa(), Some(Decimal::from(375_000)));

    let payload = form
        .build(
            &me,
            KasbonCreate {
                tanggal: chrono::NaiveDate::from_ymd_opt(2025, 7, 1),
                keperluan: "Perjalanan dinas".into(),
                ..Default::default()
            },
        )
        .unwrap();
    let response = resource::create::<Kasbons, _>(&http, &payload).await.unwrap();

    create.assert();
    assert_eq!(response.message.as_deref(), Some("Kasbon dibuat"));
}

#[tokio::test]
async fn test_invalid_claim_never_reaches_server() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/kasbon");
        then.status(201);
    });

    let form = ClaimForm::for_identity(&pegawai());
    let err = form.build(&pegawai(), KasbonCreate::default()).unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(create.calls(), 0);
}

// ---- capture ----

struct StillStream {
    stopped: Arc<AtomicBool>,
}

impl MediaStream for StillStream {
    fn facing(&self) -> Facing {
        Facing::User
    }

    fn grab_frame(&mut self) -> Result<Frame, DeviceError> {
        Ok(Frame {
            width: 4,
            height: 4,
            rgba: vec![200; 4 * 4 * 4],
        })
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct StillCamera {
    stopped: Arc<AtomicBool>,
}

#[async_trait]
impl Camera for StillCamera {
    async fn acquire(&self, _facing: Facing) -> Result<Box<dyn MediaStream>, DeviceError> {
        Ok(Box::new(StillStream {
            stopped: self.stopped.clone(),
        }))
    }
}

struct FixedLocator(Option<GeoFix>);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<GeoFix, DeviceError> {
        self.0.ok_or(DeviceError::LocationDenied)
    }
}

fn jakarta() -> FixedLocator {
    FixedLocator(Some(GeoFix {
        latitude: -6.2,
        longitude: 106.8,
        accuracy: Some(12.0),
    }))
}

async fn captured(purpose: CapturePurpose, camera: &StillCamera) -> CaptureSession {
    let mut session = CaptureSession::new(purpose);
    session.start_camera(camera).await.unwrap();
    for _ in 0..purpose.required_shots() {
        session.capture().unwrap();
    }
    session
}

#[tokio::test]
async fn test_check_in_posts_photo_and_location() {
    let server = MockServer::start();
    let punch = server.mock(|when, then| {
        when.method(POST)
            .path("/api/absensi/check-in")
            .body_includes("name=\"foto_masuk\"")
            .body_includes("name=\"latitude\"")
            .body_includes("-6.2");
        then.status(200).json_body(json!({ "message": "Absen masuk berhasil" }));
    });

    let http = client(&server);
    let camera = StillCamera::default();
    let mut session = captured(CapturePurpose::Punch(PunchKind::CheckIn), &camera).await;
    assert!(camera.stopped.load(Ordering::SeqCst));

    let locator = jakarta();
    let request = SubmitRequest::new(RecordId::from(10))
        .company(Some(RecordId::from(1)))
        .locator(&locator);
    session.submit(&http, request).await.unwrap();

    punch.assert();
    assert_eq!(session.state(), CaptureState::Done);
}

#[tokio::test]
async fn test_failed_upload_keeps_photos_for_retry() {
    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(POST)
            .path("/api/face")
            .body_includes("name=\"photos[]\"");
        then.status(500).json_body(json!({ "message": "Wajah tidak terdeteksi" }));
    });

    let http = client(&server);
    let camera = StillCamera::default();
    let mut session = captured(CapturePurpose::FaceEnrollment, &camera).await;
    assert_eq!(session.photos().len(), 3);

    let err = session
        .submit(&http, SubmitRequest::new(RecordId::from(10)))
        .await
        .unwrap_err();

    upload.assert();
    assert_eq!(err.alert_message(), "Wajah tidak terdeteksi");
    assert_eq!(session.state(), CaptureState::Finished);
    assert_eq!(session.photos().len(), 3);
    assert!(session.can_submit());

    // Retake is not possible once finished
    let again = session.start_camera(&camera).await.unwrap_err();
    assert!(matches!(again, ClientError::Capture(CaptureError::Locked)));
}

#[tokio::test]
async fn test_cancelled_upload_can_be_retried() {
    let slow = MockServer::start();
    slow.mock(|when, then| {
        when.method(POST).path("/api/face");
        then.status(200).delay(Duration::from_secs(5));
    });
    let fast = MockServer::start();
    let upload = fast.mock(|when, then| {
        when.method(POST).path("/api/face");
        then.status(200).json_body(json!({ "message": "Wajah tersimpan" }));
    });

    let camera = StillCamera::default();
    let mut session = captured(CapturePurpose::FaceEnrollment, &camera).await;

    let cancelled = tokio::time::timeout(
        Duration::from_millis(200),
        session.submit(&client(&slow), SubmitRequest::new(RecordId::from(10))),
    )
    .await;
    assert!(cancelled.is_err());
    assert_eq!(session.state(), CaptureState::Finished);
    assert!(session.can_submit());

    session
        .submit(&client(&fast), SubmitRequest::new(RecordId::from(10)))
        .await
        .unwrap();
    upload.assert();
    assert_eq!(session.state(), CaptureState::Done);
}

#[tokio::test]
async fn test_location_denied_sends_nothing() {
    let server = MockServer::start();
    let punch = server.mock(|when, then| {
        when.method(POST).path("/api/dinas-luar/visit-in");
        then.status(200);
    });

    let http = client(&server);
    let camera = StillCamera::default();
    let mut session = captured(CapturePurpose::Punch(PunchKind::VisitIn), &camera).await;

    let denied = FixedLocator(None);
    let err = session
        .submit(&http, SubmitRequest::new(RecordId::from(10)).locator(&denied))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Device(DeviceError::LocationDenied)));
    assert_eq!(punch.calls(), 0);
    assert_eq!(session.state(), CaptureState::Finished);
}

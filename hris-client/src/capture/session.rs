//! Capture session state machine
//!
//! `Idle → CameraOn → Capturing(n) → Finished → Submitting → Done`, falling
//! back to `Finished` when the submit fails so the photos can be resent
//! without retaking them. Once `Finished` is reached the stream is released
//! and no further frames are accepted; a new session must be created.

use shared::models::PunchKind;
use shared::response::MutationResponse;
use shared::types::RecordId;

use super::device::{Camera, DeviceError, Facing, Locator, StreamGuard};
use super::frame::{JPEG_MIME, encode_jpeg};
use super::CaptureError;
use crate::http::{HttpClient, MultipartPayload};
use crate::resource::{Attendance, FACE_ENDPOINT, Resource, Visits};
use crate::ClientResult;

/// Multipart field carrying face-enrollment photos
pub const FACE_PHOTOS_FIELD: &str = "photos[]";

/// What the photos are for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePurpose {
    FaceEnrollment,
    Punch(PunchKind),
}

impl CapturePurpose {
    pub fn required_shots(&self) -> usize {
        match self {
            Self::FaceEnrollment => 3,
            Self::Punch(_) => 1,
        }
    }

    /// Punches are GPS-tagged; enrollment is not
    pub fn needs_location(&self) -> bool {
        matches!(self, Self::Punch(_))
    }

    /// Endpoint the photos are posted to
    pub fn endpoint(&self) -> String {
        match self {
            Self::FaceEnrollment => FACE_ENDPOINT.to_string(),
            Self::Punch(kind @ (PunchKind::CheckIn | PunchKind::CheckOut)) => {
                format!("{}/{}", Attendance::ENDPOINT, kind.path_segment())
            }
            Self::Punch(kind @ (PunchKind::VisitIn | PunchKind::VisitOut)) => {
                format!("{}/{}", Visits::ENDPOINT, kind.path_segment())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    CameraOn,
    /// `n` photos taken, more required
    Capturing(usize),
    /// All photos taken, camera released, save enabled
    Finished,
    Submitting,
    Done,
}

/// One encoded photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Scalar fields sent alongside the photos
pub struct SubmitRequest<'a> {
    pub employee_id: RecordId,
    pub company_id: Option<RecordId>,
    /// Required for punches
    pub locator: Option<&'a dyn Locator>,
    /// Extra form fields (e.g. visit destination)
    pub fields: Vec<(String, String)>,
}

impl<'a> SubmitRequest<'a> {
    pub fn new(employee_id: RecordId) -> Self {
        Self {
            employee_id,
            company_id: None,
            locator: None,
            fields: Vec::new(),
        }
    }

    pub fn company(mut self, company_id: Option<RecordId>) -> Self {
        self.company_id = company_id;
        self
    }

    pub fn locator(mut self, locator: &'a dyn Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug)]
pub struct CaptureSession {
    purpose: CapturePurpose,
    state: CaptureState,
    stream: Option<StreamGuard>,
    photos: Vec<CapturedPhoto>,
}

impl CaptureSession {
    pub fn new(purpose: CapturePurpose) -> Self {
        Self {
            purpose,
            state: CaptureState::Idle,
            stream: None,
            photos: Vec::new(),
        }
    }

    pub fn purpose(&self) -> CapturePurpose {
        self.purpose
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Save is enabled only once every shot is taken
    pub fn can_submit(&self) -> bool {
        self.state == CaptureState::Finished
    }

    /// Turn the camera on (front camera preferred)
    pub async fn start_camera(&mut self, camera: &dyn Camera) -> ClientResult<()> {
        match self.state {
            CaptureState::Idle => {}
            CaptureState::CameraOn | CaptureState::Capturing(_) => return Ok(()),
            CaptureState::Finished | CaptureState::Submitting | CaptureState::Done => {
                return Err(CaptureError::Locked.into());
            }
        }
        let stream = camera.acquire(Facing::User).await.inspect_err(|e| {
            tracing::warn!(error = %e, "camera unavailable");
        })?;
        self.stream = Some(StreamGuard::new(stream));
        self.state = CaptureState::CameraOn;
        Ok(())
    }

    /// Grab the current frame. Returns the number of photos taken so far.
    pub fn capture(&mut self) -> ClientResult<usize> {
        match self.state {
            CaptureState::CameraOn | CaptureState::Capturing(_) => {}
            CaptureState::Idle => return Err(CaptureError::CameraOff.into()),
            CaptureState::Finished | CaptureState::Submitting | CaptureState::Done => {
                return Err(CaptureError::Locked.into());
            }
        }
        let stream = self.stream.as_mut().ok_or(CaptureError::CameraOff)?;
        let frame = stream.grab_frame()?;
        let bytes = encode_jpeg(&frame, stream.facing() == Facing::User)?;

        let taken = self.photos.len() + 1;
        self.photos.push(CapturedPhoto {
            file_name: format!("capture-{taken}.jpg"),
            bytes,
        });

        if taken >= self.purpose.required_shots() {
            // Dropping the guard stops every track
            self.stream = None;
            self.state = CaptureState::Finished;
            tracing::debug!(taken, "capture finished");
        } else {
            self.state = CaptureState::Capturing(taken);
        }
        Ok(taken)
    }

    /// Release the camera without finishing
    pub fn stop_camera(&mut self) {
        self.stream = None;
        if matches!(self.state, CaptureState::CameraOn | CaptureState::Capturing(_)) {
            self.state = CaptureState::Idle;
            self.photos.clear();
        }
    }

    /// Send the photos with their scalar fields.
    ///
    /// Location is resolved first; a denial aborts before anything is sent.
    /// On failure or cancellation the session returns to `Finished` with its
    /// photos intact.
    pub async fn submit<C: HttpClient>(
        &mut self,
        http: &C,
        request: SubmitRequest<'_>,
    ) -> ClientResult<MutationResponse> {
        match self.state {
            CaptureState::Finished => {}
            CaptureState::Submitting => return Err(CaptureError::Busy.into()),
            CaptureState::Done => return Err(CaptureError::Locked.into()),
            CaptureState::Idle | CaptureState::CameraOn | CaptureState::Capturing(_) => {
                return Err(CaptureError::Incomplete {
                    expected: self.purpose.required_shots(),
                    taken: self.photos.len(),
                }
                .into());
            }
        }

        let payload = self.build_payload(&request).await?;
        let endpoint = self.purpose.endpoint();
        let in_flight = SubmitGuard::arm(&mut self.state);

        match http.post_multipart(&endpoint, payload).await {
            Ok(response) => {
                in_flight.settle(CaptureState::Done);
                tracing::info!(%endpoint, employee_id = %request.employee_id, "photos submitted");
                Ok(response)
            }
            Err(e) => {
                in_flight.settle(CaptureState::Finished);
                tracing::warn!(%endpoint, error = %e, "photo submission failed");
                Err(e)
            }
        }
    }

    async fn build_payload(&self, request: &SubmitRequest<'_>) -> ClientResult<MultipartPayload> {
        let mut payload =
            MultipartPayload::new().text("employee_id", request.employee_id.as_str());
        if let Some(company) = &request.company_id {
            payload = payload.text("company_id", company.as_str());
        }

        match self.purpose {
            CapturePurpose::FaceEnrollment => {
                for photo in &self.photos {
                    payload = payload.file(
                        FACE_PHOTOS_FIELD,
                        photo.file_name.clone(),
                        JPEG_MIME,
                        photo.bytes.clone(),
                    );
                }
            }
            CapturePurpose::Punch(kind) => {
                let locator = request.locator.ok_or_else(|| {
                    DeviceError::Unavailable("no location provider".into())
                })?;
                let fix = locator.locate().await.inspect_err(|e| {
                    tracing::warn!(error = %e, "location fix failed");
                })?;
                payload = payload
                    .text("latitude", fix.latitude.to_string())
                    .text("longitude", fix.longitude.to_string());
                if let Some(photo) = self.photos.first() {
                    payload = payload.file(
                        kind.photo_field(),
                        photo.file_name.clone(),
                        JPEG_MIME,
                        photo.bytes.clone(),
                    );
                }
            }
        }

        for (name, value) in &request.fields {
            payload = payload.text(name.clone(), value.clone());
        }
        Ok(payload)
    }
}

/// Holds a session in `Submitting` for the duration of an upload.
///
/// A cancelled upload drops the guard unsettled, which puts the session back
/// in `Finished` so it can be retried.
struct SubmitGuard<'a>(&'a mut CaptureState);

impl<'a> SubmitGuard<'a> {
    fn arm(state: &'a mut CaptureState) -> Self {
        *state = CaptureState::Submitting;
        Self(state)
    }

    fn settle(self, next: CaptureState) {
        *self.0 = next;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if *self.0 == CaptureState::Submitting {
            tracing::debug!("upload cancelled, session back to finished");
            *self.0 = CaptureState::Finished;
        }
    }
}

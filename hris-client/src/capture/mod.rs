//! Camera capture and photo submission
//!
//! - [`device`]: camera / geolocation traits and the stream guard
//! - [`frame`]: frame compositing and JPEG encoding
//! - [`session`]: the capture state machine and multipart submission

pub mod device;
pub mod frame;
pub mod session;

pub use device::{Camera, DeviceError, Facing, Frame, GeoFix, Locator, MediaStream, StreamGuard};
pub use frame::encode_jpeg;
pub use session::{CapturePurpose, CaptureSession, CaptureState, CapturedPhoto, SubmitRequest};

use thiserror::Error;

/// Misuse of the capture flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Capture is finished; open the form again to retake photos")]
    Locked,

    #[error("Camera is not on")]
    CameraOff,

    #[error("{taken} of {expected} photos taken")]
    Incomplete { expected: usize, taken: usize },

    #[error("Submission already in progress")]
    Busy,

    #[error("Invalid frame {width}x{height}")]
    InvalidFrame { width: u32, height: u32 },
}

//! Camera and geolocation seams
//!
//! The client never talks to hardware directly. A [`Camera`] hands out a
//! [`MediaStream`]; the stream is wrapped in a [`StreamGuard`] that stops
//! every track when dropped, so the device is released on every exit path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Device failures. Permission denials abort the whole action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("Camera permission denied")]
    CameraDenied,

    #[error("Location permission denied")]
    LocationDenied,

    #[error("Device unavailable: {0}")]
    Unavailable(String),
}

/// Which camera a stream comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Front camera, shown mirrored
    User,
    Environment,
}

/// One RGBA frame grabbed from a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// A live camera stream
pub trait MediaStream: Send {
    fn facing(&self) -> Facing;

    /// Current frame
    fn grab_frame(&mut self) -> Result<Frame, DeviceError>;

    /// Stop every track. Must be idempotent.
    fn stop(&mut self);
}

/// Camera access
#[async_trait]
pub trait Camera: Send + Sync {
    /// Acquire a stream, preferring `facing`
    async fn acquire(&self, facing: Facing) -> Result<Box<dyn MediaStream>, DeviceError>;
}

/// Owns a stream and stops it on drop
pub struct StreamGuard {
    stream: Box<dyn MediaStream>,
}

impl StreamGuard {
    pub fn new(stream: Box<dyn MediaStream>) -> Self {
        Self { stream }
    }

    pub fn facing(&self) -> Facing {
        self.stream.facing()
    }

    pub fn grab_frame(&mut self) -> Result<Frame, DeviceError> {
        self.stream.grab_frame()
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.stream.stop();
        tracing::debug!("camera stream stopped");
    }
}

impl std::fmt::Debug for StreamGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamGuard")
            .field("facing", &self.stream.facing())
            .finish()
    }
}

/// One-shot position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Geolocation access
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<GeoFix, DeviceError>;
}

//! Scoped camera acquisition
//!
//! Camera hardware is exclusive: once a capture session starts, the
//! underlying stream must be released on every exit path — successful
//! capture, explicit cancel, or teardown. [`CaptureSession`] makes
//! release explicit and idempotent; the drop guard is a backstop, not
//! the mechanism.

use crate::domain::ImageAsset;
use crate::infra::Result;

/// A camera device that can hand out frame streams.
///
/// Concrete devices live with embedders; the pipeline only needs the
/// acquire/grab/release contract.
pub trait CameraDevice: Send + Sync {
    fn open(&self) -> Result<Box<dyn FrameStream>>;
}

/// An open hardware stream. `shut_down` must be idempotent.
pub trait FrameStream: Send {
    /// Grab one frame from the stream.
    fn grab_frame(&mut self) -> Result<ImageAsset>;

    /// Release the underlying device.
    fn shut_down(&mut self);
}

/// Guard over an acquired camera stream.
pub struct CaptureSession {
    stream: Option<Box<dyn FrameStream>>,
}

impl CaptureSession {
    /// Acquire the device and start a session.
    pub fn start(device: &dyn CameraDevice) -> Result<Self> {
        let stream = device.open()?;
        Ok(Self {
            stream: Some(stream),
        })
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Grab one frame and release the device, mirroring the
    /// capture-then-stop flow of a one-shot photo session. The stream
    /// is released even when the grab fails.
    pub fn capture(&mut self) -> Result<ImageAsset> {
        let frame = match self.stream.as_mut() {
            Some(stream) => stream.grab_frame(),
            None => Err(crate::infra::MinterError::Capture(
                "capture session is not active".to_string(),
            )),
        };
        self.release();
        frame
    }

    /// Abandon the session without capturing.
    pub fn cancel(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.shut_down();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release();
    }
}

//! Camera capture surface
//!
//! The studio core consumes a camera the way the browser exposes one: open a
//! stream for a facing direction, grab a frame, close the stream. Opening can
//! fail (permission denied, no device); that failure is surfaced to the user
//! and retried by opening again, never treated as fatal.
//!
//! The stream is a scoped acquisition. [`CaptureSession`] owns the open
//! handle and closes it on drop, so every exit path (captured, cancelled,
//! errored) releases the device.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::{Artifact, Error, Result};

/// Which camera to open. Intake ID shots use the rear camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Rear camera
    #[default]
    Environment,
    /// Front camera
    User,
}

/// An opaque handle to one open camera stream, issued by the surface.
#[derive(Debug, PartialEq, Eq)]
pub struct StreamHandle(pub(crate) u64);

/// The external camera collaborator.
pub trait CameraSurface: Send + Sync {
    /// Acquire a stream. Fails with [`Error::CaptureUnavailable`] when the
    /// device is missing or permission is denied.
    fn open(&self, facing: Facing) -> Result<StreamHandle>;

    /// Grab one encoded frame from an open stream.
    fn capture(&self, handle: &StreamHandle) -> Result<Artifact>;

    /// Release the stream. Must be safe to call exactly once per handle.
    fn close(&self, handle: StreamHandle);
}

/// A scoped camera acquisition: holds the open stream and guarantees the
/// surface sees a matching `close`, whatever happens in between.
pub struct CaptureSession<'a> {
    surface: &'a dyn CameraSurface,
    handle: Option<StreamHandle>,
}

impl<'a> std::fmt::Debug for CaptureSession<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl<'a> CaptureSession<'a> {
    pub fn open(surface: &'a dyn CameraSurface, facing: Facing) -> Result<Self> {
        let handle = surface.open(facing)?;
        Ok(CaptureSession {
            surface,
            handle: Some(handle),
        })
    }

    /// Grab a frame from the held stream.
    pub fn capture(&self) -> Result<Artifact> {
        match &self.handle {
            Some(handle) => self.surface.capture(handle),
            None => Err(Error::CaptureFailed("Stream already closed".into())),
        }
    }

    /// Close eagerly instead of waiting for drop.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.surface.close(handle);
        }
    }
}

impl Drop for CaptureSession<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Default)]
struct CameraLedger {
    opens: u64,
    closes: u64,
    captures: u64,
    live: Vec<u64>,
}

/// An in-memory camera used by tests, the noop surface set, and the demo
/// driver. Serves a canned shot, can be told to deny access or fail capture,
/// and keeps a ledger of open/close pairs so release behavior is checkable.
pub struct ScriptedCamera {
    shot: Artifact,
    deny: Mutex<bool>,
    fail_capture: Mutex<bool>,
    ledger: Mutex<CameraLedger>,
    next_handle: AtomicU64,
}

impl ScriptedCamera {
    pub fn new(shot: Artifact) -> Self {
        ScriptedCamera {
            shot,
            deny: Mutex::new(false),
            fail_capture: Mutex::new(false),
            ledger: Mutex::new(CameraLedger::default()),
            next_handle: AtomicU64::new(1),
        }
    }

    /// A camera that refuses to open until [`ScriptedCamera::set_denied`]
    /// lifts the denial.
    pub fn denying(shot: Artifact) -> Self {
        let camera = ScriptedCamera::new(shot);
        *camera.deny.lock().unwrap() = true;
        camera
    }

    pub fn set_denied(&self, denied: bool) {
        *self.deny.lock().unwrap() = denied;
    }

    pub fn set_fail_capture(&self, fail: bool) {
        *self.fail_capture.lock().unwrap() = fail;
    }

    pub fn open_count(&self) -> u64 {
        self.ledger.lock().unwrap().opens
    }

    pub fn close_count(&self) -> u64 {
        self.ledger.lock().unwrap().closes
    }

    pub fn capture_count(&self) -> u64 {
        self.ledger.lock().unwrap().captures
    }

    /// Streams currently open; zero whenever the caller honored the release
    /// contract.
    pub fn live_streams(&self) -> usize {
        self.ledger.lock().unwrap().live.len()
    }
}

impl CameraSurface for ScriptedCamera {
    fn open(&self, _facing: Facing) -> Result<StreamHandle> {
        if *self.deny.lock().unwrap() {
            return Err(Error::CaptureUnavailable(
                "Camera permission was denied. Allow camera access and try again.".into(),
            ));
        }
        let id = self.next_handle.fetch_add(1, Ordering::Relaxed);
        let mut ledger = self.ledger.lock().unwrap();
        ledger.opens += 1;
        ledger.live.push(id);
        Ok(StreamHandle(id))
    }

    fn capture(&self, handle: &StreamHandle) -> Result<Artifact> {
        let mut ledger = self.ledger.lock().unwrap();
        if !ledger.live.contains(&handle.0) {
            return Err(Error::CaptureFailed("Stream is not open".into()));
        }
        if *self.fail_capture.lock().unwrap() {
            return Err(Error::CaptureFailed("Frame capture failed".into()));
        }
        ledger.captures += 1;
        Ok(self.shot.clone())
    }

    fn close(&self, handle: StreamHandle) {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.closes += 1;
        ledger.live.retain(|id| *id != handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot() -> Artifact {
        Artifact::from_bytes("image/jpeg", vec![42; 8])
    }

    #[test]
    fn capture_session_releases_on_success() {
        let camera = ScriptedCamera::new(shot());
        {
            let session = CaptureSession::open(&camera, Facing::Environment).unwrap();
            let frame = session.capture().unwrap();
            assert_eq!(frame, shot());
        }
        assert_eq!(camera.open_count(), 1);
        assert_eq!(camera.close_count(), 1);
        assert_eq!(camera.live_streams(), 0);
    }

    #[test]
    fn capture_session_releases_on_cancel_and_error() {
        let camera = ScriptedCamera::new(shot());

        // Cancel: open, never capture
        CaptureSession::open(&camera, Facing::Environment)
            .unwrap()
            .close();

        // Error: capture fails, guard still dropped
        camera.set_fail_capture(true);
        {
            let session = CaptureSession::open(&camera, Facing::Environment).unwrap();
            assert!(session.capture().is_err());
        }

        assert_eq!(camera.open_count(), 2);
        assert_eq!(camera.close_count(), 2);
        assert_eq!(camera.live_streams(), 0);
    }

    #[test]
    fn denied_open_surfaces_a_recoverable_error() {
        let camera = ScriptedCamera::denying(shot());
        let err = CaptureSession::open(&camera, Facing::Environment).unwrap_err();
        assert!(matches!(err, Error::CaptureUnavailable(_)));
        assert_eq!(camera.live_streams(), 0);

        // Granting access afterwards lets a retry succeed
        camera.set_denied(false);
        let session = CaptureSession::open(&camera, Facing::Environment).unwrap();
        assert!(session.capture().is_ok());
    }
}

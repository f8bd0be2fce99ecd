//! External collaborator surfaces: camera, signature pad, delivery
//!
//! The intake flow consumes hardware and transport it does not own. Each
//! collaborator is a trait with an in-memory implementation, so sessions can
//! run end to end in tests and in the demo driver without a browser, a
//! camera, or a mail server.

pub mod camera;
pub mod delivery;
pub mod signature;

pub use camera::{CameraSurface, CaptureSession, Facing, ScriptedCamera, StreamHandle};
pub use delivery::{DeliveryReceipt, DeliverySink, SimulatedCourier};
pub use signature::{SignaturePad, SignatureSurface};

use std::sync::Arc;

use crate::Artifact;

/// The bundle of collaborators one intake session talks to.
#[derive(Clone)]
pub struct StudioSurfaces {
    pub camera: Arc<dyn CameraSurface>,
    pub delivery: Arc<dyn DeliverySink>,
}

impl StudioSurfaces {
    pub fn new(camera: Arc<dyn CameraSurface>, delivery: Arc<dyn DeliverySink>) -> Self {
        StudioSurfaces { camera, delivery }
    }

    /// In-memory surfaces: a scripted camera serving a placeholder shot and
    /// an instant simulated courier. The safe default for tests and demos.
    pub fn noop() -> Self {
        let placeholder = Artifact::from_bytes("image/jpeg", b"placeholder-frame".to_vec());
        StudioSurfaces {
            camera: Arc::new(ScriptedCamera::new(placeholder)),
            delivery: Arc::new(SimulatedCourier::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_surfaces_capture_and_deliver() {
        let surfaces = StudioSurfaces::noop();
        let session = CaptureSession::open(surfaces.camera.as_ref(), Facing::Environment)
            .expect("noop camera should open");
        let frame = session.capture().expect("noop camera should capture");
        assert!(!frame.is_empty());
    }
}

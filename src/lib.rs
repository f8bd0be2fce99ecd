//! Corrupt Ink studio core
//!
//! The working parts of the studio's site, with the presentation stripped
//! away: the consent-and-release intake form (fields, acknowledgements,
//! captured evidence, validation, submission), the collaborator seams it
//! needs (camera, signature pad, delivery), the AI design studio contract,
//! and the static site content model.
//!
//! # Example
//!
//! ```
//! use corruptink::intake::{IntakeForm, SubmitOutcome, TextField};
//!
//! let mut form = IntakeForm::new();
//! form.set_text(TextField::FullName, "Jane Doe");
//!
//! // An incomplete form never submits; every problem is reported at once.
//! match form.submit() {
//!     SubmitOutcome::Invalid(report) => assert!(!report.is_ok()),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod artifact;
pub mod content;
pub mod designer;
pub mod intake;
pub mod session;
pub mod surface;

pub use artifact::Artifact;
pub use content::SiteContent;
pub use intake::IntakeForm;
pub use session::{IntakeSession, SessionStatus, SubmitAck};
pub use surface::StudioSurfaces;

/// Configuration for the studio core
///
/// Defaults describe the real shop; embedders override what they need.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Display name of the studio
    pub studio_name: String,
    /// Contact line shown in the footer and on receipts
    pub contact: String,
    /// Generative backend settings for the design studio
    #[cfg(feature = "designer")]
    pub designer: designer::DesignerConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            studio_name: "Corrupt Ink".to_string(),
            contact: "Tucson, AZ | (520) 554-8446 | corruptink@gmail.com".to_string(),
            #[cfg(feature = "designer")]
            designer: designer::DesignerConfig::default(),
        }
    }
}

/// The studio root: configuration plus injected content.
///
/// Hands out one fresh [`IntakeForm`] per client session; nothing persists
/// across sessions.
pub struct Studio {
    config: StudioConfig,
    content: SiteContent,
}

impl Studio {
    pub fn new(config: StudioConfig, content: SiteContent) -> Self {
        Studio { config, content }
    }

    /// Default configuration with the built-in seed content.
    pub fn with_defaults() -> Self {
        Studio::new(StudioConfig::default(), SiteContent::seed())
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// A fresh intake form for one client session.
    pub fn new_intake(&self) -> IntakeForm {
        IntakeForm::new()
    }

    /// The configured HTTP design studio.
    #[cfg(feature = "designer")]
    pub fn design_studio(&self) -> Result<designer::HttpDesignStudio> {
        designer::HttpDesignStudio::new(self.config.designer.clone())
    }
}

//! The booking flow: stage machine around the wizard session.
//!
//! A flow models one client's whole visit to the booking surface, from
//! the choosing screen through the wizard to submission or abandonment.
//! The wizard session only exists while the flow is in the form stage;
//! leaving the form discards it.

use serde::{Deserialize, Serialize};

use crate::design::FlashDesignRef;
use crate::draft::{BookingDraft, DraftUpdate};
use crate::entry::EntryPolicy;
use crate::error::CoreError;
use crate::fields::BookingOption;
use crate::image::ImageAttachment;
use crate::steps::WizardStep;
use crate::wizard::{PreviousOutcome, WizardSession};

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Where a flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Not booking. The only stage without an open flow on screen.
    Closed,
    /// The custom-or-flash choice screen.
    Choosing,
    /// The step wizard, regardless of how it was entered.
    CustomForm,
    /// Browsing the flash catalog, no design chosen yet.
    FlashGallery,
}

impl Stage {
    /// Convert to a wire-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Choosing => "choosing",
            Self::CustomForm => "custom-form",
            Self::FlashGallery => "flash-gallery",
        }
    }
}

/// Result of a flow-level `previous()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Moved back one step inside the wizard.
    MovedTo(WizardStep),
    /// Left the wizard at its entry boundary; the session is gone.
    ReturnedTo(Stage),
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// One client's booking flow.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    stage: Stage,
    session: Option<WizardSession>,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            stage: Stage::Closed,
            session: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn session(&self) -> Option<&WizardSession> {
        self.session.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(WizardSession::is_submitting)
    }

    /// Open the flow onto the choosing screen. Opening an already-open
    /// flow changes nothing, whatever stage it is in.
    pub fn open(&mut self) {
        if self.stage == Stage::Closed {
            self.stage = Stage::Choosing;
        }
    }

    /// Close the flow and discard any session and draft.
    pub fn close(&mut self) {
        self.stage = Stage::Closed;
        self.session = None;
    }

    /// From the choosing screen, either enter the wizard from scratch or
    /// go browse the flash catalog.
    pub fn select_option(&mut self, option: BookingOption) -> Result<Stage, CoreError> {
        if self.stage != Stage::Choosing {
            return Err(CoreError::Conflict(format!(
                "Cannot choose a booking option in stage '{}'",
                self.stage.as_str()
            )));
        }
        match option {
            BookingOption::Custom => {
                self.session = Some(WizardSession::new(EntryPolicy::custom()));
                self.stage = Stage::CustomForm;
            }
            BookingOption::Flash => {
                self.stage = Stage::FlashGallery;
            }
        }
        Ok(self.stage)
    }

    /// From the gallery, enter the wizard pre-seeded with the chosen
    /// design. The session starts at the size step.
    pub fn select_design(&mut self, design: FlashDesignRef) -> Result<(), CoreError> {
        if self.stage != Stage::FlashGallery {
            return Err(CoreError::Conflict(format!(
                "Cannot select a flash design in stage '{}'",
                self.stage.as_str()
            )));
        }
        self.session = Some(WizardSession::new(EntryPolicy::flash(design)));
        self.stage = Stage::CustomForm;
        Ok(())
    }

    fn wizard_mut(&mut self) -> Result<&mut WizardSession, CoreError> {
        match (self.stage, self.session.as_mut()) {
            (Stage::CustomForm, Some(session)) => Ok(session),
            _ => Err(CoreError::Conflict(
                "No wizard session is active".to_string(),
            )),
        }
    }

    // -- Wizard pass-through --

    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), CoreError> {
        self.wizard_mut()?.apply(update)
    }

    pub fn attach_image(&mut self, image: ImageAttachment) -> Result<usize, CoreError> {
        self.wizard_mut()?.attach_image(image)
    }

    pub fn detach_image(&mut self, index: usize) -> Result<(), CoreError> {
        self.wizard_mut()?.detach_image(index)
    }

    pub fn next(&mut self) -> Result<WizardStep, CoreError> {
        self.wizard_mut()?.next()
    }

    /// Step back, leaving the wizard when already at its entry boundary.
    /// A custom session returns to the choosing screen; a flash session
    /// returns to the gallery it came from. Either way the session and
    /// draft are discarded.
    pub fn previous(&mut self) -> Result<BackOutcome, CoreError> {
        match self.wizard_mut()?.previous()? {
            PreviousOutcome::MovedTo(step) => Ok(BackOutcome::MovedTo(step)),
            PreviousOutcome::AtEntryBoundary => {
                let from_flash = self
                    .session
                    .as_ref()
                    .and_then(|s| s.entry().linked_design())
                    .is_some();
                self.session = None;
                self.stage = if from_flash {
                    Stage::FlashGallery
                } else {
                    Stage::Choosing
                };
                Ok(BackOutcome::ReturnedTo(self.stage))
            }
        }
    }

    /// Validate, latch and snapshot the draft for submission.
    pub fn begin_submit(&mut self) -> Result<BookingDraft, CoreError> {
        self.wizard_mut()?.begin_submit()
    }

    /// Record the outcome of a submission attempt. Success is terminal
    /// and closes the flow; failure keeps the session, draft intact, so
    /// the client can retry.
    pub fn finish_submit(&mut self, created: bool) {
        if created {
            self.close();
        } else if let Some(session) = &mut self.session {
            session.finish_submit();
        }
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

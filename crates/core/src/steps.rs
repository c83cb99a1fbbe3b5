//! Wizard step definitions and validation.
//!
//! Defines the nine steps of the booking wizard in their fixed order, the
//! numeric conversions used on the wire, and the per-step validity
//! predicates that gate forward navigation and submission.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::draft::{BookingDraft, MAX_TEXT_LEN, MIN_PHONE_LEN};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The nine steps of the booking wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Idea,
    FirstReferenceImage,
    ExtraReferenceImages,
    Size,
    Placement,
    Availability,
    Identity,
    Allergies,
    Contact,
}

/// All steps, in order.
pub const ALL_STEPS: [WizardStep; 9] = [
    WizardStep::Idea,
    WizardStep::FirstReferenceImage,
    WizardStep::ExtraReferenceImages,
    WizardStep::Size,
    WizardStep::Placement,
    WizardStep::Availability,
    WizardStep::Identity,
    WizardStep::Allergies,
    WizardStep::Contact,
];

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 9;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 9;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Idea),
            2 => Ok(Self::FirstReferenceImage),
            3 => Ok(Self::ExtraReferenceImages),
            4 => Ok(Self::Size),
            5 => Ok(Self::Placement),
            6 => Ok(Self::Availability),
            7 => Ok(Self::Identity),
            8 => Ok(Self::Allergies),
            9 => Ok(Self::Contact),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Idea => 1,
            Self::FirstReferenceImage => 2,
            Self::ExtraReferenceImages => 3,
            Self::Size => 4,
            Self::Placement => 5,
            Self::Availability => 6,
            Self::Identity => 7,
            Self::Allergies => 8,
            Self::Contact => 9,
        }
    }

    /// The step after this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    /// The step before this one, if any.
    pub fn previous(self) -> Option<Self> {
        self.to_number().checked_sub(1).and_then(|n| Self::from_number(n).ok())
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idea => "Tattoo Idea",
            Self::FirstReferenceImage => "Reference Image",
            Self::ExtraReferenceImages => "Additional Reference Images",
            Self::Size => "Size",
            Self::Placement => "Placement",
            Self::Availability => "Availability",
            Self::Identity => "About You",
            Self::Allergies => "Allergies",
            Self::Contact => "Contact Information",
        }
    }

    /// The question a client answers on this step.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Idea => "Tell me more about your idea",
            Self::FirstReferenceImage => "Upload a reference image",
            Self::ExtraReferenceImages => "Upload additional reference images (Optional)",
            Self::Size => "What size tattoo are you thinking?",
            Self::Placement => "Where would you like your tattoo?",
            Self::Availability => "What days are you available?",
            Self::Identity => "About You",
            Self::Allergies => "Do you have any allergies we should know about?",
            Self::Contact => "Your Contact Information",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the draft against one step's predicate.
///
/// | step | predicate |
/// |------|-----------|
/// | 1 idea | non-empty and at most 250 characters |
/// | 2 first image | at least one reference image |
/// | 3 extra images | always valid |
/// | 4 size | selected |
/// | 5 placement | selected |
/// | 6 availability | at least one day |
/// | 7 identity | pronouns non-empty and age confirmed |
/// | 8 allergies | at most 250 characters (empty allowed) |
/// | 9 contact | names non-empty, email valid, phone at least 10 characters |
pub fn validate_step(draft: &BookingDraft, step: WizardStep) -> Result<(), CoreError> {
    match step {
        WizardStep::Idea => {
            if draft.idea().is_empty() {
                return Err(CoreError::Validation(
                    "Please describe your tattoo idea".to_string(),
                ));
            }
            if draft.idea().chars().count() > MAX_TEXT_LEN {
                return Err(CoreError::Validation(
                    "Please keep your description under 250 characters".to_string(),
                ));
            }
        }
        WizardStep::FirstReferenceImage => {
            if draft.reference_images().is_empty() {
                return Err(CoreError::Validation(
                    "Please upload at least one reference image".to_string(),
                ));
            }
        }
        WizardStep::ExtraReferenceImages => {
            // Extras are optional; the first-image requirement belongs to step 2.
        }
        WizardStep::Size => {
            if draft.size().is_none() {
                return Err(CoreError::Validation(
                    "Please select a tattoo size".to_string(),
                ));
            }
        }
        WizardStep::Placement => {
            if draft.placement().is_none() {
                return Err(CoreError::Validation(
                    "Please select a tattoo placement".to_string(),
                ));
            }
        }
        WizardStep::Availability => {
            if draft.available_days().is_empty() {
                return Err(CoreError::Validation(
                    "Please select at least one day you're available".to_string(),
                ));
            }
        }
        WizardStep::Identity => {
            if draft.pronouns().is_empty() {
                return Err(CoreError::Validation(
                    "Please enter your pronouns".to_string(),
                ));
            }
            if !draft.age_confirmed() {
                return Err(CoreError::Validation(
                    "You must be 18 or older to book a tattoo appointment".to_string(),
                ));
            }
        }
        WizardStep::Allergies => {
            if draft.allergies().chars().count() > MAX_TEXT_LEN {
                return Err(CoreError::Validation(
                    "Please keep your allergies description under 250 characters".to_string(),
                ));
            }
        }
        WizardStep::Contact => {
            if draft.first_name().is_empty() {
                return Err(CoreError::Validation("First name is required".to_string()));
            }
            if draft.last_name().is_empty() {
                return Err(CoreError::Validation("Last name is required".to_string()));
            }
            if !draft.email().validate_email() {
                return Err(CoreError::Validation("Invalid email address".to_string()));
            }
            if draft.phone().chars().count() < MIN_PHONE_LEN {
                return Err(CoreError::Validation(
                    "Phone number must be at least 10 digits".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Check whether the draft can leave the given step.
pub fn is_step_valid(draft: &BookingDraft, step: WizardStep) -> bool {
    validate_step(draft, step).is_ok()
}

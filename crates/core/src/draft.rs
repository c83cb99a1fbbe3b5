//! The booking draft: everything the wizard has collected so far.
//!
//! The draft is a plain accumulator. Only the wizard session mutates it,
//! so field writes stay crate-private; validation lives in [`crate::steps`]
//! and gates navigation, not writes. A draft may briefly hold values that
//! would fail its current step (an over-long idea mid-edit, for instance)
//! and that is fine until the client tries to advance.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::design::FlashDesignRef;
use crate::error::CoreError;
use crate::fields::{TattooPlacement, TattooSize, Weekday};
use crate::image::ImageAttachment;

/// Character cap on free-text fields (idea, allergies).
pub const MAX_TEXT_LEN: usize = 250;

/// Minimum character count for a contact phone number.
pub const MIN_PHONE_LEN: usize = 10;

/// Maximum reference images one draft may hold.
pub const MAX_REFERENCE_IMAGES: usize = 5;

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Accumulated answers for one booking request.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    idea: String,
    reference_images: Vec<ImageAttachment>,
    size: Option<TattooSize>,
    placement: Option<TattooPlacement>,
    available_days: BTreeSet<Weekday>,
    pronouns: String,
    age_confirmed: bool,
    allergies: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    linked_design: Option<FlashDesignRef>,
}

impl BookingDraft {
    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn reference_images(&self) -> &[ImageAttachment] {
        &self.reference_images
    }

    pub fn size(&self) -> Option<TattooSize> {
        self.size
    }

    pub fn placement(&self) -> Option<TattooPlacement> {
        self.placement
    }

    pub fn available_days(&self) -> &BTreeSet<Weekday> {
        &self.available_days
    }

    pub fn pronouns(&self) -> &str {
        &self.pronouns
    }

    pub fn age_confirmed(&self) -> bool {
        self.age_confirmed
    }

    pub fn allergies(&self) -> &str {
        &self.allergies
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn linked_design(&self) -> Option<&FlashDesignRef> {
        self.linked_design.as_ref()
    }

    // -- Mutation (wizard session only) --

    /// Write one field. Writes always land; step predicates decide later
    /// whether the draft can advance.
    pub(crate) fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::Idea { text } => self.idea = text,
            DraftUpdate::Size { size } => self.size = Some(size),
            DraftUpdate::Placement { placement } => self.placement = Some(placement),
            DraftUpdate::AvailableDays { days } => self.available_days = days,
            DraftUpdate::Pronouns { text } => self.pronouns = text,
            DraftUpdate::AgeConfirmed { confirmed } => self.age_confirmed = confirmed,
            DraftUpdate::Allergies { text } => self.allergies = text,
            DraftUpdate::Contact {
                first_name,
                last_name,
                email,
                phone,
            } => {
                self.first_name = first_name;
                self.last_name = last_name;
                self.email = email;
                self.phone = phone;
            }
        }
    }

    /// Append a reference image. Returns its index within the draft.
    pub(crate) fn attach_image(&mut self, image: ImageAttachment) -> Result<usize, CoreError> {
        if self.reference_images.len() >= MAX_REFERENCE_IMAGES {
            return Err(CoreError::Validation(format!(
                "A booking can include at most {MAX_REFERENCE_IMAGES} reference images"
            )));
        }
        self.reference_images.push(image);
        Ok(self.reference_images.len() - 1)
    }

    /// Remove the reference image at `index`, shifting later images down.
    pub(crate) fn detach_image(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.reference_images.len() {
            return Err(CoreError::Validation(format!(
                "No reference image at index {index} (draft holds {})",
                self.reference_images.len()
            )));
        }
        self.reference_images.remove(index);
        Ok(())
    }

    /// Link a flash design and seed the idea text from its title.
    ///
    /// Called once, on a fresh draft, when the flow enters through the
    /// flash gallery.
    pub(crate) fn link_design(&mut self, design: FlashDesignRef) {
        self.idea = design.seeded_idea();
        self.linked_design = Some(design);
    }
}

// ---------------------------------------------------------------------------
// Update commands
// ---------------------------------------------------------------------------

/// A single field write, tagged by field name on the wire.
///
/// ```json
/// { "field": "idea", "text": "Minimalist line work on forearm" }
/// { "field": "available_days", "days": ["Monday", "Friday"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum DraftUpdate {
    Idea {
        text: String,
    },
    Size {
        size: TattooSize,
    },
    Placement {
        placement: TattooPlacement,
    },
    AvailableDays {
        days: BTreeSet<Weekday>,
    },
    Pronouns {
        text: String,
    },
    AgeConfirmed {
        confirmed: bool,
    },
    Allergies {
        text: String,
    },
    Contact {
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
    },
}

/// A draft that passes every step predicate, for tests across the crate.
#[cfg(test)]
pub(crate) fn complete_draft() -> BookingDraft {
    use crate::image::test_png;

    let mut draft = BookingDraft::default();
    draft.apply(DraftUpdate::Idea {
        text: "Minimalist line work on forearm".to_string(),
    });
    draft
        .attach_image(test_png("forearm-sketch.png"))
        .expect("attach within cap");
    draft.apply(DraftUpdate::Size {
        size: TattooSize::ThreeToFiveInches,
    });
    draft.apply(DraftUpdate::Placement {
        placement: TattooPlacement::Arms,
    });
    draft.apply(DraftUpdate::AvailableDays {
        days: [Weekday::Monday, Weekday::Friday].into_iter().collect(),
    });
    draft.apply(DraftUpdate::Pronouns {
        text: "she/her".to_string(),
    });
    draft.apply(DraftUpdate::AgeConfirmed { confirmed: true });
    draft.apply(DraftUpdate::Allergies {
        text: String::new(),
    });
    draft.apply(DraftUpdate::Contact {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "5551234567".to_string(),
    });
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::test_png as png;

    // -- apply --

    #[test]
    fn apply_writes_each_field() {
        let mut draft = BookingDraft::default();
        draft.apply(DraftUpdate::Idea {
            text: "Minimalist line work on forearm".to_string(),
        });
        draft.apply(DraftUpdate::Size {
            size: TattooSize::ThreeToFiveInches,
        });
        draft.apply(DraftUpdate::Placement {
            placement: TattooPlacement::Arms,
        });
        draft.apply(DraftUpdate::AvailableDays {
            days: [Weekday::Monday, Weekday::Friday].into_iter().collect(),
        });
        draft.apply(DraftUpdate::Pronouns {
            text: "she/her".to_string(),
        });
        draft.apply(DraftUpdate::AgeConfirmed { confirmed: true });
        draft.apply(DraftUpdate::Contact {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "5551234567".to_string(),
        });

        assert_eq!(draft.idea(), "Minimalist line work on forearm");
        assert_eq!(draft.size(), Some(TattooSize::ThreeToFiveInches));
        assert_eq!(draft.placement(), Some(TattooPlacement::Arms));
        assert_eq!(draft.available_days().len(), 2);
        assert_eq!(draft.pronouns(), "she/her");
        assert!(draft.age_confirmed());
        assert_eq!(draft.allergies(), "");
        assert_eq!(draft.email(), "jane@example.com");
        assert_eq!(draft.phone(), "5551234567");
    }

    #[test]
    fn apply_overwrites_previous_value() {
        let mut draft = BookingDraft::default();
        draft.apply(DraftUpdate::Size {
            size: TattooSize::Other,
        });
        draft.apply(DraftUpdate::Size {
            size: TattooSize::OneToTwoInches,
        });
        assert_eq!(draft.size(), Some(TattooSize::OneToTwoInches));
    }

    // -- images --

    #[test]
    fn attach_returns_index_and_respects_cap() {
        let mut draft = BookingDraft::default();
        for i in 0..MAX_REFERENCE_IMAGES {
            assert_eq!(draft.attach_image(png(&format!("{i}.png"))).unwrap(), i);
        }
        assert!(draft.attach_image(png("one-too-many.png")).is_err());
    }

    #[test]
    fn detach_removes_by_index() {
        let mut draft = BookingDraft::default();
        draft.attach_image(png("a.png")).unwrap();
        draft.attach_image(png("b.png")).unwrap();
        draft.attach_image(png("c.png")).unwrap();

        draft.detach_image(1).unwrap();
        let names: Vec<&str> = draft
            .reference_images()
            .iter()
            .map(|img| img.file_name())
            .collect();
        assert_eq!(names, vec!["a.png", "c.png"]);

        assert!(draft.detach_image(2).is_err());
    }

    // -- design linking --

    #[test]
    fn link_design_seeds_idea() {
        let mut draft = BookingDraft::default();
        draft.link_design(FlashDesignRef {
            id: 7,
            title: "Serpent and Dagger".to_string(),
            price: 180.0,
        });
        assert_eq!(draft.idea(), "Flash design: Serpent and Dagger");
        assert_eq!(draft.linked_design().unwrap().id, 7);
    }

    // -- wire format --

    #[test]
    fn update_deserializes_from_tagged_json() {
        let update: DraftUpdate =
            serde_json::from_str(r#"{ "field": "idea", "text": "Koi sleeve" }"#).unwrap();
        assert!(matches!(update, DraftUpdate::Idea { ref text } if text == "Koi sleeve"));

        let update: DraftUpdate = serde_json::from_str(
            r#"{ "field": "available_days", "days": ["Friday", "Monday"] }"#,
        )
        .unwrap();
        match update {
            DraftUpdate::AvailableDays { days } => {
                assert_eq!(
                    days.into_iter().collect::<Vec<_>>(),
                    vec![Weekday::Monday, Weekday::Friday]
                );
            }
            other => panic!("wrong variant: {other:?}"),
        }

        let update: DraftUpdate =
            serde_json::from_str(r#"{ "field": "age_confirmed", "confirmed": true }"#).unwrap();
        assert!(matches!(update, DraftUpdate::AgeConfirmed { confirmed: true }));
    }

    #[test]
    fn update_rejects_unknown_field_tag() {
        let result: Result<DraftUpdate, _> =
            serde_json::from_str(r#"{ "field": "instagram", "text": "@ink" }"#);
        assert!(result.is_err());
    }
}

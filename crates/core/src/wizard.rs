//! The wizard session: one client's walk through the booking steps.
//!
//! A session owns the draft and is the only writer to it. Navigation is
//! gated by the step predicates in [`crate::steps`], and a submission in
//! flight freezes the session until it resolves. All transitions are
//! serialized by the caller holding `&mut self`; the session itself only
//! has to guard against re-entrant submits.

use crate::draft::{BookingDraft, DraftUpdate, MAX_TEXT_LEN};
use crate::entry::EntryPolicy;
use crate::error::CoreError;
use crate::image::ImageAttachment;
use crate::steps::{validate_step, WizardStep};
use crate::types::Timestamp;

/// Result of a `previous()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousOutcome {
    /// Moved back one step.
    MovedTo(WizardStep),
    /// Already on the entry step; the flow decides what "back" means here.
    AtEntryBoundary,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A live wizard session.
#[derive(Debug, Clone)]
pub struct WizardSession {
    entry: EntryPolicy,
    current: WizardStep,
    draft: BookingDraft,
    submitting: bool,
    opened_at: Timestamp,
}

impl WizardSession {
    /// Start a session under the given entry policy.
    pub fn new(entry: EntryPolicy) -> Self {
        let draft = entry.seed_draft();
        let current = entry.start();
        Self {
            entry,
            current,
            draft,
            submitting: false,
            opened_at: chrono::Utc::now(),
        }
    }

    pub fn entry(&self) -> &EntryPolicy {
        &self.entry
    }

    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// Reject mutation while a submission is in flight. Reads stay open.
    fn ensure_mutable(&self) -> Result<(), CoreError> {
        if self.submitting {
            return Err(CoreError::Conflict(
                "A submission is in flight; the session is read-only until it resolves"
                    .to_string(),
            ));
        }
        Ok(())
    }

    // -- Draft writes --

    /// Write one draft field. Writes always land regardless of the current
    /// step; predicates apply when navigating, not when typing.
    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), CoreError> {
        self.ensure_mutable()?;
        self.draft.apply(update);
        Ok(())
    }

    /// Attach a reference image. Returns its index within the draft.
    pub fn attach_image(&mut self, image: ImageAttachment) -> Result<usize, CoreError> {
        self.ensure_mutable()?;
        self.draft.attach_image(image)
    }

    /// Detach the reference image at `index`.
    pub fn detach_image(&mut self, index: usize) -> Result<(), CoreError> {
        self.ensure_mutable()?;
        self.draft.detach_image(index)
    }

    // -- Navigation --

    /// Advance one step. Fails without moving when the current step's
    /// predicate does not hold, and on the final step, where submit is the
    /// only way forward.
    pub fn next(&mut self) -> Result<WizardStep, CoreError> {
        self.ensure_mutable()?;
        validate_step(&self.draft, self.current)?;
        match self.current.next() {
            Some(next) => {
                self.current = next;
                Ok(next)
            }
            None => Err(CoreError::Conflict(
                "Already on the final step; submit to finish".to_string(),
            )),
        }
    }

    /// Go back one step, or report the entry boundary when already on the
    /// starting step. Going back never requires the current step to be
    /// valid.
    pub fn previous(&mut self) -> Result<PreviousOutcome, CoreError> {
        self.ensure_mutable()?;
        if self.current == self.entry.start() {
            return Ok(PreviousOutcome::AtEntryBoundary);
        }
        match self.current.previous() {
            Some(prev) if prev >= self.entry.start() => {
                self.current = prev;
                Ok(PreviousOutcome::MovedTo(prev))
            }
            // Clamp: never step below the entry boundary.
            _ => Ok(PreviousOutcome::AtEntryBoundary),
        }
    }

    // -- Submission latch --

    /// Validate every required step, latch the session and hand back a
    /// draft snapshot for the submission pipeline.
    ///
    /// The full sweep runs even though forward navigation already checked
    /// each step once: back-navigation lets a client edit an earlier field
    /// and return without re-passing `next()`.
    pub fn begin_submit(&mut self) -> Result<BookingDraft, CoreError> {
        if self.submitting {
            return Err(CoreError::Conflict(
                "A submission is already in flight for this session".to_string(),
            ));
        }
        if self.current != WizardStep::Contact {
            return Err(CoreError::Conflict(
                "Submit is only available on the final step".to_string(),
            ));
        }
        for step in self.entry.required_steps() {
            validate_step(&self.draft, step)?;
        }
        // A skipped idea step still caps the text length if it was edited.
        if self.entry.is_skipped(WizardStep::Idea)
            && self.draft.idea().chars().count() > MAX_TEXT_LEN
        {
            return Err(CoreError::Validation(
                "Please keep your description under 250 characters".to_string(),
            ));
        }
        self.submitting = true;
        Ok(self.draft.clone())
    }

    /// Release the submission latch after the attempt resolves.
    ///
    /// On success the owning flow discards the whole session; this exists
    /// for the failure path, where the draft survives for a retry.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::FlashDesignRef;
    use crate::draft::DraftUpdate;
    use crate::fields::{TattooPlacement, TattooSize, Weekday};
    use crate::image::test_png;
    use assert_matches::assert_matches;

    fn moth() -> FlashDesignRef {
        FlashDesignRef {
            id: 12,
            title: "Moth".to_string(),
            price: 140.0,
        }
    }

    /// Apply the fields steps 4-9 need. Steps 1-3 are image/idea work the
    /// individual tests set up themselves when required.
    fn fill_later_steps(session: &mut WizardSession) {
        session
            .apply(DraftUpdate::Size {
                size: TattooSize::ThreeToFiveInches,
            })
            .unwrap();
        session
            .apply(DraftUpdate::Placement {
                placement: TattooPlacement::Arms,
            })
            .unwrap();
        session
            .apply(DraftUpdate::AvailableDays {
                days: [Weekday::Monday, Weekday::Friday].into_iter().collect(),
            })
            .unwrap();
        session
            .apply(DraftUpdate::Pronouns {
                text: "she/her".to_string(),
            })
            .unwrap();
        session
            .apply(DraftUpdate::AgeConfirmed { confirmed: true })
            .unwrap();
        session
            .apply(DraftUpdate::Contact {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "5551234567".to_string(),
            })
            .unwrap();
    }

    fn custom_session_at_contact() -> WizardSession {
        let mut session = WizardSession::new(EntryPolicy::custom());
        session
            .apply(DraftUpdate::Idea {
                text: "Minimalist line work on forearm".to_string(),
            })
            .unwrap();
        session.attach_image(test_png("sketch.png")).unwrap();
        fill_later_steps(&mut session);
        for _ in 0..8 {
            session.next().unwrap();
        }
        assert_eq!(session.current_step(), WizardStep::Contact);
        session
    }

    // -- navigation --

    #[test]
    fn custom_walk_visits_all_nine_steps() {
        let mut session = WizardSession::new(EntryPolicy::custom());
        assert_eq!(session.current_step(), WizardStep::Idea);

        session
            .apply(DraftUpdate::Idea {
                text: "Koi sleeve".to_string(),
            })
            .unwrap();
        session.attach_image(test_png("koi.png")).unwrap();
        fill_later_steps(&mut session);

        let mut visited = vec![session.current_step()];
        for _ in 0..8 {
            visited.push(session.next().unwrap());
        }
        let numbers: Vec<u8> = visited.iter().map(|s| s.to_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn next_blocked_by_failing_predicate_leaves_state_unchanged() {
        let mut session = WizardSession::new(EntryPolicy::custom());
        let err = session.next().unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(session.current_step(), WizardStep::Idea);
    }

    #[test]
    fn next_past_final_step_is_a_conflict() {
        let mut session = custom_session_at_contact();
        let err = session.next().unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
        assert_eq!(session.current_step(), WizardStep::Contact);
    }

    #[test]
    fn previous_reports_boundary_at_entry_step() {
        let mut session = WizardSession::new(EntryPolicy::custom());
        assert_eq!(
            session.previous().unwrap(),
            PreviousOutcome::AtEntryBoundary
        );
        assert_eq!(session.current_step(), WizardStep::Idea);
    }

    #[test]
    fn previous_does_not_require_current_step_valid() {
        let mut session = WizardSession::new(EntryPolicy::custom());
        session
            .apply(DraftUpdate::Idea {
                text: "Koi".to_string(),
            })
            .unwrap();
        session.next().unwrap();
        // No image attached, step 2 predicate fails, but back still works.
        assert_eq!(
            session.previous().unwrap(),
            PreviousOutcome::MovedTo(WizardStep::Idea)
        );
    }

    // -- flash entry --

    #[test]
    fn flash_session_starts_at_size_with_seeded_idea() {
        let session = WizardSession::new(EntryPolicy::flash(moth()));
        assert_eq!(session.current_step(), WizardStep::Size);
        assert_eq!(session.draft().idea(), "Flash design: Moth");
        assert_eq!(session.draft().linked_design().unwrap().id, 12);
    }

    #[test]
    fn flash_boundary_is_the_size_step() {
        let mut session = WizardSession::new(EntryPolicy::flash(moth()));
        assert_eq!(
            session.previous().unwrap(),
            PreviousOutcome::AtEntryBoundary
        );

        session
            .apply(DraftUpdate::Size {
                size: TattooSize::OneToTwoInches,
            })
            .unwrap();
        session.next().unwrap();
        assert_eq!(
            session.previous().unwrap(),
            PreviousOutcome::MovedTo(WizardStep::Size)
        );
        assert_eq!(
            session.previous().unwrap(),
            PreviousOutcome::AtEntryBoundary
        );
    }

    #[test]
    fn flash_submit_needs_no_idea_or_images() {
        let mut session = WizardSession::new(EntryPolicy::flash(moth()));
        fill_later_steps(&mut session);
        for _ in 0..5 {
            session.next().unwrap();
        }
        assert_eq!(session.current_step(), WizardStep::Contact);

        let draft = session.begin_submit().unwrap();
        assert!(draft.reference_images().is_empty());
        assert_eq!(draft.linked_design().unwrap().title, "Moth");
    }

    #[test]
    fn flash_edited_idea_still_capped() {
        let mut session = WizardSession::new(EntryPolicy::flash(moth()));
        fill_later_steps(&mut session);
        session
            .apply(DraftUpdate::Idea {
                text: "x".repeat(MAX_TEXT_LEN + 1),
            })
            .unwrap();
        for _ in 0..5 {
            session.next().unwrap();
        }
        let err = session.begin_submit().unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert!(!session.is_submitting());
    }

    // -- submission latch --

    #[test]
    fn begin_submit_only_on_final_step() {
        let mut session = WizardSession::new(EntryPolicy::custom());
        let err = session.begin_submit().unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn begin_submit_sweeps_all_required_steps() {
        let mut session = custom_session_at_contact();
        // Back-navigation mutation: blank the idea without re-running next().
        session
            .apply(DraftUpdate::Idea {
                text: String::new(),
            })
            .unwrap();
        let err = session.begin_submit().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Please describe your tattoo idea"
        );
        assert!(!session.is_submitting());
    }

    #[test]
    fn begin_submit_latches_and_freezes_the_session() {
        let mut session = custom_session_at_contact();
        let draft = session.begin_submit().unwrap();
        assert_eq!(draft.first_name(), "Jane");
        assert!(session.is_submitting());

        assert_matches!(session.begin_submit(), Err(CoreError::Conflict(_)));
        assert_matches!(
            session.apply(DraftUpdate::AgeConfirmed { confirmed: false }),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(session.next(), Err(CoreError::Conflict(_)));
        assert_matches!(session.previous(), Err(CoreError::Conflict(_)));

        session.finish_submit();
        assert!(!session.is_submitting());
        assert_matches!(session.begin_submit(), Ok(_));
    }

    #[test]
    fn draft_survives_a_failed_attempt() {
        let mut session = custom_session_at_contact();
        let _ = session.begin_submit().unwrap();
        session.finish_submit();
        assert_eq!(session.draft().first_name(), "Jane");
        assert_eq!(session.current_step(), WizardStep::Contact);
    }
}

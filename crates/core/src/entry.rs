//! Entry policies: how a wizard session starts.
//!
//! The wizard is entered either from scratch (a custom request) or from a
//! chosen flash design. An entry policy captures everything that differs
//! between the two: the starting step, the steps skipped outright, and the
//! values seeded into the fresh draft. The skip set and the submission
//! sweep both read the same policy, which keeps "skipped steps are never
//! required" a structural fact rather than a convention.

use std::collections::BTreeSet;

use crate::design::FlashDesignRef;
use crate::draft::BookingDraft;
use crate::steps::{WizardStep, ALL_STEPS};

/// How a wizard session was entered.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPolicy {
    start: WizardStep,
    skipped: BTreeSet<WizardStep>,
    linked_design: Option<FlashDesignRef>,
}

impl EntryPolicy {
    /// Entry for a custom request: start at step 1, nothing skipped.
    pub fn custom() -> Self {
        Self {
            start: WizardStep::Idea,
            skipped: BTreeSet::new(),
            linked_design: None,
        }
    }

    /// Entry from a chosen flash design: the idea and reference-image
    /// steps are answered by the design itself, so the session starts at
    /// the size step with steps 1-3 skipped.
    pub fn flash(design: FlashDesignRef) -> Self {
        Self {
            start: WizardStep::Size,
            skipped: ALL_STEPS
                .into_iter()
                .filter(|step| *step < WizardStep::Size)
                .collect(),
            linked_design: Some(design),
        }
    }

    /// The step a fresh session opens on.
    pub fn start(&self) -> WizardStep {
        self.start
    }

    /// The flash design this entry came from, if any.
    pub fn linked_design(&self) -> Option<&FlashDesignRef> {
        self.linked_design.as_ref()
    }

    /// Whether the step is skipped under this policy.
    pub fn is_skipped(&self, step: WizardStep) -> bool {
        self.skipped.contains(&step)
    }

    /// Steps the submission sweep must validate, in order.
    pub fn required_steps(&self) -> impl Iterator<Item = WizardStep> + '_ {
        ALL_STEPS
            .into_iter()
            .filter(move |step| !self.is_skipped(*step))
    }

    /// A fresh draft with this policy's seed values applied.
    pub fn seed_draft(&self) -> BookingDraft {
        let mut draft = BookingDraft::default();
        if let Some(design) = &self.linked_design {
            draft.link_design(design.clone());
        }
        draft
    }
}

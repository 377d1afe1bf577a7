// Wizard state: immutable snapshots and the reducer that moves between them

use crate::confirmation::BookingConfirmation;
use crate::draft::{BookingDraft, DraftField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Browse,
    Booking,
    Confirmation,
}

// The confirmation lives inside its stage, so it exists exactly when the
// wizard is on the confirmation step
#[derive(Debug, Clone, PartialEq)]
enum Stage {
    Browse,
    Booking,
    Confirmed(BookingConfirmation),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BookNow,
    Input { field: DraftField, value: String },
    SubmitStarted,
    SubmitSucceeded(BookingConfirmation),
    SubmitFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingState {
    stage: Stage,
    draft: BookingDraft,
    loading: bool,
    error: Option<String>,
}

impl Default for BookingState {
    fn default() -> Self {
        Self {
            stage: Stage::Browse,
            draft: BookingDraft::default(),
            loading: false,
            error: None,
        }
    }
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        match self.stage {
            Stage::Browse => WizardStep::Browse,
            Stage::Booking => WizardStep::Booking,
            Stage::Confirmed(_) => WizardStep::Confirmation,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Inline error banner on the booking step
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match &self.stage {
            Stage::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    // Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.stage == Stage::Booking && !self.loading
    }
}

// Produces the next snapshot. Actions that do not apply to the current
// step (or arrive while a submission is in flight) return it unchanged.
pub fn reduce(state: &BookingState, action: Action) -> BookingState {
    match (&state.stage, action) {
        (Stage::Browse, Action::BookNow) => BookingState {
            stage: Stage::Booking,
            error: None,
            ..state.clone()
        },
        (Stage::Booking, Action::Input { field, value }) if !state.loading => BookingState {
            draft: state.draft.with_input(field, &value),
            ..state.clone()
        },
        (Stage::Booking, Action::SubmitStarted) if !state.loading => BookingState {
            loading: true,
            error: None,
            ..state.clone()
        },
        (Stage::Booking, Action::SubmitSucceeded(confirmation)) if state.loading => BookingState {
            stage: Stage::Confirmed(confirmation),
            loading: false,
            error: None,
            ..state.clone()
        },
        (Stage::Booking, Action::SubmitFailed(message)) if state.loading => BookingState {
            loading: false,
            error: Some(message),
            ..state.clone()
        },
        (_, action) => {
            tracing::debug!("Ignoring {:?} on {:?} step", action, state.step());
            state.clone()
        }
    }
}

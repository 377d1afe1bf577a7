// Booking session: the wizard controller tying draft, validator and submitter together

use crate::config::{BookingConfig, ConfigError};
use crate::confirmation::BookingConfirmation;
use crate::draft::DraftField;
use crate::hotel::{Hotel, PriceQuote};
use crate::payload::BookingRequest;
use crate::submitter::{BookingSubmitter, MockSubmitter, RemoteSubmitter, SubmissionError};
use crate::validator::{validate, ValidationError};
use crate::wizard::{reduce, Action, BookingState};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Booking failed: {0}")]
    Submission(#[from] SubmissionError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Confirmed(BookingConfirmation),
    // Submit control was disabled: wrong step or a submission already in flight
    Ignored,
}

// Blocking pop-up notices
pub trait Notifier: Send + Sync + 'static {
    fn alert(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

// One booking session, from browsing to confirmation.
// There is no way back to the browse step: start over by building a new
// session. The snapshot is only locked for state transitions, never across
// the network call.
pub struct BookingSession {
    state: Mutex<BookingState>,
    hotel: Hotel,
    quote: PriceQuote,
    config: BookingConfig,
    submitter: Arc<dyn BookingSubmitter>,
    notifier: Arc<dyn Notifier>,
}

impl BookingSession {
    pub fn new(
        config: BookingConfig,
        submitter: Arc<dyn BookingSubmitter>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let hotel = Hotel::default();
        let quote = hotel.quote(config.tax_rate_percent)?;
        Ok(Self {
            state: Mutex::new(BookingState::new()),
            hotel,
            quote,
            config,
            submitter,
            notifier,
        })
    }

    pub fn remote(config: BookingConfig) -> Result<Self, ConfigError> {
        let submitter = Arc::new(RemoteSubmitter::new(&config)?);
        Self::new(config, submitter, Arc::new(TracingNotifier))
    }

    pub fn mock(config: BookingConfig) -> Result<Self, ConfigError> {
        let submitter = Arc::new(MockSubmitter::new(&config));
        Self::new(config, submitter, Arc::new(TracingNotifier))
    }

    // Fails when the listing's price cannot be quoted at the configured rate
    pub fn with_hotel(mut self, hotel: Hotel) -> Result<Self, ConfigError> {
        self.quote = hotel.quote(self.config.tax_rate_percent)?;
        self.hotel = hotel;
        Ok(self)
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn quote(&self) -> PriceQuote {
        self.quote
    }

    pub fn snapshot(&self) -> BookingState {
        self.state.lock().clone()
    }

    pub fn book_now(&self) -> BookingState {
        self.dispatch(Action::BookNow)
    }

    pub fn input(&self, field: DraftField, value: impl Into<String>) -> BookingState {
        self.dispatch(Action::Input {
            field,
            value: value.into(),
        })
    }

    // Validates the draft and, if it passes, makes one submission attempt.
    // Returns `Ignored` without contacting the submitter when the submit
    // control is disabled. Failures raise an alert; submission failures
    // also set the inline error and leave the wizard on the booking step.
    pub async fn submit(&self) -> Result<SubmitOutcome, BookingError> {
        let request = {
            let mut state = self.state.lock();
            if !state.can_submit() {
                tracing::debug!(
                    "Submit ignored on {:?} step (loading={})",
                    state.step(),
                    state.is_loading()
                );
                return Ok(SubmitOutcome::Ignored);
            }

            let validated = match validate(state.draft(), self.config.require_email) {
                Ok(validated) => validated,
                Err(e) => {
                    drop(state);
                    tracing::info!("Booking blocked by validation: {:?}", e);
                    self.notifier.alert(&e.to_string());
                    return Err(e.into());
                }
            };

            *state = reduce(&state, Action::SubmitStarted);
            BookingRequest::new(
                validated,
                &self.hotel,
                self.quote,
                self.config.number_of_rooms,
            )
        };

        match self.submitter.submit(&request).await {
            Ok(confirmation) => {
                tracing::info!(
                    "Booking {} confirmed ({:?})",
                    confirmation.booking_id,
                    confirmation.origin
                );
                self.dispatch(Action::SubmitSucceeded(confirmation.clone()));
                Ok(SubmitOutcome::Confirmed(confirmation))
            }
            Err(e) => {
                tracing::error!("Booking failed: {}", e);
                self.dispatch(Action::SubmitFailed(e.to_string()));
                let err = BookingError::from(e);
                self.notifier.alert(&err.to_string());
                Err(err)
            }
        }
    }

    fn dispatch(&self, action: Action) -> BookingState {
        let mut state = self.state.lock();
        *state = reduce(&state, action);
        state.clone()
    }
}

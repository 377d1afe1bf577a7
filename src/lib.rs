// Hotel booking wizard: browse a listing, fill in the booking form, get a confirmation

pub mod config;
pub mod confirmation;
pub mod draft;
pub mod hotel;
pub mod payload;
pub mod session;
pub mod submitter;
pub mod validator;
pub mod wizard;

// Re-export key types for convenience
pub use config::{BookingConfig, ConfigError};
pub use confirmation::{display_date, BookingConfirmation, ConfirmationOrigin};
pub use draft::{BookingDraft, DraftField};
pub use hotel::{Hotel, PriceQuote, PricingError};
pub use payload::{ApiBookingPayload, BookingRequest, MockBookingRecord};
pub use session::{BookingError, BookingSession, Notifier, SubmitOutcome, TracingNotifier};
pub use submitter::{BookingSubmitter, MockSubmitter, RemoteSubmitter, SubmissionError};
pub use validator::{validate, ValidatedDraft, ValidationError};
pub use wizard::{reduce, Action, BookingState, WizardStep};

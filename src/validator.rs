// Required-field gate in front of the booking submitter

use crate::draft::{BookingDraft, DraftField};
use chrono::NaiveDate;
use thiserror::Error;

pub const REQUIRED_FIELDS_NOTICE: &str = "Please fill all required fields";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill all required fields")]
    MissingFields(Vec<DraftField>),

    #[error("Check-out date {check_out} is before check-in date {check_in}")]
    InvalidStayRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

// A draft that passed validation, with the required fields unwrapped
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub guest_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u8,
}

pub fn validate(
    draft: &BookingDraft,
    require_email: bool,
) -> Result<ValidatedDraft, ValidationError> {
    let mut missing = Vec::new();

    if is_blank(&draft.guest_name) {
        missing.push(DraftField::GuestName);
    }
    if is_blank(&draft.phone) {
        missing.push(DraftField::Phone);
    }
    if require_email && is_blank(&draft.email) {
        missing.push(DraftField::Email);
    }

    let (check_in, check_out) = match (draft.check_in, draft.check_out) {
        (Some(check_in), Some(check_out)) if missing.is_empty() => (check_in, check_out),
        (check_in, check_out) => {
            if check_in.is_none() {
                missing.push(DraftField::CheckIn);
            }
            if check_out.is_none() {
                missing.push(DraftField::CheckOut);
            }
            return Err(ValidationError::MissingFields(missing));
        }
    };

    if check_out < check_in {
        return Err(ValidationError::InvalidStayRange {
            check_in,
            check_out,
        });
    }

    let email = draft.email.trim();
    Ok(ValidatedDraft {
        guest_name: draft.guest_name.trim().to_string(),
        phone: draft.phone.trim().to_string(),
        email: (!email.is_empty()).then(|| email.to_string()),
        check_in,
        check_out,
        guests: draft.guests,
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// Booking draft: the form data being filled in on the booking step

use chrono::NaiveDate;
use std::fmt;

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    GuestName,
    Phone,
    Email,
    CheckIn,
    CheckOut,
    Guests,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::GuestName => "Full Name",
            DraftField::Phone => "Phone Number",
            DraftField::Email => "Email",
            DraftField::CheckIn => "Check-In Date",
            DraftField::CheckOut => "Check-Out Date",
            DraftField::Guests => "Guests",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub guest_name: String,
    pub phone: String,
    pub email: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u8,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            guest_name: String::new(),
            phone: String::new(),
            email: String::new(),
            check_in: None,
            check_out: None,
            guests: MIN_GUESTS,
        }
    }
}

impl BookingDraft {
    // Returns a copy of the draft with one field replaced by raw form input.
    // Dates are read as `YYYY-MM-DD`; anything else clears the date, the
    // same as an emptied date picker. Guest counts are clamped to 1-4 and
    // non-numeric input leaves the count unchanged.
    pub fn with_input(&self, field: DraftField, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            DraftField::GuestName => next.guest_name = value.to_string(),
            DraftField::Phone => next.phone = value.to_string(),
            DraftField::Email => next.email = value.to_string(),
            DraftField::CheckIn => next.check_in = parse_date_input(value),
            DraftField::CheckOut => next.check_out = parse_date_input(value),
            DraftField::Guests => match parse_guest_count(value) {
                Some(count) => next.guests = count,
                None => {
                    tracing::debug!("Ignoring non-numeric guest count {:?}", value);
                }
            },
        }
        next
    }
}

// Any integer clamps into 1-4, however large; None only for non-numeric text
fn parse_guest_count(value: &str) -> Option<u8> {
    let value = value.trim();
    let digits = value.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = value.parse::<i64>().unwrap_or(if value.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    });
    Some(count.clamp(i64::from(MIN_GUESTS), i64::from(MAX_GUESTS)) as u8)
}

fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("Clearing unparseable date input {:?}: {}", value, e);
            None
        }
    }
}

// Booking confirmation and the parser for the booking API's response body

use crate::payload::{BookingRequest, MockBookingRecord};
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

// Shapes are tried in this order; the last entry is the body itself
const WRAPPER_KEYS: [&str; 2] = ["booking", "confirmation"];

const ID_KEYS: [&str; 3] = ["booking_id", "bookingId", "id"];
const NAME_KEYS: [&str; 2] = ["guest_name", "guestName"];
const PHONE_KEYS: [&str; 2] = ["phone", "phoneNumber"];
const CHECK_IN_KEYS: [&str; 2] = ["check_in_date", "checkIn"];
const CHECK_OUT_KEYS: [&str; 2] = ["check_out_date", "checkOut"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfirmationOrigin {
    // Built from the booking object returned by the API
    Server,
    // Built locally from the submitted request
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub guest_name: String,
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u8,
    pub total_price: u32,
    pub origin: ConfirmationOrigin,
}

impl BookingConfirmation {
    pub fn synthesize(request: &BookingRequest, booking_id: String) -> Self {
        Self {
            booking_id,
            guest_name: request.draft.guest_name.clone(),
            phone: request.draft.phone.clone(),
            check_in: request.draft.check_in,
            check_out: request.draft.check_out,
            guests: request.draft.guests,
            total_price: request.quote.total,
            origin: ConfirmationOrigin::Synthesized,
        }
    }

    pub fn check_in_notice(&self) -> String {
        format!("Self Check-In Link has been sent to {}.", self.phone)
    }
}

impl From<MockBookingRecord> for BookingConfirmation {
    fn from(record: MockBookingRecord) -> Self {
        Self {
            booking_id: record.booking_id,
            guest_name: record.guest_name,
            phone: record.phone,
            check_in: record.check_in_date,
            check_out: record.check_out_date,
            guests: record.guests,
            total_price: record.total_price,
            origin: ConfirmationOrigin::Synthesized,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Response body is not a JSON object")]
    NotAnObject,

    #[error("No booking confirmation found in response")]
    NoConfirmation,
}

// Reads a confirmation out of a successful response body.
// Looks at `booking`, then `confirmation`, then the top-level object, and
// takes the first one carrying any known confirmation field. Fields the
// server leaves out come from the request; a missing id is generated.
pub fn parse_confirmation(
    body: &Value,
    request: &BookingRequest,
    id_prefix: &str,
) -> Result<BookingConfirmation, ShapeError> {
    let root = body.as_object().ok_or(ShapeError::NotAnObject)?;

    let candidate = WRAPPER_KEYS
        .iter()
        .filter_map(|key| root.get(*key).and_then(Value::as_object))
        .chain(std::iter::once(root))
        .find(|object| has_known_field(object))
        .ok_or(ShapeError::NoConfirmation)?;

    let booking_id = first_id(candidate).unwrap_or_else(|| {
        tracing::warn!("Booking response carried no id, generating one");
        generate_booking_id(id_prefix)
    });

    Ok(BookingConfirmation {
        booking_id,
        guest_name: first_str(candidate, &NAME_KEYS)
            .unwrap_or_else(|| request.draft.guest_name.clone()),
        phone: first_str(candidate, &PHONE_KEYS).unwrap_or_else(|| request.draft.phone.clone()),
        check_in: first_date(candidate, &CHECK_IN_KEYS).unwrap_or(request.draft.check_in),
        check_out: first_date(candidate, &CHECK_OUT_KEYS).unwrap_or(request.draft.check_out),
        guests: request.draft.guests,
        total_price: request.quote.total,
        origin: ConfirmationOrigin::Server,
    })
}

// Successful responses always produce a confirmation; an absent or
// unrecognised body falls back to one synthesized from the request
pub fn confirmation_from_response(
    body: Option<&Value>,
    request: &BookingRequest,
    id_prefix: &str,
) -> BookingConfirmation {
    let parsed = match body {
        Some(body) => parse_confirmation(body, request, id_prefix),
        None => Err(ShapeError::NoConfirmation),
    };

    parsed.unwrap_or_else(|e| {
        tracing::warn!("Synthesizing confirmation locally: {}", e);
        BookingConfirmation::synthesize(request, generate_booking_id(id_prefix))
    })
}

// Prefix followed by five random digits, e.g. OYO48213
pub fn generate_booking_id(prefix: &str) -> String {
    let digits: u32 = rand::thread_rng().gen_range(10000..=99999);
    format!("{}{}", prefix, digits)
}

// Date as shown on the confirmation screen, e.g. "2 Nov 2026"
pub fn display_date(date: &NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn has_known_field(object: &Map<String, Value>) -> bool {
    ID_KEYS
        .iter()
        .chain(NAME_KEYS.iter())
        .chain(PHONE_KEYS.iter())
        .chain(CHECK_IN_KEYS.iter())
        .chain(CHECK_OUT_KEYS.iter())
        .any(|key| object.get(*key).map_or(false, |v| !v.is_null()))
}

fn first_id(object: &Map<String, Value>) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn first_str(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        object
            .get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    })
}

fn first_date(object: &Map<String, Value>, keys: &[&str]) -> Option<NaiveDate> {
    let raw = first_str(object, keys)?;
    let parsed = parse_response_date(&raw);
    if parsed.is_none() {
        tracing::warn!("Ignoring unparseable date {:?} in booking response", raw);
    }
    parsed
}

fn parse_response_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

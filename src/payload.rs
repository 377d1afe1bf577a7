// Request payloads for the booking submitter
// The HTTP API takes a camelCase body; the mock path works with a snake_case record

use crate::hotel::{Hotel, PriceQuote};
use crate::validator::ValidatedDraft;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Everything a submitter needs for one attempt
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub draft: ValidatedDraft,
    pub hotel_id: String,
    pub quote: PriceQuote,
    pub number_of_rooms: u32,
}

impl BookingRequest {
    pub fn new(
        draft: ValidatedDraft,
        hotel: &Hotel,
        quote: PriceQuote,
        number_of_rooms: u32,
    ) -> Self {
        Self {
            draft,
            hotel_id: hotel.id.clone(),
            quote,
            number_of_rooms,
        }
    }

    pub fn api_payload(&self) -> ApiBookingPayload {
        ApiBookingPayload {
            guest_name: self.draft.guest_name.clone(),
            hotel_id: self.hotel_id.clone(),
            check_in: iso_midnight_utc(self.draft.check_in),
            check_out: iso_midnight_utc(self.draft.check_out),
            number_of_guests: u32::from(self.draft.guests),
            number_of_rooms: self.number_of_rooms,
            phone_number: self.draft.phone.clone(),
            email: self.draft.email.clone(),
            total_price: self.quote.total,
        }
    }

    pub fn mock_record(&self, booking_id: String) -> MockBookingRecord {
        MockBookingRecord {
            booking_id,
            guest_name: self.draft.guest_name.clone(),
            phone: self.draft.phone.clone(),
            check_in_date: self.draft.check_in,
            check_out_date: self.draft.check_out,
            guests: self.draft.guests,
            total_price: self.quote.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBookingPayload {
    pub guest_name: String,
    pub hotel_id: String,
    pub check_in: String,
    pub check_out: String,
    pub number_of_guests: u32,
    pub number_of_rooms: u32,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub total_price: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockBookingRecord {
    pub booking_id: String,
    pub guest_name: String,
    pub phone: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: u8,
    pub total_price: u32,
}

// Date-only input sent as an instant: 2026-11-02 -> 2026-11-02T00:00:00.000Z
pub fn iso_midnight_utc(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

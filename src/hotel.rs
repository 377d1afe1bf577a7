// Static hotel listing and the price quote shown on the booking form

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub const MAX_TAX_RATE_PERCENT: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Tax rate must be between 0 and 100 percent, got {0}")]
    InvalidTaxRate(u32),

    #[error("Total for room price {room_price} at {tax_rate_percent}% does not fit in a quote")]
    Overflow {
        room_price: u32,
        tax_rate_percent: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    // Whole rupees per night
    pub nightly_price: u32,
    pub rating: f32,
    pub image_url: String,
}

impl Hotel {
    // The single listing offered by the demo flow
    pub fn sayonara() -> Self {
        Self {
            id: "Hotel Sayonara".to_string(),
            name: "Hotel Sayonara".to_string(),
            location: "Connaught Place, New Delhi".to_string(),
            nightly_price: 1499,
            rating: 4.2,
            image_url: "https://images.unsplash.com/photo-1618773928121-c32242e63f39\
                        ?auto=format&fit=crop&w=800&q=80"
                .to_string(),
        }
    }

    pub fn quote(&self, tax_rate_percent: u32) -> Result<PriceQuote, PricingError> {
        PriceQuote::new(self.nightly_price, tax_rate_percent)
    }
}

impl Default for Hotel {
    fn default() -> Self {
        Self::sayonara()
    }
}

// Room price plus taxes. The same rate drives the tax line and the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub room_price: u32,
    pub tax_rate_percent: u32,
    pub taxes: u32,
    pub total: u32,
}

impl PriceQuote {
    pub fn new(room_price: u32, tax_rate_percent: u32) -> Result<Self, PricingError> {
        if tax_rate_percent > MAX_TAX_RATE_PERCENT {
            return Err(PricingError::InvalidTaxRate(tax_rate_percent));
        }

        // Rounds half up; u64 holds price * rate for any u32 price
        let scaled = u64::from(room_price) * u64::from(tax_rate_percent);
        let taxes = (scaled + 50) / 100;
        let overflow = PricingError::Overflow {
            room_price,
            tax_rate_percent,
        };
        let total = u32::try_from(u64::from(room_price) + taxes).map_err(|_| overflow)?;

        Ok(Self {
            room_price,
            tax_rate_percent,
            // taxes <= total, so it fits once total does
            taxes: taxes as u32,
            total,
        })
    }

    pub fn tax_label(&self) -> String {
        format!("Taxes ({}%)", self.tax_rate_percent)
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Room Price: {}", format_rupees(self.room_price))?;
        writeln!(f, "{}: {}", self.tax_label(), format_rupees(self.taxes))?;
        write!(f, "Total: {}", format_rupees(self.total))
    }
}

pub fn format_rupees(amount: u32) -> String {
    format!("₹{}", amount)
}

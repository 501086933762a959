//! Percentage markup applied to provider prices
//!
//! Markup is applied after the request pipeline returns, so the cache always
//! holds pre-markup data and a markup change takes effect without
//! invalidating any cached entries.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::diamond::{Diamond, SearchPage};

/// Pricing markup configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Percentage added on top of the wholesale price; must be >= 0
    pub markup_percent: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            markup_percent: 10.0,
        }
    }
}

impl PricingConfig {
    pub fn new(markup_percent: f64) -> Self {
        Self {
            markup_percent: markup_percent.max(0.0),
        }
    }

    /// Applies the markup to one stone
    ///
    /// The wholesale price is preserved under `original_price`; stones
    /// without a price pass through unchanged. Rounding is half-up to two
    /// decimals, done in decimal arithmetic so the result matches currency
    /// display expectations exactly.
    pub fn apply_to(&self, mut diamond: Diamond) -> Diamond {
        if let Some(price) = diamond.price
            && let Some(adjusted) = marked_up(price, self.markup_percent)
        {
            diamond.original_price = Some(price);
            diamond.price = Some(adjusted);
        }

        diamond
    }

    /// Applies the markup to every priced stone in a result page
    pub fn apply_to_page(&self, page: SearchPage) -> SearchPage {
        SearchPage {
            items: page.items.into_iter().map(|d| self.apply_to(d)).collect(),
            total_count: page.total_count,
            page_info: page.page_info,
        }
    }
}

fn marked_up(price: f64, markup_percent: f64) -> Option<f64> {
    let price = Decimal::from_f64(price)?;
    let percent = Decimal::from_f64(markup_percent)?;

    apply_markup(price, percent).to_f64()
}

fn apply_markup(price: Decimal, percent: Decimal) -> Decimal {
    let factor = Decimal::ONE + percent / Decimal::ONE_HUNDRED;

    (price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

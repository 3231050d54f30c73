//! Three-currency pricing from a source unit cost.
//!
//! The customer-facing EUR price is the anchor: the raw EUR figure is passed
//! through [`marketing_round`] exactly once, and the published CNY and XAF
//! prices are derived from that rounded value so every currency agrees to the
//! cent.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sawei_core::{AppConfig, ComputedPrices, Currency, FxRates, Money, PriceDisplay, Pricing};
use serde_json::Value;

use crate::error::PriceError;

/// Fixed CFA franc parity: 1 EUR = 655.957 XAF.
pub const EUR_TO_XAF: Decimal = Decimal::from_parts(655_957, 0, 0, false, 3);

pub const DEFAULT_EUR_PER_CNY: Decimal = Decimal::from_parts(13, 0, 0, false, 2);

pub const DEFAULT_MARGIN: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

const QUARTER: Decimal = Decimal::from_parts(25, 0, 0, false, 2);
const THREE_QUARTERS: Decimal = Decimal::from_parts(75, 0, 0, false, 2);
const HALF: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
const NINETY_NINE: Decimal = Decimal::from_parts(99, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// EUR value of one unit of the source currency.
    pub eur_per_source_unit: Decimal,
    /// Fractional margin, e.g. `0.10` for ten percent.
    pub margin: Decimal,
    pub eur_to_xaf: Decimal,
    pub source_currency: Currency,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            eur_per_source_unit: DEFAULT_EUR_PER_CNY,
            margin: DEFAULT_MARGIN,
            eur_to_xaf: EUR_TO_XAF,
            source_currency: Currency::Cny,
        }
    }
}

/// Unrounded prices straight from the pricing formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPrices {
    pub eur: Decimal,
    pub cny: Decimal,
    pub xaf: Decimal,
}

impl PricingPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            eur_per_source_unit: config.eur_per_cny,
            margin: config.margin,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] when a formula overflows `Decimal`.
    pub fn raw_prices(&self, cost: Decimal) -> Result<RawPrices, PriceError> {
        let out_of_range = || PriceError::OutOfRange(cost);
        let markup = Decimal::ONE
            .checked_add(self.margin)
            .ok_or_else(out_of_range)?;
        let eur = cost
            .checked_mul(self.eur_per_source_unit)
            .and_then(|v| v.checked_mul(markup))
            .ok_or_else(out_of_range)?;
        Ok(RawPrices {
            eur,
            cny: cost.checked_mul(markup).ok_or_else(out_of_range)?,
            xaf: eur.checked_mul(self.eur_to_xaf).ok_or_else(out_of_range)?,
        })
    }

    /// Price one product from its source unit cost.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NonPositive`] for a zero or negative cost,
    /// [`PriceError::InvalidRate`] when the policy's exchange rate is not
    /// positive and [`PriceError::OutOfRange`] when the cost is too large to
    /// price.
    pub fn price(&self, cost: Decimal) -> Result<Pricing, PriceError> {
        if cost <= Decimal::ZERO {
            return Err(PriceError::NonPositive(cost));
        }
        if self.eur_per_source_unit <= Decimal::ZERO {
            return Err(PriceError::InvalidRate(self.eur_per_source_unit));
        }

        let out_of_range = || PriceError::OutOfRange(cost);
        let raw = self.raw_prices(cost)?;
        // Leaves headroom for the +0.99 price point.
        if raw.eur >= Decimal::MAX - Decimal::ONE {
            return Err(out_of_range());
        }
        let eur = marketing_round(raw.eur);
        let cny = eur
            .checked_div(self.eur_per_source_unit)
            .ok_or_else(out_of_range)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let xaf = eur
            .checked_mul(self.eur_to_xaf)
            .ok_or_else(out_of_range)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let computed = ComputedPrices { eur, cny, xaf };

        Ok(Pricing {
            original_unit_cost: Money {
                currency: self.source_currency,
                amount: cost,
            },
            computed,
            margin: self.margin,
            display: Some(display_prices(&computed)),
        })
    }

    /// Rates recorded in the catalogue metadata. `eur_cny` keeps its legacy
    /// meaning of EUR per CNY; `eur_xaf` is XAF per EUR.
    #[must_use]
    pub fn fx_rates(&self) -> FxRates {
        FxRates {
            eur_cny: self.eur_per_source_unit,
            eur_xaf: self.eur_to_xaf,
        }
    }
}

/// Snap a price to a marketing price point.
///
/// With `base = floor(p)` and `d = p - base`: `d < 0.25` gives `base - 0.01`,
/// `d < 0.75` gives `base + 0.50`, anything else gives `base + 0.99`. A
/// negative result becomes `0.99`.
///
/// Not idempotent: only ever pass freshly computed raw prices.
#[must_use]
pub fn marketing_round(price: Decimal) -> Decimal {
    let base = price.floor();
    let fraction = price - base;

    let rounded = if fraction < QUARTER {
        base - CENT
    } else if fraction < THREE_QUARTERS {
        base + HALF
    } else {
        base + NINETY_NINE
    };

    if rounded < Decimal::ZERO {
        NINETY_NINE
    } else {
        rounded
    }
}

/// Parse a source cost from a JSON number or a numeric string such as
/// `"¥1,199.00"`.
///
/// # Errors
///
/// Returns [`PriceError`] when the value is not a finite positive number.
pub fn parse_cost(value: &Value) -> Result<Decimal, PriceError> {
    let cost = match value {
        Value::Number(n) => {
            let text = n.to_string();
            parse_decimal(&text)
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
                .ok_or(PriceError::NonNumeric(text))?
        }
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| !matches!(c, '¥' | '￥' | ',' | ' '))
                .collect();
            let lowered = cleaned.to_ascii_lowercase();
            if matches!(
                lowered.trim_start_matches(['+', '-']),
                "nan" | "inf" | "infinity"
            ) {
                return Err(PriceError::NonFinite);
            }
            parse_decimal(&cleaned).ok_or_else(|| PriceError::NonNumeric(s.clone()))?
        }
        other => return Err(PriceError::NonNumeric(other.to_string())),
    };

    if cost <= Decimal::ZERO {
        return Err(PriceError::NonPositive(cost));
    }
    Ok(cost)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[must_use]
pub fn display_prices(computed: &ComputedPrices) -> PriceDisplay {
    let eur = format!("{:.2}", computed.eur.round_dp(2));
    let cny = format!("{:.2}", computed.cny.round_dp(2));
    let (cny_int, cny_frac) = cny.split_once('.').unwrap_or((cny.as_str(), "00"));
    let xaf = format!("{:.0}", computed.xaf.round_dp(0));

    PriceDisplay {
        eur: format!("{eur} €"),
        cny: format!("¥{}.{cny_frac}", group_thousands(cny_int, ',')),
        xaf: format!("{} FCFA", group_thousands(&xaf, ' ')),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

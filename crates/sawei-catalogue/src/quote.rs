//! The checkout boundary: the exact amount to hand to the payment provider.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sawei_core::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::CatalogueStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("amount {amount} {currency} does not fit in minor units")]
    AmountOutOfRange { amount: Decimal, currency: Currency },
}

/// An amount in the currency's minor unit (cents for EUR/CNY, francs for XAF)
/// and the lowercase ISO code the payment provider expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub amount: i64,
    pub currency_code: String,
}

/// Quote a product's published price for checkout.
///
/// # Errors
///
/// Returns [`QuoteError::ProductNotFound`] for an unknown id and
/// [`QuoteError::AmountOutOfRange`] when the price has no `i64` minor-unit form.
pub fn quote_for_checkout(
    store: &CatalogueStore,
    product_id: &str,
    currency: Currency,
) -> Result<CheckoutQuote, QuoteError> {
    let product = store
        .get_by_id(product_id)
        .ok_or_else(|| QuoteError::ProductNotFound(product_id.to_string()))?;

    let price = product.pricing.computed.get(currency);
    let scale = Decimal::from(10_i64.pow(currency.minor_unit_exponent()));
    let amount = price
        .checked_mul(scale)
        .and_then(|v| {
            v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or(QuoteError::AmountOutOfRange {
            amount: price,
            currency,
        })?;

    Ok(CheckoutQuote {
        amount,
        currency_code: currency.code().to_ascii_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, store};

    #[test]
    fn eur_and_cny_quote_in_cents() {
        let store = store(vec![product("1", "a", "x", "142.99", 1)]);

        let eur = quote_for_checkout(&store, "1", Currency::Eur).unwrap();
        assert_eq!(
            eur,
            CheckoutQuote {
                amount: 14_299,
                currency_code: "eur".into()
            }
        );

        let cny = quote_for_checkout(&store, "1", Currency::Cny).unwrap();
        // 142.99 * 7.69 = 1099.5931 -> 109959 fen
        assert_eq!(cny.amount, 109_959);
        assert_eq!(cny.currency_code, "cny");
    }

    #[test]
    fn xaf_quotes_whole_francs() {
        let store = store(vec![product("1", "a", "x", "142.99", 1)]);
        let quote = quote_for_checkout(&store, "1", Currency::Xaf).unwrap();
        assert_eq!(quote.amount, 93_795);
        assert_eq!(quote.currency_code, "xaf");
    }

    #[test]
    fn unknown_product_is_an_error() {
        let store = store(Vec::new());
        assert_eq!(
            quote_for_checkout(&store, "404", Currency::Eur),
            Err(QuoteError::ProductNotFound("404".into()))
        );
    }

    #[test]
    fn oversized_price_is_out_of_range() {
        let mut huge = product("1", "a", "x", "1.00", 1);
        huge.pricing.computed.eur = Decimal::MAX;
        let store = store(vec![huge]);
        assert_eq!(
            quote_for_checkout(&store, "1", Currency::Eur),
            Err(QuoteError::AmountOutOfRange {
                amount: Decimal::MAX,
                currency: Currency::Eur,
            })
        );
    }

    #[test]
    fn quote_serializes_currency_code_in_camel_case() {
        let value = serde_json::to_value(CheckoutQuote {
            amount: 999,
            currency_code: "eur".into(),
        })
        .unwrap();
        assert_eq!(value["currencyCode"], "eur");
    }
}

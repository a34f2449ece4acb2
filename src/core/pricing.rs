use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::core::scoring::round_half_up;

/// Lowest accepted unlock price ($13)
pub const DEFAULT_MIN_AMOUNT_CENTS: i64 = 1300;

/// Highest amount the payment processor accepts ($999,999.99)
pub const MAX_AMOUNT_CENTS: i64 = 99_999_999;

/// Price buttons offered on the result page, in dollars
pub const PRESET_AMOUNTS: [u32; 3] = [13, 20, 50];

/// Errors raised while validating a checkout amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Amount is not a valid number: {0}")]
    Invalid(String),

    #[error("Amount must be at least ${}", format_dollars(*.min_cents))]
    BelowMinimum { cents: i64, min_cents: i64 },

    #[error("Amount must be at most ${}", format_dollars(*.max_cents))]
    AboveMaximum { max_cents: i64 },
}

/// Amount as posted by the client, either `13` or `"13.50"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Raw representation forwarded in checkout metadata
    pub fn raw(&self) -> String {
        match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s.trim().to_string(),
        }
    }

    fn dollars(&self) -> Result<f64, PricingError> {
        let value = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| PricingError::Invalid(s.clone()))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::Invalid(self.raw()))
        }
    }
}

/// A validated checkout price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutAmount {
    cents: i64,
}

impl CheckoutAmount {
    /// Validate a client-supplied dollar amount against the minimum price
    pub fn parse(input: &AmountInput, min_cents: i64) -> Result<Self, PricingError> {
        let cents = round_half_up(input.dollars()? * 100.0);

        // Compared before the cast so huge values cannot saturate
        if cents > MAX_AMOUNT_CENTS as f64 {
            return Err(PricingError::AboveMaximum { max_cents: MAX_AMOUNT_CENTS });
        }
        let cents = cents as i64;

        if cents < min_cents {
            return Err(PricingError::BelowMinimum { cents, min_cents });
        }

        Ok(Self { cents })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// e.g. `"13.00"`
    pub fn dollars_display(&self) -> String {
        format!("{}.{:02}", self.cents / 100, (self.cents % 100).abs())
    }
}

/// Whole dollars drop the cents, e.g. `13` but `13.50`
fn format_dollars(cents: i64) -> String {
    if cents % 100 == 0 {
        format!("{}", cents / 100)
    } else {
        format!("{}.{:02}", cents / 100, (cents % 100).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_amount() {
        let amount = CheckoutAmount::parse(&AmountInput::Number(20.0), DEFAULT_MIN_AMOUNT_CENTS).unwrap();
        assert_eq!(amount.cents(), 2000);
        assert_eq!(amount.dollars_display(), "20.00");
    }

    #[test]
    fn test_text_amount_rounds_to_cents() {
        let amount = CheckoutAmount::parse(&AmountInput::Text(" 19.99 ".to_string()), DEFAULT_MIN_AMOUNT_CENTS).unwrap();
        assert_eq!(amount.cents(), 1999);
        assert_eq!(amount.dollars_display(), "19.99");
    }

    #[test]
    fn test_minimum_is_inclusive() {
        assert!(CheckoutAmount::parse(&AmountInput::Number(13.0), DEFAULT_MIN_AMOUNT_CENTS).is_ok());

        let err = CheckoutAmount::parse(&AmountInput::Number(12.99), DEFAULT_MIN_AMOUNT_CENTS).unwrap_err();
        assert_eq!(err, PricingError::BelowMinimum { cents: 1299, min_cents: 1300 });
        assert_eq!(err.to_string(), "Amount must be at least $13");
    }

    #[test]
    fn test_rejects_huge_amounts() {
        let err = CheckoutAmount::parse(&AmountInput::Number(1e300), DEFAULT_MIN_AMOUNT_CENTS).unwrap_err();
        assert_eq!(err, PricingError::AboveMaximum { max_cents: MAX_AMOUNT_CENTS });
        assert_eq!(err.to_string(), "Amount must be at most $999999.99");

        let top = CheckoutAmount::parse(&AmountInput::Text("999999.99".to_string()), DEFAULT_MIN_AMOUNT_CENTS).unwrap();
        assert_eq!(top.cents(), MAX_AMOUNT_CENTS);

        let err = CheckoutAmount::parse(&AmountInput::Number(-1e300), DEFAULT_MIN_AMOUNT_CENTS).unwrap_err();
        assert!(matches!(err, PricingError::BelowMinimum { .. }));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = CheckoutAmount::parse(&AmountInput::Text("lots".to_string()), DEFAULT_MIN_AMOUNT_CENTS);
        assert!(matches!(err, Err(PricingError::Invalid(_))));

        let err = CheckoutAmount::parse(&AmountInput::Text("NaN".to_string()), DEFAULT_MIN_AMOUNT_CENTS);
        assert!(matches!(err, Err(PricingError::Invalid(_))));
    }

    #[test]
    fn test_presets_clear_minimum() {
        for preset in PRESET_AMOUNTS {
            let input = AmountInput::Number(f64::from(preset));
            assert!(CheckoutAmount::parse(&input, DEFAULT_MIN_AMOUNT_CENTS).is_ok());
        }
    }

    #[test]
    fn test_amount_input_deserializes_both_shapes() {
        let n: AmountInput = serde_json::from_str("20").unwrap();
        let s: AmountInput = serde_json::from_str(r#""20.5""#).unwrap();
        assert_eq!(n, AmountInput::Number(20.0));
        assert_eq!(s, AmountInput::Text("20.5".to_string()));
    }
}

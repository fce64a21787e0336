//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::{define_kind, Percent};

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Number of fractional digits [`Money`] amounts are rounded to.
    pub const SCALE: u32 = 2;

    /// Multiplies this [`Money`] amount by the provided `factor`.
    #[must_use]
    pub fn times(self, factor: impl Into<Decimal>) -> Self {
        Self {
            amount: self.amount * factor.into(),
            currency: self.currency,
        }
    }

    /// Sums this [`Money`] with the `other` one.
    ///
    /// [`None`] is returned if the [`Currency`]s differ.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        (self.currency == other.currency).then(|| Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// Subtracts the provided [`Percent`] of this [`Money`] from it, rounding
    /// the result to [`Money::SCALE`] digits (midpoints away from zero).
    #[must_use]
    pub fn discounted(self, discount: Percent) -> Self {
        let rest = Decimal::ONE_HUNDRED - discount.value();
        Self {
            amount: (self.amount * rest / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(
                    Self::SCALE,
                    RoundingStrategy::MidpointAwayFromZero,
                ),
            currency: self.currency,
        }
    }

    /// Checks whether this [`Money`] amount is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Russian Ruble."]
        Rub = 3,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use crate::Percent;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert_eq!(
            Money::from_str("123.45EUR").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Eur,
            },
        );

        assert_eq!(
            Money::from_str("123.45RUB").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Rub,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());

        assert!(Money::from_str("123.00USD").is_ok());
        assert!(Money::from_str("123.0USD").is_ok());
        assert!(Money::from_str("123USD").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123.45USD",
        );

        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Eur,
            }
            .to_string(),
            "123.45EUR",
        );

        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Rub,
            }
            .to_string(),
            "123.45RUB",
        );

        assert_eq!(
            Money {
                amount: decimal("123.00"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123USD",
        );
        assert_eq!(
            Money {
                amount: decimal("123.0"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123USD",
        );
        assert_eq!(
            Money {
                amount: decimal("123"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123USD",
        );
    }

    #[test]
    fn times() {
        assert_eq!(
            Money::from_str("100.00USD").unwrap().times(3),
            Money::from_str("300USD").unwrap(),
        );
        assert_eq!(
            Money::from_str("80.00EUR").unwrap().times(3).times(2),
            Money::from_str("480EUR").unwrap(),
        );
    }

    #[test]
    fn checked_add() {
        let usd = Money::from_str("300USD").unwrap();

        assert_eq!(
            usd.checked_add(Money::from_str("480.50USD").unwrap()),
            Some(Money::from_str("780.50USD").unwrap()),
        );
        assert_eq!(usd.checked_add(Money::from_str("1EUR").unwrap()), None);
    }

    #[test]
    fn discounted() {
        let total = Money::from_str("780.00USD").unwrap();

        assert_eq!(
            total.discounted(Percent::from_str("10").unwrap()),
            Money::from_str("702USD").unwrap(),
        );
        assert_eq!(total.discounted(Percent::ZERO), total);
        assert_eq!(
            Money::from_str("0.05USD")
                .unwrap()
                .discounted(Percent::from_str("50").unwrap()),
            Money::from_str("0.03USD").unwrap(),
        );
        assert_eq!(
            Money::from_str("99.99USD")
                .unwrap()
                .discounted(Percent::from_str("12.5").unwrap())
                .amount,
            decimal("87.49"),
        );
    }
}

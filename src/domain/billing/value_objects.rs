use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid VAT rate: {0}")]
  InvalidVatRate(String),
}

/// Rounds a monetary amount to two fractional digits, midpoint away from zero.
///
/// Every stored or displayed amount goes through this exact rounding so that
/// per-line figures and invoice totals agree to the cent.
pub fn round_money(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Currency - ISO 4217
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
  #[default]
  EUR,
  USD,
  GBP,
}

impl Currency {
  pub fn as_str(&self) -> &'static str {
    match self {
      Currency::EUR => "EUR",
      Currency::USD => "USD",
      Currency::GBP => "GBP",
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      Currency::EUR => "€",
      Currency::USD => "$",
      Currency::GBP => "£",
    }
  }

  /// Formats an amount for display: currency symbol, thousands separators
  /// and exactly two fractional digits, e.g. `€1,234.50`.
  pub fn format(&self, amount: Decimal) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
      if i > 0 && (whole.len() - i) % 3 == 0 {
        grouped.push(',');
      }
      grouped.push(digit);
    }

    format!("{}{}{}.{}", self.symbol(), sign, grouped, cents)
  }
}

impl FromStr for Currency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "EUR" => Ok(Currency::EUR),
      "USD" => Ok(Currency::USD),
      "GBP" => Ok(Currency::GBP),
      _ => Err(ValueObjectError::InvalidCurrency(format!(
        "Unsupported currency: {}",
        s
      ))),
    }
  }
}

/// Formats a monetary amount in the configured currency for display.
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
  currency.format(amount)
}

// VAT Rate - the fixed set of French rates
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub enum VatRate {
  Zero,
  Reduced,
  Intermediate,
  #[default]
  Standard,
}

impl VatRate {
  pub const ALL: [VatRate; 4] = [
    VatRate::Zero,
    VatRate::Reduced,
    VatRate::Intermediate,
    VatRate::Standard,
  ];

  pub fn as_decimal(&self) -> Decimal {
    match self {
      VatRate::Zero => dec!(0),
      VatRate::Reduced => dec!(5.5),
      VatRate::Intermediate => dec!(10),
      VatRate::Standard => dec!(20),
    }
  }

  pub fn as_multiplier(&self) -> Decimal {
    self.as_decimal() / Decimal::from(100)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      VatRate::Zero => "0",
      VatRate::Reduced => "5.5",
      VatRate::Intermediate => "10",
      VatRate::Standard => "20",
    }
  }
}

impl From<VatRate> for Decimal {
  fn from(rate: VatRate) -> Self {
    rate.as_decimal()
  }
}

impl TryFrom<Decimal> for VatRate {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    VatRate::ALL
      .into_iter()
      .find(|rate| rate.as_decimal() == value)
      .ok_or_else(|| ValueObjectError::InvalidVatRate(format!("Unsupported VAT rate: {}", value)))
  }
}

impl FromStr for VatRate {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let value = Decimal::from_str(s)
      .map_err(|_| ValueObjectError::InvalidVatRate(format!("Not a number: {}", s)))?;
    VatRate::try_from(value)
  }
}

impl fmt::Display for VatRate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} %", self.as_str())
  }
}

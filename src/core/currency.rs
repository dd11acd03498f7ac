use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency descriptor: ISO code, display symbol and minor-unit precision
///
/// Deserializes either from a bare ISO code (`"EUR"`) or from a full
/// descriptor object (`{"code": "XOF", "symbol": "CFA", "scale": 0}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    /// Number of decimal digits in the minor unit (2 for cents)
    pub scale: u32,
}

// Hand-written visitor: JSON numbers are parsed with arbitrary precision,
// which buffered (untagged) enums cannot read back as integers.
impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CurrencyVisitor)
    }
}

struct CurrencyVisitor;

impl<'de> Visitor<'de> for CurrencyVisitor {
    type Value = Currency;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an ISO currency code or a currency descriptor")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Currency, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Currency, A::Error> {
        let mut code: Option<String> = None;
        let mut symbol: Option<String> = None;
        let mut scale: Option<u32> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "code" => code = Some(map.next_value()?),
                "symbol" => symbol = Some(map.next_value()?),
                "scale" => scale = Some(map.next_value()?),
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        let code = code.ok_or_else(|| de::Error::missing_field("code"))?;
        let known = code.parse::<Currency>().ok();
        let symbol = symbol
            .or_else(|| known.as_ref().map(|c| c.symbol.clone()))
            .unwrap_or_else(|| code.trim().to_uppercase());
        let scale = scale.or(known.as_ref().map(|c| c.scale)).unwrap_or(2);
        Currency::new(&code, &symbol, scale).map_err(de::Error::custom)
    }
}

/// Upper bound for a minor-unit precision; rust_decimal holds 28 digits
const MAX_SCALE: u32 = 8;

impl Currency {
    pub fn new(code: &str, symbol: &str, scale: u32) -> Result<Self, String> {
        if code.trim().is_empty() {
            return Err("Currency code cannot be empty".to_string());
        }
        if scale > MAX_SCALE {
            return Err(format!(
                "Currency scale must be at most {}, got {}",
                MAX_SCALE, scale
            ));
        }
        Ok(Self {
            code: code.trim().to_uppercase(),
            symbol: symbol.to_string(),
            scale,
        })
    }

    pub fn eur() -> Self {
        Self::known("EUR", "€", 2)
    }

    pub fn usd() -> Self {
        Self::known("USD", "$", 2)
    }

    fn known(code: &str, symbol: &str, scale: u32) -> Self {
        Self {
            code: code.to_string(),
            symbol: symbol.to_string(),
            scale,
        }
    }

    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Rounds half away from zero to the minor unit (1.005 -> 1.01)
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Returns the smallest unit for this currency (0.01 for a scale of 2)
    pub fn smallest_unit(&self) -> Decimal {
        Decimal::new(1, self.scale)
    }

    /// Validates that a stored amount is non-negative and fits the minor unit
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), String> {
        if amount.normalize().scale() > self.scale {
            return Err(format!(
                "{} amounts must have at most {} decimal places, got {}",
                self.code,
                self.scale,
                amount.normalize().scale()
            ));
        }

        if amount < Decimal::ZERO {
            return Err(format!("{} amount cannot be negative", self.code));
        }

        Ok(())
    }

    /// Formats an amount with grouped thousands and the symbol as suffix:
    /// `1234.5` -> `1,234.50 €`
    pub fn format_amount(&self, amount: Decimal) -> String {
        let plain = self.format_number(amount);
        if self.symbol.is_empty() {
            plain
        } else {
            format!("{} {}", plain, self.symbol)
        }
    }

    /// Formats an amount without the currency symbol
    pub fn format_number(&self, amount: Decimal) -> String {
        let rounded = self.round(amount);
        let digits = format!("{:.width$}", rounded.abs(), width = self.scale as usize);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (digits, None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        match frac_part {
            Some(frac) => format!("{}{}.{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::eur()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::eur()),
            "USD" => Ok(Currency::usd()),
            "GBP" => Ok(Currency::known("GBP", "£", 2)),
            "CHF" => Ok(Currency::known("CHF", "CHF", 2)),
            "JPY" => Ok(Currency::known("JPY", "¥", 0)),
            "IDR" => Ok(Currency::known("IDR", "Rp", 0)),
            "MYR" => Ok(Currency::known("MYR", "RM", 2)),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

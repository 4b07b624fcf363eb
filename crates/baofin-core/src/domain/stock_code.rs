use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const EXCHANGES: [&str; 2] = ["sh", "sz"];
const CODE_DIGITS: usize = 6;

/// Normalized exchange-qualified stock code, always `ex.NNNNNN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StockCode(String);

impl StockCode {
    /// Parse `sh.600000`, `SH600000`, `600000.SH`, `600000sz` or a bare
    /// six-digit number. Bare numbers starting with `6` are Shanghai listings,
    /// everything else is Shenzhen.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyStockCode);
        }

        let lowered = trimmed.to_ascii_lowercase();
        let (exchange, digits) =
            split_exchange(&lowered).ok_or_else(|| ValidationError::InvalidStockCode {
                value: trimmed.to_owned(),
            })?;

        if !is_code_number(digits) {
            return Err(ValidationError::InvalidStockCode {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self(format!("{exchange}.{digits}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn exchange(&self) -> &str {
        &self.0[..2]
    }

    pub fn number(&self) -> &str {
        &self.0[3..]
    }
}

fn split_exchange(lowered: &str) -> Option<(&'static str, &str)> {
    for exchange in EXCHANGES {
        if let Some(rest) = lowered.strip_prefix(exchange) {
            return Some((exchange, rest.strip_prefix('.').unwrap_or(rest)));
        }
        if let Some(rest) = lowered.strip_suffix(exchange) {
            return Some((exchange, rest.strip_suffix('.').unwrap_or(rest)));
        }
    }

    if is_code_number(lowered) {
        let exchange = if lowered.starts_with('6') { "sh" } else { "sz" };
        return Some((exchange, lowered));
    }

    None
}

fn is_code_number(value: &str) -> bool {
    value.len() == CODE_DIGITS && value.bytes().all(|byte| byte.is_ascii_digit())
}

impl Display for StockCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for StockCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for StockCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<StockCode> for String {
    fn from(value: StockCode) -> Self {
        value.0
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Quarterly indicator family published by the remote provider.
///
/// Each family is queried independently per quarter and merged into a
/// composite record under its own field prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorFamily {
    Profit,
    Operation,
    Growth,
    Balance,
    CashFlow,
    Dupont,
}

impl IndicatorFamily {
    /// Fixed query order used by the aggregation engine.
    pub const ALL: [Self; 6] = [
        Self::Profit,
        Self::Operation,
        Self::Growth,
        Self::Balance,
        Self::CashFlow,
        Self::Dupont,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profit => "profit",
            Self::Operation => "operation",
            Self::Growth => "growth",
            Self::Balance => "balance",
            Self::CashFlow => "cashflow",
            Self::Dupont => "dupont",
        }
    }

    /// Field-name prefix applied when merging into a composite record.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Profit => "profit_",
            Self::Operation => "operation_",
            Self::Growth => "growth_",
            Self::Balance => "balance_",
            Self::CashFlow => "cashflow_",
            Self::Dupont => "dupont_",
        }
    }

    /// Remote operation identifier.
    pub const fn operation(self) -> &'static str {
        match self {
            Self::Profit => "query_profit_data",
            Self::Operation => "query_operation_data",
            Self::Growth => "query_growth_data",
            Self::Balance => "query_balance_data",
            Self::CashFlow => "query_cash_flow_data",
            Self::Dupont => "query_dupont_data",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Profit => "Profitability",
            Self::Operation => "Operation Capability",
            Self::Growth => "Growth Capability",
            Self::Balance => "Balance Sheet",
            Self::CashFlow => "Cash Flow",
            Self::Dupont => "DuPont Analysis",
        }
    }
}

impl Display for IndicatorFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorFamily {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "profit" | "profitability" => Ok(Self::Profit),
            "operation" => Ok(Self::Operation),
            "growth" => Ok(Self::Growth),
            "balance" | "solvency" => Ok(Self::Balance),
            "cashflow" | "cash_flow" | "cash-flow" => Ok(Self::CashFlow),
            "dupont" => Ok(Self::Dupont),
            other => Err(ValidationError::InvalidFamily {
                value: other.to_owned(),
            }),
        }
    }
}

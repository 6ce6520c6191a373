use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest magnitude accepted for an entry or a budget limit. Sums of any
/// realistic number of entries stay far below `Decimal::MAX`.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "+" => Some(Self::Income),
            "expense" | "exp" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Apply this type's sign to an unsigned magnitude.
    pub(crate) fn signed(&self, magnitude: Decimal) -> Decimal {
        match self {
            Self::Income => magnitude.abs(),
            Self::Expense => -magnitude.abs(),
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub id: i64,
    pub text: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxnType,
    pub category: String,
    /// Format: "YYYY-MM-DD"
    pub date: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

use serde::{Deserialize, Serialize};

use super::row::FlowType;
use crate::errors::{ForecastError, Result};

/// Rule used to fill a row's weekly cells. Amounts already carry the row's sign.
///
/// The set of kinds is closed: unknown kinds fail when parsed instead of being
/// skipped at fill time. Stored as `{kind, every, amount}` for every kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(into = "StoredRecurrence", try_from = "StoredRecurrence")]
pub enum Recurrence {
    Weekly { amount: f64 },
    Biweekly { amount: f64 },
    Monthly { amount: f64 },
    Custom { every: u32, amount: f64 },
}

/// Snapshot shape of a rule. `every` is only meaningful for `CUSTOM`.
#[derive(Serialize, Deserialize)]
struct StoredRecurrence {
    kind: String,
    #[serde(default)]
    every: Option<u32>,
    amount: f64,
}

impl From<Recurrence> for StoredRecurrence {
    fn from(rule: Recurrence) -> Self {
        Self {
            kind: rule.kind().to_string(),
            every: Some(rule.every()),
            amount: rule.amount(),
        }
    }
}

impl TryFrom<StoredRecurrence> for Recurrence {
    type Error = ForecastError;

    fn try_from(stored: StoredRecurrence) -> Result<Self> {
        Recurrence::parse(&stored.kind, stored.every, stored.amount)
    }
}

impl Recurrence {
    /// Builds a rule from loosely typed input (`"WEEKLY"`, `"custom"`, ...).
    pub fn parse(kind: &str, every: Option<u32>, amount: f64) -> Result<Self> {
        let rule = match kind.trim().to_ascii_uppercase().as_str() {
            "WEEKLY" => Recurrence::Weekly { amount },
            "BIWEEKLY" => Recurrence::Biweekly { amount },
            "MONTHLY" => Recurrence::Monthly { amount },
            "CUSTOM" => Recurrence::Custom {
                every: every.unwrap_or_else(Self::default_every),
                amount,
            },
            _ => return Err(ForecastError::UnknownRecurrence(kind.to_string())),
        };
        Ok(rule)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Recurrence::Weekly { .. } => "WEEKLY",
            Recurrence::Biweekly { .. } => "BIWEEKLY",
            Recurrence::Monthly { .. } => "MONTHLY",
            Recurrence::Custom { .. } => "CUSTOM",
        }
    }

    /// Week stride of the rule; fixed kinds report 1.
    pub fn every(&self) -> u32 {
        match *self {
            Recurrence::Custom { every, .. } => every,
            _ => Self::default_every(),
        }
    }

    pub fn amount(&self) -> f64 {
        match *self {
            Recurrence::Weekly { amount }
            | Recurrence::Biweekly { amount }
            | Recurrence::Monthly { amount }
            | Recurrence::Custom { amount, .. } => amount,
        }
    }

    pub fn with_amount(self, amount: f64) -> Self {
        match self {
            Recurrence::Weekly { .. } => Recurrence::Weekly { amount },
            Recurrence::Biweekly { .. } => Recurrence::Biweekly { amount },
            Recurrence::Monthly { .. } => Recurrence::Monthly { amount },
            Recurrence::Custom { every, .. } => Recurrence::Custom { every, amount },
        }
    }

    /// Returns the rule with its amount signed for `flow`: outflows are always negative.
    pub fn signed_for(self, flow: FlowType) -> Self {
        match flow {
            FlowType::Inflow => self,
            FlowType::Outflow => {
                let amount = -self.amount().abs();
                self.with_amount(amount)
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Recurrence::Weekly { .. } => "Weekly".into(),
            Recurrence::Biweekly { .. } => "Biweekly".into(),
            Recurrence::Monthly { .. } => "Monthly".into(),
            Recurrence::Custom { every, .. } => {
                let every = (*every).max(1);
                format!("Every {} week{}", every, if every > 1 { "s" } else { "" })
            }
        }
    }

    pub fn default_every() -> u32 {
        1
    }
}

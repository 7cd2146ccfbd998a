use crate::core::error::{LedgerError, LedgerResult};
use crate::core::member::MemberId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A real-world payment from one member to another.
///
/// Settlements are ledger entries: the engine folds every settlement it is
/// given and never edits or removes one. A payment of X from A to B reduces
/// what A owes and what B is owed by X.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    from: MemberId,
    to: MemberId,
    amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl SettlementRecord {
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn from(&self) -> &MemberId {
        &self.from
    }

    pub fn to(&self) -> &MemberId {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount {
                context: format!("settlement {}", self.id),
                amount: self.amount,
            });
        }
        if self.from == self.to {
            return Err(LedgerError::SelfSettlement {
                member: self.from.clone(),
            });
        }
        Ok(())
    }
}

use crate::core::expense::ExpenseRecord;
use crate::core::member::Member;
use crate::core::settlement::SettlementRecord;
use serde::{Deserialize, Serialize};

/// A consistent point-in-time view of one group's records.
///
/// The caller gathers all three lists from the same point in time; the
/// engine only reads them. This is also the JSON shape the CLI consumes:
///
/// ```json
/// {
///   "members": [{ "id": "u1", "name": "Ann" }],
///   "expenses": [{ "paid_by": "u1", "amount": "30.00",
///                  "splits": [{ "member": "u1", "amount": "30.00" }] }],
///   "settlements": [{ "from": "u2", "to": "u1", "amount": "5.00" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

impl GroupSnapshot {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::models::claim::Claim;
use crate::models::returns::Return;

/// Lifecycle status shared by claims and returns.
///
/// Stored as text, serialized by variant name. Records are created as
/// `Pending`; later values are set through partial updates with no
/// transition constraints.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum CaseStatus {
    #[default]
    Pending,
    InReview,
    Resolved,
    Rejected,
}

/// Unified view over the two collections.
///
/// Serializes as the wrapped record's fields plus a `"type"` discriminator,
/// so a lookup hit reads `{ ..., "type": "claim" }` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Case {
    Claim(Claim),
    Return(Return),
}

impl Case {
    pub fn id(&self) -> Uuid {
        match self {
            Case::Claim(claim) => claim.id,
            Case::Return(ret) => ret.id,
        }
    }
}

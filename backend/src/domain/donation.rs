//! Donation records and the value-level inventory key.
//!
//! A [`Donation`] doubles as one unit of available supply: its existence is
//! the only inventory signal, and approving a request deletes exactly one
//! matching record. [`Need`] is the loose, value-based join key linking
//! requests to donations; there is deliberately no stored relationship
//! because donations are anonymous supply, not reserved per request.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Unique donation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationId(Uuid);

impl DonationId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DonationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DonationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for DonationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a donation or request concerns blood or an organ.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum NeedKind {
    /// Whole-blood supply keyed by blood type (e.g. `O+`).
    Blood,
    /// Organ supply keyed by organ name (e.g. `kidney`).
    Organ,
}

impl NeedKind {
    /// Wire representation (`blood` / `organ`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blood => "blood",
            Self::Organ => "organ",
        }
    }
}

impl std::str::FromStr for NeedKind {
    type Err = NeedValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blood" => Ok(Self::Blood),
            "organ" => Ok(Self::Organ),
            other => Err(NeedValidationError::UnknownKind {
                value: other.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for NeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised when constructing a [`Need`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NeedValidationError {
    /// Kind string is neither `blood` nor `organ`.
    #[error("unknown donation kind `{value}`, expected `blood` or `organ`")]
    UnknownKind { value: String },
    /// The blood type or organ name is blank.
    #[error("{kind} item must not be blank")]
    BlankItem { kind: NeedKind },
}

/// The inventory key: a kind plus the blood type or organ name.
///
/// Requests and donations are matched by value equality on this pair only.
///
/// # Examples
/// ```
/// use lifelink_backend::domain::Need;
///
/// let need = Need::blood("O+").expect("valid key");
/// assert_eq!(need.to_string(), "O+ blood");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Need {
    kind: NeedKind,
    item: String,
}

impl Need {
    /// Construct a need after validating the item is non-blank.
    pub fn new(kind: NeedKind, item: impl Into<String>) -> Result<Self, NeedValidationError> {
        let item = item.into();
        if item.trim().is_empty() {
            return Err(NeedValidationError::BlankItem { kind });
        }
        Ok(Self { kind, item })
    }

    /// Blood need keyed by blood type.
    pub fn blood(blood_type: impl Into<String>) -> Result<Self, NeedValidationError> {
        Self::new(NeedKind::Blood, blood_type)
    }

    /// Organ need keyed by organ name.
    pub fn organ(organ: impl Into<String>) -> Result<Self, NeedValidationError> {
        Self::new(NeedKind::Organ, organ)
    }

    /// Blood or organ discriminator.
    #[must_use]
    pub fn kind(&self) -> NeedKind {
        self.kind
    }

    /// Blood type or organ name.
    #[must_use]
    pub fn item(&self) -> &str {
        self.item.as_str()
    }

    /// Blood type when this is a blood need.
    #[must_use]
    pub fn blood_type(&self) -> Option<&str> {
        matches!(self.kind, NeedKind::Blood).then_some(self.item.as_str())
    }

    /// Organ name when this is an organ need.
    #[must_use]
    pub fn organ_name(&self) -> Option<&str> {
        matches!(self.kind, NeedKind::Organ).then_some(self.item.as_str())
    }
}

impl std::fmt::Display for Need {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NeedKind::Blood => write!(f, "{} blood", self.item),
            NeedKind::Organ => f.write_str(&self.item),
        }
    }
}

// Serialized flat so flattening into a record yields the wire shape
// `{"type": "blood", "bloodType": "O+"}` / `{"type": "organ", "organ": "kidney"}`.
impl Serialize for Need {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Need", 2)?;
        state.serialize_field("type", self.kind.as_str())?;
        match self.kind {
            NeedKind::Blood => state.serialize_field("bloodType", &self.item)?,
            NeedKind::Organ => state.serialize_field("organ", &self.item)?,
        }
        state.end()
    }
}

/// Input for recording a donation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    pub donor_id: UserId,
    pub need: Need,
    pub date: NaiveDate,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// A stored unit of pledged supply, exclusively owned by its donor until
/// consumed by an approval or otherwise removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DonationId,
    pub donor_id: UserId,
    #[serde(flatten)]
    pub need: Need,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Materialise a new record from donor input, stamping id and creation time.
    #[must_use]
    pub fn record(new: NewDonation) -> Self {
        Self {
            id: DonationId::new(),
            donor_id: new.donor_id,
            need: new.need,
            date: new.date,
            address: new.address,
            notes: new.notes,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn need_rejects_blank_items(#[case] item: &str) {
        let err = Need::blood(item).expect_err("blank item rejected");
        assert_eq!(
            err,
            NeedValidationError::BlankItem {
                kind: NeedKind::Blood
            }
        );
    }

    #[rstest]
    fn kind_parses_wire_values() {
        assert_eq!(NeedKind::from_str("blood"), Ok(NeedKind::Blood));
        assert_eq!(NeedKind::from_str("organ"), Ok(NeedKind::Organ));
        assert!(NeedKind::from_str("plasma").is_err());
    }

    #[rstest]
    #[case(Need::blood("O+").expect("valid"), "O+ blood")]
    #[case(Need::organ("kidney").expect("valid"), "kidney")]
    fn need_display_names_the_item(#[case] need: Need, #[case] expected: &str) {
        assert_eq!(need.to_string(), expected);
    }

    #[rstest]
    fn need_serializes_flat() {
        let blood = serde_json::to_value(Need::blood("AB-").expect("valid")).expect("json");
        assert_eq!(blood["type"], "blood");
        assert_eq!(blood["bloodType"], "AB-");
        assert!(blood.get("organ").is_none());

        let organ = serde_json::to_value(Need::organ("liver").expect("valid")).expect("json");
        assert_eq!(organ["type"], "organ");
        assert_eq!(organ["organ"], "liver");
    }

    #[rstest]
    fn donation_record_stamps_identity() {
        let donor = UserId::new();
        let donation = Donation::record(NewDonation {
            donor_id: donor,
            need: Need::blood("O+").expect("valid"),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date"),
            address: None,
            notes: Some("first donation".to_owned()),
        });

        assert_eq!(donation.donor_id, donor);
        assert_eq!(donation.need.item(), "O+");
    }
}

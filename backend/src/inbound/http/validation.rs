//! Request payload validation helpers shared by the HTTP handlers.

use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::donation::{Need, NeedKind};
use crate::domain::request::{RequestStatus, Urgency};
use crate::domain::Error;

/// Standard error for an absent required field.
pub fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field `{field}`")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Parse the `type` + `bloodType`/`organ` trio into a [`Need`], enforcing
/// that the item matching the kind is present.
pub fn parse_need(
    kind: Option<String>,
    blood_type: Option<String>,
    organ: Option<String>,
) -> Result<Need, Error> {
    let kind = kind.ok_or_else(|| missing_field_error("type"))?;
    let kind = NeedKind::from_str(&kind).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "type",
            "value": kind,
        }))
    })?;
    let item = match kind {
        NeedKind::Blood => blood_type.ok_or_else(|| missing_field_error("bloodType"))?,
        NeedKind::Organ => organ.ok_or_else(|| missing_field_error("organ"))?,
    };
    Need::new(kind, item).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Parse a status string, rejecting anything outside the seven-value enum.
pub fn parse_status(value: &str) -> Result<RequestStatus, Error> {
    RequestStatus::from_str(value).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "status",
            "value": value,
            "allowed": RequestStatus::ALL
                .iter()
                .map(RequestStatus::as_str)
                .collect::<Vec<_>>(),
        }))
    })
}

/// Parse an urgency string, defaulting to `normal` when absent.
pub fn parse_urgency(value: Option<String>) -> Result<Urgency, Error> {
    value.map_or(Ok(Urgency::default()), |value| {
        Urgency::from_str(&value).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "urgency",
                "value": value,
            }))
        })
    })
}

/// Parse an ISO `YYYY-MM-DD` donation date.
pub fn parse_date(value: Option<String>) -> Result<NaiveDate, Error> {
    let value = value.ok_or_else(|| missing_field_error("date"))?;
    NaiveDate::from_str(&value).map_err(|_| {
        Error::invalid_request("date must be an ISO date (YYYY-MM-DD)").with_details(json!({
            "field": "date",
            "value": value,
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn a_blood_request_requires_a_blood_type() {
        let err = parse_need(Some("blood".to_owned()), None, Some("kidney".to_owned()))
            .expect_err("bloodType required");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["field"], "bloodType");
    }

    #[rstest]
    fn an_organ_request_requires_an_organ() {
        let err =
            parse_need(Some("organ".to_owned()), Some("O+".to_owned()), None)
                .expect_err("organ required");
        assert_eq!(err.details().expect("details")["field"], "organ");
    }

    #[rstest]
    fn consistent_trios_parse(
    ) {
        let need = parse_need(Some("blood".to_owned()), Some("O+".to_owned()), None)
            .expect("valid trio");
        assert_eq!(need.item(), "O+");

        let err = parse_need(Some("plasma".to_owned()), Some("O+".to_owned()), None)
            .expect_err("unknown kind");
        assert_eq!(err.details().expect("details")["field"], "type");
    }

    #[rstest]
    fn bogus_statuses_carry_the_allowed_list() {
        let err = parse_status("BOGUS").expect_err("outside the enum");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let allowed = err.details().expect("details")["allowed"]
            .as_array()
            .expect("allowed list")
            .len();
        assert_eq!(allowed, 7);
    }

    #[rstest]
    fn urgency_defaults_and_rejects_unknowns() {
        assert_eq!(parse_urgency(None).expect("default"), Urgency::Normal);
        assert!(parse_urgency(Some("whenever".to_owned())).is_err());
    }

    #[rstest]
    fn dates_must_be_iso() {
        assert!(parse_date(Some("2026-06-01".to_owned())).is_ok());
        assert!(parse_date(Some("06/01/2026".to_owned())).is_err());
        assert!(parse_date(None).is_err());
    }
}

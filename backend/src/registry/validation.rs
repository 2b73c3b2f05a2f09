//! Turns wire payloads into typed changes before they reach the engine.
//!
//! Nothing here looks at the store. Every check is about payload shape:
//! identifiers must parse, source types must belong to the closed set, the
//! availability flag is mandatory on source entries, and connector entries
//! must carry at least one updatable attribute.

use crate::error::ApiError;
use common::model::connector::{Connector, MAX_MONTHS_TO_FETCH};
use common::model::source::{Source, SourceType};
use common::requests::{
    ConnectorBody, ConnectorUpdate, ConnectorsAndSourcesUpdate, ConnectorsUpdate, ListQuery,
    SourceBody, SourceUpdate,
};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 50;

/// Source-entry keys from earlier payload revisions. They are recognised
/// but the attributes behind them are not managed by this service.
const WITHHELD_SOURCE_FIELDS: [&str; 4] = [
    "priority",
    "sync_periodicity",
    "auth_mechanism",
    "unavailable_capabilities",
];

static LAST_UPDATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceChange {
    pub source_type: SourceType,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSourcesChange {
    pub connector_id: Uuid,
    pub sources: Vec<SourceChange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorChange {
    pub connector_id: Uuid,
    pub months_to_fetch: Option<u32>,
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
    pub all: bool,
    pub connector_id: Option<Uuid>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            all: false,
            connector_id: None,
        }
    }
}

pub fn parse_connector_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("'{}' is not a valid connector UUID", raw)))
}

pub fn parse_source_type(raw: &str) -> Result<SourceType, ApiError> {
    raw.parse()
        .map_err(|e: common::model::source::UnknownSourceType| ApiError::Validation(e.to_string()))
}

/// Validates one source entry.
///
/// The legacy `unavailable` flag is inverted into `available`. Withheld
/// legacy attributes yield `NotImplemented` once the entry is otherwise
/// well formed.
pub fn validate_source_update(update: &SourceUpdate) -> Result<SourceChange, ApiError> {
    let source_type = parse_source_type(&update.source_type)?;

    let available = match (update.available, update.unavailable) {
        (Some(available), None) => available,
        (None, Some(unavailable)) => !unavailable,
        (Some(available), Some(unavailable)) if available != unavailable => available,
        (Some(_), Some(_)) => {
            return Err(ApiError::Validation(format!(
                "Source '{}': 'available' and 'unavailable' contradict each other",
                source_type
            )));
        }
        (None, None) => {
            return Err(ApiError::Validation(format!(
                "Source '{}': the 'available' field must be provided",
                source_type
            )));
        }
    };

    let mut withheld = Vec::new();
    for key in update.extra.keys() {
        if WITHHELD_SOURCE_FIELDS.contains(&key.as_str()) {
            withheld.push(key.as_str());
        } else {
            return Err(ApiError::Validation(format!(
                "Source '{}': unknown field '{}'",
                source_type, key
            )));
        }
    }
    if !withheld.is_empty() {
        return Err(ApiError::NotImplemented(format!(
            "Updating {} is not supported",
            withheld.join(", ")
        )));
    }

    Ok(SourceChange {
        source_type,
        available,
    })
}

pub fn validate_source_updates(updates: &[SourceUpdate]) -> Result<Vec<SourceChange>, ApiError> {
    updates.iter().map(validate_source_update).collect()
}

pub fn validate_bulk_update(
    payload: &ConnectorsAndSourcesUpdate,
) -> Result<Vec<ConnectorSourcesChange>, ApiError> {
    payload
        .connectors
        .iter()
        .map(|entry| {
            Ok(ConnectorSourcesChange {
                connector_id: parse_connector_id(&entry.id)?,
                sources: validate_source_updates(&entry.sources)?,
            })
        })
        .collect()
}

pub fn validate_months_to_fetch(months: i64) -> Result<u32, ApiError> {
    match u32::try_from(months) {
        Ok(m) if (1..=MAX_MONTHS_TO_FETCH).contains(&m) => Ok(m),
        _ => Err(ApiError::Validation(format!(
            "'months_to_fetch' must be between 1 and {}, got {}",
            MAX_MONTHS_TO_FETCH, months
        ))),
    }
}

pub fn validate_connector_update(update: &ConnectorUpdate) -> Result<ConnectorChange, ApiError> {
    let connector_id = parse_connector_id(&update.id)?;
    if update.months_to_fetch.is_none() && update.hidden.is_none() {
        return Err(ApiError::Validation(
            "No field was submitted for update".to_string(),
        ));
    }
    Ok(ConnectorChange {
        connector_id,
        months_to_fetch: update
            .months_to_fetch
            .map(validate_months_to_fetch)
            .transpose()?,
        hidden: update.hidden,
    })
}

pub fn validate_connectors_update(
    payload: &ConnectorsUpdate,
) -> Result<Vec<ConnectorChange>, ApiError> {
    payload
        .connectors
        .iter()
        .map(validate_connector_update)
        .collect()
}

pub fn validate_list_query(query: &ListQuery) -> Result<PageRequest, ApiError> {
    let positive = |name: &str, value: Option<i64>, default: usize| match value {
        None => Ok(default),
        Some(v) if v >= 1 => Ok(usize::try_from(v).unwrap_or(usize::MAX)),
        Some(v) => Err(ApiError::Validation(format!(
            "'{}' must be at least 1, got {}",
            name, v
        ))),
    };

    Ok(PageRequest {
        page: positive("page", query.page, DEFAULT_PAGE)?,
        limit: positive("limit", query.limit, DEFAULT_LIMIT)?,
        all: query.all.unwrap_or(false),
        connector_id: query
            .connector_id
            .as_deref()
            .map(parse_connector_id)
            .transpose()?,
    })
}

pub fn validate_connector_body(id: Uuid, body: &ConnectorBody) -> Result<Connector, ApiError> {
    Ok(Connector {
        id,
        hidden: body.hidden,
        months_to_fetch: body
            .months_to_fetch
            .map(validate_months_to_fetch)
            .transpose()?,
    })
}

/// Checks the `YYYY-MM-DD HH:MM:SS` shape of a stability timestamp.
pub fn validate_last_update(last_update: &str) -> Result<(), ApiError> {
    if LAST_UPDATE_REGEX.is_match(last_update) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "'last_update' must be formatted as YYYY-MM-DD HH:MM:SS, got '{}'",
            last_update
        )))
    }
}

pub fn validate_source_body(connector_id: Uuid, body: &SourceBody) -> Result<Source, ApiError> {
    let source_type = parse_source_type(&body.source_type)?;
    if let Some(stability) = &body.stability {
        validate_last_update(&stability.last_update)?;
    }
    Ok(Source {
        connector_id,
        source_type,
        available: body.available,
        stability: body.stability.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::source::{Stability, StabilityStatus};
    use common::requests::ConnectorAndSourcesUpdate;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> SourceUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_availability_is_rejected() {
        let err = validate_source_update(&entry(json!({ "type": "openapi" }))).unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("'available'")));
    }

    #[test]
    fn explicit_null_counts_as_missing() {
        let err = validate_source_update(&entry(json!({ "type": "openapi", "available": null })))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn legacy_unavailable_is_inverted() {
        let change =
            validate_source_update(&entry(json!({ "name": "fallback", "unavailable": true })))
                .unwrap();
        assert_eq!(
            change,
            SourceChange {
                source_type: SourceType::Fallback,
                available: false
            }
        );
    }

    #[test]
    fn contradicting_flags_are_rejected() {
        let err = validate_source_update(&entry(
            json!({ "type": "openapi", "available": true, "unavailable": true }),
        ))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let agreeing = validate_source_update(&entry(
            json!({ "type": "openapi", "available": true, "unavailable": false }),
        ))
        .unwrap();
        assert!(agreeing.available);
    }

    #[test]
    fn unknown_type_is_rejected_before_anything_else() {
        let err = validate_source_update(&entry(json!({ "type": "ftp" }))).unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("ftp")));
    }

    #[test]
    fn withheld_fields_are_not_implemented() {
        let err = validate_source_update(&entry(
            json!({ "type": "directaccess", "available": true, "sync_periodicity": 1.15 }),
        ))
        .unwrap_err();
        assert!(matches!(err, ApiError::NotImplemented(msg) if msg.contains("sync_periodicity")));
    }

    #[test]
    fn stray_fields_are_rejected() {
        let err = validate_source_update(&entry(
            json!({ "type": "openapi", "available": true, "colour": "blue" }),
        ))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("colour")));
    }

    #[test]
    fn bulk_update_rejects_bad_connector_id() {
        let payload = ConnectorsAndSourcesUpdate {
            connectors: vec![ConnectorAndSourcesUpdate {
                id: "not-a-uuid".to_string(),
                sources: vec![SourceUpdate::available("openapi", true)],
            }],
        };
        assert!(matches!(
            validate_bulk_update(&payload),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn connector_update_needs_one_field() {
        let update = ConnectorUpdate {
            id: Uuid::nil().to_string(),
            ..ConnectorUpdate::default()
        };
        let err = validate_connector_update(&update).unwrap_err();
        assert_eq!(err.to_string(), "No field was submitted for update");
    }

    #[test]
    fn months_to_fetch_bounds() {
        assert_eq!(validate_months_to_fetch(1).unwrap(), 1);
        assert_eq!(validate_months_to_fetch(24).unwrap(), 24);
        assert!(validate_months_to_fetch(0).is_err());
        assert!(validate_months_to_fetch(25).is_err());
        assert!(validate_months_to_fetch(-3).is_err());
    }

    #[test]
    fn list_query_defaults_and_bounds() {
        assert_eq!(
            validate_list_query(&ListQuery::default()).unwrap(),
            PageRequest::default()
        );
        let query = ListQuery {
            page: Some(0),
            ..ListQuery::default()
        };
        assert!(matches!(
            validate_list_query(&query),
            Err(ApiError::Validation(_))
        ));
        let query = ListQuery {
            limit: Some(-1),
            ..ListQuery::default()
        };
        assert!(validate_list_query(&query).is_err());
    }

    #[test]
    fn source_body_checks_timestamp_format() {
        let mut body = SourceBody {
            source_type: "openapi".to_string(),
            available: true,
            stability: Some(Stability {
                status: StabilityStatus::Stable,
                last_update: "2025-03-10T14:00:25Z".to_string(),
            }),
        };
        assert!(validate_source_body(Uuid::nil(), &body).is_err());

        if let Some(stability) = body.stability.as_mut() {
            stability.last_update = "2025-03-10 14:00:25".to_string();
        }
        let source = validate_source_body(Uuid::nil(), &body).unwrap();
        assert_eq!(source.source_type, SourceType::OpenApi);
    }

    #[test]
    fn last_update_shape() {
        assert!(validate_last_update("2025-04-10 18:37:39").is_ok());
        for bad in ["2025-4-10 18:37:39", "2025-04-10", " 2025-04-10 18:37:39", ""] {
            let err = validate_last_update(bad).unwrap_err();
            assert!(
                matches!(&err, ApiError::Validation(msg) if msg.contains("YYYY-MM-DD HH:MM:SS")),
                "{bad:?}: {err:?}"
            );
        }
    }
}

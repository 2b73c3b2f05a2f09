//! Seeds the Record Store from static fixture files.
//!
//! Two JSON arrays are read once at startup: `connectors.json` and
//! `sources.json`. They come from `CONNECTORS_FIXTURES_DIR` when configured,
//! otherwise from the copies embedded into the binary at build time.
//!
//! Every record must satisfy the same field rules the API enforces
//! (`months_to_fetch` in range, `last_update` timestamp shape); a violation
//! fails the load. Integrity problems (duplicate keys, sources without a
//! connector) are only logged and the records are kept; duplicates later
//! surface as `Conflict` when a request tries to resolve them.

use crate::error::ApiError;
use crate::registry::validation::{validate_last_update, validate_months_to_fetch};
use crate::store::state::Collections;
use common::model::connector::Connector;
use common::model::source::Source;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

static EMBEDDED_FIXTURES: Dir = include_dir!("$CARGO_MANIFEST_DIR/fixtures");

pub const CONNECTORS_FILE: &str = "connectors.json";
pub const SOURCES_FILE: &str = "sources.json";

/// Loads both collections, from `dir` when given, else from the embedded set.
pub fn load(dir: Option<&Path>) -> Result<Collections, ApiError> {
    let (connectors_raw, sources_raw) = match dir {
        Some(dir) => {
            info!("Loading fixtures from {}", dir.display());
            (
                read_file(&dir.join(CONNECTORS_FILE))?,
                read_file(&dir.join(SOURCES_FILE))?,
            )
        }
        None => {
            info!("Loading embedded fixtures");
            (embedded(CONNECTORS_FILE)?, embedded(SOURCES_FILE)?)
        }
    };

    let connectors: Vec<Connector> = parse(CONNECTORS_FILE, &connectors_raw)?;
    info!("Connectors data loaded: {} records", connectors.len());
    let sources: Vec<Source> = parse(SOURCES_FILE, &sources_raw)?;
    info!("Connector sources data loaded: {} records", sources.len());
    check_records(&connectors, &sources)?;

    for problem in integrity_problems(&connectors, &sources) {
        warn!("Fixture integrity: {}", problem);
    }

    Ok(Collections::new(connectors, sources))
}

fn read_file(path: &Path) -> Result<Vec<u8>, ApiError> {
    fs::read(path).map_err(|e| ApiError::Fixture(format!("{}: {}", path.display(), e)))
}

fn embedded(name: &str) -> Result<Vec<u8>, ApiError> {
    EMBEDDED_FIXTURES
        .get_file(name)
        .map(|f| f.contents().to_vec())
        .ok_or_else(|| ApiError::Fixture(format!("embedded fixture '{}' is missing", name)))
}

fn parse<T: DeserializeOwned>(name: &str, raw: &[u8]) -> Result<Vec<T>, ApiError> {
    serde_json::from_slice(raw).map_err(|e| ApiError::Fixture(format!("{}: {}", name, e)))
}

fn check_records(connectors: &[Connector], sources: &[Source]) -> Result<(), ApiError> {
    for connector in connectors {
        if let Some(months) = connector.months_to_fetch {
            validate_months_to_fetch(i64::from(months)).map_err(|e| {
                ApiError::Fixture(format!("{}: connector {}: {}", CONNECTORS_FILE, connector.id, e))
            })?;
        }
    }
    for source in sources {
        if let Some(stability) = &source.stability {
            validate_last_update(&stability.last_update).map_err(|e| {
                ApiError::Fixture(format!(
                    "{}: source '{}' of connector {}: {}",
                    SOURCES_FILE, source.source_type, source.connector_id, e
                ))
            })?;
        }
    }
    Ok(())
}

/// Describes every broken uniqueness or ownership invariant in the data.
pub fn integrity_problems(connectors: &[Connector], sources: &[Source]) -> Vec<String> {
    let mut problems = Vec::new();

    let mut ids = HashSet::new();
    for connector in connectors {
        if !ids.insert(connector.id) {
            problems.push(format!("duplicate connector id {}", connector.id));
        }
    }

    let mut keys = HashSet::new();
    for source in sources {
        if !keys.insert((source.connector_id, source.source_type)) {
            problems.push(format!(
                "duplicate source '{}' for connector {}",
                source.source_type, source.connector_id
            ));
        }
        if !ids.contains(&source.connector_id) {
            problems.push(format!(
                "source '{}' references unknown connector {}",
                source.source_type, source.connector_id
            ));
        }
    }

    problems
}

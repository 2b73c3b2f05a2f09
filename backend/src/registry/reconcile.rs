//! Joins connectors with their sources and merges partial updates back.
//!
//! ## Read path
//!
//! `get_connector_and_sources` resolves a connector and collects its sources
//! in store order. A connector without sources yields an aggregate with an
//! empty list, which is not an error.
//!
//! ## Merge path
//!
//! Updates run in two passes over the exclusively locked collections:
//!
//! 1.  **Plan**: every entry is resolved and the merged record is built as a
//!     copy. The merge overwrites only the fields named by the change. Any
//!     `NotFound` or `Conflict` aborts here, before a single write.
//! 2.  **Commit**: the merged copies are written back through
//!     `replace_connector` / `replace_source`, in payload order, so a later
//!     entry for the same key wins.
//!
//! A failing batch therefore leaves the store exactly as it was.

use crate::error::ApiError;
use crate::registry::identity::{resolve_connector, resolve_source};
use crate::registry::validation::{ConnectorChange, ConnectorSourcesChange, SourceChange};
use crate::store::Collections;
use common::model::aggregate::ConnectorAndSources;
use common::model::connector::Connector;
use common::model::source::Source;
use uuid::Uuid;

pub fn build_aggregate(collections: &Collections, connector: &Connector) -> ConnectorAndSources {
    ConnectorAndSources {
        id: connector.id,
        sources: collections
            .list_sources_for(connector.id)
            .map(Source::to_connector_source)
            .collect(),
    }
}

pub fn get_connector_and_sources(
    collections: &Collections,
    connector_id: &Uuid,
) -> Result<ConnectorAndSources, ApiError> {
    let connector = resolve_connector(collections, connector_id)?;
    Ok(build_aggregate(collections, connector))
}

/// Every aggregate, in connector insertion order.
pub fn all_aggregates(collections: &Collections) -> Vec<ConnectorAndSources> {
    collections
        .list_connectors()
        .iter()
        .map(|connector| build_aggregate(collections, connector))
        .collect()
}

pub fn merge_source(existing: &Source, change: &SourceChange) -> Source {
    Source {
        available: change.available,
        ..existing.clone()
    }
}

pub fn merge_connector(existing: &Connector, change: &ConnectorChange) -> Connector {
    let mut merged = existing.clone();
    if let Some(months) = change.months_to_fetch {
        merged.months_to_fetch = Some(months);
    }
    if let Some(hidden) = change.hidden {
        merged.hidden = Some(hidden);
    }
    merged
}

/// Applies source availability changes across one or more connectors.
///
/// Returns the aggregate of every touched connector after the commit, once
/// per connector, in the order connectors first appear in `changes`.
pub fn apply_source_changes(
    collections: &mut Collections,
    changes: &[ConnectorSourcesChange],
) -> Result<Vec<ConnectorAndSources>, ApiError> {
    let mut staged = Vec::new();
    let mut touched: Vec<Uuid> = Vec::new();

    for change in changes {
        staged.extend(plan_connector(collections, change)?);
        if !touched.contains(&change.connector_id) {
            touched.push(change.connector_id);
        }
    }

    for source in staged {
        collections.replace_source(source);
    }

    touched
        .iter()
        .map(|id| get_connector_and_sources(collections, id))
        .collect()
}

/// Targeted form of `apply_source_changes`, scoped to a single connector.
pub fn apply_connector_source_changes(
    collections: &mut Collections,
    change: &ConnectorSourcesChange,
) -> Result<ConnectorAndSources, ApiError> {
    let staged = plan_connector(collections, change)?;
    for source in staged {
        collections.replace_source(source);
    }
    get_connector_and_sources(collections, &change.connector_id)
}

fn plan_connector(
    collections: &Collections,
    change: &ConnectorSourcesChange,
) -> Result<Vec<Source>, ApiError> {
    let connector = resolve_connector(collections, &change.connector_id)?;
    change
        .sources
        .iter()
        .map(|source_change| {
            resolve_source(collections, &connector.id, source_change.source_type)
                .map(|existing| merge_source(existing, source_change))
        })
        .collect()
}

/// Applies connector-level attribute changes.
///
/// Returns the final state of every touched connector, once each, in the
/// order they first appear in `changes`.
pub fn apply_connector_changes(
    collections: &mut Collections,
    changes: &[ConnectorChange],
) -> Result<Vec<Connector>, ApiError> {
    let mut staged: Vec<Connector> = Vec::with_capacity(changes.len());
    for change in changes {
        // Later entries for the same connector build on the staged copy.
        let merged = match staged.iter().rev().find(|c| c.id == change.connector_id) {
            Some(previous) => merge_connector(previous, change),
            None => merge_connector(resolve_connector(collections, &change.connector_id)?, change),
        };
        staged.push(merged);
    }

    let mut order: Vec<Uuid> = Vec::new();
    for connector in staged {
        if !order.contains(&connector.id) {
            order.push(connector.id);
        }
        collections.replace_connector(connector);
    }

    Ok(order
        .iter()
        .filter_map(|id| collections.get_connector(*id).cloned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::source::{SourceType, Stability, StabilityStatus};

    struct Fixture {
        a: Uuid,
        b: Uuid,
        empty: Uuid,
        collections: Collections,
    }

    fn fixture() -> Fixture {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let empty = Uuid::new_v4();
        let stability = Some(Stability {
            status: StabilityStatus::Unstable,
            last_update: "2025-03-08 11:00:25".to_string(),
        });
        let collections = Collections::new(
            vec![
                Connector {
                    id: a,
                    hidden: Some(false),
                    months_to_fetch: Some(24),
                },
                Connector::new(b),
                Connector::new(empty),
            ],
            vec![
                Source {
                    connector_id: a,
                    source_type: SourceType::OpenApi,
                    available: false,
                    stability: stability.clone(),
                },
                Source {
                    connector_id: b,
                    source_type: SourceType::OpenApi,
                    available: false,
                    stability: None,
                },
                Source {
                    connector_id: a,
                    source_type: SourceType::Fallback,
                    available: true,
                    stability,
                },
            ],
        );
        Fixture {
            a,
            b,
            empty,
            collections,
        }
    }

    fn set(connector_id: Uuid, sources: &[(SourceType, bool)]) -> ConnectorSourcesChange {
        ConnectorSourcesChange {
            connector_id,
            sources: sources
                .iter()
                .map(|&(source_type, available)| SourceChange {
                    source_type,
                    available,
                })
                .collect(),
        }
    }

    fn availability(collections: &Collections, id: Uuid) -> Vec<(SourceType, bool)> {
        collections
            .list_sources_for(id)
            .map(|s| (s.source_type, s.available))
            .collect()
    }

    #[test]
    fn aggregate_joins_sources_in_store_order() {
        let f = fixture();
        let aggregate = get_connector_and_sources(&f.collections, &f.a).unwrap();
        let types: Vec<SourceType> = aggregate.sources.iter().map(|s| s.source_type).collect();
        assert_eq!(types, vec![SourceType::OpenApi, SourceType::Fallback]);
    }

    #[test]
    fn connector_without_sources_is_not_an_error() {
        let f = fixture();
        let aggregate = get_connector_and_sources(&f.collections, &f.empty).unwrap();
        assert!(aggregate.sources.is_empty());
        assert!(matches!(
            get_connector_and_sources(&f.collections, &Uuid::nil()),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn update_touches_only_the_named_source() {
        let mut f = fixture();
        let before_fallback = f
            .collections
            .get_source(f.a, SourceType::Fallback)
            .cloned();
        let before_openapi_stability = f
            .collections
            .get_source(f.a, SourceType::OpenApi)
            .and_then(|s| s.stability.clone());

        let result =
            apply_source_changes(&mut f.collections, &[set(f.a, &[(SourceType::OpenApi, true)])])
                .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(
            availability(&f.collections, f.a),
            vec![(SourceType::OpenApi, true), (SourceType::Fallback, true)]
        );
        assert_eq!(
            f.collections.get_source(f.a, SourceType::Fallback).cloned(),
            before_fallback
        );
        assert_eq!(
            f.collections
                .get_source(f.a, SourceType::OpenApi)
                .and_then(|s| s.stability.clone()),
            before_openapi_stability
        );
        assert_eq!(
            availability(&f.collections, f.b),
            vec![(SourceType::OpenApi, false)]
        );
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let mut f = fixture();
        let changes = [
            set(f.a, &[(SourceType::Fallback, false)]),
            set(f.b, &[(SourceType::OpenApi, true)]),
        ];
        apply_source_changes(&mut f.collections, &changes).unwrap();
        let once = f.collections.clone();
        apply_source_changes(&mut f.collections, &changes).unwrap();
        assert_eq!(f.collections, once);
    }

    #[test]
    fn unknown_connector_leaves_store_unchanged() {
        let mut f = fixture();
        let before = f.collections.clone();
        let changes = [
            set(f.a, &[(SourceType::OpenApi, true)]),
            set(Uuid::nil(), &[(SourceType::OpenApi, true)]),
        ];
        assert!(matches!(
            apply_source_changes(&mut f.collections, &changes),
            Err(ApiError::NotFound(_))
        ));
        assert_eq!(f.collections, before);
    }

    #[test]
    fn unknown_source_never_gets_created() {
        let mut f = fixture();
        let before = f.collections.clone();
        let change = set(
            f.a,
            &[(SourceType::OpenApi, true), (SourceType::DirectAccess, true)],
        );
        assert!(matches!(
            apply_connector_source_changes(&mut f.collections, &change),
            Err(ApiError::NotFound(_))
        ));
        assert_eq!(f.collections, before);
    }

    #[test]
    fn bulk_result_lists_each_connector_once() {
        let mut f = fixture();
        let changes = [
            set(f.a, &[(SourceType::OpenApi, true)]),
            set(f.b, &[(SourceType::OpenApi, true)]),
            set(f.a, &[(SourceType::OpenApi, false)]),
        ];
        let result = apply_source_changes(&mut f.collections, &changes).unwrap();
        let ids: Vec<Uuid> = result.iter().map(|agg| agg.id).collect();
        assert_eq!(ids, vec![f.a, f.b]);
        // last entry for (a, openapi) wins
        assert!(!result[0].sources[0].available);
    }

    #[test]
    fn connector_merge_keeps_unset_attributes() {
        let mut f = fixture();
        let changes = [ConnectorChange {
            connector_id: f.a,
            months_to_fetch: None,
            hidden: Some(true),
        }];
        let updated = apply_connector_changes(&mut f.collections, &changes).unwrap();
        assert_eq!(
            updated,
            vec![Connector {
                id: f.a,
                hidden: Some(true),
                months_to_fetch: Some(24),
            }]
        );
    }

    #[test]
    fn repeated_connector_entries_accumulate() {
        let mut f = fixture();
        let changes = [
            ConnectorChange {
                connector_id: f.b,
                months_to_fetch: Some(6),
                hidden: None,
            },
            ConnectorChange {
                connector_id: f.b,
                months_to_fetch: None,
                hidden: Some(false),
            },
        ];
        let updated = apply_connector_changes(&mut f.collections, &changes).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].months_to_fetch, Some(6));
        assert_eq!(updated[0].hidden, Some(false));
    }

    #[test]
    fn failed_connector_batch_writes_nothing() {
        let mut f = fixture();
        let before = f.collections.clone();
        let changes = [
            ConnectorChange {
                connector_id: f.a,
                months_to_fetch: Some(1),
                hidden: None,
            },
            ConnectorChange {
                connector_id: Uuid::nil(),
                months_to_fetch: Some(1),
                hidden: None,
            },
        ];
        assert!(apply_connector_changes(&mut f.collections, &changes).is_err());
        assert_eq!(f.collections, before);
    }
}

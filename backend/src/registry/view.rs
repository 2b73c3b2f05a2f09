//! Paginated and filtered read views over the aggregate collection.

use crate::error::ApiError;
use crate::registry::reconcile::{all_aggregates, get_connector_and_sources};
use crate::registry::validation::PageRequest;
use crate::store::Collections;
use common::model::aggregate::{ConnectorAndSources, ConnectorsAndSourcesList};
use std::ops::Range;

/// Half-open slice `[(page-1)*limit, page*limit)` clamped to `total`.
///
/// `page` and `limit` are at least 1. A range past the end is empty.
pub fn page_bounds(total: usize, page: usize, limit: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    start..end
}

pub fn list_page(
    collections: &Collections,
    request: &PageRequest,
) -> Result<ConnectorsAndSourcesList, ApiError> {
    let aggregates: Vec<ConnectorAndSources> = match &request.connector_id {
        Some(id) => vec![get_connector_and_sources(collections, id)?],
        None => all_aggregates(collections),
    };

    if request.all {
        return Ok(ConnectorsAndSourcesList::complete(aggregates));
    }

    let total = aggregates.len();
    let range = page_bounds(total, request.page, request.limit);
    let connectors = aggregates
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();
    Ok(ConnectorsAndSourcesList { connectors, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::connector::Connector;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn seven() -> (Vec<Uuid>, Collections) {
        let ids: Vec<Uuid> = (0..7).map(|_| Uuid::new_v4()).collect();
        let collections = Collections::new(ids.iter().copied().map(Connector::new).collect(), vec![]);
        (ids, collections)
    }

    fn paged(page: usize, limit: usize) -> PageRequest {
        PageRequest {
            page,
            limit,
            ..PageRequest::default()
        }
    }

    fn ids_of(list: &ConnectorsAndSourcesList) -> Vec<Uuid> {
        list.connectors.iter().map(|agg| agg.id).collect()
    }

    #[test]
    fn bounds_clamp_to_the_collection() {
        assert_eq!(page_bounds(7, 1, 3), 0..3);
        assert_eq!(page_bounds(7, 3, 3), 6..7);
        assert_eq!(page_bounds(7, 4, 3), 7..7);
        assert_eq!(page_bounds(0, 1, 10), 0..0);
        assert_eq!(page_bounds(7, usize::MAX, usize::MAX), 7..7);
    }

    #[test]
    fn second_and_third_pages_of_seven() {
        let (ids, collections) = seven();
        let page2 = list_page(&collections, &paged(2, 3)).unwrap();
        assert_eq!(ids_of(&page2), ids[3..6].to_vec());
        assert_eq!(page2.total, 7);
        let page3 = list_page(&collections, &paged(3, 3)).unwrap();
        assert_eq!(ids_of(&page3), vec![ids[6]]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let (_, collections) = seven();
        let page = list_page(&collections, &paged(10, 3)).unwrap();
        assert!(page.connectors.is_empty());
        assert_eq!(page.total, 7);
    }

    #[test]
    fn all_ignores_page_and_limit() {
        let (ids, collections) = seven();
        let request = PageRequest {
            page: 5,
            limit: 1,
            all: true,
            connector_id: None,
        };
        assert_eq!(ids_of(&list_page(&collections, &request).unwrap()), ids);
    }

    #[test]
    fn concatenated_pages_cover_everything_once() {
        let (ids, collections) = seven();
        for limit in 1..=8 {
            let mut seen = Vec::new();
            for page in 1.. {
                let slice = list_page(&collections, &paged(page, limit)).unwrap();
                if slice.connectors.is_empty() {
                    break;
                }
                seen.extend(ids_of(&slice));
            }
            assert_eq!(seen, ids, "limit {limit}");
            let unique: HashSet<&Uuid> = seen.iter().collect();
            assert_eq!(unique.len(), seen.len());
        }
    }

    #[test]
    fn filter_narrows_to_one_connector() {
        let (ids, collections) = seven();
        let request = PageRequest {
            connector_id: Some(ids[4]),
            ..PageRequest::default()
        };
        let list = list_page(&collections, &request).unwrap();
        assert_eq!(ids_of(&list), vec![ids[4]]);
        assert_eq!(list.total, 1);

        let missing = PageRequest {
            connector_id: Some(Uuid::nil()),
            ..PageRequest::default()
        };
        assert!(matches!(
            list_page(&collections, &missing),
            Err(ApiError::NotFound(_))
        ));
    }
}

//! Core of the service: everything between a parsed request and the store.
//!
//! - `validation`: payload shape checks, producing typed changes.
//! - `identity`: connector and source lookup by key.
//! - `reconcile`: aggregate read path and partial-update merge path.
//! - `view`: pagination and filtering of the aggregate collection.
//! - `lifecycle`: create/replace/delete, reachable only when enabled.
//!
//! All functions here are synchronous and operate on a borrowed
//! `Collections`; the caller holds the store lock.

pub mod identity;
pub mod lifecycle;
pub mod reconcile;
pub mod validation;
pub mod view;

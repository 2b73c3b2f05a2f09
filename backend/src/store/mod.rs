//! The in-memory Record Store and its startup loader.
//!
//! - `state`: the two collections (connectors, sources) behind one lock,
//!   shared with every handler as `web::Data<RecordStore>`.
//! - `fixtures`: reads the fixture files that seed the store at startup.

pub mod fixtures;
pub mod state;

pub use state::{Collections, RecordStore};

mod directory;
/// Tabular export of topics and subjects.
pub mod export;
mod snapshot;
mod store;

pub use directory::{Directory, STATE_DIR};
pub use export::{ExportError, Format, export_subjects, export_topics};
pub use snapshot::Snapshot;
pub use store::{MemoryStore, Store, StoreError};

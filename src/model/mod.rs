/// Model domain layer: log file resolution, loading, label shaping, tabulation.
pub mod errors;
pub mod flatten;
pub mod labels;
pub mod loader;
pub mod number;
pub mod resolve;
pub mod search;
pub mod table;

pub use errors::TableError;
pub use labels::{LabelSet, OutputKind};
pub use loader::{JsonModelLoader, ModelLoader, ReactionModel};
pub use resolve::resolve_logfile;
pub use table::{Table, build_table};

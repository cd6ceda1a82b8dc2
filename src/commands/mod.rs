/// Command entry point.
pub mod export;

use crate::cli::{Cli, OutputCtx};
use crate::model::TableError;

/// Run the command described by the parsed CLI.
///
/// # Errors
///
/// Returns `TableError` on any command failure.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), TableError> {
    export::run(cli, ctx)
}

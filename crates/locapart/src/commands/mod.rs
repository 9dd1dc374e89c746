//! Command dispatch: bridges CLI args -> back-office calls -> output.

pub mod apartments;
pub mod cities;
pub mod config_cmd;
pub mod reservations;
pub mod util;

use locapart_core::Backoffice;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a resource command to its handler.
pub async fn dispatch(
    cmd: Command,
    backoffice: &Backoffice,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Apartments(args) => apartments::handle(backoffice, args, global).await,
        Command::Cities(args) => cities::handle(backoffice, args, global).await,
        Command::Reservations(args) => reservations::handle(backoffice, args, global).await,
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("config and completions are handled before dispatch")
        }
    }
}

//! City command handlers.

use std::sync::Arc;

use tabled::Tabled;

use locapart_core::{Backoffice, City, CityInput};

use crate::cli::{CitiesArgs, CitiesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::Output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CityRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Arc<City>> for CityRow {
    fn from(c: &Arc<City>) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(bo: &Backoffice, args: CitiesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let out = Output::from_global(global);

    match args.command {
        CitiesCommand::List => {
            let cities = bo.cities().list().await?;
            out.list(cities.as_slice(), |c| CityRow::from(c), |c| c.id.to_string());
            Ok(())
        }

        CitiesCommand::Create { name } => {
            // Load first so the new city lands in the cache with its
            // synthetic id.
            bo.cities().list().await?;
            let input = CityInput {
                name: name.unwrap_or_default(),
            };
            match bo.create_city(input).await? {
                Some(city) => out.note(&format!("City '{}' created (id {})", city.name, city.id)),
                None => out.note("City created"),
            }
            Ok(())
        }

        CitiesCommand::Update { id, name } => {
            let current = util::require(bo.cities(), id).await?;
            let mut input = CityInput::from(current.as_ref());
            if let Some(name) = name {
                input.name = name;
            }
            bo.update_city(id, input).await?;
            out.note(&format!("City {id} updated"));
            Ok(())
        }

        CitiesCommand::Delete { id } => {
            let city = util::require(bo.cities(), id).await?;
            if !util::confirm(&format!("Delete city '{}'?", city.name), global.yes)? {
                return Ok(());
            }
            bo.cities().delete(id).await?;
            out.note(&format!("City {id} deleted"));
            Ok(())
        }
    }
}

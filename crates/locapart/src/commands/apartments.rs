//! Apartment command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tracing::warn;

use locapart_core::{Apartment, ApartmentInput, Backoffice};

use crate::cli::{ApartmentFields, ApartmentsArgs, ApartmentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::Output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApartmentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Postal code")]
    postal_code: String,
    #[tabled(rename = "City")]
    city: String,
}

fn row(bo: &Backoffice, out: &Output, a: &Arc<Apartment>) -> ApartmentRow {
    ApartmentRow {
        id: a.id,
        name: a.name.clone(),
        kind: a.kind.clone(),
        price: format!("{:.2}", a.price),
        address: a.address.clone(),
        postal_code: a.postal_code.clone(),
        city: bo
            .city_label(a.city_id)
            .unwrap_or_else(|| out.missing(a.city_id)),
    }
}

/// Overlay the given flags on `base`, resolving `--city` by name.
async fn merge(bo: &Backoffice, base: ApartmentInput, fields: ApartmentFields) -> ApartmentInput {
    let resolved = match fields.city.as_deref() {
        Some(label) => bo.city_id_for(label).await,
        None => None,
    };
    ApartmentInput {
        city_id: util::relabel(fields.city.as_deref(), base.city_id, resolved),
        price: fields.price.or(base.price),
        kind: fields.kind.unwrap_or(base.kind),
        postal_code: fields.postal_code.unwrap_or(base.postal_code),
        address: fields.address.unwrap_or(base.address),
        name: fields.name.unwrap_or(base.name),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    bo: &Backoffice,
    args: ApartmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let out = Output::from_global(global);

    match args.command {
        ApartmentsCommand::List => {
            let apartments = bo.apartments().list().await?;
            if let Err(e) = bo.cities().list().await {
                warn!(error = %e, "city names unavailable");
            }
            out.list(
                apartments.as_slice(),
                |a| row(bo, &out, a),
                |a| a.id.to_string(),
            );
            Ok(())
        }

        ApartmentsCommand::Create(fields) => {
            bo.apartments().list().await?;
            let input = merge(bo, ApartmentInput::default(), fields).await;
            match bo.create_apartment(input).await? {
                Some(apt) => out.note(&format!("Apartment '{}' created (id {})", apt.name, apt.id)),
                None => out.note("Apartment created"),
            }
            Ok(())
        }

        ApartmentsCommand::Update { id, fields } => {
            let current = util::require(bo.apartments(), id).await?;
            let input = merge(bo, ApartmentInput::from(current.as_ref()), fields).await;
            bo.update_apartment(id, input).await?;
            out.note(&format!("Apartment {id} updated"));
            Ok(())
        }

        ApartmentsCommand::Delete { id } => {
            let apt = util::require(bo.apartments(), id).await?;
            if !util::confirm(&format!("Delete apartment '{}'?", apt.name), global.yes)? {
                return Ok(());
            }
            bo.apartments().delete(id).await?;
            out.note(&format!("Apartment {id} deleted"));
            Ok(())
        }
    }
}

//! Reservation command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tracing::warn;

use locapart_core::{Backoffice, Reservation, ReservationInput, ReservationStatus};

use crate::cli::{GlobalOpts, ReservationFields, ReservationsArgs, ReservationsCommand};
use crate::error::CliError;
use crate::output::Output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReservationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Apartment")]
    apartment: String,
    #[tabled(rename = "Start")]
    start: i64,
    #[tabled(rename = "End")]
    end: i64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Code")]
    code: String,
}

fn row(bo: &Backoffice, out: &Output, r: &Arc<Reservation>) -> ReservationRow {
    ReservationRow {
        id: r.id,
        apartment: bo
            .apartment_label(r.apartment_id)
            .unwrap_or_else(|| out.missing(r.apartment_id)),
        start: r.period_start,
        end: r.period_end,
        status: out.status(r.status),
        code: r.code.clone(),
    }
}

/// Overlay the given flags on `base`, resolving `--apartment` by name.
async fn merge(
    bo: &Backoffice,
    base: ReservationInput,
    fields: ReservationFields,
) -> ReservationInput {
    let resolved = match fields.apartment.as_deref() {
        Some(label) => bo.apartment_id_for(label).await,
        None => None,
    };
    ReservationInput {
        apartment_id: util::relabel(fields.apartment.as_deref(), base.apartment_id, resolved),
        period_start: fields.start.or(base.period_start),
        period_end: fields.end.or(base.period_end),
        status: base.status,
        code: fields.code.unwrap_or(base.code),
    }
}

async fn set_status(
    bo: &Backoffice,
    out: &Output,
    id: i64,
    status: ReservationStatus,
) -> Result<(), CliError> {
    bo.reservations().list().await?;
    bo.reservations().set_status(id, status)?.await?;
    out.note(&format!("Reservation {id} is now {status}"));
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    bo: &Backoffice,
    args: ReservationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let out = Output::from_global(global);

    match args.command {
        ReservationsCommand::List => {
            let reservations = bo.reservations().list().await?;
            if let Err(e) = bo.apartments().list().await {
                warn!(error = %e, "apartment names unavailable");
            }
            out.list(
                reservations.as_slice(),
                |r| row(bo, &out, r),
                |r| r.id.to_string(),
            );
            Ok(())
        }

        ReservationsCommand::Create(fields) => {
            bo.reservations().list().await?;
            let input = merge(bo, ReservationInput::default(), fields).await;
            match bo.create_reservation(input).await? {
                Some(r) => out.note(&format!("Reservation {} created", r.id)),
                None => out.note("Reservation created"),
            }
            Ok(())
        }

        ReservationsCommand::Update { id, fields } => {
            let current = util::require(bo.reservations(), id).await?;
            let input = merge(bo, ReservationInput::from(current.as_ref()), fields).await;
            bo.update_reservation(id, input).await?;
            out.note(&format!("Reservation {id} updated"));
            Ok(())
        }

        ReservationsCommand::Delete { id } => {
            util::require(bo.reservations(), id).await?;
            if !util::confirm(&format!("Delete reservation {id}?"), global.yes)? {
                return Ok(());
            }
            bo.reservations().delete(id).await?;
            out.note(&format!("Reservation {id} deleted"));
            Ok(())
        }

        ReservationsCommand::Cancel { id } => {
            set_status(bo, &out, id, ReservationStatus::Cancelled).await
        }

        ReservationsCommand::Activate { id } => {
            set_status(bo, &out, id, ReservationStatus::Active).await
        }
    }
}

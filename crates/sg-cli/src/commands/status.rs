//! Status command: report applied vs pending migration units.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::context::RuntimeContext;
use sg_core::plan_apply;

#[derive(Debug, Serialize)]
struct UnitStatus {
    id: String,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    store: &'static str,
    applied: usize,
    pending: usize,
    units: Vec<UnitStatus>,
}

pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let units = ctx.load_units()?;

    ctx.store
        .probe()
        .await
        .context("Store is not reachable")?;
    ctx.store
        .ensure_ledger()
        .await
        .context("Failed to prepare the migration ledger")?;
    let applied = ctx
        .store
        .applied_migrations()
        .await
        .context("Failed to read the migration ledger")?;
    let pending = plan_apply(&units, &applied).context("Ledger is inconsistent with disk")?;

    let mut rows: Vec<UnitStatus> = applied
        .iter()
        .map(|record| UnitStatus {
            id: record.id.to_string(),
            state: "applied",
            applied_at: Some(record.applied_at),
        })
        .collect();
    rows.extend(pending.iter().map(|unit| UnitStatus {
        id: unit.id.to_string(),
        state: "pending",
        applied_at: None,
    }));

    let report = StatusReport {
        store: ctx.store.store_type(),
        applied: applied.len(),
        pending: pending.len(),
        units: rows,
    };

    match args.output {
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        StatusOutput::Table => print_table(&report),
    }
    Ok(())
}

fn print_table(report: &StatusReport) {
    println!(
        "{} applied, {} pending on {}",
        report.applied, report.pending, report.store
    );
    for unit in &report.units {
        match unit.applied_at {
            Some(at) => println!("  {:<40} applied  {}", unit.id, at.to_rfc3339()),
            None => println!("  {:<40} pending", unit.id),
        }
    }
}

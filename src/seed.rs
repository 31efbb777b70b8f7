//! Sample plant: thirteen machines and three work orders for customer ATLAS
//! routed across them on 2024-12-18.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::error::Result;
use crate::model::AssignmentRecord;
use crate::scheduler::{BulkLoadReport, Scheduler};
use crate::store::AssignmentStore;

/// Machine names and descriptions.
pub const MACHINES: [(&str, &str); 13] = [
    ("SARDON", "Sardon Machine"),
    ("RAM 2", "Ram 2 Machine"),
    ("FINAL KALITE KONTROL", "Final Quality Control"),
    ("RAM 1", "Ram 1 Machine"),
    ("SARDON 1", "Sardon 1 Machine"),
    ("KURUTMA 2", "Drying Machine 2"),
    ("SARDON 2", "Sardon 2 Machine"),
    ("YIKAMA", "Washing Machine"),
    ("TUP ACMA", "Tube Opening Machine"),
    ("KURUTMA 1", "Drying Machine 1"),
    ("BALON", "Balloon Machine"),
    ("KON5", "Kon5 Machine"),
    ("KON3", "Kon3 Machine"),
];

pub const CUSTOMER: &str = "ATLAS";

/// (machine, order, start, end) with times as `(hour, minute)`.
const ROUTES: [(&str, &str, (u32, u32), (u32, u32)); 10] = [
    ("KON3", "MFG-1", (9, 58), (10, 28)),
    ("YIKAMA", "MFG-1", (11, 0), (12, 30)),
    ("KURUTMA 1", "MFG-1", (12, 45), (14, 15)),
    ("RAM 2", "MFG-1", (14, 30), (16, 0)),
    ("KON5", "MFG-2", (10, 30), (11, 30)),
    ("SARDON 1", "MFG-2", (12, 0), (13, 30)),
    ("KURUTMA 2", "MFG-2", (14, 0), (15, 30)),
    ("BALON", "MFG-3", (11, 0), (13, 0)),
    ("TUP ACMA", "MFG-3", (13, 30), (15, 0)),
    ("FINAL KALITE KONTROL", "MFG-3", (15, 30), (17, 0)),
];

fn on_sample_day((hour, minute): (u32, u32)) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 12, 18)?.and_hms_opt(hour, minute, 0)
}

/// The sample assignments as unvalidated records.
pub fn sample_records() -> Vec<AssignmentRecord> {
    ROUTES
        .iter()
        .filter_map(|&(machine, order, start, end)| {
            Some(AssignmentRecord::new(
                machine,
                order,
                CUSTOMER,
                on_sample_day(start)?,
                on_sample_day(end)?,
            ))
        })
        .collect()
}

/// Registers the sample machines and loads the sample assignments.
///
/// Fails if a machine name is already registered.
pub fn load_sample_plant<S: AssignmentStore>(scheduler: &Scheduler<S>) -> Result<BulkLoadReport> {
    for (name, description) in MACHINES {
        scheduler.register_machine(name, description)?;
    }
    let report = scheduler.bulk_load(sample_records());
    info!(
        machines = MACHINES.len(),
        assignments = report.loaded,
        "sample plant loaded"
    );
    Ok(report)
}

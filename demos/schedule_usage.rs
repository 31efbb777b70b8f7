//! Example demonstrating the per-machine Schedule index.
//!
//! Run with: `cargo run --example schedule_usage`

use chrono::{NaiveDate, NaiveDateTime};
use qtty::Minute;
use shopgantt::interval::Interval;
use shopgantt::schedule::Schedule;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 18)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn slot(from: (u32, u32), to: (u32, u32)) -> Interval<Minute> {
    Interval::between(at(from.0, from.1), at(to.0, to.1)).unwrap()
}

fn main() {
    println!("=== Schedule Index Usage Example ===\n");

    let mut kon3 = Schedule::<Minute>::new();
    println!("Created empty schedule for KON3");

    println!("\n--- Booking Slots ---");
    book(&mut kon3, "MFG-1", slot((9, 58), (10, 28)));
    book(&mut kon3, "MFG-4", slot((11, 0), (12, 0)));
    book(&mut kon3, "MFG-5", slot((13, 15), (14, 0)));

    println!("\n--- Booked Slots (in order) ---");
    for entry in kon3.iter() {
        let interval = entry.interval();
        println!(
            "{}: {} .. {} ({} min)",
            entry.id(),
            interval.start_instant().unwrap().format("%H:%M"),
            interval.end_instant().unwrap().format("%H:%M"),
            interval.duration().value()
        );
    }

    println!("\n--- Touching Slot Is A Conflict ---");
    book(&mut kon3, "MFG-6", slot((12, 0), (13, 0)));

    println!("\n--- Conflict Queries ---");
    let query = slot((10, 0), (11, 30));
    let hits: Vec<_> = kon3.conflicts(query).unwrap().map(|e| e.id().to_string()).collect();
    println!("10:00..11:30 conflicts with {:?}", hits);
    println!("12:01..13:14 free: {}", kon3.is_free(slot((12, 1), (13, 14))).unwrap());

    if let (Some(first), Some(last)) = (kon3.earliest_start(), kon3.latest_end()) {
        println!("\nBooked span: {} minutes", last.value() - first.value());
    }
}

fn book(schedule: &mut Schedule<Minute>, id: &str, interval: Interval<Minute>) {
    match schedule.insert(id, interval) {
        Ok(()) => println!("Booked {} at {}", id, interval),
        Err(e) => println!("Rejected {}: {}", id, e),
    }
}

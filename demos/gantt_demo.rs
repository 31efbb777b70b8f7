//! Seeds the sample plant, books a few more work orders and hit-tests the
//! resulting Gantt chart.
//!
//! Run with: `RUST_LOG=debug cargo run --example gantt_demo`

use chrono::{NaiveDate, NaiveDateTime};
use shopgantt::scheduler::{OrderRule, Proposal, Scheduler, SchedulerConfig};
use shopgantt::seed::{load_sample_plant, CUSTOMER};
use shopgantt::store::AssignmentStore;
use shopgantt::timeline::{Point, Timeline, Tooltip};
use tracing_subscriber::EnvFilter;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 18)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn main() -> shopgantt::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scheduler = Scheduler::in_memory(SchedulerConfig::default())?;
    let report = load_sample_plant(&scheduler)?;
    println!("Seeded {} assignments ({} rejected)", report.loaded, report.rejected.len());

    let machine = |name: &str| {
        scheduler
            .store()
            .machine_by_name(name)
            .map(|m| m.id().to_string())
            .unwrap_or_default()
    };

    let proposals = [
        ("KON3", at(10, 28), at(11, 0)),
        ("KON3", at(10, 29), at(11, 0)),
        ("SARDON", at(9, 0), at(10, 0)),
    ];
    for (name, start, end) in proposals {
        let proposal = Proposal {
            machine_id: machine(name),
            start,
            end,
            order: OrderRule::Next,
            customer: CUSTOMER.to_string(),
        };
        match scheduler.propose_assignment(proposal) {
            Ok(done) => println!("{name}: booked {}", done.work_order.order_number()),
            Err(e) => println!("{name}: rejected [{}] {e}", e.kind()),
        }
    }

    let layout = Timeline::default().layout(&scheduler.timeline());
    let chart = layout.chart()?;
    println!("\nChart {}x{} px, {} rows", chart.width(), chart.height(), chart.rows().len());
    if let Some((lo, hi)) = chart.domain() {
        println!("Domain {lo} .. {hi}");
    }
    for tick in chart.ticks() {
        println!("  tick {:>7.1}px {}", tick.x, tick.label);
    }
    for row in chart.rows() {
        let orders: Vec<_> = row.bars.iter().map(|b| b.order_number()).collect();
        println!("  {:<22} y={:>5.1} {:?}", row.machine_name, row.y, orders);
    }

    let kon3 = chart
        .rows()
        .iter()
        .find(|row| row.machine_name == "KON3")
        .and_then(|row| row.bars.first());
    if let Some(bar) = kon3 {
        let pointer = Point::new(bar.rect.x + bar.rect.width / 2.0, bar.rect.y + 1.0);
        if let Some(hovered) = chart.hit_test(pointer) {
            let Tooltip {
                machine_name,
                order_number,
                customer,
                start,
                end,
            } = Tooltip::for_bar(hovered);
            println!("\nHover at ({:.1}, {:.1}): {machine_name} {order_number} {customer} {start} .. {end}", pointer.x, pointer.y);
            for linked in chart.bars_of_order(&order_number) {
                let style = chart.bar_style(linked, Some("MFG-2"), Some(hovered));
                println!("  linked {} opacity {}", linked.machine_name(), style.opacity);
            }
        }
    }

    Ok(())
}

use chrono::{NaiveDate, NaiveDateTime};

use super::highlight::is_hover_linked;
use super::*;
use crate::error::ErrorKind;
use crate::model::{Assignment, TimeSpan};

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 18)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn view(machine: &str, order: &str, from: (u32, u32), to: (u32, u32)) -> AssignmentView {
    let span = TimeSpan::new(at(from.0, from.1, 0), at(to.0, to.1, 0)).unwrap();
    AssignmentView {
        assignment: Assignment::new(format!("id-{machine}"), format!("id-{order}"), span),
        machine_name: machine.to_string(),
        order_number: order.to_string(),
        customer: "ATLAS".to_string(),
    }
}

fn two_machines() -> Vec<AssignmentView> {
    vec![
        view("B", "MFG-2", (9, 30), (10, 30)),
        view("A", "MFG-1", (9, 0), (10, 0)),
    ]
}

fn chart(views: &[AssignmentView]) -> ChartLayout {
    Timeline::default().layout(views).into_chart().unwrap()
}

mod layout {
    use super::*;

    #[test]
    fn test_empty_input_is_empty_layout() {
        let layout = Timeline::default().layout(&[]);
        assert!(layout.is_empty());
        assert_eq!(layout.chart().unwrap_err().kind(), ErrorKind::EmptyDataSet);
        assert_eq!(layout.into_chart().unwrap_err(), Error::EmptyDataSet);
    }

    #[test]
    fn test_two_machine_scenario() {
        let chart = chart(&two_machines());

        let names: Vec<_> = chart.rows().iter().map(|r| r.machine_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(chart.domain(), Some((at(8, 55, 30), at(10, 34, 30))));
        assert_eq!(chart.width(), 1200.0);
        assert_eq!(chart.height(), 2.0 * 60.0 + 50.0 + 60.0 + 80.0);

        let ticks: Vec<_> = chart.ticks().iter().map(|t| t.at).collect();
        assert_eq!(ticks, vec![at(8, 0, 0), at(9, 0, 0), at(10, 0, 0)]);
    }

    #[test]
    fn test_bar_geometry() {
        let chart = chart(&two_machines());
        let a = &chart.rows()[0].bars[0];
        let b = &chart.rows()[1].bars[0];

        assert_eq!(chart.rows()[0].y, 70.0);
        assert_eq!(chart.rows()[1].y, 130.0);
        assert_eq!(a.rect.y, 50.0);
        assert_eq!(a.rect.height, 40.0);
        assert_eq!(b.row, 1);

        // 60 of 99 domain minutes across a 1010 px plot.
        assert!((a.rect.width - 60.0 / 99.0 * 1010.0).abs() < 1e-9);
        assert!((a.rect.x - chart.x_at(at(9, 0, 0))).abs() < 1e-9);
        assert!(a.rect.x > chart.plot_area().x);
        assert!(b.rect.right() < chart.plot_area().right());
    }

    #[test]
    fn test_layout_is_idempotent_and_order_independent() {
        let views = two_machines();
        let mut reversed = views.clone();
        reversed.reverse();

        let timeline = Timeline::default();
        assert_eq!(timeline.layout(&views), timeline.layout(&views));
        assert_eq!(timeline.layout(&views), timeline.layout(&reversed));
    }

    #[test]
    fn test_rows_sorted_and_bars_in_start_order() {
        let views = vec![
            view("YIKAMA", "MFG-1", (13, 0), (14, 0)),
            view("KON3", "MFG-2", (11, 0), (12, 0)),
            view("KON3", "MFG-1", (9, 0), (10, 0)),
            view("BALON", "MFG-3", (10, 0), (11, 0)),
        ];
        let chart = chart(&views);

        let names: Vec<_> = chart.rows().iter().map(|r| r.machine_name.as_str()).collect();
        assert_eq!(names, vec!["BALON", "KON3", "YIKAMA"]);
        let kon3: Vec<_> = chart.rows()[1].bars.iter().map(|b| b.order_number()).collect();
        assert_eq!(kon3, vec!["MFG-1", "MFG-2"]);
        assert_eq!(chart.bars().count(), 4);
    }

    #[test]
    fn test_short_bar_gets_minimum_width() {
        let views = vec![
            view("A", "MFG-1", (0, 0), (0, 1)),
            view("A", "MFG-2", (23, 0), (23, 59)),
        ];
        let chart = chart(&views);
        assert_eq!(chart.rows()[0].bars[0].rect.width, 2.0);
    }

    #[test]
    fn test_rows_never_overlap_vertically() {
        let views: Vec<_> = (0..6)
            .map(|i| view(&format!("M{i}"), &format!("MFG-{i}"), (9, 0), (10, 0)))
            .collect();
        let chart = chart(&views);
        for pair in chart.rows().windows(2) {
            let upper = &pair[0].bars[0].rect;
            let lower = &pair[1].bars[0].rect;
            assert!(upper.bottom() < lower.y);
        }
    }

    #[test]
    fn test_no_nan_in_single_bar_layout() {
        let chart = chart(&[view("A", "MFG-1", (9, 0), (9, 30))]);
        let bar = &chart.rows()[0].bars[0];
        assert!(bar.rect.x.is_finite() && bar.rect.width.is_finite());
        assert!(chart.ticks().iter().all(|t| t.x.is_finite()));
    }

    #[test]
    fn test_custom_tick_format() {
        let timeline = Timeline::new(LayoutConfig {
            tick_format: "%H:%M".into(),
            ..LayoutConfig::default()
        })
        .unwrap();
        let chart = timeline.layout(&two_machines()).into_chart().unwrap();
        let labels: Vec<_> = chart.ticks().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["08:00", "09:00", "10:00"]);
    }

    #[test]
    fn test_invalid_config_refused() {
        let err = Timeline::new(LayoutConfig {
            row_height: 30.0,
            ..LayoutConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
}

mod interaction {
    use super::*;

    #[test]
    fn test_hit_inside_bar() {
        let chart = chart(&two_machines());
        let b = &chart.rows()[1].bars[0];
        let pointer = Point::new(b.rect.x + b.rect.width / 2.0, chart.rows()[1].y + 19.0);

        let hit = chart.hit_test(pointer).unwrap();
        assert_eq!(hit.order_number(), "MFG-2");
        assert_eq!(hit.machine_name(), "B");
    }

    #[test]
    fn test_hit_on_edges() {
        let chart = chart(&two_machines());
        let a = &chart.rows()[0].bars[0];
        let y = chart.rows()[0].y;
        assert!(chart.hit_test(Point::new(a.rect.x, y + 20.0)).is_some());
        assert!(chart.hit_test(Point::new(a.rect.right(), y - 20.0)).is_some());
    }

    #[test]
    fn test_miss_outside_bars() {
        let chart = chart(&two_machines());
        let a = &chart.rows()[0].bars[0];
        let y = chart.rows()[0].y;

        // Gap between rows.
        assert!(chart.hit_test(Point::new(a.rect.x + 1.0, y + 25.0)).is_none());
        // Same row, after the bar ends.
        assert!(chart.hit_test(Point::new(a.rect.right() + 1.0, y)).is_none());
        // Machine label column.
        assert!(chart.hit_test(Point::new(10.0, y)).is_none());
    }

    #[test]
    fn test_time_at_pointer() {
        let chart = chart(&two_machines());
        let x = chart.x_at(at(9, 45, 0));
        assert_eq!(chart.time_at(x), Some(at(9, 45, 0)));
    }

    #[test]
    fn test_highlight_exact_match_only() {
        assert!(is_highlighted("MFG-2", Some("MFG-2")));
        assert!(!is_highlighted("MFG-2", Some("MFG-20")));
        assert!(!is_highlighted("MFG-20", Some("MFG-2")));
        assert!(!is_highlighted("MFG-2", None));
    }

    #[test]
    fn test_hover_links_bars_of_same_order() {
        let views = vec![
            view("KON3", "MFG-1", (9, 0), (10, 0)),
            view("YIKAMA", "MFG-1", (10, 30), (11, 0)),
            view("BALON", "MFG-2", (9, 0), (10, 0)),
        ];
        let chart = chart(&views);
        let kon3 = &chart.rows()[1].bars[0];
        let hovered = chart
            .hit_test(Point::new(kon3.rect.x + 5.0, chart.rows()[1].y))
            .unwrap();

        let linked: Vec<_> = chart
            .bars()
            .filter(|bar| is_hover_linked(bar, Some(hovered)))
            .map(|bar| bar.machine_name())
            .collect();
        assert_eq!(linked, vec!["KON3", "YIKAMA"]);
        assert_eq!(chart.bars_of_order("MFG-1").count(), 2);

        let balon = &chart.rows()[0].bars[0];
        let style = chart.bar_style(balon, Some("MFG-2"), Some(hovered));
        assert_eq!(
            style,
            BarStyle {
                highlighted: true,
                hover_linked: false,
                opacity: 1.0
            }
        );
        assert_eq!(chart.bar_style(kon3, None, Some(hovered)).opacity, 0.8);
        assert!(!chart.bar_style(kon3, None, None).hover_linked);
    }

    #[test]
    fn test_tooltip_contents() {
        let chart = chart(&[view("KON3", "MFG-1", (9, 58), (10, 28))]);
        let bar = &chart.rows()[0].bars[0];
        let tooltip = chart
            .tooltip_at(Point::new(bar.rect.x + 1.0, bar.rect.y + 1.0))
            .unwrap();
        assert_eq!(
            tooltip,
            Tooltip {
                machine_name: "KON3".into(),
                order_number: "MFG-1".into(),
                customer: "ATLAS".into(),
                start: "2024-12-18 09:58:00".into(),
                end: "2024-12-18 10:28:00".into(),
            }
        );
    }
}

//! Builders and proptest strategies shared by the unit tests.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use crate::interval::Interval;
use crate::window::{ArcKind, ArcWindow, AvailabilityWindow, Window, WindowType};

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn arc(id: &str, start: u32, end: Option<u32>, kind: ArcKind) -> ArcWindow {
    Window::new(id, Interval::new(start, end).unwrap(), kind)
}

pub fn availability(
    id: &str,
    start: &str,
    end: Option<&str>,
    kind: WindowType,
    regions: &[&str],
) -> AvailabilityWindow {
    let interval = Interval::new(date(start), end.map(date)).unwrap();
    Window::new(id, interval, kind).with_tags(regions.iter().copied())
}

fn arb_span(max_start: u32) -> impl Strategy<Value = (u32, Option<u32>)> {
    (0..max_start, proptest::option::weighted(0.8, 0..25u32))
        .prop_map(|(start, len)| (start, len.map(|len| start + len)))
}

fn arb_arc_kind() -> impl Strategy<Value = ArcKind> {
    prop_oneof![
        4 => Just(ArcKind::Canon),
        2 => Just(ArcKind::Filler),
        1 => Just(ArcKind::Mixed),
        1 => Just(ArcKind::Unknown),
    ]
}

fn arb_window_type() -> impl Strategy<Value = WindowType> {
    prop_oneof![
        3 => Just(WindowType::Streaming),
        1 => Just(WindowType::Theatrical),
        1 => Just(WindowType::Download),
        2 => Just(WindowType::All),
        1 => Just(WindowType::Unknown),
    ]
}

/// Arc collections with unique ids `arc-0`, `arc-1`, ...
pub fn arb_arcs(max_len: usize) -> impl Strategy<Value = Vec<ArcWindow>> {
    proptest::collection::vec((arb_span(80), arb_arc_kind()), 0..max_len).prop_map(|drawn| {
        drawn
            .into_iter()
            .enumerate()
            .map(|(i, ((start, end), kind))| arc(&format!("arc-{i}"), start, end, kind))
            .collect()
    })
}

pub fn arb_availability(id: &'static str) -> impl Strategy<Value = AvailabilityWindow> {
    let regions = vec!["US", "GB", "CA", "JP"];
    (
        arb_span(120),
        arb_window_type(),
        proptest::sample::subsequence(regions, 0..=4),
    )
        .prop_map(move |((start, end), kind, regions)| {
            let base = date("2024-01-01");
            let day = |offset: u32| base + Days::new(u64::from(offset));
            let interval = Interval::new(day(start), end.map(day)).unwrap();
            Window::new(id, interval, kind).with_tags(regions)
        })
}

/// Availability collections with unique ids `win-0`, `win-1`, ...
pub fn arb_availability_set(max_len: usize) -> impl Strategy<Value = Vec<AvailabilityWindow>> {
    proptest::collection::vec(arb_availability("tmp"), 0..max_len).prop_map(|windows| {
        windows
            .into_iter()
            .enumerate()
            .map(|(i, window)| {
                Window::new(format!("win-{i}"), *window.interval(), *window.category())
                    .with_tags(window.tags().iter().cloned())
            })
            .collect()
    })
}

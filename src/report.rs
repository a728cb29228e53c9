use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::coverage::coverage;
use crate::interval::Interval;
use crate::predicate::CategoryRule;
use crate::resolver::{ConflictBadge, Resolver};
use crate::window::{Category, Window, WindowId};

/// What a report includes beyond the conflict pairs.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Only windows whose id matches are reported. Resolution still runs
    /// against the whole snapshot.
    pub id_filter: Option<Regex>,
    pub coverage: bool,
}

impl ReportOptions {
    fn selects(&self, id: &WindowId) -> bool {
        self.id_filter
            .as_ref()
            .map_or(true, |filter| filter.is_match(id.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairEntry {
    pub first: WindowId,
    pub second: WindowId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageEntry<T> {
    pub category: String,
    pub intervals: Vec<Interval<T>>,
}

/// Resolver output for one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T> {
    pub source: String,
    pub windows: usize,
    pub conflict_count: usize,
    pub pairs: Vec<PairEntry>,
    pub badges: Vec<ConflictBadge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Vec<CoverageEntry<T>>>,
}

impl<T: Ord + Copy> Report<T> {
    pub fn build<C, R>(
        source: impl Into<String>,
        windows: &[Window<T, C>],
        resolver: &Resolver<R>,
        options: &ReportOptions,
    ) -> Self
    where
        C: Category,
        R: CategoryRule<C>,
    {
        let pairs: Vec<PairEntry> = resolver
            .all_conflict_pairs(windows)
            .into_iter()
            .filter(|pair| {
                let (first, second) = pair.ids();
                options.selects(first) || options.selects(second)
            })
            .map(|pair| PairEntry {
                first: pair.first.id().clone(),
                second: pair.second.id().clone(),
            })
            .collect();

        let badges = resolver
            .badges(windows)
            .into_iter()
            .filter(|badge| options.selects(&badge.id))
            .collect();

        let coverage = options.coverage.then(|| {
            coverage(windows)
                .into_iter()
                .map(|(category, intervals)| CoverageEntry {
                    category: category.to_string(),
                    intervals,
                })
                .collect()
        });

        Self {
            source: source.into(),
            windows: windows.len(),
            conflict_count: pairs.len(),
            pairs,
            badges,
            coverage,
        }
    }
}

impl<T> Report<T> {
    /// One-line summary, e.g. `arcs.json: 3 potential conflicts`.
    pub fn summary(&self) -> String {
        match self.conflict_count {
            0 => format!("{}: no conflicts", self.source),
            1 => format!("{}: 1 potential conflict", self.source),
            n => format!("{}: {} potential conflicts", self.source, n),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Report<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for pair in &self.pairs {
            writeln!(f, "  {} <-> {}", pair.first, pair.second)?;
        }
        for entry in self.coverage.iter().flatten() {
            write!(f, "  coverage {}:", entry.category)?;
            for interval in &entry.intervals {
                write!(f, " {interval}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::arc;
    use crate::window::ArcKind;

    fn arcs() -> Vec<crate::window::ArcWindow> {
        vec![
            arc("ep-intro", 1, Some(20), ArcKind::Canon),
            arc("ep-tournament", 15, Some(30), ArcKind::Canon),
            arc("side-beach", 25, Some(26), ArcKind::Canon),
            arc("ep-finale", 40, None, ArcKind::Filler),
        ]
    }

    #[test]
    fn text_report() {
        let report = Report::build(
            "arcs.json",
            &arcs(),
            &Resolver::strict(),
            &ReportOptions::default(),
        );
        assert_eq!(report.conflict_count, 2);
        assert_eq!(
            report.to_string(),
            "arcs.json: 2 potential conflicts\n\
             \x20 ep-intro <-> ep-tournament\n\
             \x20 ep-tournament <-> side-beach\n"
        );
    }

    #[test]
    fn id_filter_limits_output() {
        let options = ReportOptions {
            id_filter: Some(Regex::new("^side-").unwrap()),
            coverage: false,
        };
        let report = Report::build("arcs.json", &arcs(), &Resolver::strict(), &options);
        assert_eq!(report.summary(), "arcs.json: 1 potential conflict");
        assert_eq!(report.badges.len(), 1);
        assert_eq!(report.badges[0].conflicts_with, vec![WindowId::from("ep-tournament")]);
    }

    #[test]
    fn coverage_section() {
        let options = ReportOptions {
            id_filter: None,
            coverage: true,
        };
        let report = Report::build("arcs.json", &arcs(), &Resolver::strict(), &options);
        let text = report.to_string();
        assert!(text.contains("  coverage canon: [1, 30]\n"));
        assert!(text.contains("  coverage filler: [40, ..)\n"));
    }

    #[test]
    fn clean_snapshot() {
        let report = Report::build(
            "empty.json",
            &arcs()[..1],
            &Resolver::strict(),
            &ReportOptions::default(),
        );
        assert_eq!(report.to_string(), "empty.json: no conflicts\n");
    }

    #[test]
    fn json_shape() {
        let report = Report::build(
            "arcs.json",
            &arcs(),
            &Resolver::strict(),
            &ReportOptions::default(),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["conflictCount"], 2);
        assert_eq!(value["pairs"][0]["first"], "ep-intro");
        assert_eq!(value["badges"][1]["conflictsWith"][1], "side-beach");
        assert!(value.get("coverage").is_none());
    }
}

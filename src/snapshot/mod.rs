//! Loading window snapshots from JSON.
//!
//! A snapshot is a JSON array of records exported by the admin editors.
//! Every record is validated into a [`Window`] before anything is resolved;
//! one bad interval rejects the whole snapshot.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::window::{ArcKind, ArcWindow, AvailabilityWindow, Window, WindowId, WindowType};

/// An anime arc as exported by the arc editor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcRecord {
    pub id: String,
    pub start_episode: u32,
    #[serde(default)]
    pub end_episode: Option<u32>,
    pub arc_type: String,
}

/// A title availability window as exported by the availability editor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub id: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub window_type: String,
    #[serde(default)]
    pub regions: Vec<String>,
}

impl TryFrom<ArcRecord> for ArcWindow {
    type Error = Error;

    fn try_from(record: ArcRecord) -> Result<Self> {
        let id = WindowId::from(record.id);
        let interval = Interval::new(record.start_episode, record.end_episode)
            .map_err(|source| Error::invalid_window(id.clone(), source))?;
        Ok(Window::new(id, interval, ArcKind::parse(&record.arc_type)))
    }
}

impl TryFrom<AvailabilityRecord> for AvailabilityWindow {
    type Error = Error;

    fn try_from(record: AvailabilityRecord) -> Result<Self> {
        let id = WindowId::from(record.id);
        let interval = Interval::new(record.start_date, record.end_date)
            .map_err(|source| Error::invalid_window(id.clone(), source))?;
        let regions = record
            .regions
            .iter()
            .map(|region| region.trim().to_uppercase())
            .filter(|region| !region.is_empty());
        Ok(Window::new(id, interval, WindowType::parse(&record.window_type)).with_tags(regions))
    }
}

/// Opens a snapshot file for one of the `load_*` functions.
pub fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::io(path, source))
}

pub fn load_arcs(reader: impl Read) -> Result<Vec<ArcWindow>> {
    load::<ArcRecord, _, _>(reader, "arc")
}

pub fn load_availability(reader: impl Read) -> Result<Vec<AvailabilityWindow>> {
    load::<AvailabilityRecord, _, _>(reader, "availability")
}

fn load<R, T, C>(reader: impl Read, kind: &str) -> Result<Vec<Window<T, C>>>
where
    R: DeserializeOwned,
    Window<T, C>: TryFrom<R, Error = Error>,
{
    let records: Vec<R> = serde_json::from_reader(reader)?;
    let windows: Vec<Window<T, C>> = records
        .into_iter()
        .map(Window::try_from)
        .collect::<Result<_>>()?;

    for id in windows.iter().map(|window| window.id()).duplicates() {
        debug!(%id, kind, "duplicate window id in snapshot");
    }
    info!(windows = windows.len(), kind, "loaded snapshot");
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalError;
    use crate::testing::date;
    use std::io::Write;

    #[test]
    fn loads_arcs() {
        let json = r#"[
            {"id": "a1", "startEpisode": 1, "endEpisode": 20, "arcType": "canon"},
            {"id": "a2", "startEpisode": 21, "endEpisode": null, "arcType": "FILLER"},
            {"id": "a3", "startEpisode": 5, "arcType": "recap"}
        ]"#;
        let arcs = load_arcs(json.as_bytes()).unwrap();

        assert_eq!(arcs.len(), 3);
        assert_eq!(arcs[0].interval(), &Interval::closed(1, 20).unwrap());
        assert_eq!(*arcs[1].category(), ArcKind::Filler);
        assert!(arcs[1].interval().is_open_ended());
        assert_eq!(*arcs[2].category(), ArcKind::Unknown);
        assert!(arcs.iter().all(|arc| arc.tags().is_empty()));
    }

    #[test]
    fn loads_availability_and_normalises_regions() {
        let json = r#"[
            {"id": "w1", "startDate": "2024-01-01", "endDate": "2024-06-01",
             "windowType": "streaming", "regions": ["us", " CA ", ""]},
            {"id": "w2", "startDate": "2024-03-01", "windowType": "all"}
        ]"#;
        let windows = load_availability(json.as_bytes()).unwrap();

        assert_eq!(windows[0].interval().end(), Some(date("2024-06-01")));
        assert_eq!(
            windows[0].tags().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["CA", "US"]
        );
        assert_eq!(*windows[1].category(), WindowType::All);
        assert!(windows[1].tags().is_empty());
    }

    #[test]
    fn rejects_inverted_interval() {
        let json = r#"[
            {"id": "ok", "startEpisode": 1, "endEpisode": 2, "arcType": "canon"},
            {"id": "bad", "startEpisode": 9, "endEpisode": 3, "arcType": "canon"}
        ]"#;
        match load_arcs(json.as_bytes()).unwrap_err() {
            Error::InvalidWindow { id, source } => {
                assert_eq!(id.as_str(), "bad");
                assert_eq!(source, IntervalError::StartEndRangeInvalid);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let error = load_availability(r#"[{"id": "w1"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(error, Error::Json(_)));

        let error = load_availability(
            r#"[{"id": "w1", "startDate": "01/03/2024", "windowType": "all"}]"#.as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn opens_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a1", "startEpisode": 3, "endEpisode": 4, "arcType": "mixed"}}]"#
        )
        .unwrap();

        let arcs = load_arcs(open(file.path()).unwrap()).unwrap();
        assert_eq!(arcs.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(open(&missing).unwrap_err(), Error::Io { .. }));
    }
}

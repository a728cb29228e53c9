use serde::Serialize;
use std::fmt;
use std::hash::Hash;

use crate::predicate::CompatibilityTable;

/// A closed classification that two windows must share (or be declared
/// compatible on) before they can conflict.
pub trait Category: Copy + Ord + Hash + fmt::Debug + fmt::Display {
    /// Unknown categories never conflict with anything.
    fn is_known(&self) -> bool;
}

/// Kind of an anime story arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcKind {
    Canon,
    Filler,
    Mixed,
    Unknown,
}

impl ArcKind {
    /// Parses an arc type label. Unrecognised labels map to `Unknown`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "canon" => ArcKind::Canon,
            "filler" => ArcKind::Filler,
            "mixed" => ArcKind::Mixed,
            _ => ArcKind::Unknown,
        }
    }
}

impl Category for ArcKind {
    fn is_known(&self) -> bool {
        *self != ArcKind::Unknown
    }
}

impl fmt::Display for ArcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcKind::Canon => write!(f, "canon"),
            ArcKind::Filler => write!(f, "filler"),
            ArcKind::Mixed => write!(f, "mixed"),
            ArcKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Distribution channel a title availability window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    Theatrical,
    Streaming,
    Download,
    All,
    Unknown,
}

impl WindowType {
    pub const KNOWN: [WindowType; 4] = [
        WindowType::Theatrical,
        WindowType::Streaming,
        WindowType::Download,
        WindowType::All,
    ];

    /// Parses a window type label. Unrecognised labels map to `Unknown`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "theatrical" => WindowType::Theatrical,
            "streaming" => WindowType::Streaming,
            "download" => WindowType::Download,
            "all" => WindowType::All,
            _ => WindowType::Unknown,
        }
    }

    /// Compatibility table in which an `All` window also conflicts with
    /// theatrical, streaming and download windows.
    pub fn subsuming_all() -> CompatibilityTable<WindowType> {
        WindowType::KNOWN
            .into_iter()
            .filter(|kind| *kind != WindowType::All)
            .fold(CompatibilityTable::new(), |table, kind| {
                table.allow(WindowType::All, kind)
            })
    }
}

impl Category for WindowType {
    fn is_known(&self) -> bool {
        *self != WindowType::Unknown
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowType::Theatrical => write!(f, "theatrical"),
            WindowType::Streaming => write!(f, "streaming"),
            WindowType::Download => write!(f, "download"),
            WindowType::All => write!(f, "all"),
            WindowType::Unknown => write!(f, "unknown"),
        }
    }
}

//! Selector enums shared by configuration, the graph crate and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which per-node value the annotator computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Number of incident agreement edges.
    #[default]
    #[serde(alias = "connections")]
    ConnectionCount,
    /// Distinct neighbours divided by `N - 1`.
    #[serde(alias = "degree")]
    DegreeCentrality,
    /// Normalized shortest-path betweenness.
    #[serde(alias = "betweenness")]
    BetweennessCentrality,
}

impl MetricKind {
    pub const ALL: [Self; 3] = [
        Self::ConnectionCount,
        Self::DegreeCentrality,
        Self::BetweennessCentrality,
    ];

    /// Short CLI/config name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionCount => "connections",
            Self::DegreeCentrality => "degree",
            Self::BetweennessCentrality => "betweenness",
        }
    }

    /// Phrase used in node labels, e.g. `"degree centrality"`.
    #[must_use]
    pub const fn label_phrase(self) -> &'static str {
        match self {
            Self::ConnectionCount => "connections",
            Self::DegreeCentrality => "degree centrality",
            Self::BetweennessCentrality => "betweenness centrality",
        }
    }

    /// Centrality metrics need at least two nodes to be meaningful.
    #[must_use]
    pub const fn is_centrality(self) -> bool {
        !matches!(self, Self::ConnectionCount)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_phrase())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "connections" | "connection-count" | "count" => Ok(Self::ConnectionCount),
            "degree" | "degree-centrality" => Ok(Self::DegreeCentrality),
            "betweenness" | "betweenness-centrality" => Ok(Self::BetweennessCentrality),
            other => Err(format!(
                "unknown metric {other:?} (expected connections, degree or betweenness)"
            )),
        }
    }
}

/// Registered layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    #[default]
    Spring,
    Circular,
    Shell,
    Spiral,
    Random,
}

impl LayoutKind {
    pub const ALL: [Self; 5] = [
        Self::Spring,
        Self::Circular,
        Self::Shell,
        Self::Spiral,
        Self::Random,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Circular => "circular",
            Self::Shell => "shell",
            Self::Spiral => "spiral",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown layout {wanted:?}"))
    }
}

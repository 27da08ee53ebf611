//! 2-D layout strategies.
//!
//! # Overview
//!
//! A [`LayoutStrategy`] maps every party in an [`AgreementGraph`] to a point
//! in the plane. Whether a strategy takes a seed is declared up front through
//! [`LayoutStrategy::supports_seed`]; the annotator passes its fixed seed only
//! to strategies that say yes, so re-rendering an unchanged graph with a
//! seeded layout gives the same picture.
//!
//! Built-in strategies are registered by [`LayoutKind`] through [`strategy`].
//! External embeddings can be plugged in with [`FnLayout`].
//!
//! All built-in layouts return coordinates rescaled into `[-1, 1]`.

use std::collections::HashMap;

use ecosa_core::config::LayoutConfig;
use ecosa_core::LayoutKind;
use serde::Serialize;

use crate::build::AgreementGraph;

mod geometric;
mod random;
mod spring;

pub use geometric::{CircularLayout, ShellLayout, SpiralLayout};
pub use random::RandomLayout;
pub use spring::SpringLayout;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Party display name → position.
pub type Positions = HashMap<String, Point>;

/// A graph embedding routine.
pub trait LayoutStrategy {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether [`embed`](Self::embed) honours a seed.
    fn supports_seed(&self) -> bool;

    /// Place every node of `graph`.
    ///
    /// `seed` is `Some` only when [`supports_seed`](Self::supports_seed) is
    /// true.
    ///
    /// # Errors
    ///
    /// Any failure of the embedding routine.
    fn embed(&self, graph: &AgreementGraph, seed: Option<u64>) -> anyhow::Result<Positions>;
}

/// Adapter registering a plain function as a [`LayoutStrategy`].
pub struct FnLayout<F> {
    name: String,
    supports_seed: bool,
    embed: F,
}

impl<F> FnLayout<F>
where
    F: Fn(&AgreementGraph, Option<u64>) -> anyhow::Result<Positions>,
{
    /// Register `embed` under `name`, declaring whether it takes a seed.
    pub fn new(name: impl Into<String>, supports_seed: bool, embed: F) -> Self {
        Self {
            name: name.into(),
            supports_seed,
            embed,
        }
    }
}

impl<F> LayoutStrategy for FnLayout<F>
where
    F: Fn(&AgreementGraph, Option<u64>) -> anyhow::Result<Positions>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_seed(&self) -> bool {
        self.supports_seed
    }

    fn embed(&self, graph: &AgreementGraph, seed: Option<u64>) -> anyhow::Result<Positions> {
        (self.embed)(graph, seed)
    }
}

/// Instantiate the built-in strategy registered for `kind`.
#[must_use]
pub fn strategy(kind: LayoutKind, config: &LayoutConfig) -> Box<dyn LayoutStrategy> {
    match kind {
        LayoutKind::Spring => Box::new(SpringLayout::new(config.spring_iterations)),
        LayoutKind::Circular => Box::new(CircularLayout),
        LayoutKind::Shell => Box::new(ShellLayout),
        LayoutKind::Spiral => Box::new(SpiralLayout::default()),
        LayoutKind::Random => Box::new(RandomLayout),
    }
}

/// Center `points` on the origin and scale the largest coordinate to 1.
pub(crate) fn rescale(points: &mut [Point]) {
    if points.is_empty() {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut extent = 0.0_f64;
    for p in points.iter_mut() {
        p.x -= cx;
        p.y -= cy;
        extent = extent.max(p.x.abs()).max(p.y.abs());
    }

    if extent > 0.0 {
        for p in points.iter_mut() {
            p.x /= extent;
            p.y /= extent;
        }
    }
}

/// Pair node names (in index order) with computed points.
pub(crate) fn positions_from(graph: &AgreementGraph, points: Vec<Point>) -> Positions {
    graph
        .parties()
        .map(str::to_string)
        .zip(points)
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use ecosa_core::record::{AgreementRecord, Membership};

    use crate::build::{AgreementGraph, build_graph};

    pub fn graph(groups: &[&[&str]]) -> AgreementGraph {
        let records: Vec<AgreementRecord> = groups
            .iter()
            .enumerate()
            .map(|(row, parties)| AgreementRecord {
                row,
                title: format!("agreement {row}"),
                date: NaiveDate::from_ymd_opt(2012, 9, 1).expect("valid date"),
                parties: parties.iter().map(ToString::to_string).collect(),
                sector: vec![],
                policy_domain: vec![],
                form_of_cooperation: String::new(),
                quotes: None,
                military_alliance: Membership::No,
                free_trade_agreement: Membership::No,
                corpus: None,
            })
            .collect();
        build_graph(&records)
    }
}

#![forbid(unsafe_code)]

//! Generation layout for genealogical networks.
//!
//! [`layout`] gives every vertex of a [`Network`] a generation `layer` (people and unions on
//! alternating rows, ancestors above descendants) and an `order` inside its layer:
//!
//! 1. feedback edges are found per component and read reversed through [`acyclic::Acyclic`];
//! 2. [`rank::rank`] layers each component and normalizes the result;
//! 3. [`reconcile::reconcile`] aligns the bottom rows of independent components;
//! 4. [`order::order`] runs barycenter sweeps until the layers stop changing.
//!
//! Layers loaded from a [`cache`] file skip ranking and ordering.

pub use quilt_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod cache;
pub mod error;
pub mod options;
pub mod order;
pub mod rank;
pub mod reconcile;

pub use error::{Error, Result};
pub use options::LayoutOptions;
pub use order::{OrderOptions, OrderReport};
pub use rank::RankReport;
pub use reconcile::ReconcileReport;

use quilt_graph::Network;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub components: usize,
    /// Edges read reversed while ranking; 0 when ranking was skipped.
    pub feedback_edges: usize,
    pub layer_count: usize,
    /// Barycenter rounds run; 0 when the orderer was skipped.
    pub order_iterations: usize,
    pub order_converged: bool,
    /// Crossings between adjacent layers after ordering.
    pub crossings: usize,
    /// Every vertex already had a layer, so ranking and ordering were skipped.
    pub reused_cached_layers: bool,
    pub reconcile: ReconcileReport,
}

#[derive(Debug, Default, Clone)]
struct LayoutTimings {
    total: Duration,
    rank: Duration,
    reconcile: Duration,
    order: Duration,
}

/// Runs the full layout. Calling it again on a network that is already laid out and has not
/// changed leaves every layer and order as it is.
pub fn layout(network: &mut Network, options: &LayoutOptions) -> Result<LayoutSummary> {
    let timing_enabled = options.timing;
    let total_start = timing_enabled.then(Instant::now);
    let mut timings = LayoutTimings::default();

    let mut summary = LayoutSummary {
        reused_cached_layers: network.is_layer_computed(),
        ..Default::default()
    };

    let rank_start = timing_enabled.then(Instant::now);
    if !summary.reused_cached_layers {
        let report = rank::rank(network)?;
        summary.feedback_edges = report.feedback_edges;
    }
    if let Some(s) = rank_start {
        timings.rank = s.elapsed();
    }

    let reconcile_start = timing_enabled.then(Instant::now);
    if options.reconcile_components {
        summary.reconcile = reconcile::reconcile(network);
    }
    if let Some(s) = reconcile_start {
        timings.reconcile = s.elapsed();
    }

    let order_start = timing_enabled.then(Instant::now);
    if !summary.reused_cached_layers {
        let report = order::order(
            network,
            &OrderOptions {
                max_iterations: options.max_order_iterations,
            },
        );
        summary.order_iterations = report.iterations;
        summary.order_converged = report.converged;
    }
    if let Some(s) = order_start {
        timings.order = s.elapsed();
    }

    summary.components = network.component_count();
    summary.layer_count = network.layer_range().map_or(0, |r| r.depth());
    let layers = order::layers_by_order(network);
    summary.crossings = order::cross_count(network, &layers);

    if let Some(s) = total_start {
        timings.total = s.elapsed();
        tracing::debug!(
            total = ?timings.total,
            rank = ?timings.rank,
            reconcile = ?timings.reconcile,
            order = ?timings.order,
            "layout timings"
        );
    }
    tracing::debug!(
        components = summary.components,
        layers = summary.layer_count,
        crossings = summary.crossings,
        reused_cached_layers = summary.reused_cached_layers,
        "layout complete"
    );
    Ok(summary)
}

//! Read-only view of a [`Network`] in which every feedback edge points the other way.
//!
//! The ranker walks this view instead of flipping edges in place, so the canonical edge list is
//! never touched and nothing needs restoring afterwards.

use quilt_graph::{EdgeIx, FeedbackSet, Network, VertexIx};

#[derive(Debug, Clone, Copy)]
pub struct Acyclic<'a> {
    network: &'a Network,
    feedback: &'a FeedbackSet,
}

impl<'a> Acyclic<'a> {
    pub fn new(network: &'a Network, feedback: &'a FeedbackSet) -> Self {
        Self { network, feedback }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    pub fn feedback(&self) -> &'a FeedbackSet {
        self.feedback
    }

    pub fn is_reversed(&self, e: EdgeIx) -> bool {
        self.feedback.contains(e)
    }

    /// Descendant end of `e` as seen through the overlay.
    pub fn source(&self, e: EdgeIx) -> VertexIx {
        let edge = self.network.edge(e);
        if self.is_reversed(e) {
            edge.dest()
        } else {
            edge.source()
        }
    }

    /// Ascendant end of `e` as seen through the overlay.
    pub fn dest(&self, e: EdgeIx) -> VertexIx {
        let edge = self.network.edge(e);
        if self.is_reversed(e) {
            edge.source()
        } else {
            edge.dest()
        }
    }

    /// Edges for which `v` is the overlay source: canonical out-edges that are kept, then
    /// reversed in-edges.
    pub fn ascendant_edges(&self, v: VertexIx) -> impl Iterator<Item = EdgeIx> + use<'a> {
        let (network, feedback) = (self.network, self.feedback);
        let kept = network
            .out_edges(v)
            .iter()
            .copied()
            .filter(move |&e| !feedback.contains(e));
        let flipped = network
            .in_edges(v)
            .iter()
            .copied()
            .filter(move |&e| feedback.contains(e));
        kept.chain(flipped)
    }

    /// Edges for which `v` is the overlay dest.
    pub fn descendant_edges(&self, v: VertexIx) -> impl Iterator<Item = EdgeIx> + use<'a> {
        let (network, feedback) = (self.network, self.feedback);
        let kept = network
            .in_edges(v)
            .iter()
            .copied()
            .filter(move |&e| !feedback.contains(e));
        let flipped = network
            .out_edges(v)
            .iter()
            .copied()
            .filter(move |&e| feedback.contains(e));
        kept.chain(flipped)
    }

    pub fn ascendants(&self, v: VertexIx) -> impl Iterator<Item = VertexIx> + use<'a> {
        let view = *self;
        self.ascendant_edges(v).map(move |e| view.dest(e))
    }

    pub fn descendants(&self, v: VertexIx) -> impl Iterator<Item = VertexIx> + use<'a> {
        let view = *self;
        self.descendant_edges(v).map(move |e| view.source(e))
    }

    pub fn ascendant_count(&self, v: VertexIx) -> usize {
        self.ascendant_edges(v).count()
    }

    /// Every edge touching `v`, in either direction.
    pub fn incident_edges(&self, v: VertexIx) -> impl Iterator<Item = EdgeIx> + use<'a> {
        let network = self.network;
        network
            .out_edges(v)
            .iter()
            .chain(network.in_edges(v).iter())
            .copied()
    }

    /// The endpoint of `e` opposite `v`.
    pub fn other(&self, e: EdgeIx, v: VertexIx) -> VertexIx {
        self.network.edge(e).other(v)
    }
}

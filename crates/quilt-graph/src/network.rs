//! The [`Network`] container.
//!
//! Vertices and edges are added once by a record reader and keep their identity afterwards;
//! the layout engine only rewrites each vertex's layer, order and component tag. Derived views
//! (weak components, feedback edges, layer bounds) are memoized and dropped explicitly by the
//! mutations that can change them.

mod cache;
mod components;

pub use components::Components;

use crate::cycles::{self, FeedbackSet};
use crate::edge::{Edge, EdgeIx};
use crate::error::{Error, Result};
use crate::properties::Properties;
use crate::vertex::{Person, Union, Vertex, VertexIx, VertexKind, VertexType};
use cache::{Cached, LayerBounds};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Inclusive range of assigned layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRange {
    pub min: i32,
    pub max: i32,
}

impl LayerRange {
    /// Number of rows spanned, `max - min + 1`.
    pub fn depth(&self) -> usize {
        (self.max - self.min + 1).max(0) as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct Network {
    vertices: Vec<Vertex>,
    index: HashMap<String, VertexIx>,

    edges: Vec<Edge>,
    edge_index: HashMap<(VertexIx, VertexIx), EdgeIx>,
    out_edges: Vec<Vec<EdgeIx>>,
    in_edges: Vec<Vec<EdgeIx>>,

    components: Cached<Components>,
    cycles: Cached<FeedbackSet>,
    layer_bounds: Cell<Option<LayerBounds>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_person(&mut self, id: impl Into<String>) -> Result<VertexIx> {
        self.add_vertex(id, VertexKind::Person(Person::default()))
    }

    pub fn add_union(&mut self, id: impl Into<String>) -> Result<VertexIx> {
        self.add_vertex(id, VertexKind::Union(Union::default()))
    }

    pub fn add_vertex(&mut self, id: impl Into<String>, kind: VertexKind) -> Result<VertexIx> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateVertex { id });
        }
        let ix = VertexIx(self.vertices.len());
        self.vertices.push(Vertex::new(id.clone(), kind));
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        self.index.insert(id, ix);
        self.invalidate_structure();
        Ok(ix)
    }

    /// Adds the edge `from -> to` (descendant -> ascendant). Adding an existing edge again
    /// returns the existing index.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<EdgeIx> {
        let from_ix = self.require(from)?;
        let to_ix = self.require(to)?;
        if from_ix == to_ix {
            return Err(Error::SelfLoop {
                id: from.to_string(),
            });
        }
        if self.vertices[from_ix.0].vertex_type() == self.vertices[to_ix.0].vertex_type() {
            return Err(Error::SameTypeEdge {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if let Some(&e) = self.edge_index.get(&(from_ix, to_ix)) {
            return Ok(e);
        }

        let e = EdgeIx(self.edges.len());
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            from_ix,
            to_ix,
        });
        self.edge_index.insert((from_ix, to_ix), e);
        self.out_edges[from_ix.0].push(e);
        self.in_edges[to_ix.0].push(e);
        self.invalidate_structure();
        Ok(e)
    }

    /// Records `child` as born into `union`: adds the edge `child -> union`.
    pub fn add_child(&mut self, union: &str, child: &str) -> Result<EdgeIx> {
        let union_ix = self.require_type(union, VertexType::Union)?;
        let child_ix = self.require_type(child, VertexType::Person)?;
        if let VertexKind::Person(p) = self.vertices[child_ix.0].kind() {
            if let Some(existing) = p.parent_union.as_deref().filter(|u| *u != union) {
                return Err(Error::ConflictingParentUnion {
                    person: child.to_string(),
                    existing: existing.to_string(),
                });
            }
        }

        let e = self.add_edge(child, union)?;
        if let VertexKind::Person(p) = self.vertices[child_ix.0].kind_mut() {
            p.parent_union = Some(union.to_string());
        }
        if let VertexKind::Union(u) = self.vertices[union_ix.0].kind_mut() {
            if !u.children.iter().any(|c| c == child) {
                u.children.push(child.to_string());
            }
        }
        Ok(e)
    }

    /// Records `parent` as one of the (at most two) parents of `union`: adds the edge
    /// `union -> parent`.
    pub fn add_parent(&mut self, union: &str, parent: &str) -> Result<EdgeIx> {
        let union_ix = self.require_type(union, VertexType::Union)?;
        let parent_ix = self.require_type(parent, VertexType::Person)?;
        if let VertexKind::Union(u) = self.vertices[union_ix.0].kind() {
            if u.parents.len() >= 2 && !u.parents.iter().any(|p| p == parent) {
                return Err(Error::TooManyParents {
                    union: union.to_string(),
                });
            }
        }

        let e = self.add_edge(union, parent)?;
        if let VertexKind::Union(u) = self.vertices[union_ix.0].kind_mut() {
            if !u.parents.iter().any(|p| p == parent) {
                u.parents.push(parent.to_string());
            }
        }
        if let VertexKind::Person(p) = self.vertices[parent_ix.0].kind_mut() {
            if !p.unions.iter().any(|u| u == union) {
                p.unions.push(union.to_string());
            }
        }
        Ok(e)
    }

    fn require(&self, id: &str) -> Result<VertexIx> {
        self.vertex_ix(id).ok_or_else(|| Error::UnknownVertex { id: id.to_string() })
    }

    fn require_type(&self, id: &str, expected: VertexType) -> Result<VertexIx> {
        let ix = self.require(id)?;
        if self.vertices[ix.0].vertex_type() != expected {
            return Err(Error::WrongVertexType {
                id: id.to_string(),
                expected,
            });
        }
        Ok(ix)
    }

    fn invalidate_structure(&mut self) {
        self.components.invalidate();
        self.cycles.invalidate();
        self.layer_bounds.set(None);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_ix(&self, id: &str) -> Option<VertexIx> {
        self.index.get(id).copied()
    }

    pub fn vertex(&self, v: VertexIx) -> &Vertex {
        &self.vertices[v.0]
    }

    pub fn get_vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertex_ix(id).map(|ix| &self.vertices[ix.0])
    }

    pub fn props_mut(&mut self, v: VertexIx) -> &mut Properties {
        &mut self.vertices[v.0].props
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn vertex_ixs(&self) -> impl Iterator<Item = VertexIx> + use<> {
        (0..self.vertices.len()).map(VertexIx)
    }

    pub fn edge(&self, e: EdgeIx) -> &Edge {
        &self.edges[e.0]
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn edge_ixs(&self) -> impl Iterator<Item = EdgeIx> + use<> {
        (0..self.edges.len()).map(EdgeIx)
    }

    pub fn find_edge(&self, from: VertexIx, to: VertexIx) -> Option<EdgeIx> {
        self.edge_index.get(&(from, to)).copied()
    }

    /// Edges leaving `v`, i.e. towards its ascendants.
    pub fn out_edges(&self, v: VertexIx) -> &[EdgeIx] {
        &self.out_edges[v.0]
    }

    /// Edges entering `v`, i.e. from its descendants.
    pub fn in_edges(&self, v: VertexIx) -> &[EdgeIx] {
        &self.in_edges[v.0]
    }

    /// Parent-ward neighbours: the union a person was born into, or the parents of a union.
    pub fn ascendants(&self, v: VertexIx) -> impl Iterator<Item = VertexIx> + '_ {
        self.out_edges[v.0].iter().map(|&e| self.edges[e.0].to_ix)
    }

    /// Child-ward neighbours: the unions a person is a parent in, or the children of a union.
    pub fn descendants(&self, v: VertexIx) -> impl Iterator<Item = VertexIx> + '_ {
        self.in_edges[v.0].iter().map(|&e| self.edges[e.0].from_ix)
    }

    pub fn ascendant_count(&self, v: VertexIx) -> usize {
        self.out_edges[v.0].len()
    }

    pub fn descendant_count(&self, v: VertexIx) -> usize {
        self.in_edges[v.0].len()
    }

    /// No ascendants.
    pub fn is_orphan(&self, v: VertexIx) -> bool {
        self.out_edges[v.0].is_empty()
    }

    /// No descendants.
    pub fn is_sterile(&self, v: VertexIx) -> bool {
        self.in_edges[v.0].is_empty()
    }

    /// Co-parents of `person` across all of their unions. Empty for a union.
    pub fn spouses(&self, person: VertexIx) -> Vec<VertexIx> {
        if !self.vertices[person.0].is_person() {
            return Vec::new();
        }
        let mut out = Vec::new();
        for union in self.descendants(person) {
            for s in self.ascendants(union) {
                if s != person {
                    out.push(s);
                }
            }
        }
        out
    }

    /// Up to two parents of `person`. Empty for a union.
    pub fn parents(&self, person: VertexIx) -> Vec<VertexIx> {
        if !self.vertices[person.0].is_person() {
            return Vec::new();
        }
        self.ascendants(person)
            .flat_map(|union| self.ascendants(union))
            .collect()
    }

    /// Weak components, largest first. Computed on first use and after invalidation; every
    /// vertex is tagged with the index of its component.
    pub fn components(&mut self) -> &Components {
        let computed = match self.components.take() {
            Some(c) => c,
            None => {
                tracing::debug!(vertices = self.vertices.len(), "computing connected components");
                let computed = components::compute(self);
                for (i, comp) in computed.iter().enumerate() {
                    tracing::trace!(component = i, size = comp.len(), "component");
                    for v in comp {
                        self.vertices[v.0].component = Some(i);
                    }
                }
                computed
            }
        };
        self.components.set(computed)
    }

    /// The partition, if it is currently cached.
    pub fn cached_components(&self) -> Option<&Components> {
        self.components.get()
    }

    pub fn component_count(&mut self) -> usize {
        self.components().len()
    }

    pub fn invalidate_components(&mut self) {
        self.components.invalidate();
        self.cycles.invalidate();
    }

    /// Feedback edges of the whole network, found component by component.
    pub fn cycles(&mut self) -> &FeedbackSet {
        let fas = match self.cycles.take() {
            Some(fas) => fas,
            None => {
                let comps = self.components().clone();
                let mut fas = FeedbackSet::new();
                for comp in comps.iter() {
                    fas.extend(cycles::find_cycles(self, comp).iter());
                }
                tracing::debug!(cyclic_edges = fas.len(), "computed feedback edges");
                fas
            }
        };
        self.cycles.set(fas)
    }

    /// The feedback set, if it is currently cached.
    pub fn cached_cycles(&self) -> Option<&FeedbackSet> {
        self.cycles.get()
    }

    pub fn invalidate_cycles(&mut self) {
        self.cycles.invalidate();
    }

    pub fn layer(&self, v: VertexIx) -> Option<i32> {
        self.vertices[v.0].layer
    }

    pub fn set_layer(&mut self, v: VertexIx, layer: i32) {
        self.vertices[v.0].layer = Some(layer);
        self.layer_bounds.set(None);
    }

    /// Clears every layer; the layer bounds go back to the unknown sentinel.
    pub fn reset_layers(&mut self) {
        for v in &mut self.vertices {
            v.layer = None;
        }
        self.layer_bounds.set(None);
    }

    /// Shifts the layer of every vertex in `subset` by `delta`. Vertices without a layer are
    /// left alone.
    pub fn offset_layers(&mut self, delta: i32, subset: &[VertexIx]) {
        if delta == 0 {
            return;
        }
        for v in subset {
            if let Some(layer) = self.vertices[v.0].layer.as_mut() {
                *layer += delta;
            }
        }
        self.layer_bounds.set(None);
    }

    pub fn offset_all_layers(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        for v in &mut self.vertices {
            if let Some(layer) = v.layer.as_mut() {
                *layer += delta;
            }
        }
        self.layer_bounds.set(None);
    }

    fn bounds(&self) -> LayerBounds {
        if let Some(b) = self.layer_bounds.get() {
            return b;
        }
        let mut range: Option<LayerRange> = None;
        let mut complete = !self.vertices.is_empty();
        for v in &self.vertices {
            let Some(l) = v.layer else {
                complete = false;
                continue;
            };
            range = Some(match range {
                Some(r) => LayerRange {
                    min: r.min.min(l),
                    max: r.max.max(l),
                },
                None => LayerRange { min: l, max: l },
            });
        }
        let b = LayerBounds { range, complete };
        self.layer_bounds.set(Some(b));
        b
    }

    /// `None` until at least one layer is assigned.
    pub fn layer_range(&self) -> Option<LayerRange> {
        self.bounds().range
    }

    pub fn min_layer(&self) -> Option<i32> {
        self.layer_range().map(|r| r.min)
    }

    pub fn max_layer(&self) -> Option<i32> {
        self.layer_range().map(|r| r.max)
    }

    /// True once every vertex carries a layer.
    pub fn is_layer_computed(&self) -> bool {
        self.bounds().complete
    }

    pub fn order(&self, v: VertexIx) -> f64 {
        self.vertices[v.0].order
    }

    pub fn set_order(&mut self, v: VertexIx, order: f64) {
        self.vertices[v.0].order = order;
    }
}

//! Vertex types: people and the unions (families) that connect them.

use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index of a vertex inside its [`Network`](crate::Network), in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexIx(pub(crate) usize);

impl VertexIx {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Payload-free tag of a [`VertexKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexType {
    Person,
    Union,
}

impl VertexType {
    /// Layer an orphan of this type is seeded at. People and unions differ by one so that
    /// they always end up on layers of opposite parity.
    pub fn base_layer(self) -> i32 {
        match self {
            VertexType::Person => 0,
            VertexType::Union => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Union this person was born into.
    pub parent_union: Option<String>,
    /// Unions in which this person is a parent.
    pub unions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Union {
    /// Up to two parents.
    pub parents: Vec<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VertexKind {
    Person(Person),
    Union(Union),
}

impl VertexKind {
    pub fn vertex_type(&self) -> VertexType {
        match self {
            VertexKind::Person(_) => VertexType::Person,
            VertexKind::Union(_) => VertexType::Union,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: String,
    kind: VertexKind,
    pub(crate) layer: Option<i32>,
    pub(crate) order: f64,
    pub(crate) component: Option<usize>,
    pub props: Properties,
}

impl Vertex {
    pub(crate) fn new(id: String, kind: VertexKind) -> Self {
        Self {
            id,
            kind,
            layer: None,
            order: 0.0,
            component: None,
            props: Properties::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &VertexKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut VertexKind {
        &mut self.kind
    }

    pub fn vertex_type(&self) -> VertexType {
        self.kind.vertex_type()
    }

    pub fn is_person(&self) -> bool {
        matches!(self.kind, VertexKind::Person(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self.kind, VertexKind::Union(_))
    }

    pub fn as_person(&self) -> Option<&Person> {
        match &self.kind {
            VertexKind::Person(p) => Some(p),
            VertexKind::Union(_) => None,
        }
    }

    pub fn as_union(&self) -> Option<&Union> {
        match &self.kind {
            VertexKind::Union(u) => Some(u),
            VertexKind::Person(_) => None,
        }
    }

    /// Generation row, `None` until a layer has been assigned or loaded.
    pub fn layer(&self) -> Option<i32> {
        self.layer
    }

    /// Sort key inside the vertex's layer. Only meaningful relative to the same layer.
    pub fn order(&self) -> f64 {
        self.order
    }

    /// Index of the weak component this vertex was last tagged with.
    pub fn component(&self) -> Option<usize> {
        self.component
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            VertexKind::Person(_) => write!(f, "Indi[{}]", self.id),
            VertexKind::Union(_) => write!(f, "Fam[{}]", self.id),
        }
    }
}

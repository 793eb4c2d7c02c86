//! Directed edges between a person and a union.

use crate::vertex::VertexIx;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeIx(pub(crate) usize);

impl EdgeIx {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An edge points from a descendant to an ascendant: child -> union it was born into, and
/// union -> each of its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub(crate) from_ix: VertexIx,
    pub(crate) to_ix: VertexIx,
}

impl Edge {
    /// The descendant end.
    pub fn source(&self) -> VertexIx {
        self.from_ix
    }

    /// The ascendant end.
    pub fn dest(&self) -> VertexIx {
        self.to_ix
    }

    /// The endpoint opposite `v`. `v` is expected to be one of the two endpoints.
    pub fn other(&self, v: VertexIx) -> VertexIx {
        if v == self.from_ix {
            self.to_ix
        } else {
            self.from_ix
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge[{}->{}]", self.from, self.to)
    }
}

#![forbid(unsafe_code)]

//! Genealogical record graph used by `quilt-layout`.
//!
//! A [`Network`] holds people and unions (families) joined by directed edges that point from
//! descendant to ascendant: a child points at the union it was born into, and a union points
//! at each of its parents. The layout engine reads this graph and writes a generation `layer`
//! and an in-layer `order` back onto every vertex.

pub mod cycles;
pub mod edge;
pub mod error;
pub mod network;
pub mod properties;
pub mod vertex;

pub use cycles::{FeedbackSet, find_cycles};
pub use edge::{Edge, EdgeIx};
pub use error::{Error, Result};
pub use network::{Components, LayerRange, Network};
pub use properties::Properties;
pub use vertex::{Person, Union, Vertex, VertexIx, VertexKind, VertexType};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] quilt_graph::Error),

    #[error("component {component}: initial ranking reached {ranked} of {expected} vertices")]
    UnrankedVertices {
        component: usize,
        ranked: usize,
        expected: usize,
    },

    #[error("component {component}: tight tree stalled at {covered} of {expected} vertices")]
    SpanningTreeStalled {
        component: usize,
        covered: usize,
        expected: usize,
    },

    #[error("layer cache line {line}: {message}")]
    MalformedCache { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

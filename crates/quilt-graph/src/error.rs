#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vertex id is already in use: {id}")]
    DuplicateVertex { id: String },

    #[error("unknown vertex: {id}")]
    UnknownVertex { id: String },

    #[error("edge {from} -> {to} must join a person and a union")]
    SameTypeEdge { from: String, to: String },

    #[error("vertex {id} is not a {expected:?}")]
    WrongVertexType {
        id: String,
        expected: crate::VertexType,
    },

    #[error("self-loop on vertex {id}")]
    SelfLoop { id: String },

    #[error("union {union} already has two parents")]
    TooManyParents { union: String },

    #[error("person {person} already belongs to union {existing} as a child")]
    ConflictingParentUnion { person: String, existing: String },
}

pub type Result<T> = std::result::Result<T, Error>;

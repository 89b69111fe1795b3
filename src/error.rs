use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed numbering string {0:?}: expected <integer> or <integer>.<digits>")]
    MalformedNumber(String),
    #[error("node {id:?} has no `number` property")]
    MissingNumber { id: String },
    #[error("duplicate node id {0:?}")]
    DuplicateId(String),
    #[error("unknown node id {0:?}")]
    UnknownNode(String),
    #[error("invalid dataset: {0}")]
    Dataset(String),
}

// Errors for key parsing and relation selection.
//
// Only malformed input is an error. A search that finds no route between
// two valid keys is a normal outcome and is reported as an empty path.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModulateError {
    #[error("malformed key '{0}': expected \"<tonic> <major|minor>\"")]
    MalformedKey(String),

    #[error("unknown tonic '{0}'")]
    UnknownTonic(String),

    #[error("unknown modality '{0}' (expected major or minor)")]
    UnknownModality(String),

    #[error("relation index {0} is out of range 0..=5")]
    RelationOutOfRange(u8),

    #[error("malformed relation list '{0}': expected comma-separated indices 0..=5")]
    MalformedRelations(String),

    #[error("unknown search '{0}' (expected bfs or dfs)")]
    UnknownSearch(String),
}

pub type Result<T> = std::result::Result<T, ModulateError>;

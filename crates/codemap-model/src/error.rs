use thiserror::Error;

/// A mapping area or direction name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("the mapping area {0} is not supported")]
    MappingArea(String),
    #[error("the direction {0} is not supported")]
    Direction(String),
}

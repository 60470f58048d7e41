use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("duplicate layer name: {name:?}")]
    DuplicateLayer { name: String },
}

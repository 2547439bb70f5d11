/// Error type for head composition.
#[derive(Debug, thiserror::Error)]
pub enum HeadError {
    /// No descriptor supplied a non-empty title.
    #[error("Missing title tag.")]
    MissingTitle,
    /// Descriptor source could not be parsed.
    #[error("{0}")]
    Parse(String),
}

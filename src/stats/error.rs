type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[error("stats backend error: {0}")]
pub struct Error(#[source] BoxError);

impl Error {
    pub(super) fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }
}

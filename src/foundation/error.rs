pub type BoutonResult<T> = Result<T, BoutonError>;

#[derive(thiserror::Error, Debug)]
pub enum BoutonError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("text error: {0}")]
    Text(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoutonError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

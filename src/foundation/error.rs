pub type LifegridResult<T> = Result<T, LifegridError>;

#[derive(thiserror::Error, Debug)]
pub enum LifegridError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("layout infeasible: {0}")]
    LayoutInfeasible(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LifegridError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout_infeasible(msg: impl Into<String>) -> Self {
        Self::LayoutInfeasible(msg.into())
    }
}

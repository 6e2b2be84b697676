pub type VersesyncResult<T> = Result<T, VersesyncError>;

#[derive(thiserror::Error, Debug)]
pub enum VersesyncError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VersesyncError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            VersesyncError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            VersesyncError::config("x")
                .to_string()
                .contains("config error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = VersesyncError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}

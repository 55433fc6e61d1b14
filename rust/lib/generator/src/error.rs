use thiserror::Error;

/// Why a generation run stopped. Every variant carries the step number it
/// stopped at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Config rejected before any filesystem call (step 0).
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Filesystem { step: u8, message: String },

    #[error("Tempo esgotado: {operation}")]
    Timeout { step: u8, operation: String },

    #[error("Geração cancelada")]
    Cancelled { step: u8 },
}

impl GenerateError {
    pub fn step(&self) -> u8 {
        match self {
            Self::Validation(_) => 0,
            Self::Filesystem { step, .. } | Self::Timeout { step, .. } | Self::Cancelled { step } => {
                *step
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GenerateError::Timeout {
                step: 2,
                operation: "ensureDir".into()
            }
            .to_string(),
            "Tempo esgotado: ensureDir"
        );
        assert_eq!(GenerateError::Cancelled { step: 3 }.to_string(), "Geração cancelada");
        assert_eq!(GenerateError::Validation("x".into()).step(), 0);
    }
}

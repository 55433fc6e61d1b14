use serde::{Deserialize, Serialize};

/// Generation steps, in execution order. Steps only move forward; a failure
/// ends the run at the step where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenerationStep {
    Validating,
    ResolvingPaths,
    CreatingPageDir,
    CreatingComponentsDir,
    CreatingApiDir,
    GeneratingBaseFiles,
    ConfiguringRoutes,
    Done,
}

impl GenerationStep {
    pub const ALL: [GenerationStep; 8] = [
        Self::Validating,
        Self::ResolvingPaths,
        Self::CreatingPageDir,
        Self::CreatingComponentsDir,
        Self::CreatingApiDir,
        Self::GeneratingBaseFiles,
        Self::ConfiguringRoutes,
        Self::Done,
    ];

    /// Index of the last step.
    pub const LAST: u8 = 7;

    pub fn number(&self) -> u8 {
        match self {
            Self::Validating => 0,
            Self::ResolvingPaths => 1,
            Self::CreatingPageDir => 2,
            Self::CreatingComponentsDir => 3,
            Self::CreatingApiDir => 4,
            Self::GeneratingBaseFiles => 5,
            Self::ConfiguringRoutes => 6,
            Self::Done => 7,
        }
    }

    /// Message reported when the step starts.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validating => "Validando configuração",
            Self::ResolvingPaths => "Preparando estrutura de diretórios",
            Self::CreatingPageDir => "Criando diretório da página",
            Self::CreatingComponentsDir => "Criando diretório de componentes",
            Self::CreatingApiDir => "Criando diretório da API",
            Self::GeneratingBaseFiles => "Gerando arquivos base",
            Self::ConfiguringRoutes => "Configurando rotas da API",
            Self::Done => "Página gerada com sucesso",
        }
    }
}

/// One progress event: `{step, message, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub step: u8,
    pub message: String,
    pub error: Option<String>,
}

impl Progress {
    pub fn started(step: GenerationStep) -> Self {
        Self {
            step: step.number(),
            message: step.message().to_string(),
            error: None,
        }
    }

    pub fn failed(step: GenerationStep, error: impl Into<String>) -> Self {
        Self {
            step: step.number(),
            message: step.message().to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

use reqwest::StatusCode;
use thiserror::Error;

/// Mensagem mostrada quando a falha não traz nenhum texto aproveitável.
pub const MENSAGEM_GENERICA: &str = "Erro ao processar cadastro";

/// Fallback para falhas de rede sem mensagem do transporte.
pub const FALHA_SERVIDOR: &str = "Falha no servidor durante o cadastro";

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Uma ou mais regras do formulário falharam; nenhuma requisição é feita.
    #[error("{}", .0.join("<br>"))]
    Validacao(Vec<String>),

    // Sem resposta do servidor (DNS, conexão recusada, TLS...).
    #[error("{0}")]
    Transporte(String),

    // O servidor respondeu com status de erro.
    #[error("{mensagem}")]
    Api { status: StatusCode, mensagem: String },

    // Corpo de sucesso que não é o JSON esperado.
    #[error("Resposta inválida do servidor: {0}")]
    RespostaInvalida(#[from] serde_json::Error),

    #[error("Erro de armazenamento local: {0}")]
    Armazenamento(String),

    #[error("Configuração inválida: {0}")]
    Configuracao(#[from] validator::ValidationErrors),

    #[error("Já existe um cadastro em andamento")]
    EnvioEmAndamento,

    #[error("Erro interno: {0}")]
    Interno(#[from] anyhow::Error),
}

impl AppError {
    /// Texto que vai para a região de erro da página.
    pub fn mensagem_usuario(&self) -> String {
        match self {
            AppError::Validacao(_) | AppError::Transporte(_) | AppError::Api { .. } => {
                let mensagem = self.to_string();
                if mensagem.trim().is_empty() {
                    MENSAGEM_GENERICA.to_string()
                } else {
                    mensagem
                }
            }
            // Falhas internas não vazam detalhes para o usuário.
            _ => MENSAGEM_GENERICA.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let mensagem = err.to_string();
        if mensagem.trim().is_empty() {
            AppError::Transporte(FALHA_SERVIDOR.to_string())
        } else {
            AppError::Transporte(mensagem)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Armazenamento(err.to_string())
    }
}

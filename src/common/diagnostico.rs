// src/common/diagnostico.rs

use std::backtrace::Backtrace;
use uuid::Uuid;

use crate::{common::error::AppError, models::registro::RegistroPayload};

/// Recebe o contexto completo de uma falha de cadastro.
///
/// Fica separado do `RegistroService` para que o tratamento de falhas possa
/// ser testado sem capturar a saída de log.
pub trait Diagnostico: Send + Sync {
    fn falha_registro(
        &self,
        tentativa: Uuid,
        erro: &AppError,
        payload: &RegistroPayload,
        backtrace: &Backtrace,
    );
}

// Implementação padrão: tudo vai para o `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingDiagnostico;

impl Diagnostico for TracingDiagnostico {
    fn falha_registro(
        &self,
        tentativa: Uuid,
        erro: &AppError,
        payload: &RegistroPayload,
        backtrace: &Backtrace,
    ) {
        // O Debug do payload já mascara as senhas.
        tracing::error!(
            %tentativa,
            mensagem = %erro,
            form_data = ?payload,
            stack = %backtrace,
            "🔥 Erro completo no cadastro"
        );
    }
}

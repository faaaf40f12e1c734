// src/handlers/registro.rs

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    common::error::AppError,
    config::AppState,
    services::{
        resposta::{Redirecionamento, RespostaService},
        validacao,
    },
    ui::{formulario::extrair_payload, ControleEnvio, FormInputSource},
};

pub const ROTULO_ENVIANDO: &str = "Cadastrando...";
pub const ROTULO_PADRAO: &str = "Cadastrar";

// Handler do submit do formulário de cadastro
#[derive(Clone)]
pub struct RegistroHandler {
    app_state: AppState,
    formulario: Arc<dyn FormInputSource>,
    botao: Arc<dyn ControleEnvio>,
    em_andamento: Arc<AtomicBool>,
}

// Libera o botão ao sair do escopo, inclusive se o future for descartado
struct GuardaEnvio<'a> {
    botao: &'a dyn ControleEnvio,
    em_andamento: &'a AtomicBool,
}

impl Drop for GuardaEnvio<'_> {
    fn drop(&mut self) {
        self.botao.habilitar(ROTULO_PADRAO);
        self.em_andamento.store(false, Ordering::SeqCst);
    }
}

impl RegistroHandler {
    pub fn new(
        app_state: AppState,
        formulario: Arc<dyn FormInputSource>,
        botao: Arc<dyn ControleEnvio>,
    ) -> Self {
        Self {
            app_state,
            formulario,
            botao,
            em_andamento: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Extrai, valida, envia e trata a resposta.
    ///
    /// Qualquer falha é mostrada na região de erro antes de ser devolvida.
    /// Enquanto um envio está em andamento, novos envios são recusados com
    /// `AppError::EnvioEmAndamento`.
    pub async fn handle_register(&self) -> Result<Redirecionamento, AppError> {
        if self.em_andamento.swap(true, Ordering::SeqCst) {
            tracing::debug!("⏳ Cadastro já em andamento, submit ignorado");
            return Err(AppError::EnvioEmAndamento);
        }

        self.botao.desabilitar(ROTULO_ENVIANDO);
        let _guarda = GuardaEnvio {
            botao: self.botao.as_ref(),
            em_andamento: &self.em_andamento,
        };

        let resultado = self.processar().await;

        if let Err(erro) = &resultado {
            self.app_state.mensagens.show_error(erro.mensagem_usuario());
            match erro {
                AppError::Validacao(erros) => {
                    tracing::debug!("📝 Formulário com {} erro(s)", erros.len())
                }
                _ => tracing::error!("🔥 Erro no registro: {}", erro),
            }
        }

        resultado
    }

    async fn processar(&self) -> Result<Redirecionamento, AppError> {
        let payload = extrair_payload(self.formulario.as_ref());

        let erros = validacao::validar(&payload);
        if !erros.is_empty() {
            return Err(AppError::Validacao(erros));
        }

        let resposta = self.app_state.registro_service.registrar(&payload).await?;

        RespostaService::new(&self.app_state)
            .tratar(&resposta, payload.is_empresa())
            .await
    }
}

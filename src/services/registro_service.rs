// src/services/registro_service.rs

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, StatusCode,
};
use serde_json::Value;
use std::{backtrace::Backtrace, sync::Arc};
use uuid::Uuid;

use crate::{
    common::{diagnostico::Diagnostico, error::AppError},
    config::{AppConfig, ROTA_REGISTRO},
    models::registro::RegistroPayload,
};

// Resposta 2xx do backend, com o corpo já lido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespostaRegistro {
    pub status: StatusCode,
    pub corpo: String,
}

#[derive(Clone)]
pub struct RegistroService {
    http: Client,
    url: String,
    diagnostico: Arc<dyn Diagnostico>,
}

impl RegistroService {
    pub fn new(config: &AppConfig, diagnostico: Arc<dyn Diagnostico>) -> Result<Self, AppError> {
        // Sem timeout explícito: vale o padrão do transporte
        let http = Client::builder()
            .user_agent(format!("recorder-frontend/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: config.endpoint(ROTA_REGISTRO),
            diagnostico,
        })
    }

    /// Envia o cadastro e espera a resposta.
    ///
    /// Status fora de 2xx vira `AppError::Api`; falha de rede vira
    /// `AppError::Transporte`. Toda falha é repassada ao `Diagnostico` junto
    /// com o payload original.
    pub async fn registrar(&self, payload: &RegistroPayload) -> Result<RespostaRegistro, AppError> {
        let tentativa = Uuid::new_v4();
        tracing::info!(%tentativa, tipo = ?payload.tipo(), "📨 Enviando cadastro para {}", self.url);

        match self.enviar(payload).await {
            Ok(resposta) => {
                tracing::info!(%tentativa, status = %resposta.status, "✅ Cadastro aceito pelo servidor");
                Ok(resposta)
            }
            Err(erro) => {
                self.diagnostico
                    .falha_registro(tentativa, &erro, payload, &Backtrace::force_capture());
                Err(erro)
            }
        }
    }

    async fn enviar(&self, payload: &RegistroPayload) -> Result<RespostaRegistro, AppError> {
        let resposta = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = resposta.status();

        if !status.is_success() {
            // Corpo ilegível conta como corpo vazio
            let corpo = resposta.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status,
                mensagem: mensagem_de_erro(status, &corpo),
            });
        }

        let corpo = resposta.text().await?;
        Ok(RespostaRegistro { status, corpo })
    }
}

/// `message` ou `error` do corpo JSON; senão "Erro {status}: {motivo}".
///
/// Vale o primeiro campo com valor escalar "verdadeiro": texto não vazio,
/// número diferente de zero ou `true`. Objetos e listas são ignorados.
pub fn mensagem_de_erro(status: StatusCode, corpo: &str) -> String {
    let dados: Value = serde_json::from_str(corpo).unwrap_or(Value::Null);

    ["message", "error"]
        .iter()
        .find_map(|campo| dados.get(campo).and_then(texto_escalar))
        .unwrap_or_else(|| {
            format!(
                "Erro {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
            .trim_end()
            .to_string()
        })
}

fn texto_escalar(valor: &Value) -> Option<String> {
    match valor {
        Value::String(texto) if !texto.is_empty() => Some(texto.clone()),
        Value::Number(numero) if numero.as_f64() != Some(0.0) => Some(numero.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

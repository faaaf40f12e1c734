// src/config.rs

use std::{env, sync::Arc, time::Duration};
use validator::Validate;

use crate::{
    common::{diagnostico::Diagnostico, error::AppError},
    db::{KeyValueStore, SessaoRepository},
    services::registro_service::RegistroService,
    ui::{MessagePresenter, MessageSurface, Navegador},
};

pub const API_BASE_URL_PADRAO: &str = "https://recorder-backend-7r85.onrender.com";

pub const ROTA_REGISTRO: &str = "/api/usuario/registrar";
pub const ROTA_HEALTH: &str = "/actuator/health";

pub const PAGINA_ADMIN: &str = "/views/inicialAdmin.html";
pub const PAGINA_USUARIO: &str = "/views/inicial.html";
pub const PAGINA_LOGIN: &str = "login.html";

// O cron original: */10 * * * *
pub const INTERVALO_KEEP_ALIVE_PADRAO: Duration = Duration::from_secs(10 * 60);
pub const ATRASO_REDIRECIONAMENTO: Duration = Duration::from_millis(2000);
pub const DURACAO_ERRO: Duration = Duration::from_millis(5000);
pub const DURACAO_SUCESSO: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[validate(url(message = "API_BASE_URL deve ser uma URL válida"))]
    pub api_base_url: String,

    #[validate(range(min = 1, message = "O intervalo do keep-alive deve ser de pelo menos 1 segundo"))]
    pub keep_alive_intervalo_secs: u64,

    pub atraso_redirecionamento: Duration,
    pub duracao_erro: Duration,
    pub duracao_sucesso: Duration,

    pub pagina_admin: String,
    pub pagina_usuario: String,
    pub pagina_login: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::com_base_url(API_BASE_URL_PADRAO)
    }
}

impl AppConfig {
    pub fn com_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            keep_alive_intervalo_secs: INTERVALO_KEEP_ALIVE_PADRAO.as_secs(),
            atraso_redirecionamento: ATRASO_REDIRECIONAMENTO,
            duracao_erro: DURACAO_ERRO,
            duracao_sucesso: DURACAO_SUCESSO,
            pagina_admin: PAGINA_ADMIN.to_string(),
            pagina_usuario: PAGINA_USUARIO.to_string(),
            pagina_login: PAGINA_LOGIN.to_string(),
        }
    }

    // Lê o .env (se existir) e as variáveis de ambiente
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(base_url) = env::var("API_BASE_URL") {
            config.api_base_url = base_url;
        }
        if let Ok(intervalo) = env::var("KEEP_ALIVE_INTERVAL_SECS") {
            config.keep_alive_intervalo_secs = intervalo.trim().parse().map_err(|e| {
                anyhow::anyhow!("KEEP_ALIVE_INTERVAL_SECS inválido ({}): {}", intervalo, e)
            })?;
        }

        Ok(config.validar()?)
    }

    pub fn validar(self) -> Result<Self, AppError> {
        self.validate()?;
        Ok(self)
    }

    pub fn keep_alive_intervalo(&self) -> Duration {
        Duration::from_secs(self.keep_alive_intervalo_secs)
    }

    /// Junta a base com uma rota, sem barra duplicada.
    pub fn endpoint(&self, rota: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            rota.trim_start_matches('/')
        )
    }
}

// O estado compartilhado do fluxo de cadastro
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub registro_service: RegistroService,
    pub sessoes: SessaoRepository,
    pub mensagens: MessagePresenter,
    pub navegador: Arc<dyn Navegador>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        surface: Arc<dyn MessageSurface>,
        navegador: Arc<dyn Navegador>,
        diagnostico: Arc<dyn Diagnostico>,
    ) -> Result<Self, AppError> {
        let config = config.validar()?;

        // --- Monta o gráfico de dependências ---
        let registro_service = RegistroService::new(&config, diagnostico)?;
        let sessoes = SessaoRepository::new(store);
        let mensagens = MessagePresenter::new(surface, config.duracao_erro, config.duracao_sucesso);

        Ok(Self {
            config,
            registro_service,
            sessoes,
            mensagens,
            navegador,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padrao_aponta_para_o_backend_hospedado() {
        let config = AppConfig::default().validar().unwrap();
        assert_eq!(
            config.endpoint(ROTA_REGISTRO),
            "https://recorder-backend-7r85.onrender.com/api/usuario/registrar"
        );
        assert_eq!(config.keep_alive_intervalo(), Duration::from_secs(600));
    }

    #[test]
    fn endpoint_nao_duplica_barras() {
        let config = AppConfig::com_base_url("http://localhost:8080/");
        assert_eq!(
            config.endpoint("/actuator/health"),
            "http://localhost:8080/actuator/health"
        );
    }

    #[test]
    fn rejeita_url_e_intervalo_invalidos() {
        let erro = AppConfig::com_base_url("isso não é url").validar().unwrap_err();
        assert!(matches!(erro, AppError::Configuracao(_)));

        let mut config = AppConfig::default();
        config.keep_alive_intervalo_secs = 0;
        assert!(matches!(config.validar(), Err(AppError::Configuracao(_))));
    }
}

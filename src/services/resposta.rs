// src/services/resposta.rs

use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

use crate::{
    common::error::AppError,
    config::AppState,
    db::SessaoRepository,
    models::{registro::RegistroResponse, sessao::Sessao},
    services::registro_service::RespostaRegistro,
    ui::{MessagePresenter, Navegador},
};

pub const MENSAGEM_SUCESSO: &str = "Cadastro realizado com sucesso! Redirecionando...";

// Navegação agendada depois do cadastro.
// O atraso existe só para a mensagem de sucesso ficar visível.
#[derive(Debug)]
pub struct Redirecionamento {
    pub destino: String,
    pub atraso: Duration,
    tarefa: JoinHandle<()>,
}

impl Redirecionamento {
    /// Espera a navegação acontecer.
    pub async fn concluir(self) -> Result<(), AppError> {
        self.tarefa
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de redirecionamento: {}", e))?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct RespostaService {
    sessoes: SessaoRepository,
    mensagens: MessagePresenter,
    navegador: Arc<dyn Navegador>,
    atraso: Duration,
    pagina_admin: String,
    pagina_login: String,
}

impl RespostaService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            sessoes: app_state.sessoes.clone(),
            mensagens: app_state.mensagens.clone(),
            navegador: Arc::clone(&app_state.navegador),
            atraso: app_state.config.atraso_redirecionamento,
            pagina_admin: app_state.config.pagina_admin.clone(),
            pagina_login: app_state.config.pagina_login.clone(),
        }
    }

    /// Trata a resposta 2xx do cadastro.
    ///
    /// Conta PJ: salva a sessão (ROLE_ADMIN) e vai para a página inicial do
    /// admin. Conta PF: vai para o login. Corpo que não é JSON (ou PJ sem os
    /// campos da sessão) vira `AppError::RespostaInvalida`.
    pub async fn tratar(
        &self,
        resposta: &RespostaRegistro,
        is_empresa: bool,
    ) -> Result<Redirecionamento, AppError> {
        let dados: Value = serde_json::from_str(&resposta.corpo)?;

        let destino = if is_empresa {
            let registro: RegistroResponse = serde_json::from_value(dados)?;
            let sessao = Sessao::de_empresa(registro);
            self.sessoes.salvar(&sessao).await?;
            tracing::info!("🔑 Sessão de administrador salva para {}", sessao.user_info.email);
            self.pagina_admin.clone()
        } else {
            self.pagina_login.clone()
        };

        self.mensagens.show_success(MENSAGEM_SUCESSO);

        let navegador = Arc::clone(&self.navegador);
        let atraso = self.atraso;
        let alvo = destino.clone();
        let tarefa = tokio::spawn(async move {
            tokio::time::sleep(atraso).await;
            navegador.navegar(&alvo);
        });

        Ok(Redirecionamento {
            destino,
            atraso,
            tarefa,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::diagnostico::TracingDiagnostico,
        config::{AppConfig, PAGINA_ADMIN, PAGINA_LOGIN},
        db::{kv_store::testing::StoreComFalha, KeyValueStore, MemoriaStore},
        handlers::pagina::verificar_sessao_existente,
        models::{registro::UsuarioId, sessao::ROLE_ADMIN},
        ui::{mensagens::Conteudo, NavegadorMemoria, PaginaMemoria, TipoMensagem},
    };
    use reqwest::StatusCode;

    struct Cenario {
        service: RespostaService,
        store: Arc<MemoriaStore>,
        pagina: Arc<PaginaMemoria>,
        navegador: Arc<NavegadorMemoria>,
        sessoes: SessaoRepository,
    }

    fn cenario() -> Cenario {
        let store = Arc::new(MemoriaStore::new());
        let pagina = Arc::new(PaginaMemoria::new());
        let navegador = Arc::new(NavegadorMemoria::new());
        let state = AppState::new(
            AppConfig::default(),
            store.clone(),
            pagina.clone(),
            navegador.clone(),
            Arc::new(TracingDiagnostico),
        )
        .unwrap();

        Cenario {
            service: RespostaService::new(&state),
            sessoes: state.sessoes.clone(),
            store,
            pagina,
            navegador,
        }
    }

    fn ok(corpo: &str) -> RespostaRegistro {
        RespostaRegistro {
            status: StatusCode::OK,
            corpo: corpo.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn pj_salva_sessao_admin_e_redireciona_apos_2s() {
        let c = cenario();
        let redirecionamento = c
            .service
            .tratar(&ok(r#"{"token":"t1","id":5,"email":"e@x.com","nome":"Biz"}"#), true)
            .await
            .unwrap();

        assert_eq!(redirecionamento.destino, PAGINA_ADMIN);
        assert_eq!(redirecionamento.atraso, Duration::from_millis(2000));

        let sessao = c.sessoes.carregar().await.unwrap().unwrap();
        assert_eq!(sessao.auth_token, "t1");
        assert_eq!(sessao.user_info.id, UsuarioId::Numero(5));
        assert_eq!(sessao.user_info.nome, "Biz");
        assert_eq!(sessao.user_info.roles, vec![ROLE_ADMIN.to_string()]);

        assert_eq!(
            c.pagina.regiao(TipoMensagem::Sucesso).unwrap().conteudo,
            Some(Conteudo::Texto(MENSAGEM_SUCESSO.into()))
        );

        // Ainda não navegou
        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(c.navegador.historico().is_empty());

        redirecionamento.concluir().await.unwrap();
        assert_eq!(c.navegador.historico(), vec![PAGINA_ADMIN]);
    }

    #[tokio::test(start_paused = true)]
    async fn pf_vai_para_o_login_sem_sessao() {
        let c = cenario();
        let redirecionamento = c
            .service
            .tratar(&ok(r#"{"id":7,"nome":"Maria"}"#), false)
            .await
            .unwrap();

        redirecionamento.concluir().await.unwrap();

        assert_eq!(c.navegador.historico(), vec![PAGINA_LOGIN]);
        assert_eq!(c.store.get("authToken").await.unwrap(), None);
        assert!(c.pagina.regiao(TipoMensagem::Sucesso).unwrap().visivel);
    }

    #[tokio::test]
    async fn corpo_invalido_falha_sem_mensagem_de_sucesso() {
        let c = cenario();
        let erro = c.service.tratar(&ok("<html>ok</html>"), false).await.unwrap_err();

        assert!(matches!(erro, AppError::RespostaInvalida(_)));
        assert!(c.pagina.regiao(TipoMensagem::Sucesso).is_none());
        assert!(c.navegador.historico().is_empty());
    }

    #[tokio::test]
    async fn pj_sem_token_nao_salva_sessao() {
        let c = cenario();
        let erro = c
            .service
            .tratar(&ok(r#"{"id":5,"email":"e@x.com","nome":"Biz"}"#), true)
            .await
            .unwrap_err();

        assert!(matches!(erro, AppError::RespostaInvalida(_)));
        assert_eq!(c.store.get("authToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn falha_ao_gravar_user_info_nao_deixa_sessao_pela_metade() {
        let pagina = Arc::new(PaginaMemoria::new());
        let navegador = Arc::new(NavegadorMemoria::new());
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(StoreComFalha::recusando("userInfo")),
            pagina.clone(),
            navegador.clone(),
            Arc::new(TracingDiagnostico),
        )
        .unwrap();

        let erro = RespostaService::new(&state)
            .tratar(&ok(r#"{"token":"t1","id":5,"email":"e@x.com","nome":"Biz"}"#), true)
            .await
            .unwrap_err();

        assert!(matches!(erro, AppError::Armazenamento(_)));
        assert!(pagina.regiao(TipoMensagem::Sucesso).is_none());

        // Recarregar a página continua mostrando o formulário
        assert_eq!(verificar_sessao_existente(&state).await.unwrap(), None);
        assert!(navegador.historico().is_empty());
    }
}

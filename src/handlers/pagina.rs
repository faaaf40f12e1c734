// src/handlers/pagina.rs

use crate::{common::error::AppError, config::AppState};

/// Executado ao carregar a página de cadastro.
///
/// Se já existe uma sessão salva, navega direto para a página inicial
/// (admin ou usuário, conforme as roles) e devolve o destino. `None` quando
/// o formulário deve ser exibido.
pub async fn verificar_sessao_existente(app_state: &AppState) -> Result<Option<String>, AppError> {
    if app_state.sessoes.auth_token().await?.is_none() {
        return Ok(None);
    }

    let is_admin = app_state
        .sessoes
        .user_info()
        .await?
        .is_some_and(|info| info.is_admin());

    let destino = if is_admin {
        app_state.config.pagina_admin.clone()
    } else {
        app_state.config.pagina_usuario.clone()
    };

    tracing::info!("🔐 Sessão existente encontrada, redirecionando para {}", destino);
    app_state.navegador.navegar(&destino);

    Ok(Some(destino))
}

// src/db/sessao_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::KeyValueStore,
    models::sessao::{Sessao, UserInfo},
};

pub const CHAVE_AUTH_TOKEN: &str = "authToken";
pub const CHAVE_USER_INFO: &str = "userInfo";

// O repositório da sessão, responsável pelas chaves `authToken` e `userInfo`
#[derive(Clone)]
pub struct SessaoRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SessaoRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Grava `userInfo` e só depois `authToken`.
    ///
    /// O token é o que marca a sessão como existente no carregamento da
    /// página: ele nunca fica gravado sem o `userInfo` correspondente.
    pub async fn salvar(&self, sessao: &Sessao) -> Result<(), AppError> {
        let user_info = serde_json::to_string(&sessao.user_info)
            .map_err(|e| AppError::Armazenamento(e.to_string()))?;

        self.store.set(CHAVE_USER_INFO, &user_info).await?;

        if let Err(e) = self.store.set(CHAVE_AUTH_TOKEN, &sessao.auth_token).await {
            if let Err(limpeza) = self.store.remove(CHAVE_USER_INFO).await {
                tracing::warn!("⚠️ Não foi possível desfazer o userInfo gravado: {}", limpeza);
            }
            return Err(e);
        }
        Ok(())
    }

    pub async fn auth_token(&self) -> Result<Option<String>, AppError> {
        self.store.get(CHAVE_AUTH_TOKEN).await
    }

    // `None` quando não existe ou não é um JSON de UserInfo válido
    pub async fn user_info(&self) -> Result<Option<UserInfo>, AppError> {
        let Some(bruto) = self.store.get(CHAVE_USER_INFO).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<UserInfo>(&bruto) {
            Ok(info) => Ok(Some(info)),
            Err(e) => {
                tracing::warn!("⚠️ userInfo corrompido no armazenamento local: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn carregar(&self) -> Result<Option<Sessao>, AppError> {
        let Some(auth_token) = self.auth_token().await? else {
            return Ok(None);
        };
        Ok(self.user_info().await?.map(|user_info| Sessao {
            auth_token,
            user_info,
        }))
    }

    pub async fn remover(&self) -> Result<(), AppError> {
        self.store.remove(CHAVE_AUTH_TOKEN).await?;
        self.store.remove(CHAVE_USER_INFO).await
    }
}

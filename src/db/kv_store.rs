// src/db/kv_store.rs

use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tokio::sync::Mutex as AsyncMutex;

use crate::common::error::AppError;

/// Armazenamento local chave/valor do cliente (o `localStorage` da página).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, chave: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, chave: &str, valor: &str) -> Result<(), AppError>;
    async fn remove(&self, chave: &str) -> Result<(), AppError>;
}

// --- Em memória ---

#[derive(Debug, Default)]
pub struct MemoriaStore {
    dados: Mutex<BTreeMap<String, String>>,
}

impl MemoriaStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn dados(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, AppError> {
        self.dados
            .lock()
            .map_err(|_| AppError::Armazenamento("mutex envenenado".into()))
    }
}

#[async_trait]
impl KeyValueStore for MemoriaStore {
    async fn get(&self, chave: &str) -> Result<Option<String>, AppError> {
        Ok(self.dados()?.get(chave).cloned())
    }

    async fn set(&self, chave: &str, valor: &str) -> Result<(), AppError> {
        self.dados()?.insert(chave.to_string(), valor.to_string());
        Ok(())
    }

    async fn remove(&self, chave: &str) -> Result<(), AppError> {
        self.dados()?.remove(chave);
        Ok(())
    }
}

// --- Em arquivo ---

// Um único objeto JSON { chave: valor } no disco.
// Cada escrita regrava o arquivo inteiro; o lock serializa leitura+escrita.
#[derive(Debug)]
pub struct ArquivoStore {
    caminho: PathBuf,
    lock: AsyncMutex<()>,
}

impl ArquivoStore {
    pub fn new(caminho: impl AsRef<Path>) -> Self {
        Self {
            caminho: caminho.as_ref().to_path_buf(),
            lock: AsyncMutex::new(()),
        }
    }

    async fn ler(&self) -> Result<BTreeMap<String, String>, AppError> {
        match tokio::fs::read(&self.caminho).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Armazenamento(format!(
                    "arquivo {} corrompido: {}",
                    self.caminho.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn gravar(&self, dados: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(pasta) = self.caminho.parent() {
            if !pasta.as_os_str().is_empty() {
                tokio::fs::create_dir_all(pasta).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(dados)
            .map_err(|e| AppError::Armazenamento(e.to_string()))?;
        tokio::fs::write(&self.caminho, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for ArquivoStore {
    async fn get(&self, chave: &str) -> Result<Option<String>, AppError> {
        let _guard = self.lock.lock().await;
        Ok(self.ler().await?.remove(chave))
    }

    async fn set(&self, chave: &str, valor: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut dados = self.ler().await?;
        dados.insert(chave.to_string(), valor.to_string());
        self.gravar(&dados).await
    }

    async fn remove(&self, chave: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut dados = self.ler().await?;
        if dados.remove(chave).is_some() {
            self.gravar(&dados).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    // Em memória, mas recusa gravar uma chave específica.
    #[derive(Debug, Default)]
    pub struct StoreComFalha {
        pub interno: MemoriaStore,
        pub chave_recusada: &'static str,
    }

    impl StoreComFalha {
        pub fn recusando(chave: &'static str) -> Self {
            Self {
                interno: MemoriaStore::new(),
                chave_recusada: chave,
            }
        }
    }

    #[async_trait]
    impl KeyValueStore for StoreComFalha {
        async fn get(&self, chave: &str) -> Result<Option<String>, AppError> {
            self.interno.get(chave).await
        }

        async fn set(&self, chave: &str, valor: &str) -> Result<(), AppError> {
            if chave == self.chave_recusada {
                return Err(AppError::Armazenamento(format!("cota excedida ao gravar {chave}")));
            }
            self.interno.set(chave, valor).await
        }

        async fn remove(&self, chave: &str) -> Result<(), AppError> {
            self.interno.remove(chave).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memoria_guarda_e_remove() {
        let store = MemoriaStore::new();
        assert_eq!(store.get("authToken").await.unwrap(), None);

        store.set("authToken", "t1").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap().as_deref(), Some("t1"));

        store.remove("authToken").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn arquivo_persiste_entre_instancias() {
        let pasta = tempfile::tempdir().unwrap();
        let caminho = pasta.path().join("local").join("storage.json");

        let store = ArquivoStore::new(&caminho);
        assert_eq!(store.get("authToken").await.unwrap(), None);
        store.set("authToken", "t1").await.unwrap();
        store.set("userInfo", "{}").await.unwrap();

        let reaberto = ArquivoStore::new(&caminho);
        assert_eq!(reaberto.get("authToken").await.unwrap().as_deref(), Some("t1"));
        assert_eq!(reaberto.get("userInfo").await.unwrap().as_deref(), Some("{}"));

        reaberto.remove("authToken").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn arquivo_corrompido_vira_erro_de_armazenamento() {
        let pasta = tempfile::tempdir().unwrap();
        let caminho = pasta.path().join("storage.json");
        tokio::fs::write(&caminho, b"isso nao e json").await.unwrap();

        let store = ArquivoStore::new(&caminho);
        let erro = store.get("authToken").await.unwrap_err();
        assert!(matches!(erro, AppError::Armazenamento(_)));
    }
}

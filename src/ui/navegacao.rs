// src/ui/navegacao.rs

use std::sync::Mutex;

/// Troca de página (o `window.location.href` do navegador).
pub trait Navegador: Send + Sync {
    fn navegar(&self, destino: &str);
}

// Só registra os destinos, na ordem
#[derive(Debug, Default)]
pub struct NavegadorMemoria {
    historico: Mutex<Vec<String>>,
}

impl NavegadorMemoria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn historico(&self) -> Vec<String> {
        self.historico
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }
}

impl Navegador for NavegadorMemoria {
    fn navegar(&self, destino: &str) {
        tracing::debug!("➡️ Navegando para {}", destino);
        if let Ok(mut historico) = self.historico.lock() {
            historico.push(destino.to_string());
        }
    }
}

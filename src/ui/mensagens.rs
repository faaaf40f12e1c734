// src/ui/mensagens.rs

use std::{collections::HashMap, sync::Arc, sync::Mutex, time::Duration};
use tokio::task::JoinHandle;

pub const ID_FORMULARIO: &str = "registerForm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipoMensagem {
    Erro,
    Sucesso,
}

impl TipoMensagem {
    pub fn id(self) -> &'static str {
        match self {
            TipoMensagem::Erro => "error-message",
            TipoMensagem::Sucesso => "success-message",
        }
    }
}

// Markup é conteúdo HTML controlado pelo chamador; Texto é exibido literalmente
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conteudo {
    Markup(String),
    Texto(String),
}

/// A parte da página onde ficam as regiões de notificação.
pub trait MessageSurface: Send + Sync {
    fn tem_regiao(&self, tipo: TipoMensagem) -> bool;
    /// Cria a região (oculta) imediatamente antes do formulário de cadastro.
    fn criar_regiao_antes_do_formulario(&self, tipo: TipoMensagem);
    fn renderizar(&self, tipo: TipoMensagem, conteudo: Conteudo);
    fn definir_visivel(&self, tipo: TipoMensagem, visivel: bool);
}

// Mostra as mensagens e agenda o sumiço de cada uma
#[derive(Clone)]
pub struct MessagePresenter {
    surface: Arc<dyn MessageSurface>,
    duracao_erro: Duration,
    duracao_sucesso: Duration,
}

impl MessagePresenter {
    pub fn new(
        surface: Arc<dyn MessageSurface>,
        duracao_erro: Duration,
        duracao_sucesso: Duration,
    ) -> Self {
        Self {
            surface,
            duracao_erro,
            duracao_sucesso,
        }
    }

    pub fn show_error(&self, markup: impl Into<String>) -> JoinHandle<()> {
        self.mostrar(
            TipoMensagem::Erro,
            Conteudo::Markup(markup.into()),
            self.duracao_erro,
        )
    }

    pub fn show_errors(&self, erros: &[String]) -> JoinHandle<()> {
        self.show_error(erros.join("<br>"))
    }

    pub fn show_success(&self, texto: impl Into<String>) -> JoinHandle<()> {
        self.mostrar(
            TipoMensagem::Sucesso,
            Conteudo::Texto(texto.into()),
            self.duracao_sucesso,
        )
    }

    fn mostrar(&self, tipo: TipoMensagem, conteudo: Conteudo, duracao: Duration) -> JoinHandle<()> {
        if !self.surface.tem_regiao(tipo) {
            self.surface.criar_regiao_antes_do_formulario(tipo);
        }
        self.surface.renderizar(tipo, conteudo);
        self.surface.definir_visivel(tipo, true);

        // Cada exibição agenda o próprio sumiço, sem cancelar as anteriores
        let surface = Arc::clone(&self.surface);
        tokio::spawn(async move {
            tokio::time::sleep(duracao).await;
            surface.definir_visivel(tipo, false);
        })
    }
}

// ---
// Página em memória
// ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regiao {
    pub conteudo: Option<Conteudo>,
    pub visivel: bool,
}

#[derive(Debug, Default)]
struct EstadoPagina {
    // ids dos elementos na ordem do documento
    elementos: Vec<String>,
    regioes: HashMap<TipoMensagem, Regiao>,
}

#[derive(Debug)]
pub struct PaginaMemoria {
    estado: Mutex<EstadoPagina>,
}

impl Default for PaginaMemoria {
    fn default() -> Self {
        Self::com_elementos(&[ID_FORMULARIO])
    }
}

impl PaginaMemoria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn com_elementos(ids: &[&str]) -> Self {
        Self {
            estado: Mutex::new(EstadoPagina {
                elementos: ids.iter().map(|id| id.to_string()).collect(),
                regioes: HashMap::new(),
            }),
        }
    }

    fn estado(&self) -> std::sync::MutexGuard<'_, EstadoPagina> {
        self.estado.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn regiao(&self, tipo: TipoMensagem) -> Option<Regiao> {
        self.estado().regioes.get(&tipo).cloned()
    }

    pub fn elementos(&self) -> Vec<String> {
        self.estado().elementos.clone()
    }
}

impl MessageSurface for PaginaMemoria {
    fn tem_regiao(&self, tipo: TipoMensagem) -> bool {
        self.estado().regioes.contains_key(&tipo)
    }

    fn criar_regiao_antes_do_formulario(&self, tipo: TipoMensagem) {
        let mut estado = self.estado();
        estado.regioes.insert(
            tipo,
            Regiao {
                conteudo: None,
                visivel: false,
            },
        );
        // Sem formulário a região existe, mas fica fora do documento
        if let Some(pos) = estado.elementos.iter().position(|id| id == ID_FORMULARIO) {
            estado.elementos.insert(pos, tipo.id().to_string());
        }
    }

    fn renderizar(&self, tipo: TipoMensagem, conteudo: Conteudo) {
        if let Some(regiao) = self.estado().regioes.get_mut(&tipo) {
            regiao.conteudo = Some(conteudo);
        }
    }

    fn definir_visivel(&self, tipo: TipoMensagem, visivel: bool) {
        if let Some(regiao) = self.estado().regioes.get_mut(&tipo) {
            regiao.visivel = visivel;
        }
    }
}

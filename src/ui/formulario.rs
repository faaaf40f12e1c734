// src/ui/formulario.rs

use std::{collections::HashMap, sync::Mutex};

use crate::models::registro::{Documento, RegistroPayload, TipoConta};

// Controles do formulário de cadastro, pelo id que têm na página
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Campo {
    Nome,
    Email,
    Telefone,
    Senha,
    ConfirmacaoSenha,
    AceitouTermos,
    TipoUsuario,
    Cpf,
    Cnpj,
}

impl Campo {
    pub fn id(self) -> &'static str {
        match self {
            Campo::Nome => "name",
            Campo::Email => "email",
            Campo::Telefone => "phone",
            Campo::Senha => "password",
            Campo::ConfirmacaoSenha => "confirmPassword",
            Campo::AceitouTermos => "agreeTerms",
            Campo::TipoUsuario => "userType",
            Campo::Cpf => "cpf",
            Campo::Cnpj => "cnpj",
        }
    }
}

/// Fonte dos valores atuais dos controles da página.
pub trait FormInputSource: Send + Sync {
    /// Valor de um campo de texto; vazio quando o controle não existe.
    fn valor(&self, campo: Campo) -> String;
    /// Estado de um checkbox.
    fn marcado(&self, campo: Campo) -> bool;
}

/// O botão de submit do formulário.
pub trait ControleEnvio: Send + Sync {
    fn desabilitar(&self, rotulo: &str);
    fn habilitar(&self, rotulo: &str);
}

pub fn somente_digitos(valor: &str) -> String {
    valor.chars().filter(char::is_ascii_digit).collect()
}

/// Lê os controles e monta o payload. Não valida nada.
pub fn extrair_payload(fonte: &dyn FormInputSource) -> RegistroPayload {
    let tipo = TipoConta::normalizar(&fonte.valor(Campo::TipoUsuario));

    // Só o documento do tipo escolhido é lido
    let documento = match tipo {
        TipoConta::Pj => Documento::Pj {
            cnpj: somente_digitos(&fonte.valor(Campo::Cnpj)),
        },
        TipoConta::Pf => Documento::Pf {
            cpf: somente_digitos(&fonte.valor(Campo::Cpf)),
        },
    };

    RegistroPayload {
        nome: fonte.valor(Campo::Nome).trim().to_string(),
        email: fonte.valor(Campo::Email).trim().to_string(),
        telefone: somente_digitos(&fonte.valor(Campo::Telefone)),
        senha: fonte.valor(Campo::Senha),
        confirmacao_senha: fonte.valor(Campo::ConfirmacaoSenha),
        aceitou_termos: fonte.marcado(Campo::AceitouTermos),
        documento,
    }
}

// ---
// Formulário em memória
// ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstadoBotao {
    pub desabilitado: bool,
    pub rotulo: String,
}

#[derive(Debug)]
pub struct FormularioMemoria {
    valores: Mutex<HashMap<Campo, String>>,
    marcados: Mutex<HashMap<Campo, bool>>,
    botao: Mutex<EstadoBotao>,
}

impl Default for FormularioMemoria {
    fn default() -> Self {
        Self {
            valores: Mutex::new(HashMap::new()),
            marcados: Mutex::new(HashMap::new()),
            botao: Mutex::new(EstadoBotao {
                desabilitado: false,
                rotulo: "Cadastrar".to_string(),
            }),
        }
    }
}

impl FormularioMemoria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preencher(&self, campo: Campo, valor: impl Into<String>) -> &Self {
        if let Ok(mut valores) = self.valores.lock() {
            valores.insert(campo, valor.into());
        }
        self
    }

    pub fn marcar(&self, campo: Campo, marcado: bool) -> &Self {
        if let Ok(mut marcados) = self.marcados.lock() {
            marcados.insert(campo, marcado);
        }
        self
    }

    pub fn botao(&self) -> EstadoBotao {
        self.botao
            .lock()
            .map(|b| b.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    fn definir_botao(&self, desabilitado: bool, rotulo: &str) {
        let mut botao = self.botao.lock().unwrap_or_else(|e| e.into_inner());
        botao.desabilitado = desabilitado;
        botao.rotulo = rotulo.to_string();
    }
}

impl FormInputSource for FormularioMemoria {
    fn valor(&self, campo: Campo) -> String {
        self.valores
            .lock()
            .ok()
            .and_then(|v| v.get(&campo).cloned())
            .unwrap_or_default()
    }

    fn marcado(&self, campo: Campo) -> bool {
        self.marcados
            .lock()
            .ok()
            .and_then(|m| m.get(&campo).copied())
            .unwrap_or(false)
    }
}

impl ControleEnvio for FormularioMemoria {
    fn desabilitar(&self, rotulo: &str) {
        self.definir_botao(true, rotulo);
    }

    fn habilitar(&self, rotulo: &str) {
        self.definir_botao(false, rotulo);
    }
}

// src/models/registro.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

// --- ENUMS ---

// PF = pessoa física (CPF), PJ = pessoa jurídica (CNPJ)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoConta {
    Pf,
    Pj,
}

impl TipoConta {
    /// Normaliza o valor do controle `userType` ("pf", "PJ", " pj "...).
    /// Qualquer coisa diferente de "pj" é tratada como pessoa física.
    pub fn normalizar(valor: &str) -> Self {
        if valor.trim().eq_ignore_ascii_case("pj") {
            TipoConta::Pj
        } else {
            TipoConta::Pf
        }
    }
}

// O documento já carrega o tipo da conta: não existe payload com CPF e CNPJ
// ao mesmo tempo, nem PJ sem CNPJ.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "tipo")]
pub enum Documento {
    #[serde(rename = "PF")]
    Pf { cpf: String },
    #[serde(rename = "PJ")]
    Pj { cnpj: String },
}

impl Documento {
    pub fn tipo(&self) -> TipoConta {
        match self {
            Documento::Pf { .. } => TipoConta::Pf,
            Documento::Pj { .. } => TipoConta::Pj,
        }
    }
}

impl fmt::Debug for Documento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Documento::Pf { cpf } => f.debug_struct("Pf").field("cpf", cpf).finish(),
            Documento::Pj { cnpj } => f.debug_struct("Pj").field("cnpj", cnpj).finish(),
        }
    }
}

// Dados enviados para POST /api/usuario/registrar
// As mensagens de cada regra ficam em `services::validacao`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistroPayload {
    #[validate(length(min = 3))]
    pub nome: String,

    #[validate(regex(path = *crate::services::validacao::EMAIL_REGEX))]
    pub email: String,

    // Telefone já chega só com dígitos
    #[validate(length(min = 11))]
    pub telefone: String,

    #[validate(length(min = 6), must_match(other = "confirmacao_senha"))]
    pub senha: String,
    pub confirmacao_senha: String,

    #[validate(custom(function = "crate::services::validacao::validar_termos"))]
    pub aceitou_termos: bool,

    // Vira "tipo" + "cpf"/"cnpj" no JSON
    #[serde(flatten)]
    #[validate(custom(function = "crate::services::validacao::validar_documento"))]
    pub documento: Documento,
}

impl RegistroPayload {
    pub fn tipo(&self) -> TipoConta {
        self.documento.tipo()
    }

    pub fn is_empresa(&self) -> bool {
        self.tipo() == TipoConta::Pj
    }
}

// As senhas nunca aparecem nos logs.
impl fmt::Debug for RegistroPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistroPayload")
            .field("nome", &self.nome)
            .field("email", &self.email)
            .field("telefone", &self.telefone)
            .field("senha", &"***")
            .field("confirmacao_senha", &"***")
            .field("aceitou_termos", &self.aceitou_termos)
            .field("documento", &self.documento)
            .finish()
    }
}

// O backend devolve o id como número, mas aceitamos texto também.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UsuarioId {
    Numero(i64),
    Texto(String),
}

// Campos usados para montar a sessão de uma conta PJ
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RegistroResponse {
    pub token: String,
    pub id: UsuarioId,
    pub email: String,
    pub nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(documento: Documento) -> RegistroPayload {
        RegistroPayload {
            nome: "Maria Silva".into(),
            email: "maria@x.com".into(),
            telefone: "11988887777".into(),
            senha: "abcdef".into(),
            confirmacao_senha: "abcdef".into(),
            aceitou_termos: true,
            documento,
        }
    }

    #[test]
    fn serializa_pf_com_nomes_do_backend() {
        let valor = serde_json::to_value(payload(Documento::Pf {
            cpf: "12345678901".into(),
        }))
        .unwrap();

        assert_eq!(
            valor,
            json!({
                "nome": "Maria Silva",
                "email": "maria@x.com",
                "telefone": "11988887777",
                "senha": "abcdef",
                "confirmacaoSenha": "abcdef",
                "aceitouTermos": true,
                "tipo": "PF",
                "cpf": "12345678901"
            })
        );
    }

    #[test]
    fn serializa_pj_sem_campo_cpf() {
        let valor = serde_json::to_value(payload(Documento::Pj {
            cnpj: "12345678000199".into(),
        }))
        .unwrap();

        assert_eq!(valor["tipo"], "PJ");
        assert_eq!(valor["cnpj"], "12345678000199");
        assert!(valor.get("cpf").is_none());
    }

    #[test]
    fn debug_nao_mostra_senha() {
        let texto = format!("{:?}", payload(Documento::Pf { cpf: "1".into() }));
        assert!(!texto.contains("abcdef"));
        assert!(texto.contains("Maria Silva"));
    }

    #[test]
    fn normaliza_tipo_conta() {
        assert_eq!(TipoConta::normalizar("pj"), TipoConta::Pj);
        assert_eq!(TipoConta::normalizar(" PJ "), TipoConta::Pj);
        assert_eq!(TipoConta::normalizar("pf"), TipoConta::Pf);
        assert_eq!(TipoConta::normalizar(""), TipoConta::Pf);
    }

    #[test]
    fn response_aceita_id_numerico_ou_texto() {
        let r: RegistroResponse = serde_json::from_value(
            json!({"token":"t1","id":5,"email":"e@x.com","nome":"Biz"}),
        )
        .unwrap();
        assert_eq!(r.id, UsuarioId::Numero(5));

        let r: RegistroResponse = serde_json::from_value(
            json!({"token":"t1","id":"abc","email":"e@x.com","nome":"Biz"}),
        )
        .unwrap();
        assert_eq!(r.id, UsuarioId::Texto("abc".into()));
    }
}

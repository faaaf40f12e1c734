// src/models/sessao.rs

use serde::{Deserialize, Serialize};

use crate::models::registro::{RegistroResponse, UsuarioId};

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

// O que fica salvo em `userInfo`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: UsuarioId,
    pub email: String,
    pub nome: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }
}

// Sessão persistida no armazenamento local do cliente.
// Sem expiração: só o logout (fora daqui) remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sessao {
    pub auth_token: String,
    pub user_info: UserInfo,
}

impl Sessao {
    /// Sessão de uma conta PJ recém-cadastrada: sempre administradora.
    pub fn de_empresa(resposta: RegistroResponse) -> Self {
        Self {
            auth_token: resposta.token,
            user_info: UserInfo {
                id: resposta.id,
                email: resposta.email,
                nome: resposta.nome,
                roles: vec![ROLE_ADMIN.to_string()],
            },
        }
    }
}

// src/services/validacao.rs

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};
use validator::{Validate, ValidationError};

use crate::models::registro::{Documento, RegistroPayload};

pub const ERRO_NOME: &str = "• Nome deve ter pelo menos 3 caracteres";
pub const ERRO_EMAIL: &str = "• Email inválido";
pub const ERRO_TELEFONE: &str = "• Telefone inválido";
pub const ERRO_SENHA: &str = "• Senha deve ter pelo menos 6 caracteres";
pub const ERRO_SENHAS_DIFERENTES: &str = "• As senhas não coincidem";
pub const ERRO_TERMOS: &str = "• Você deve aceitar os termos de serviço";
pub const ERRO_CPF: &str = "• CPF inválido";
pub const ERRO_CNPJ: &str = "• CNPJ inválido";

const TAMANHO_CPF: usize = 11;
const TAMANHO_CNPJ: usize = 14;

// algo@algo.algo, sem espaços nem @ extras
pub(crate) static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("regex de e-mail inválida")
});

// (campo, código do validator, mensagem), na ordem em que aparecem para o usuário
const REGRAS: [(&str, &str, &str); 8] = [
    ("nome", "length", ERRO_NOME),
    ("email", "regex", ERRO_EMAIL),
    ("telefone", "length", ERRO_TELEFONE),
    ("senha", "length", ERRO_SENHA),
    ("senha", "must_match", ERRO_SENHAS_DIFERENTES),
    ("aceitou_termos", "termos", ERRO_TERMOS),
    ("documento", "cpf", ERRO_CPF),
    ("documento", "cnpj", ERRO_CNPJ),
];

fn erro(codigo: &'static str, mensagem: &'static str) -> ValidationError {
    ValidationError::new(codigo).with_message(Cow::Borrowed(mensagem))
}

pub(crate) fn validar_termos(aceitou: &bool) -> Result<(), ValidationError> {
    if *aceitou {
        Ok(())
    } else {
        Err(erro("termos", ERRO_TERMOS))
    }
}

// Só o tamanho, sem dígito verificador
pub(crate) fn validar_documento(documento: &Documento) -> Result<(), ValidationError> {
    match documento {
        Documento::Pf { cpf } if cpf.chars().count() != TAMANHO_CPF => Err(erro("cpf", ERRO_CPF)),
        Documento::Pj { cnpj } if cnpj.chars().count() != TAMANHO_CNPJ => {
            Err(erro("cnpj", ERRO_CNPJ))
        }
        _ => Ok(()),
    }
}

/// Aplica todas as regras e devolve as mensagens de erro, na ordem das regras.
/// Lista vazia = formulário válido.
pub fn validar(payload: &RegistroPayload) -> Vec<String> {
    let Err(erros) = payload.validate() else {
        return Vec::new();
    };
    let por_campo = erros.field_errors();

    REGRAS
        .iter()
        .filter(|(campo, codigo, _)| {
            por_campo
                .get(*campo)
                .is_some_and(|lista| lista.iter().any(|e| e.code == *codigo))
        })
        .map(|(_, _, mensagem)| mensagem.to_string())
        .collect()
}

pub mod registro;
pub mod sessao;

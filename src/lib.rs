//src/lib.rs

// Cliente do cadastro do Recorder (formulário -> validação -> API -> resposta)
// e o serviço de keep-alive do backend hospedado.
pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod services;
pub mod ui;

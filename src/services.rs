pub mod keep_alive;
pub use keep_alive::{Agendador, KeepAlive, TokioAgendador};
pub mod registro_service;
pub use registro_service::RegistroService;
pub mod resposta;
pub use resposta::RespostaService;
pub mod validacao;

pub mod kv_store;
pub use kv_store::{ArquivoStore, KeyValueStore, MemoriaStore};
pub mod sessao_repo;
pub use sessao_repo::SessaoRepository;

pub mod pagina;
pub mod registro;
pub use registro::RegistroHandler;

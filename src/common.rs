pub mod diagnostico;
pub mod error;

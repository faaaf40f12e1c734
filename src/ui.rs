pub mod formulario;
pub use formulario::{Campo, ControleEnvio, FormInputSource, FormularioMemoria};
pub mod mensagens;
pub use mensagens::{MessagePresenter, MessageSurface, PaginaMemoria, TipoMensagem};
pub mod navegacao;
pub use navegacao::{Navegador, NavegadorMemoria};

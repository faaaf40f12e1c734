//src/main.rs

use frontend::{
    config::AppConfig,
    services::{KeepAlive, TokioAgendador},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG sobrescreve o nível padrão)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, o serviço não deve iniciar.
    let config = AppConfig::from_env()?;
    let keep_alive = KeepAlive::new(&config)?;

    let tarefa = keep_alive.agendar(&TokioAgendador, config.keep_alive_intervalo());
    tracing::info!(
        "🚀 Serviço keep-alive iniciado... ({} a cada {}s)",
        keep_alive.url(),
        config.keep_alive_intervalo_secs
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("👋 Encerrando o keep-alive");
    tarefa.abort();

    Ok(())
}

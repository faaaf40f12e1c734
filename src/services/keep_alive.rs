// src/services/keep_alive.rs

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{
    common::error::AppError,
    config::{AppConfig, ROTA_HEALTH},
};

pub type TickFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
pub type Acao = Arc<dyn Fn() -> TickFuture + Send + Sync>;

/// Gatilho recorrente: executa `acao` a cada `intervalo`.
pub trait Agendador: Send + Sync {
    fn a_cada(&self, intervalo: Duration, acao: Acao) -> JoinHandle<()>;
}

// O primeiro disparo acontece um intervalo depois do início, como no cron.
// Cada disparo roda numa task própria, sem esperar o anterior terminar.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioAgendador;

impl Agendador for TokioAgendador {
    fn a_cada(&self, intervalo: Duration, acao: Acao) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + intervalo, intervalo);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tokio::spawn(acao());
            }
        })
    }
}

// Ping no health-check para o host não hibernar o backend.
// Sem retry e sem estado entre um disparo e outro.
#[derive(Clone, Debug)]
pub struct KeepAlive {
    http: Client,
    url: String,
}

impl KeepAlive {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(format!("recorder-keep-alive/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: config.endpoint(ROTA_HEALTH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Um GET no health-check. Qualquer resposta HTTP conta: o objetivo é
    /// só acordar o servidor.
    pub async fn ping(&self) -> Result<StatusCode, AppError> {
        let resposta = self.http.get(&self.url).send().await?;
        Ok(resposta.status())
    }

    /// A ação de cada disparo: faz o ping e registra o resultado no log.
    pub async fn executar_tick(&self) -> Result<DateTime<Utc>, AppError> {
        match self.ping().await {
            Ok(status) => {
                let agora = Utc::now();
                tracing::info!(%status, "💓 Keep-alive executado: {}", agora.to_rfc3339());
                Ok(agora)
            }
            Err(e) => {
                tracing::error!("🔥 Erro no keep-alive: {}", e);
                Err(e)
            }
        }
    }

    pub fn agendar(&self, agendador: &dyn Agendador, intervalo: Duration) -> JoinHandle<()> {
        let keep_alive = self.clone();
        let acao: Acao = Arc::new(move || -> TickFuture {
            let keep_alive = keep_alive.clone();
            Box::pin(async move {
                // O erro já foi logado
                let _ = keep_alive.executar_tick().await;
            })
        });
        agendador.a_cada(intervalo, acao)
    }
}

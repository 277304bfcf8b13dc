//! Shared fixtures for gate integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use edge_gate::config::GateConfig;
use edge_gate::module::{ModuleConfig, ModuleContract};
use edge_gate::modules::access_control::{
    AllowListRecord, AllowListStore, GateHandler, SecretStore, StoreError, StoreResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// How a fake store answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Answer from the given entries.
    Serve(Vec<String>),
    /// Fail immediately.
    Fail,
    /// Never answer.
    Hang,
}

/// Allow-list store that records every key it is asked for.
pub struct RecordingAllowList {
    behavior: Behavior,
    pub lookups: Mutex<Vec<String>>,
}

impl RecordingAllowList {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            lookups: Mutex::new(Vec::new()),
        })
    }

    pub fn serving(keys: &[&str]) -> Arc<Self> {
        Self::new(Behavior::Serve(keys.iter().map(|k| k.to_string()).collect()))
    }

    pub fn calls(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl AllowListStore for RecordingAllowList {
    async fn get(&self, _table: &str, key: &str) -> StoreResult<Option<AllowListRecord>> {
        self.lookups.lock().unwrap().push(key.to_string());
        match &self.behavior {
            Behavior::Serve(keys) => Ok(keys
                .iter()
                .any(|k| k == key)
                .then(|| AllowListRecord::new(key))),
            Behavior::Fail => Err(StoreError::Unavailable("connection refused".to_string())),
            Behavior::Hang => std::future::pending().await,
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Secret store that counts fetches.
pub struct CountingSecret {
    behavior: Behavior,
    pub fetches: AtomicUsize,
}

impl CountingSecret {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn holding(secret: &str) -> Arc<Self> {
        Self::new(Behavior::Serve(vec![secret.to_string()]))
    }

    pub fn calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for CountingSecret {
    async fn get_parameter(&self, name: &str, _decrypt: bool) -> StoreResult<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Serve(values) => values
                .first()
                .cloned()
                .ok_or_else(|| StoreError::NotFound(name.to_string())),
            Behavior::Fail => Err(StoreError::PermissionDenied(name.to_string())),
            Behavior::Hang => std::future::pending().await,
        }
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Start a gate over the given stores.
pub fn start_gate(
    config: GateConfig,
    allow_list: Arc<dyn AllowListStore>,
    secret: Arc<dyn SecretStore>,
) -> GateHandler {
    let mut gate = GateHandler::with_config(config).with_stores(allow_list, secret);
    gate.init(ModuleConfig::new()).unwrap();
    gate.start().unwrap();
    gate
}

/// Layer counting events at ERROR level.
#[derive(Clone, Default)]
pub struct ErrorCounter {
    count: Arc<AtomicUsize>,
}

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Install as the thread's default subscriber until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Captures formatted log output of every level.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Install as the thread's default subscriber until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(self.clone())
            .with_ansi(false);
        tracing::subscriber::set_default(tracing_subscriber::registry().with(layer))
    }
}

pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl std::io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

use tokio::sync::watch;

use crate::config::{
    DctConfig,
    EngineConfig,
    GlobalConfig,
};
use crate::error::{
    StepError,
    StepResult,
};

/// Everything a step needs from the surrounding build: resolved
/// configuration plus the cancellation signal for polling loops.
pub struct StepContext {
    config: GlobalConfig,
    cancel: watch::Receiver<bool>,
    // Keeps the channel open when no external cancel source exists, so
    // the receiver never reports a closed channel as cancellation.
    _cancel_tx: Option<watch::Sender<bool>>,
}

impl StepContext {
    /// Context with a cancellation channel that never fires.
    pub fn new(config: GlobalConfig) -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            config,
            cancel: rx,
            _cancel_tx: Some(tx),
        }
    }

    pub fn with_cancel(config: GlobalConfig, cancel: watch::Receiver<bool>) -> Self {
        Self {
            config,
            cancel,
            _cancel_tx: None,
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn engine(&self, name: &str) -> StepResult<&EngineConfig> {
        self.config
            .engine(name)
            .ok_or_else(|| StepError::InvalidConfig(format!("Unknown engine: {name}")))
    }

    pub fn dct(&self) -> StepResult<&DctConfig> {
        self.config
            .dct
            .as_ref()
            .ok_or_else(|| StepError::InvalidConfig("DCT configuration missing".to_string()))
    }

    pub fn cancel(&self) -> watch::Receiver<bool> {
        self.cancel.clone()
    }
}

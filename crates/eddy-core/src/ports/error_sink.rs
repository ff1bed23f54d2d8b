//! ErrorSink port - 失敗した attempt の報告先
//!
//! 失敗は attempt 単位で完結します。レコードは変更されず、リトライも
//! 行われません。ここに 1 回報告されるだけです。

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{PropName, ResolveError};

/// ErrorSink は失敗した attempt ごとにちょうど 1 回呼ばれる
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn on_error(&self, name: &PropName, error: &ResolveError);
}

/// StderrErrorSink は stderr に書くだけ（デフォルト）
pub struct StderrErrorSink;

#[async_trait]
impl ErrorSink for StderrErrorSink {
    async fn on_error(&self, name: &PropName, error: &ResolveError) {
        eprintln!("[eddy] resolve failed: name={name} error={error}");
    }
}

/// NoopErrorSink は何もしない
pub struct NoopErrorSink;

#[async_trait]
impl ErrorSink for NoopErrorSink {
    async fn on_error(&self, _name: &PropName, _error: &ResolveError) {}
}

/// ChannelErrorSink は失敗を mpsc チャネルへ流す（テスト・監視用）
pub struct ChannelErrorSink {
    tx: mpsc::UnboundedSender<(PropName, String)>,
}

impl ChannelErrorSink {
    pub fn new(tx: mpsc::UnboundedSender<(PropName, String)>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ErrorSink for ChannelErrorSink {
    async fn on_error(&self, name: &PropName, error: &ResolveError) {
        // ignore send error: receivers may already be dropped
        let _ = self.tx.send((name.clone(), error.to_string()));
    }
}

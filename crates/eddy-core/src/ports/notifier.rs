//! Notifier port - 受理された完了の通知

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::PropName;

/// Notifier は受理された非同期完了ごとに呼ばれる
///
/// # 契約
/// - panic しないこと
/// - 通知から `update` を呼び返すのは安全（store のロックは通知前に解放済み。
///   再入した update はただの直列化された update として扱われる）
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn on_resolved(&self, name: &PropName, value: &serde_json::Value);
}

/// NoopNotifier は何もしない（デフォルト）
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn on_resolved(&self, _name: &PropName, _value: &serde_json::Value) {}
}

/// ChannelNotifier は完了を mpsc チャネルへ流す
///
/// テストや、通知を自前のループで消費したいホスト向け。
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<(PropName, serde_json::Value)>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<(PropName, serde_json::Value)>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn on_resolved(&self, name: &PropName, value: &serde_json::Value) {
        // ignore send error: receivers may already be dropped
        let _ = self.tx.send((name.clone(), value.clone()));
    }
}

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

use eddy_core::app::ResolverBuilder;
use eddy_core::domain::{PropInput, PropName, ResolveError};
use eddy_core::ports::{ChannelNotifier, Fetcher};

#[derive(Debug, Deserialize)]
struct FetchedPayload {
    source: String,
    delay_ms: u64,
}

/// Fetcher が返す速度を URL で制御するデモ実装。
/// "slow" を含む URL はゆっくり settle する（out-of-order 完了の再現用）。
struct DemoFetcher;

#[async_trait]
impl Fetcher for DemoFetcher {
    async fn fetch(&self, identifier: &str) -> Result<serde_json::Value, ResolveError> {
        let delay_ms = if identifier.contains("slow") { 300 } else { 50 };
        sleep(Duration::from_millis(delay_ms)).await;
        Ok(serde_json::json!({ "source": identifier, "delay_ms": delay_ms }))
    }
}

#[tokio::main]
async fn main() {
    // (A) Resolver を組み立てる（fetcher は必須、通知はチャネルで受ける）
    let (tx, mut rx) = mpsc::unbounded_channel();
    let resolver = ResolverBuilder::new()
        .track("data")
        .fetcher(DemoFetcher)
        .notifier(ChannelNotifier::new(tx))
        .build()
        .expect("fetcher is registered");

    let data = PropName::new("data");

    // (B) 遅い URL を先に、速い URL を後に投入（version 1 と version 2）
    resolver
        .update(
            data.clone(),
            PropInput::Identifier("http://example/slow.json".into()),
        )
        .await;
    resolver
        .update(
            data.clone(),
            PropInput::Identifier("http://example/fast.json".into()),
        )
        .await;
    println!("loading={}", resolver.is_loading(&data).await);

    // (C) 先に完了するのは version 2（速い方）。
    let (name, value) = rx.recv().await.expect("first accepted completion");
    let payload: FetchedPayload =
        serde_json::from_value(value).expect("demo payload shape");
    println!(
        "resolved: name={name} source={} delay_ms={}",
        payload.source, payload.delay_ms
    );

    // version 1 は後から完了しても捨てられる（1 < 2）
    sleep(Duration::from_millis(400)).await;
    println!(
        "after slow completion: value={:?}",
        resolver.resolved_value(&data).await
    );
    println!("loading={}", resolver.is_loading(&data).await);

    // (D) Immediate は同期で勝つ（飛行中の attempt があっても）
    resolver
        .update(
            data.clone(),
            PropInput::Immediate(serde_json::json!({ "inline": true })),
        )
        .await;
    println!(
        "immediate: value={:?}",
        resolver.resolved_value(&data).await
    );

    // (E) 観測用カウント
    println!("counts: {:?}", resolver.counts().await);
    for status in resolver.statuses().await {
        println!(
            "status: name={} pending={} resolved={} loading={}",
            status.name, status.pending_count, status.resolved_count, status.loading
        );
    }
}

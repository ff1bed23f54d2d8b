//! Fetcher port - 識別子から非同期値への変換
//!
//! Resolver は識別子（URL 文字列など）を自分では解決しません。
//! この trait が外部の取得手段（HTTP クライアント、ファイル読み込みなど）への
//! インターフェースです。

use async_trait::async_trait;

use crate::domain::ResolveError;

/// Fetcher は識別子を eventual な値に変換
///
/// # 契約（呼び出し側が前提にする性質）
/// - 1 回の `fetch` 呼び出しは、payload かエラーでちょうど 1 回 settle する
/// - settle しないことは許される（レコードは loading のまま）
/// - 2 回以上 settle することはこの呼び出し形では表現できない
///   （future は一度しか完了しない）
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<serde_json::Value, ResolveError>;
}

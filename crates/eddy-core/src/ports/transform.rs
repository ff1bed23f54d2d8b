//! Transform port - 受理された値の後処理

use crate::domain::PropName;

/// Transform は受理された完了の payload を後処理する
///
/// # 契約
/// - 純粋・同期・副作用なし（store のロック中に呼ばれる）
/// - 名前ごとに挙動を変えたい場合は実装側で `name` を見て分岐する
///
/// Immediate な値には適用されない（同期適用はそのまま見える値になる）。
pub trait Transform: Send + Sync {
    fn post_process(&self, name: &PropName, value: serde_json::Value) -> serde_json::Value;
}

/// IdentityTransform は何もしない（デフォルト）
pub struct IdentityTransform;

impl Transform for IdentityTransform {
    fn post_process(&self, _name: &PropName, value: serde_json::Value) -> serde_json::Value {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_value_unchanged() {
        let value = serde_json::json!({ "rows": [1, 2, 3] });
        let out = IdentityTransform.post_process(&PropName::new("data"), value.clone());
        assert_eq!(out, value);
    }
}

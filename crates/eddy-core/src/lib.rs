//! eddy-core
//!
//! Core building blocks for the eddy value-resolution engine: given named
//! inputs that may be immediate data, identifiers to fetch, or pending
//! asynchronous results, it maintains one stable resolved value per name,
//! guarded against out-of-order completions by monotonic version counters.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（name, value, record, errors）
//! - **ports**: 抽象化レイヤー（Fetcher, Notifier, ErrorSink, Transform, Clock）
//! - **store**: 名前 → レコードのマッピング（PropRecordStore）
//! - **app**: アプリケーションロジック（Resolver, ResolverBuilder, status）

pub mod domain;
pub mod ports;
pub mod store;
pub mod app;

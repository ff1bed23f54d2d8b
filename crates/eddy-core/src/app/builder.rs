//! ResolverBuilder - Resolver の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - fetcher は必須（Identifier 入力を解決する唯一の経路）
//! - build() 時に不足をチェックし、BuildError を返す
//! - それ以外のポートはデフォルト実装を持つ

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::PropName;
use crate::ports::{
    Clock, ErrorSink, Fetcher, IdentityTransform, NoopNotifier, Notifier, StderrErrorSink,
    SystemClock, Transform,
};

use super::resolver::Resolver;

/// BuildError は Resolver 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no fetcher registered. Identifier inputs cannot be resolved without one.")]
    MissingFetcher,
}

/// ResolverBuilder は Resolver を組み立てる
///
/// # 使用例
/// ```ignore
/// let resolver = ResolverBuilder::new()
///     .track("data")
///     .fetcher(HttpFetcher::new(client))
///     .build()?;
/// ```
///
/// # デフォルト
/// - notifier: NoopNotifier
/// - error_sink: StderrErrorSink
/// - transform: IdentityTransform
/// - clock: SystemClock
pub struct ResolverBuilder {
    fetcher: Option<Arc<dyn Fetcher>>,
    notifier: Arc<dyn Notifier>,
    error_sink: Arc<dyn ErrorSink>,
    transform: Arc<dyn Transform>,
    clock: Arc<dyn Clock>,
    tracked: HashSet<PropName>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            notifier: Arc::new(NoopNotifier),
            error_sink: Arc::new(StderrErrorSink),
            transform: Arc::new(IdentityTransform),
            clock: Arc::new(SystemClock),
            tracked: HashSet::new(),
        }
    }

    /// Register a name as async-capable (visible to `update_all`).
    pub fn track(mut self, name: impl Into<PropName>) -> Self {
        self.tracked.insert(name.into());
        self
    }

    /// Register the fetch capability (required).
    pub fn fetcher(self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher_arc(Arc::new(fetcher))
    }

    /// Same as `fetcher`, for callers that keep their own handle.
    pub fn fetcher_arc(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn error_sink(mut self, error_sink: impl ErrorSink + 'static) -> Self {
        self.error_sink = Arc::new(error_sink);
        self
    }

    pub fn transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Arc::new(transform);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Validate the wiring and produce a Resolver.
    pub fn build(self) -> Result<Resolver, BuildError> {
        let Some(fetcher) = self.fetcher else {
            return Err(BuildError::MissingFetcher);
        };
        Ok(Resolver::assemble(
            fetcher,
            self.notifier,
            self.error_sink,
            self.transform,
            self.clock,
            self.tracked,
        ))
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Asynchronous aggregation over update streams.
//!
//! ```rust
//! use fresponse::{ResponseUpdate, VecUpdateStream, collect};
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! let stream = VecUpdateStream::from_updates(vec![
//!     ResponseUpdate::from_text("Hello, "),
//!     ResponseUpdate::from_text("world"),
//! ]);
//!
//! let response = collect(stream).await.expect("stream should aggregate");
//! assert_eq!(response.text(), "Hello, world");
//! # });
//! ```

use std::pin::pin;

use futures_core::Stream;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::{BoundaryDetector, Response, ResponseAggregator, ResponseError, ResponseUpdate};

impl<D> ResponseAggregator<D>
where
    D: BoundaryDetector,
{
    /// Folds every update in source order, then finalizes.
    ///
    /// A source error stops consumption and is returned as-is; no partial
    /// response is produced.
    pub async fn collect<S>(mut self, stream: S) -> Result<Response, ResponseError>
    where
        S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
    {
        let mut stream = pin!(stream);
        while let Some(item) = stream.next().await {
            self.fold_item(item)?;
        }

        Ok(self.finalize())
    }

    /// Like [`ResponseAggregator::collect`], but stops with a `Cancelled`
    /// error as soon as `cancellation` fires. Cancellation is checked before
    /// each pull from the source.
    pub async fn collect_with_cancellation<S>(
        mut self,
        stream: S,
        cancellation: &CancellationToken,
    ) -> Result<Response, ResponseError>
    where
        S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
    {
        let mut stream = pin!(stream);
        loop {
            let next = tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    self.hooks()
                        .on_cancelled(self.strategy(), self.updates_folded());
                    return Err(ResponseError::cancelled(format!(
                        "aggregation cancelled after {} updates",
                        self.updates_folded()
                    )));
                }
                next = stream.next() => next,
            };

            let Some(item) = next else {
                break;
            };
            self.fold_item(item)?;
        }

        Ok(self.finalize())
    }

    fn fold_item(
        &mut self,
        item: Result<ResponseUpdate, ResponseError>,
    ) -> Result<(), ResponseError> {
        match item {
            Ok(update) => {
                self.fold(update);
                Ok(())
            }
            Err(error) => {
                self.hooks()
                    .on_source_error(self.strategy(), self.updates_folded(), &error);
                Err(error)
            }
        }
    }
}

/// Collects a stream with identifier-keyed boundaries.
pub async fn collect<S>(stream: S) -> Result<Response, ResponseError>
where
    S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
{
    ResponseAggregator::new().collect(stream).await
}

/// Collects a stream with choice-index boundaries.
pub async fn collect_choices<S>(stream: S) -> Result<Response, ResponseError>
where
    S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
{
    ResponseAggregator::index_keyed().collect(stream).await
}

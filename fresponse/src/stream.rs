//! Update stream contracts and in-memory stream utilities.
//!
//! ```rust
//! use fresponse::{BoxedUpdateStream, ResponseUpdate, VecUpdateStream};
//!
//! let stream = VecUpdateStream::new(vec![Ok(ResponseUpdate::from_text("hello"))]);
//! let _boxed: BoxedUpdateStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::{ResponseError, ResponseUpdate};

/// Source stream contract.
///
/// Invariants for consumers:
/// - Updates are yielded in source order and folded in that order.
/// - An `Err` item is terminal for aggregation; nothing after it is read.
/// - Once the stream yields `None`, it must not yield additional items.
pub trait UpdateStream: Stream<Item = Result<ResponseUpdate, ResponseError>> + Send {}

impl<T> UpdateStream for T where T: Stream<Item = Result<ResponseUpdate, ResponseError>> + Send {}

pub type BoxedUpdateStream<'a> = Pin<Box<dyn UpdateStream + 'a>>;

#[derive(Debug, Default)]
pub struct VecUpdateStream {
    updates: VecDeque<Result<ResponseUpdate, ResponseError>>,
}

impl VecUpdateStream {
    pub fn new(updates: Vec<Result<ResponseUpdate, ResponseError>>) -> Self {
        Self {
            updates: updates.into(),
        }
    }

    /// Stream that yields every update successfully.
    pub fn from_updates(updates: Vec<ResponseUpdate>) -> Self {
        Self {
            updates: updates.into_iter().map(Ok).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.updates.len()
    }
}

impl Stream for VecUpdateStream {
    type Item = Result<ResponseUpdate, ResponseError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<ResponseUpdate, ResponseError>>> {
        Poll::Ready(self.updates.pop_front())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.updates.len(), Some(self.updates.len()))
    }
}

/// Adapts an infallible update stream into an [`UpdateStream`].
pub fn infallible<S>(source: S) -> impl UpdateStream
where
    S: Stream<Item = ResponseUpdate> + Send,
{
    async_stream::stream! {
        let mut source = std::pin::pin!(source);
        while let Some(update) = futures_util::StreamExt::next(&mut source).await {
            yield Ok(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn vec_stream_yields_in_order_then_ends() {
        let mut stream = VecUpdateStream::from_updates(vec![
            ResponseUpdate::from_text("a"),
            ResponseUpdate::from_text("b"),
        ]);
        assert_eq!(stream.size_hint(), (2, Some(2)));

        let first = stream.next().await.expect("first").expect("ok");
        let second = stream.next().await.expect("second").expect("ok");

        assert_eq!(first.text(), "a");
        assert_eq!(second.text(), "b");
        assert!(stream.next().await.is_none());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn infallible_wraps_every_update_in_ok() {
        let source = futures_util::stream::iter(vec![
            ResponseUpdate::from_text("x"),
            ResponseUpdate::from_text("y"),
        ]);
        let collected: Vec<_> = infallible(source).collect().await;

        assert_eq!(collected.len(), 2);
        assert!(collected.iter().all(Result::is_ok));
    }
}

//! Async task and stream abstractions.
//!
//! Scorers are plain synchronous functions; these handles move them onto the
//! tokio runtime and hand results back over channels.

use futures::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

/// Type alias for a pinned, sendable future that returns a Result with a Vec.
type BoxedVecFuture<T, E> = Pin<Box<dyn Future<Output = Result<Vec<T>, E>> + Send>>;

/// Type alias for a factory function that produces a `BoxedVecFuture`.
type FutureFactory<T, E> = Box<dyn FnOnce() -> BoxedVecFuture<T, E> + Send>;

// ============================================================================
// Timed - value plus the wall-clock time spent producing it
// ============================================================================

/// A value together with the time it took to compute.
///
/// The clock starts when the work actually begins running, so time spent
/// waiting for a worker thread is not included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Run `f` and record how long it took.
    pub fn measure<F>(f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let value = f();
        Self {
            value,
            elapsed: start.elapsed(),
        }
    }

    /// Elapsed time in fractional milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

// ============================================================================
// AsyncTask - Single-result async operation
// ============================================================================

/// A handle to an asynchronous task that produces a single result.
///
/// Uses oneshot channel internally for efficient one-time communication.
pub struct AsyncTask<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> AsyncTask<T>
where
    T: Send + 'static,
{
    /// Create from oneshot receiver (for advanced use).
    #[inline]
    #[must_use]
    pub fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Spawn a blocking operation on the blocking thread pool.
    #[inline]
    pub fn spawn<F>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let _ = tx.send(f());
        });
        Self::new(rx)
    }

    /// Spawn an async operation.
    #[inline]
    pub fn spawn_async<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn(async move {
            let _ = tx.send(future.await);
        });
        Self::new(rx)
    }
}

impl<T> AsyncTask<Timed<T>>
where
    T: Send + 'static,
{
    /// Spawn a blocking operation and time its execution window.
    #[inline]
    pub fn spawn_timed<F>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::spawn(move || Timed::measure(f))
    }
}

impl<T> Future for AsyncTask<T> {
    type Output = Result<T, oneshot::error::RecvError>;

    #[inline]
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx)
    }
}

// ============================================================================
// AsyncStream - Multi-result streaming operation
// ============================================================================

/// A handle to an asynchronous stream that produces multiple results.
///
/// Uses unbounded mpsc channel for true streaming without memory accumulation.
pub struct AsyncStream<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> AsyncStream<T> {
    /// Create from unbounded receiver.
    #[inline]
    #[must_use]
    pub fn new(rx: mpsc::UnboundedReceiver<T>) -> Self {
        Self { rx }
    }

    /// Create from a vector (for testing/simple cases).
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::task::spawn(async move {
            for item in items {
                if tx.send(item).is_err() {
                    break;
                }
            }
        });
        Self::new(rx)
    }
}

impl<T> Stream for AsyncStream<T> {
    type Item = T;

    #[inline]
    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

// ============================================================================
// EmitterBuilder - Batch-to-stream conversion for API results
// ============================================================================

/// Builder for converting batch API results into streams.
///
/// Paginated GitHub listings collect every page into a Vec and then stream
/// the items one at a time to the caller.
pub struct EmitterBuilder<T, E> {
    future_factory: FutureFactory<T, E>,
}

impl<T, E> EmitterBuilder<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    #[must_use]
    pub fn new(future_factory: FutureFactory<T, E>) -> Self {
        Self { future_factory }
    }

    /// Emit items from the future result through a stream.
    ///
    /// `on_error` sees the failure before it is forwarded as the last item.
    pub fn emit<G>(self, on_error: G) -> AsyncStream<Result<T, E>>
    where
        G: Fn(&E) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let future = (self.future_factory)();
            match future.await {
                Ok(items) => {
                    for item in items {
                        if tx.send(Ok(item)).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    on_error(&e);
                    let _ = tx.send(Err(e));
                }
            }
        });

        AsyncStream::new(rx)
    }
}

//! Tests for async task runtime primitives.

use futures::StreamExt;
use std::time::Duration;
use trustscore::runtime::{AsyncStream, AsyncTask, EmitterBuilder, Timed};

#[tokio::test]
async fn test_async_task_spawn() {
    let task = AsyncTask::spawn(|| 42);
    let result = task.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_async_task_spawn_async() {
    let task = AsyncTask::spawn_async(async { 42 });
    let result = task.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_spawn_timed_measures_the_work() {
    let task = AsyncTask::spawn_timed(|| {
        std::thread::sleep(Duration::from_millis(20));
        "done"
    });
    let timed = task.await.unwrap();
    assert_eq!(timed.value, "done");
    assert!(timed.elapsed >= Duration::from_millis(20));
    assert!(timed.elapsed_ms() >= 20.0);
}

#[tokio::test]
async fn test_panicking_task_reports_recv_error() {
    let task = AsyncTask::<i32>::spawn(|| panic!("scorer blew up"));
    assert!(task.await.is_err());
}

#[test]
fn test_timed_measure() {
    let timed = Timed::measure(|| 2 + 2);
    assert_eq!(timed.value, 4);
    assert!(timed.elapsed_ms() >= 0.0);
}

#[tokio::test]
async fn test_async_stream_from_vec() {
    let mut stream = AsyncStream::from_vec(vec![1, 2, 3]);

    assert_eq!(stream.next().await, Some(1));
    assert_eq!(stream.next().await, Some(2));
    assert_eq!(stream.next().await, Some(3));
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn test_emitter_streams_batch_items() {
    let stream = EmitterBuilder::<u32, String>::new(Box::new(|| {
        Box::pin(async { Ok(vec![1, 2, 3]) })
    }))
    .emit(|_| {});

    let items: Vec<_> = stream.collect().await;
    assert_eq!(items, vec![Ok(1), Ok(2), Ok(3)]);
}

#[tokio::test]
async fn test_emitter_forwards_error_last() {
    let stream = EmitterBuilder::<u32, String>::new(Box::new(|| {
        Box::pin(async { Err("rate limited".to_string()) })
    }))
    .emit(|_| {});

    let items: Vec<_> = stream.collect().await;
    assert_eq!(items, vec![Err("rate limited".to_string())]);
}

//! Frame dispatch.
//!
//! One call per captured frame; the call never blocks and never
//! returns a result to the capture loop. Frame ownership moves into
//! the analysis unit. Two policies:
//!
//! - `pool`: a fixed set of worker threads drains a bounded channel;
//!   when the channel is full the frame is dropped and counted.
//! - `task-per-frame`: one fire-and-forget tokio task per frame, the
//!   analyzer's original unbounded policy.

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::{self, TrySendError};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, trace};

use nattvakt_capture::Frame;
use nattvakt_config::{DispatchConfig, DispatchMode};
use nattvakt_telemetry::MetricsRecorder;

use crate::analysis::Analyzer;

enum Inner {
    TaskPerFrame {
        handle: Handle,
    },
    Pool {
        sender: Mutex<Option<channel::Sender<Frame>>>,
        workers: Mutex<Vec<JoinHandle<()>>>,
    },
}

/// Hands captured frames to analysis tasks.
pub struct Dispatcher {
    analyzer: Arc<Analyzer>,
    metrics: MetricsRecorder,
    inner: Inner,
}

impl Dispatcher {
    /// Builds a dispatcher for the configured mode.
    ///
    /// Must be called from within a tokio runtime; task-per-frame mode
    /// captures the runtime handle so frames arriving on the blocking
    /// capture thread can still spawn tasks.
    pub fn new(config: &DispatchConfig, analyzer: Arc<Analyzer>, metrics: MetricsRecorder) -> Self {
        let inner = match config.mode {
            DispatchMode::TaskPerFrame => Inner::TaskPerFrame {
                handle: Handle::current(),
            },
            DispatchMode::Pool => {
                let (sender, receiver) = channel::bounded::<Frame>(config.queue_capacity);
                let workers = (0..config.workers)
                    .map(|i| {
                        let receiver = receiver.clone();
                        let analyzer = Arc::clone(&analyzer);
                        std::thread::Builder::new()
                            .name(format!("analysis-{i}"))
                            .spawn(move || {
                                // Drains until the channel is closed and empty,
                                // so queued frames are still analyzed during
                                // shutdown.
                                for frame in receiver.iter() {
                                    analyzer.analyze(&frame);
                                }
                            })
                            .expect("spawning analysis worker")
                    })
                    .collect();
                Inner::Pool {
                    sender: Mutex::new(Some(sender)),
                    workers: Mutex::new(workers),
                }
            }
        };

        Self {
            analyzer,
            metrics,
            inner,
        }
    }

    /// Starts analysis of one frame and returns immediately.
    ///
    /// Ownership of the frame moves to the analysis unit; nothing is
    /// reported back. Under overload in pool mode the frame is dropped
    /// and the drop counter bumped.
    pub fn dispatch(&self, frame: Frame) {
        match &self.inner {
            Inner::TaskPerFrame { handle } => {
                let analyzer = Arc::clone(&self.analyzer);
                handle.spawn(async move {
                    analyzer.analyze(&frame);
                });
            }
            Inner::Pool { sender, .. } => {
                let guard = sender.lock();
                let Some(tx) = guard.as_ref() else {
                    // Already shut down; late frames are dropped.
                    self.metrics.frames_dropped.inc();
                    return;
                };
                match tx.try_send(frame) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        trace!("dispatch queue full, dropping frame");
                        self.metrics.frames_dropped.inc();
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        self.metrics.frames_dropped.inc();
                    }
                }
            }
        }
    }

    /// Stops accepting frames and, in pool mode, waits for the workers
    /// to drain the queue. Blocks; call from a blocking context.
    pub fn shutdown(&self) {
        if let Inner::Pool { sender, workers } = &self.inner {
            sender.lock().take();
            let handles = std::mem::take(&mut *workers.lock());
            debug!("joining {} analysis workers", handles.len());
            for handle in handles {
                let _ = handle.join();
            }
        }
        // Task-per-frame tasks are fire-and-forget; in-flight ones are
        // tolerated at process exit.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nattvakt_detection::StatStore;

    fn syn_frame(source: [u8; 4]) -> Frame {
        let mut data = Vec::new();
        data.extend_from_slice(&[0xff; 6]);
        data.extend_from_slice(&[0x02, 0, 0, 0, 0, 0x01]);
        data.extend_from_slice(&0x0800u16.to_be_bytes());

        let mut ip = vec![0u8; 20];
        ip[0] = 0x45;
        ip[8] = 64;
        ip[9] = 6;
        ip[12..16].copy_from_slice(&source);
        ip[16..20].copy_from_slice(&[10, 0, 0, 2]);
        data.extend_from_slice(&ip);

        let mut tcp = vec![0u8; 20];
        tcp[2..4].copy_from_slice(&80u16.to_be_bytes());
        tcp[12] = 0x50;
        tcp[13] = 0x02;
        data.extend_from_slice(&tcp);

        let wire_len = data.len() as u32;
        Frame::new(0, wire_len, data)
    }

    fn pool_config(workers: usize, queue_capacity: usize) -> DispatchConfig {
        DispatchConfig {
            mode: DispatchMode::Pool,
            workers,
            queue_capacity,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn pool_counts_every_dispatched_syn_once() {
        let stats = Arc::new(StatStore::new());
        let metrics = MetricsRecorder::new();
        let analyzer =
            Arc::new(Analyzer::new(Arc::clone(&stats), metrics.clone(), false).unwrap());
        let dispatcher = Dispatcher::new(&pool_config(4, 1024), analyzer, metrics);

        let total = 500u64;
        for _ in 0..total {
            dispatcher.dispatch(syn_frame([172, 16, 0, 9]));
        }
        tokio::task::block_in_place(|| dispatcher.shutdown());

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.syn_total, total);
        assert_eq!(snapshot.distinct_syn_sources, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_dispatch_from_many_producers() {
        let stats = Arc::new(StatStore::new());
        let metrics = MetricsRecorder::new();
        let analyzer =
            Arc::new(Analyzer::new(Arc::clone(&stats), metrics.clone(), false).unwrap());
        let dispatcher =
            Arc::new(Dispatcher::new(&pool_config(4, 4096), analyzer, metrics));

        let producers = 8;
        let per_producer = 100u64;
        let handles: Vec<_> = (0..producers)
            .map(|_| {
                let dispatcher = Arc::clone(&dispatcher);
                std::thread::spawn(move || {
                    for _ in 0..per_producer {
                        dispatcher.dispatch(syn_frame([10, 1, 2, 3]));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        tokio::task::block_in_place(|| dispatcher.shutdown());

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.syn_total, producers * per_producer);
        assert_eq!(snapshot.distinct_syn_sources, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn full_queue_drops_are_counted() {
        let stats = Arc::new(StatStore::new());
        let metrics = MetricsRecorder::new();
        let analyzer =
            Arc::new(Analyzer::new(Arc::clone(&stats), metrics.clone(), false).unwrap());

        // One worker and a tiny queue; flood it and some frames must be
        // dropped while every accepted frame is still counted exactly once.
        let dispatcher = Dispatcher::new(&pool_config(1, 16), analyzer, metrics.clone());
        let total = 5_000u64;
        for _ in 0..total {
            dispatcher.dispatch(syn_frame([10, 0, 0, 1]));
        }
        tokio::task::block_in_place(|| dispatcher.shutdown());

        let dropped = metrics.frames_dropped.get() as u64;
        assert_eq!(stats.snapshot().syn_total + dropped, total);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn task_per_frame_mode_analyzes_each_frame() {
        let stats = Arc::new(StatStore::new());
        let metrics = MetricsRecorder::new();
        let analyzer =
            Arc::new(Analyzer::new(Arc::clone(&stats), metrics.clone(), false).unwrap());
        let config = DispatchConfig {
            mode: DispatchMode::TaskPerFrame,
            ..DispatchConfig::default()
        };
        let dispatcher = Dispatcher::new(&config, analyzer, metrics);

        for _ in 0..50 {
            dispatcher.dispatch(syn_frame([192, 0, 2, 1]));
        }
        // Fire-and-forget tasks; poll until they have all landed.
        for _ in 0..100 {
            if stats.snapshot().syn_total == 50 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(stats.snapshot().syn_total, 50);
    }
}

// src/provider.rs

use crate::decoder::{SampleSource, SymphoniaSource};
use crate::error::{Result, WaveError};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    mpsc::{channel, Receiver, Sender},
    Arc,
};
use std::thread;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderState {
    Idle,
    Processing,
    Completed,
    Failed,
}

/// Result of the latest decode request, as seen by the presentation thread.
#[derive(Debug, PartialEq)]
pub enum SampleEvent<'a> {
    Ready(&'a [f32]),
    Failed(WaveError),
}

/// Receives decode results; passed in at delivery time, never stored.
pub trait SampleListener {
    fn samples_ready(&mut self, samples: &[f32]);
    fn status_updated(&mut self, error: &WaveError);
}

struct Completion {
    generation: u64,
    outcome: Result<Vec<f32>>,
}

/// Runs a [`SampleSource`] on a worker thread and hands the result back to
/// whichever thread polls it.
///
/// Every request gets a new generation id. Only the completion carrying the
/// latest id is ever applied; older ones are dropped, so relaunching never
/// has to interrupt a running decode.
pub struct SampleProvider {
    source: Arc<dyn SampleSource>,
    latest: Arc<AtomicU64>,
    state: ProviderState,
    samples: Option<Vec<f32>>,
    last_error: Option<WaveError>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl SampleProvider {
    pub fn new<S: SampleSource>(source: S) -> Self {
        let (tx, rx) = channel();
        Self {
            source: Arc::new(source),
            latest: Arc::new(AtomicU64::new(0)),
            state: ProviderState::Idle,
            samples: None,
            last_error: None,
            tx,
            rx,
        }
    }

    /// Provider backed by symphonia for the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(SymphoniaSource::open(path)?))
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    /// Id of the most recent request (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Samples from the last successful decode.
    pub fn samples(&self) -> Option<&[f32]> {
        self.samples.as_deref()
    }

    /// Starts a decode on a background thread and returns its generation id.
    /// A request issued while another is running supersedes it.
    pub fn request_samples(&mut self) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if self.state == ProviderState::Processing {
            log::debug!("request {generation} supersedes request {}", generation - 1);
        }
        self.state = ProviderState::Processing;

        let source = Arc::clone(&self.source);
        let latest = Arc::clone(&self.latest);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| source.read_samples()))
                .unwrap_or_else(|_| Err(WaveError::AudioProcessing("sample source panicked".into())));

            if latest.load(Ordering::SeqCst) != generation {
                log::debug!("request {generation} finished after being superseded");
                return;
            }
            // The provider may be gone already; nobody is left to notify.
            let _ = tx.send(Completion { generation, outcome });
        });

        generation
    }

    /// Non-blocking: applies a pending completion for the latest request,
    /// if there is one.
    pub fn poll(&mut self) -> Option<SampleEvent<'_>> {
        let mut applied = false;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply(completion) {
                applied = true;
                break;
            }
        }
        if applied { self.event() } else { None }
    }

    /// Blocks until the latest request completes. Returns the stored result
    /// right away when nothing is in flight, or `None` when idle.
    pub fn wait(&mut self) -> Option<SampleEvent<'_>> {
        while self.state == ProviderState::Processing {
            match self.rx.recv() {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(_) => break,
            }
        }
        self.event()
    }

    /// Polls and forwards the result to `listener`. Returns whether anything
    /// was delivered.
    pub fn deliver<L: SampleListener + ?Sized>(&mut self, listener: &mut L) -> bool {
        match self.poll() {
            Some(SampleEvent::Ready(samples)) => {
                listener.samples_ready(samples);
                true
            }
            Some(SampleEvent::Failed(err)) => {
                listener.status_updated(&err);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation() {
            log::warn!(
                "discarding stale completion {} (latest is {})",
                completion.generation,
                self.generation()
            );
            return false;
        }
        match completion.outcome {
            Ok(samples) => {
                log::info!("request {} completed with {} samples", completion.generation, samples.len());
                self.samples = Some(samples);
                self.last_error = None;
                self.state = ProviderState::Completed;
            }
            Err(err) => {
                log::info!("request {} failed: {err}", completion.generation);
                self.last_error = Some(err);
                self.state = ProviderState::Failed;
            }
        }
        true
    }

    fn event(&self) -> Option<SampleEvent<'_>> {
        match self.state {
            ProviderState::Completed => self.samples.as_deref().map(SampleEvent::Ready),
            ProviderState::Failed => self.last_error.clone().map(SampleEvent::Failed),
            ProviderState::Idle | ProviderState::Processing => None,
        }
    }
}

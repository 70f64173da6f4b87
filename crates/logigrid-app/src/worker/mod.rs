//! Background puzzle generation.
//!
//! Generators can take seconds to answer, so requests run on a dedicated
//! thread and the main loop polls a [`WorkHandle`] for the response. Each
//! request carries the session [`Generation`] it was made for; the session
//! rejects responses for earlier games.

use std::{fmt, sync::mpsc, thread};

use logigrid_game::Generation;
use logigrid_generator::{LoadedPuzzle, PuzzleProvider, PuzzleRequest};

mod tasks;

/// A request that can be offloaded to the worker.
#[derive(Debug, Clone)]
pub enum WorkRequest {
    /// Produce a puzzle for a new game.
    GeneratePuzzle {
        generation: Generation,
        request: PuzzleRequest,
    },
}

/// A response produced by the worker.
#[derive(Debug, Clone)]
pub enum WorkResponse {
    /// Puzzle content ready for the game that asked for it.
    PuzzleReady {
        generation: Generation,
        loaded: LoadedPuzzle,
    },
}

/// Errors that can occur while scheduling or receiving background work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum WorkError {
    /// The worker thread is gone.
    #[display("worker disconnected")]
    WorkerDisconnected,
}

impl WorkRequest {
    fn handle(self, provider: &dyn PuzzleProvider) -> WorkResponse {
        match self {
            WorkRequest::GeneratePuzzle {
                generation,
                request,
            } => WorkResponse::PuzzleReady {
                generation,
                loaded: tasks::generate_puzzle(provider, &request),
            },
        }
    }
}

struct WorkRequestEnvelope {
    request: WorkRequest,
    response_tx: mpsc::Sender<WorkResponse>,
}

/// A handle for polling background work completion.
pub struct WorkHandle {
    receiver: mpsc::Receiver<WorkResponse>,
}

impl fmt::Debug for WorkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkHandle").finish_non_exhaustive()
    }
}

impl WorkHandle {
    /// Attempts to poll for a completed response.
    pub fn poll(&mut self) -> Result<Option<WorkResponse>, WorkError> {
        use mpsc::TryRecvError;

        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkError::WorkerDisconnected),
        }
    }
}

/// The worker thread and its request channel.
pub struct Worker {
    sender: mpsc::Sender<WorkRequestEnvelope>,
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker").finish_non_exhaustive()
    }
}

impl Worker {
    /// Starts a worker thread that serves requests with `provider`.
    ///
    /// The thread exits once the worker is dropped.
    pub fn spawn(provider: Box<dyn PuzzleProvider + Send>) -> Self {
        let (sender, receiver) = mpsc::channel::<WorkRequestEnvelope>();
        thread::spawn(move || {
            while let Ok(envelope) = receiver.recv() {
                let response = envelope.request.handle(provider.as_ref());
                // The requester may have moved on to another game.
                let _ = envelope.response_tx.send(response);
            }
            log::debug!("worker thread finished");
        });
        Self { sender }
    }

    /// Enqueues a request and returns a handle for polling completion.
    pub fn enqueue(&self, request: WorkRequest) -> Result<WorkHandle, WorkError> {
        let (response_tx, response_rx) = mpsc::channel();
        self.sender
            .send(WorkRequestEnvelope {
                request,
                response_tx,
            })
            .map_err(|_| WorkError::WorkerDisconnected)?;
        Ok(WorkHandle {
            receiver: response_rx,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use logigrid_generator::{FallbackProvider, FileProvider, PuzzleOrigin};

    use super::*;

    fn wait(handle: &mut WorkHandle) -> WorkResponse {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(response) = handle.poll().unwrap() {
                return response;
            }
            assert!(Instant::now() < deadline, "worker did not answer");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn generate(worker: &Worker, generation: Generation) -> (Generation, LoadedPuzzle) {
        let request = WorkRequest::GeneratePuzzle {
            generation,
            request: PuzzleRequest::default(),
        };
        let mut handle = worker.enqueue(request).unwrap();
        match wait(&mut handle) {
            WorkResponse::PuzzleReady { generation, loaded } => (generation, loaded),
        }
    }

    #[test]
    fn test_round_trip_keeps_generation() {
        let worker = Worker::spawn(Box::new(FallbackProvider));
        let generation = Generation::default();
        let (answered, loaded) = generate(&worker, generation);
        assert_eq!(answered, generation);
        assert_eq!(loaded.origin, PuzzleOrigin::Generated);
    }

    #[test]
    fn test_failing_provider_yields_fallback() {
        let worker = Worker::spawn(Box::new(FileProvider::new("/nonexistent/logigrid.json")));
        let (_, loaded) = generate(&worker, Generation::default());
        assert_eq!(loaded.origin, PuzzleOrigin::Fallback);
    }
}

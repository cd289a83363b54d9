/**
 * Background Requests
 *
 * The UI thread never waits on the network. Each request runs on its own
 * worker thread with a current-thread tokio runtime and reports back over a
 * channel that the owning view polls once per frame.
 */

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use crate::egui_app::api::ApiError;

/// A request in flight
pub struct Pending<T> {
    rx: Receiver<Result<T, ApiError>>,
}

impl<T: Send + 'static> Pending<T> {
    /// Run `make_future` on a worker thread
    pub fn spawn<F, Fut>(make_future: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(make_future()),
                Err(e) => Err(ApiError::Runtime(e.to_string())),
            };
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// The result, once the worker has finished
    pub fn poll(&self) -> Option<Result<T, ApiError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(ApiError::Runtime("request worker stopped".to_string())))
            }
        }
    }

    /// Block until the worker has finished
    pub fn wait(self) -> Result<T, ApiError> {
        self.rx
            .recv()
            .unwrap_or_else(|_| Err(ApiError::Runtime("request worker stopped".to_string())))
    }
}

//! Host-side plumbing for executing the controller's requests.
//!
//! The core never opens a connection. A host implements `Transport` over
//! whatever HTTP stack it has and uses `drive` to run a request and all of
//! its follow-ups to completion.

use std::time::Duration;

use crate::controller::{PendingRequest, TodoSync};
use crate::error::{ApiError, SyncError};
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    /// Execute one round-trip. Non-2xx responses are returned as data;
    /// `Err` is reserved for failures that produced no response at all.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Execute `pending` and every request settling it produces. Returns the
/// number of round-trips performed.
pub fn drive<T: Transport + ?Sized>(sync: &mut TodoSync, transport: &T, pending: PendingRequest) -> usize {
    let mut next = Some(pending);
    let mut executed = 0;
    while let Some(pending) = next {
        let outcome = transport.execute(&pending.request);
        executed += 1;
        next = sync.settle(pending.ticket, outcome);
    }
    executed
}

/// Initialize the controller, wait out the startup delay with `sleep`, then
/// run the first fetch.
pub fn start<T, S>(sync: &mut TodoSync, transport: &T, sleep: S) -> Result<(), SyncError>
where
    T: Transport + ?Sized,
    S: FnOnce(Duration),
{
    let startup = sync.initialize()?;
    sleep(startup.delay);
    drive(sync, transport, startup.request);
    Ok(())
}

//! Deletion awaiting for remote resources that disappear asynchronously.
//!
//! A caller issues (or has issued) a delete against a [`ResourceClient`] and
//! then polls the resource until it is gone, reaches a target phase, or the
//! [`WaitSpec`] timeout runs out. The polling decision itself lives in
//! [`WaitState::step`], a pure transition that can be driven without any I/O.

mod client;
mod error;
mod spec;
mod state;
mod waiter;

pub use client::{ClientError, ResourceClient};
pub use error::WaitError;
pub use spec::WaitSpec;
pub use state::{PollOutcome, WaitState};
pub use waiter::{
    FINAL_POLL_GRACE, WaitReport, delete_and_wait, wait_for_deletion,
};

#[cfg(test)]
mod testing;

//! Status inputs for the apt-fetch applet.
//!
//! Everything the monitor reads from the outside world lives here:
//! - [`StatusSnapshot`] — decoded output of `apt-fetch.py -j`
//! - [`StatusSource`] — spawns the status command and returns its raw text
//! - [`LockProbe`] — checks whether a fetch is currently in progress

mod error;
mod lock;
mod snapshot;
mod source;

pub use error::StatusError;
pub use lock::{DEFAULT_LOCK_PATH, LockProbe, PathLockProbe};
pub use snapshot::{PENDING, StatusSnapshot, decode, summary};
pub use source::{CommandSource, SourceFuture, StatusSource};

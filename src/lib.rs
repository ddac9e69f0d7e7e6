//! A world border that never sits still.
//!
//! Every cycle picks a new border size and a time to reach it, starts the
//! border moving, pulls anyone left outside back in and reports the change.
//! The next cycle starts the moment the border arrives. Independently of
//! that, a sweep runs every few seconds so players caught outside the moving
//! border don't stay there for long.
//!
//! Everything here runs on the server's tick thread. The only work that
//! finishes elsewhere, relocations and HTTP reports, comes back through
//! [`events`] and is handled on a later tick.

mod collections;
pub mod commands;
pub mod config;
pub mod cycle;
pub mod enforcer;
pub mod error;
pub mod events;
pub mod headless;
pub mod host;
pub mod notifier;
pub mod sampler;
pub mod scheduler;
pub mod types;

pub use collections::SlotKey;
pub use config::Config;
pub use cycle::{BorderCycle, CycleSnapshot, Task};
pub use error::{BorderError, CommandError, HostError};
pub use host::Host;
pub use scheduler::{Scheduler, TickScheduler};

mod prelude {
    pub(crate) use crate::collections::*;
    pub(crate) use crate::error::{BorderError, CommandError, HostError, Result};
    pub(crate) use crate::types::*;
}

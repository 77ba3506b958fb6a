//! Remote window actuator: state snapshots, the HTTP transport with endpoint
//! fallback, and the polling controller that owns the local view.

mod controller;
mod snapshot;
mod timer;
mod transport;

#[cfg(test)]
mod testing;

pub use controller::*;
pub use snapshot::*;
pub use timer::*;
pub use transport::*;

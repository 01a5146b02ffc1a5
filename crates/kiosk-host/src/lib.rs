//! Host-side dispatch core for the secure kiosk browser.
//!
//! The embedded content view posts `CHROME COMMAND` messages; this crate
//! validates the envelope, parses the closed command set, executes the
//! matching handler against the platform collaborators, and posts correlated
//! `CHROME RESPONSE` messages back. It also owns the extension-connection
//! orchestrator: a bounded fan-out with a fixed per-channel deadline and a
//! single aggregate outcome.
//!
//! All state the handlers share (playback status, connection map, collected
//! init scripts) is owned by [`HostSession`]; nothing lives at module scope.

pub mod dispatch;
pub mod extensions;
pub mod handlers;
pub mod lockdown;
pub mod response;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

pub use extensions::{InitScript, CONNECT_TIMEOUT};
pub use response::{ContentView, ResponseChannel};
pub use session::{HostSession, Platform};

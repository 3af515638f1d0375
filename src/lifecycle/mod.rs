//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Build route table → Start metrics/watcher/admin → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: route table first, listeners last
//! - Reload goes through the config watcher, not signals

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;

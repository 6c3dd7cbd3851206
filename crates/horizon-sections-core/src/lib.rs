//! Core systems for Horizon Sections.
//!
//! This crate provides the foundational components shared by the Horizon
//! Sections reconciliation crates:
//!
//! - **Signal/Slot System**: Type-safe notifications for commits and events
//! - **Thread Affinity**: Verification that a driver stays on its UI thread
//! - **Logging**: Tracing targets, span names, and tree debug output
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_sections_core::Signal;
//!
//! let selected = Signal::<(usize, usize)>::new();
//! let conn_id = selected.connect(|(section, item)| {
//!     println!("selected {section}.{item}");
//! });
//!
//! selected.emit((1, 2));
//! selected.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use error::{CoreError, Result, SignalError};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle, TreeWriter};
pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;

//! Thread affinity verification for Horizon Sections.
//!
//! A list driver and the surface it feeds live on one logical thread (the
//! host toolkit's UI thread). Nothing in the reconciliation crates is
//! internally synchronized against concurrent mutation, so the driver records
//! the thread it was created on and checks every call against it.
//!
//! # Thread Safety Checks
//!
//! Two levels of checking are provided:
//!
//! - **Debug assertions** ([`ThreadAffinity::debug_assert_same_thread`]):
//!   active in debug builds, or in any build once
//!   [`set_thread_checks_enabled`] has been called with `true`.
//! - **Runtime assertions** ([`ThreadAffinity::assert_same_thread`]): always
//!   active.
//!
//! For recoverable checks use [`ThreadAffinity::check`], which returns a
//! [`CoreError::WrongThread`] instead of panicking.
//!
//! # Example
//!
//! ```
//! use horizon_sections_core::thread_check::ThreadAffinity;
//!
//! struct Adapter {
//!     affinity: ThreadAffinity,
//!     value: std::cell::Cell<i32>,
//! }
//!
//! impl Adapter {
//!     fn set_value(&self, v: i32) {
//!         self.affinity.debug_assert_same_thread();
//!         self.value.set(v);
//!     }
//! }
//!
//! let adapter = Adapter { affinity: ThreadAffinity::current(), value: Default::default() };
//! adapter.set_value(3);
//! assert!(adapter.affinity.check().is_ok());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

use crate::error::CoreError;
use crate::logging::targets;

/// Flag to enable runtime thread checks in release builds.
static THREAD_CHECKS_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Enable or disable runtime thread checks.
///
/// By default, thread checks are enabled in debug builds and disabled in
/// release builds.
pub fn set_thread_checks_enabled(enabled: bool) {
    THREAD_CHECKS_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Check if runtime thread checks are currently enabled.
#[inline]
pub fn are_thread_checks_enabled() -> bool {
    THREAD_CHECKS_ENABLED.load(Ordering::Relaxed)
}

/// Thread affinity tracker.
///
/// Records the thread on which an owner was created and verifies that
/// subsequent operations occur on the same thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Verify the current thread without panicking.
    pub fn check(&self) -> Result<(), CoreError> {
        let actual = std::thread::current().id();
        if actual == self.thread_id {
            Ok(())
        } else {
            Err(CoreError::WrongThread {
                expected: self.thread_id,
                actual,
            })
        }
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// This always runs (debug and release builds).
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("list driver accessed from wrong thread")
    }

    /// Assert that we are on the same thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Assertion that only runs when thread checks are enabled.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        if are_thread_checks_enabled() {
            self.assert_same_thread();
        }
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        tracing::error!(
            target: targets::THREAD,
            expected = ?self.thread_id,
            actual = ?current.id(),
            "thread affinity violation"
        );
        panic!(
            "\n\
            THREAD AFFINITY VIOLATION\n\
            \n\
            {msg}\n\
            \n\
            Current thread: \"{current_name}\" (ID: {:?})\n\
            Expected thread ID: {:?}\n\
            \n\
            The list driver and its surface must be driven from a single\n\
            thread. Route model updates and surface callbacks through the\n\
            host toolkit's UI thread.",
            current.id(),
            self.thread_id
        )
    }
}

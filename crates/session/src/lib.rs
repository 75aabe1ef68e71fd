//! Session-scoped state machines
//!
//! Two small pieces of per-session runtime state, kept free of timers,
//! I/O and rendering so the boundary logic is directly unit-testable:
//!
//! - [`WriteThrottle`]: suppresses all but one progress write per fixed
//!   interval for a (user, media) pair.
//! - [`PageWindow`]: bounds which pages of a long ordered sequence are
//!   materialized around a moving cursor.
//!
//! Both are owned by a single logical session and mutated only by that
//! session's own event stream; no locking lives here.

mod throttle;
mod window;

pub use throttle::{is_due, WriteThrottle, SYNC_INTERVAL};
pub use window::{materialized_range, PageWindow, WINDOW_AFTER, WINDOW_BEFORE};

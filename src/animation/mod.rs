//! Scene animation
//!
//! A monotonic [`Clock`] provides elapsed time, and the [`BobAnimator`]
//! turns it into per-tick vertical motion for named scene objects.

pub mod bob;
pub mod clock;

pub use bob::{Bob, BobAnimator};
pub use clock::Clock;

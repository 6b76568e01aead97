//! Frame-driven smooth scrolling for surfaces without native smooth scroll.
//!
//! # Layout
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers
//! - `config` - Configuration accessors (types live in folio-core)
//! - `animation` - The animator combining the above
//!
//! # Usage
//!
//! ```ignore
//! use folio_view::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::new(config.scroll.clone());
//! animator.set_offset(current_offset);
//! animator.scroll_to(target, max_scroll, now);
//!
//! // on every frame
//! let offset = animator.update(max_scroll, now);
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};

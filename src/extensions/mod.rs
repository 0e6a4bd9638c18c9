//! Optional item variants and host-side hooks.
//!
//! Nothing in `core` depends on this module.

pub mod markers;
pub mod plugins;

pub use markers::TradeMarkerItem;
pub use plugins::{SessionContext, SessionEvent, SessionObserver};

//! Prelude module for `etta_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use etta_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut events = EventTable::new();
//! events.register("raining", || true);
//! events.refresh();
//!
//! let mut condition = Expression::new("event(raining) && health < 10");
//! let scope = Scope::from_player(&PlayerSnapshot::new(5.0, 20.0, 20));
//! assert!(condition.evaluate(&scope, &events));
//! ```

// Re-export everything from etta_types::prelude
#[doc(inline)]
pub use etta_types::prelude::*;

// Re-export the entire etta_types module for advanced usage
#[doc(inline)]
pub use etta_types;

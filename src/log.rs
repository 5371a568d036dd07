//! Logging shim.
//!
//! With the `tracing` feature the layout phases emit structured `tracing`
//! events; without it the same call sites compile to nothing.
//! Call sites always go through `crate::log::{debug, trace, warn}`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __pedigree_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __pedigree_trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __pedigree_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{
    __pedigree_debug as debug, __pedigree_trace as trace, __pedigree_warn as warn,
};

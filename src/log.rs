//! Crate-internal logging shims.
//!
//! Each macro forwards to `defmt` and/or the `log` facade depending on the
//! enabled features, and expands to nothing when neither is enabled.

#![allow(unused_macros, unused_imports)]

macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($tt)*);
        #[cfg(feature = "log")]
        ::log::debug!($($tt)*);
    };
}

macro_rules! warning {
    ($($tt:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($tt)*);
        #[cfg(feature = "log")]
        ::log::warn!($($tt)*);
    };
}

pub(crate) use {debug, warning};

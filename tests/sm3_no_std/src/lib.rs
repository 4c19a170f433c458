//! Checks that `gm-sm3` builds without `std` under every feature combination.

#![no_std]

pub use gm_sm3;

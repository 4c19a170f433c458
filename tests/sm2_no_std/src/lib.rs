//! Checks that `gm-sm2` builds without `std` under every feature combination.

#![no_std]

pub use gm_sm2;

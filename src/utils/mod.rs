//! Shared low-level helpers.

pub mod converter;

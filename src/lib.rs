//! GameCube disc metadata library
//!
//! Read-only decoding of GameCube disc images: header fields, the
//! `opening.bnr` banner text and its RGB5A3 image.

pub mod banner;
pub mod config;
pub mod disc;
pub mod export;

#[cfg(test)]
pub(crate) mod testing;

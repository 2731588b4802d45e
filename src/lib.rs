//! Three terminal mini-games (obstacle runner, grid snake, maze chase) over
//! one shared session engine.
//!
//! The library is pure simulation: every game is a [`session::Game`]
//! strategy stepped by a [`session::Session`], with all randomness injected
//! so tests can drive it deterministically. Terminal I/O lives in the
//! binary.

pub mod games;
pub mod session;
pub mod store;

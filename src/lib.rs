//! # Pathless search
//!
//! A breadth-/depth-first tree search that keeps no paths, only a frontier
//! and the best goal seen so far, plus encodings that turn small
//! combinatorial problems into search problems.
//!
//! ## Modules
//!
//! - [`search`]: Problem trait, exploration order, step-wise engine
//! - [`tasks`]: Sudoku, job-shop, tour planning and Connect Four encodings
//! - [`game`]: Connect Four board and immutable game state
//! - [`ai`]: Opponent policies for the Connect Four lookahead
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod search;
pub mod tasks;

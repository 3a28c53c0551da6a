//! pomotrack - Terminal Pomodoro timer with project tracking
//!
//! This library provides the core functionality for the pomotrack application:
//! the timer state machine, the project store, the focus and session logs and
//! the statistics computed from them, plus the terminal front end that drives
//! them.

pub mod app;
pub mod clock;
pub mod config;
pub mod focus_timing;
pub mod input;
pub mod logging;
pub mod project;
pub mod storage;
pub mod tui;

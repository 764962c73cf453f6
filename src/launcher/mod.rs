//! Local Development Launcher
//!
//! Runs `searchd` and `gateway` side by side for local development.
//!
//! ## Overview
//! Each service is described by a `ProcessSpec` and spawned as a child process.
//! Child output is streamed line by line with a `[name]` prefix so the logs of
//! all services can be read from one terminal. Stopping the supervisor kills
//! every child that is still running.
//!
//! ## Submodules
//! - **`process`**: Process specs, spawning, log forwarding and shutdown.

pub mod process;

#[cfg(test)]
mod tests;

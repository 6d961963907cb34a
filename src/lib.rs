//! Rendezvous channels, fair multi-way waits and a fan-in executor.
//!
//! This crate provides the pieces needed to hand values between independently
//! scheduled units of work without any shared mutable state:
//! - A zero-capacity channel where every send meets a matching receive.
//! - A select that blocks on several channels and picks uniformly at random
//!   among the ready ones, so no channel starves.
//! - A fan-out/fan-in executor that runs one unit of work per input on a
//!   rayon pool and collects exactly one result per unit.
//! - Scoped cleanup guards released in reverse order of registration.
//!
//! Key modules:
//! - `channel`: the rendezvous channel (`Sender`, `Receiver`).
//! - `select`: `Select` over several receivers.
//! - `task` / `executor`: the `Task` interface and the `Executor` running it.
//! - `config`: tuning of the executor's worker pool.
//! - `defer`: `defer` guards and `DeferStack`.
//! - `lesson`: small helpers the `rdv-tour` binary walks through.
//!
//! Quick start:
//! 1. Implement `Task` (or use `Increment`).
//! 2. Call `Executor::setup` with an `ExecutorConfig`.
//! 3. Call `execute` with the inputs; results arrive in completion order.
//!
//! Building with the `loom` feature swaps every lock, condition variable and
//! thread spawn for its model-checked counterpart.

/// The zero-capacity rendezvous channel.
///
/// `send` blocks until a receiver has taken that value; `recv` blocks until a
/// sender offers one. Dropping every handle of one side disconnects the
/// channel and turns a permanent block into an error.
pub mod channel;
/// Configuration of the executor's worker pool.
pub mod config;
/// Scoped cleanup: single `defer` guards and reverse-order `DeferStack`s.
pub mod defer;
/// The fan-out/fan-in executor.
///
/// Launches one unit of work per input on the worker pool, all sending on a
/// shared rendezvous channel, and performs one blocking receive per unit.
pub mod executor;
/// Helpers from the language tour: multiple returns, recoverable parsing,
/// map lookups and slice appends.
pub mod lesson;
/// `tracing-subscriber` setup used by the `rdv-tour` binary.
pub mod logger;
/// Multi-way wait over several receivers with a fair random choice.
pub mod select;
mod sync;
/// The `Task` interface and the `Increment` task.
pub mod task;
/// Common aliases and identifiers.
pub mod types;

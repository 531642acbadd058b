//! Deterministic simulators for two classic operating system mechanisms: CPU
//! scheduling ([`sched`]) and page replacement ([`paging`]).
//!
//! Both engines are pure functions of their input. They own nothing between calls,
//! so independent runs may execute on as many threads as the caller likes.

pub mod error;

pub mod config;
pub mod paging;
pub mod sched;

pub use paging::{PagingReport, Policy};
pub use sched::{Algorithm, Process, Schedule};

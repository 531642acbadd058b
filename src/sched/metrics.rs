use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::{Process, Ticks};

/// Aggregate figures over a finished process set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub completed: usize,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    /// Latest completion time, the run is assumed to start at t=0.
    pub makespan: Ticks,
    /// Completed processes per tick of makespan.
    pub throughput: f64,
}

impl Metrics {
    /// Derive metrics from processes returned by a scheduler. Processes that never
    /// completed are ignored; an empty set yields all zeros.
    pub fn from_processes(processes: &[Process]) -> Self {
        let done: Vec<&Process> = processes.iter().filter(|p| p.completion_time.is_some()).collect();
        if done.is_empty() {
            return Self::default();
        }

        let n = done.len() as f64;
        let total_waiting: Ticks = done.iter().map(|p| p.waiting_time).sum();
        let total_turnaround: Ticks = done.iter().map(|p| p.turnaround_time).sum();
        let makespan = done.iter().filter_map(|p| p.completion_time).max().unwrap_or_default();
        let throughput = if makespan == 0 { 0.0 } else { n / makespan as f64 };

        Self {
            completed: done.len(),
            avg_waiting_time: total_waiting as f64 / n,
            avg_turnaround_time: total_turnaround as f64 / n,
            makespan,
            throughput,
        }
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Avg Waiting Time: {:.2}", self.avg_waiting_time)?;
        writeln!(f, "Avg Turnaround Time: {:.2}", self.avg_turnaround_time)?;
        write!(f, "Throughput: {:.2} p/tick", self.throughput)
    }
}

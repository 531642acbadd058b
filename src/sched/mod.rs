//! CPU scheduling simulation.
//!
//! Every algorithm takes ownership of a process set, resets the simulation fields of each
//! record, replays the dispatch decisions on a single integer clock and hands the records
//! back together with the execution timeline. Nothing survives between two runs, so the
//! same input can be fed to different algorithms side by side.

pub mod fcfs;
pub mod loader;
pub mod metrics;
pub mod rr;
pub mod sjf;

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value_err;

pub use fcfs::Fcfs;
pub use loader::ProcessTable;
pub use metrics::Metrics;
pub use rr::RoundRobin;
pub use sjf::Sjf;

pub type Pid = u32;
pub type Ticks = u64;

/// Lifecycle of a process within one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Not yet arrived, or not yet considered by the scheduler.
    Pending,
    /// Waiting in the ready queue.
    Ready,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Ticks,
    /// Total CPU time required.
    pub burst_time: Ticks,
    /// Reserved, none of the implemented algorithms look at it.
    pub priority: u32,

    pub state: ProcessState,
    pub remaining_time: Ticks,
    /// Clock value of the first dispatch.
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
}

impl Process {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority: 0,
            state: ProcessState::Pending,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            turnaround_time: 0,
            waiting_time: 0,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Clear every simulation field so the record can enter a fresh run.
    pub fn reset(&mut self) {
        self.state = ProcessState::Pending;
        self.remaining_time = self.burst_time;
        self.start_time = None;
        self.completion_time = None;
        self.turnaround_time = 0;
        self.waiting_time = 0;
    }

    pub fn is_done(&self) -> bool {
        self.state == ProcessState::Done
    }

    /// Execute the process for `slice` ticks starting at `now` and return the
    /// interval it occupied on the CPU.
    fn run(&mut self, now: Ticks, slice: Ticks) -> TimelineEntry {
        debug_assert!(
            slice <= self.remaining_time,
            "P{} asked to run {} ticks with only {} remaining",
            self.pid,
            slice,
            self.remaining_time
        );
        debug_assert_ne!(
            self.state,
            ProcessState::Done,
            "P{} dispatched after completion",
            self.pid
        );

        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.state = ProcessState::Running;
        self.remaining_time -= slice;
        TimelineEntry { process_id: self.pid, start: now, finish: now + slice }
    }

    /// Record completion at `at`. Waiting time is derived from turnaround so that
    /// it stays correct when a process was dispatched more than once.
    fn complete(&mut self, at: Ticks) {
        debug_assert_eq!(self.remaining_time, 0, "P{} completed with work left", self.pid);
        self.state = ProcessState::Done;
        self.completion_time = Some(at);
        self.turnaround_time = at - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }
}

/// One contiguous stretch of CPU time, `[start, finish)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub process_id: Pid,
    pub start: Ticks,
    pub finish: Ticks,
}

impl TimelineEntry {
    pub fn len(&self) -> Ticks {
        self.finish - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.finish
    }
}

impl Display for TimelineEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{} [{}, {})", self.process_id, self.start, self.finish)
    }
}

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Processes with computed fields, in the order the algorithm finished them.
    pub processes: Vec<Process>,
    /// Dispatch intervals in temporal order.
    pub timeline: Vec<TimelineEntry>,
}

impl Schedule {
    pub fn metrics(&self) -> Metrics {
        Metrics::from_processes(&self.processes)
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// All intervals during which `pid` held the CPU.
    pub fn slices(&self, pid: Pid) -> impl Iterator<Item = &TimelineEntry> + '_ {
        self.timeline.iter().filter(move |e| e.process_id == pid)
    }
}

/// A CPU scheduling algorithm.
///
/// Implementations must be deterministic: scheduling an equal process set twice
/// yields an equal [`Schedule`].
pub trait Scheduler {
    fn algorithm(&self) -> Algorithm;

    /// Run the whole process set to completion.
    fn schedule(&self, processes: Vec<Process>) -> Schedule;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Fcfs,
    Sjf,
    #[serde(alias = "rr")]
    RoundRobin,
}

impl Algorithm {
    /// Build the scheduler for this algorithm. `quantum` is only consulted by
    /// Round Robin.
    pub fn scheduler(self, quantum: Ticks) -> Result<Box<dyn Scheduler>> {
        let scheduler: Box<dyn Scheduler> = match self {
            Algorithm::Fcfs => Box::new(Fcfs),
            Algorithm::Sjf => Box::new(Sjf),
            Algorithm::RoundRobin => Box::new(RoundRobin::new(quantum)?),
        };
        Ok(scheduler)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Fcfs => write!(f, "FCFS"),
            Algorithm::Sjf => write!(f, "SJF (Non-Preemptive)"),
            Algorithm::RoundRobin => write!(f, "Round Robin"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "rr" | "round_robin" | "round-robin" => Ok(Algorithm::RoundRobin),
            other => Err(value_err!("unknown scheduling algorithm '{}'", other)),
        }
    }
}

/// Check the process set against the input contract: positive and unique pids,
/// positive bursts, and a clock that cannot overflow before the last completion.
pub fn validate(processes: &[Process]) -> Result<()> {
    let mut seen = HashSet::with_capacity(processes.len());
    let mut latest_arrival: Ticks = 0;
    let mut total_burst: Ticks = 0;
    for p in processes {
        if p.pid == 0 {
            return Err(value_err!("pid must be positive"));
        }
        if p.burst_time == 0 {
            return Err(value_err!("P{} has a zero burst time", p.pid));
        }
        if !seen.insert(p.pid) {
            return Err(value_err!("duplicate pid {}", p.pid));
        }
        latest_arrival = latest_arrival.max(p.arrival_time);
        total_burst = total_burst
            .checked_add(p.burst_time)
            .ok_or_else(|| value_err!("total burst time exceeds {}", Ticks::MAX))?;
    }
    // no completion can happen later than the last arrival plus all the work
    if latest_arrival.checked_add(total_burst).is_none() {
        return Err(value_err!(
            "arrival {} plus a total burst of {} exceeds the clock range",
            latest_arrival,
            total_burst
        ));
    }
    Ok(())
}

/// Validate `processes` and run them through `algorithm`.
pub fn simulate(algorithm: Algorithm, quantum: Ticks, processes: Vec<Process>) -> Result<Schedule> {
    validate(&processes)?;
    let scheduler = algorithm.scheduler(quantum)?;
    Ok(scheduler.schedule(processes))
}

/// First come, first served.
pub fn fcfs(processes: Vec<Process>) -> Schedule {
    Fcfs.schedule(processes)
}

/// Non-preemptive shortest job first.
pub fn sjf(processes: Vec<Process>) -> Schedule {
    Sjf.schedule(processes)
}

pub fn round_robin(processes: Vec<Process>, quantum: Ticks) -> Result<Schedule> {
    Ok(RoundRobin::new(quantum)?.schedule(processes))
}

/// Reset every record and order them by arrival. The sort is stable, so
/// processes arriving together keep their input order.
fn prepare(processes: &mut [Process]) {
    processes.iter_mut().for_each(Process::reset);
    processes.sort_by_key(|p| p.arrival_time);
}

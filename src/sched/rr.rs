use std::collections::VecDeque;

use log::{debug, trace};

use super::{prepare, Algorithm, Process, ProcessState, Schedule, Scheduler, Ticks};
use crate::error::Result;
use crate::value_err;

/// Round Robin with a fixed time quantum.
///
/// Processes move from a pending pool (not yet arrived, sorted by arrival) into a
/// FIFO ready queue, run for at most one quantum per dispatch and either go back to
/// the tail of the ready queue or into the completed set.
///
/// After each slice, processes that arrived while it ran are queued *ahead* of the
/// process that was just preempted.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Result<Self> {
        if quantum == 0 {
            return Err(value_err!("round robin quantum must be at least 1"));
        }
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

fn make_ready(mut p: Process, ready: &mut VecDeque<Process>) {
    p.state = ProcessState::Ready;
    ready.push_back(p);
}

impl Scheduler for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn schedule(&self, mut processes: Vec<Process>) -> Schedule {
        debug!("rr: scheduling {} processes, quantum {}", processes.len(), self.quantum);
        prepare(&mut processes);

        let mut pending: VecDeque<Process> = processes.into();
        let mut ready = VecDeque::with_capacity(pending.len());
        let mut completed = Vec::with_capacity(pending.len());
        let mut timeline = vec![];

        let mut clock = 0;
        if let Some(first) = pending.pop_front() {
            clock = first.arrival_time;
            make_ready(first, &mut ready);
        }

        while !ready.is_empty() || !pending.is_empty() {
            if ready.is_empty() {
                if let Some(next) = pending.pop_front() {
                    trace!("rr: cpu idle from {} to {}", clock, next.arrival_time);
                    clock = next.arrival_time;
                    make_ready(next, &mut ready);
                }
            }
            let Some(mut p) = ready.pop_front() else {
                break;
            };

            let slice = p.remaining_time.min(self.quantum);
            let entry = p.run(clock, slice);
            trace!("rr: dispatch {}, {} left", entry, p.remaining_time);
            clock = entry.finish;
            timeline.push(entry);

            while pending.front().is_some_and(|next| next.arrival_time <= clock) {
                if let Some(arrived) = pending.pop_front() {
                    make_ready(arrived, &mut ready);
                }
            }

            if p.remaining_time > 0 {
                make_ready(p, &mut ready);
            } else {
                p.complete(clock);
                completed.push(p);
            }
        }

        Schedule { processes: completed, timeline }
    }
}

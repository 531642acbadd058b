use log::{debug, trace};

use super::{prepare, Algorithm, Process, Schedule, Scheduler};

/// First come, first served: processes run to completion in arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn schedule(&self, mut processes: Vec<Process>) -> Schedule {
        debug!("fcfs: scheduling {} processes", processes.len());
        prepare(&mut processes);

        let mut clock = 0;
        let mut timeline = Vec::with_capacity(processes.len());
        for p in processes.iter_mut() {
            // idle until the next arrival
            clock = clock.max(p.arrival_time);
            let entry = p.run(clock, p.burst_time);
            trace!("fcfs: dispatch {}", entry);
            clock = entry.finish;
            p.complete(clock);
            timeline.push(entry);
        }

        Schedule { processes, timeline }
    }
}

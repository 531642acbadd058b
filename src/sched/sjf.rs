use log::{debug, trace};

use super::{prepare, Algorithm, Process, Schedule, Scheduler};

/// Non-preemptive shortest job first.
///
/// Whenever the CPU becomes free, the arrived process with the smallest burst is
/// dispatched and runs to completion. Equal bursts are resolved in arrival order
/// (then input order), so the outcome is fully determined by the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Scheduler for Sjf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn schedule(&self, mut remaining: Vec<Process>) -> Schedule {
        debug!("sjf: scheduling {} processes", remaining.len());
        prepare(&mut remaining);

        let mut clock = 0;
        let mut completed = Vec::with_capacity(remaining.len());
        let mut timeline = Vec::with_capacity(remaining.len());
        // `remaining` stays sorted by arrival, removal preserves order
        while let Some(earliest) = remaining.first().map(|p| p.arrival_time) {
            let shortest = remaining
                .iter()
                .enumerate()
                .filter(|(_, p)| p.arrival_time <= clock)
                .min_by_key(|(_, p)| p.burst_time)
                .map(|(i, _)| i);
            let Some(index) = shortest else {
                trace!("sjf: cpu idle from {} to {}", clock, earliest);
                clock = earliest;
                continue;
            };

            let mut p = remaining.remove(index);
            let entry = p.run(clock, p.burst_time);
            trace!("sjf: dispatch {}", entry);
            clock = entry.finish;
            p.complete(clock);
            timeline.push(entry);
            completed.push(p);
        }

        Schedule { processes: completed, timeline }
    }
}

use log::info;
use ossim::error::Result;
use ossim::sched::{self, Algorithm, Process, ProcessTable, Schedule, Ticks};

use super::workload::random_processes;

const SEEDS: [u64; 6] = [0, 1, 2, 7, 42, 2024];

fn run(algorithm: Algorithm, quantum: Ticks, processes: Vec<Process>) -> Result<Schedule> {
    sched::simulate(algorithm, quantum, processes)
}

/// Checks shared by every algorithm.
fn check_invariants(input: &[Process], schedule: &Schedule) {
    assert_eq!(input.len(), schedule.processes.len());

    // intervals are ordered, disjoint and never start before the arrival
    for pair in schedule.timeline.windows(2) {
        assert!(pair[0].finish <= pair[1].start, "{} overlaps {}", pair[0], pair[1]);
    }

    for p in &schedule.processes {
        let slices: Vec<_> = schedule.slices(p.pid).collect();
        let first = slices.first().expect("every process runs at least once");
        let last = slices.last().expect("every process runs at least once");
        let completion = p.completion_time.expect("every process completes");

        assert!(p.is_done());
        assert_eq!(0, p.remaining_time);
        assert_eq!(p.burst_time, slices.iter().map(|e| e.len()).sum::<Ticks>(), "P{}", p.pid);
        assert!(first.start >= p.arrival_time);
        assert_eq!(Some(first.start), p.start_time);
        assert_eq!(last.finish, completion);
        assert_eq!(completion - p.arrival_time, p.turnaround_time);
        assert_eq!(p.turnaround_time - p.burst_time, p.waiting_time);
    }
}

#[test]
fn test_textbook_fcfs() -> Result<()> {
    setup!();
    let input = vec![Process::new(1, 0, 5), Process::new(2, 1, 3), Process::new(3, 2, 8)];
    let schedule = run(Algorithm::Fcfs, 2, input.clone())?;
    check_invariants(&input, &schedule);

    let rows: Vec<_> = schedule
        .processes
        .iter()
        .map(|p| (p.pid, p.completion_time.unwrap_or_default(), p.waiting_time))
        .collect();
    assert_eq!(vec![(1, 5, 0), (2, 8, 4), (3, 16, 6)], rows);
    Ok(())
}

#[test]
fn test_textbook_round_robin() -> Result<()> {
    setup!();
    let input = vec![Process::new(1, 0, 5), Process::new(2, 1, 3), Process::new(3, 2, 8)];
    let fcfs = run(Algorithm::Fcfs, 2, input.clone())?;
    let rr = run(Algorithm::RoundRobin, 2, input.clone())?;
    check_invariants(&input, &rr);

    let completion = |s: &Schedule, pid| s.process(pid).and_then(|p| p.completion_time);
    assert!(completion(&rr, 1) > completion(&fcfs, 1));

    // back to back execution, nothing is double counted
    let busy: Ticks = rr.timeline.iter().map(|e| e.len()).sum();
    let total_burst: Ticks = input.iter().map(|p| p.burst_time).sum();
    assert_eq!(total_burst, busy);
    assert_eq!(Some(0), rr.timeline.first().map(|e| e.start));
    assert_eq!(Some(total_burst), rr.timeline.last().map(|e| e.finish));
    Ok(())
}

#[test]
fn test_non_preemptive_runs_once() -> Result<()> {
    setup!();
    for seed in SEEDS {
        let input = random_processes(seed, 40);
        for algorithm in [Algorithm::Fcfs, Algorithm::Sjf] {
            let schedule = run(algorithm, 1, input.clone())?;
            check_invariants(&input, &schedule);
            assert_eq!(input.len(), schedule.timeline.len(), "{} seed {}", algorithm, seed);
            for p in &schedule.processes {
                // a single dispatch means waiting is start - arrival as well
                assert_eq!(p.start_time.unwrap_or_default() - p.arrival_time, p.waiting_time);
            }
        }
    }
    Ok(())
}

#[test]
fn test_round_robin_slices() -> Result<()> {
    setup!();
    for seed in SEEDS {
        for quantum in [1, 2, 3, 5] {
            let input = random_processes(seed, 30);
            info!("round robin seed {} quantum {}", seed, quantum);
            let schedule = run(Algorithm::RoundRobin, quantum, input.clone())?;
            check_invariants(&input, &schedule);

            for p in &schedule.processes {
                let lens: Vec<Ticks> = schedule.slices(p.pid).map(|e| e.len()).collect();
                let (last, rest) = lens.split_last().expect("at least one slice");
                assert!(rest.iter().all(|&len| len == quantum), "P{} {:?}", p.pid, lens);
                assert!(*last >= 1 && *last <= quantum);
            }
        }
    }
    Ok(())
}

#[test]
fn test_deterministic() -> Result<()> {
    setup!();
    for seed in SEEDS {
        let input = random_processes(seed, 25);
        for algorithm in [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::RoundRobin] {
            let a = run(algorithm, 3, input.clone())?;
            let b = run(algorithm, 3, input.clone())?;
            assert_eq!(a, b);
        }
    }
    Ok(())
}

#[test]
fn test_sjf_minimizes_waiting_for_simultaneous_arrivals() -> Result<()> {
    setup!();
    let input: Vec<_> = [8, 3, 12, 1, 5, 5, 2]
        .iter()
        .enumerate()
        .map(|(i, &burst)| Process::new(i as u32 + 1, 0, burst))
        .collect();
    let fcfs = run(Algorithm::Fcfs, 1, input.clone())?.metrics();
    let sjf = run(Algorithm::Sjf, 1, input.clone())?.metrics();
    assert!(sjf.avg_waiting_time <= fcfs.avg_waiting_time);
    assert_eq!(fcfs.makespan, sjf.makespan);
    Ok(())
}

#[test]
fn test_empty_process_set() -> Result<()> {
    setup!();
    for algorithm in [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::RoundRobin] {
        let schedule = run(algorithm, 2, vec![])?;
        assert!(schedule.processes.is_empty());
        assert!(schedule.timeline.is_empty());
        let metrics = schedule.metrics();
        assert_eq!(0, metrics.completed);
        assert_eq!(0.0, metrics.throughput);
    }
    Ok(())
}

#[test]
fn test_table_to_schedule() -> Result<()> {
    setup!();
    let mut table = ProcessTable::new();
    table.extend_from_csv("PID , Arrival, Burst\n1, 0, 5\n2, 1, 3\n3, 2, 8\n")?;
    assert!(table.extend_from_csv("pid,arrival\n4,3").is_err());
    assert_eq!(3, table.len());

    let schedule = run(Algorithm::Sjf, 2, table.to_processes())?;
    let metrics = schedule.metrics();
    assert_eq!(16, metrics.makespan);
    assert_eq!(3, metrics.completed);

    // the table keeps pristine records for the next run
    assert!(table.processes().iter().all(|p| p.completion_time.is_none()));
    Ok(())
}

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use ossim::config::Config;
use ossim::error::Result;
use ossim::paging::parse_reference_string;
use ossim::sched::loader::load_process_table;
use ossim::sched::{self, Process, Schedule, Ticks};
use ossim::{parse_err, Algorithm, Policy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<()> {
    let args = clap::command!()
        .about("CPU scheduling and page replacement simulator")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Configuration file path, OSSIM_* environment variables take precedence"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("sched")
                .about("Simulate CPU scheduling over a process table")
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .help("CSV process table with pid, arrival and burst columns"),
                )
                .arg(
                    Arg::new("random")
                        .long("random")
                        .value_parser(value_parser!(u64))
                        .conflicts_with("file")
                        .help("Generate arrivals over this many ticks instead of reading a file"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .default_value("0")
                        .help("Seed for --random"),
                )
                .arg(Arg::new("algorithm").short('a').long("algorithm").help("fcfs, sjf or rr"))
                .arg(
                    Arg::new("quantum")
                        .short('q')
                        .long("quantum")
                        .value_parser(value_parser!(u64))
                        .help("Round robin time quantum"),
                )
                .arg(
                    Arg::new("timeline")
                        .long("timeline")
                        .action(ArgAction::SetTrue)
                        .help("Print every dispatch interval"),
                ),
        )
        .subcommand(
            Command::new("paging")
                .about("Simulate page replacement over a reference string")
                .arg(
                    Arg::new("refs")
                        .short('r')
                        .long("refs")
                        .required(true)
                        .help("Comma separated page references, e.g. \"7,0,1,2\""),
                )
                .arg(Arg::new("policy").short('p').long("policy").help("fifo or lru"))
                .arg(
                    Arg::new("frames")
                        .short('n')
                        .long("frames")
                        .value_parser(value_parser!(usize))
                        .help("Number of frames"),
                ),
        )
        .get_matches();

    let file = args.get_one::<String>("config").map(String::as_str).unwrap_or_default();
    let mut cfg = Config::new(file)?;
    let loglevel = cfg.log_level.parse::<simplelog::LevelFilter>()?;
    simplelog::SimpleLogger::init(loglevel, simplelog::ConfigBuilder::new().build())?;

    match args.subcommand() {
        Some(("sched", sub)) => run_sched(&mut cfg, sub),
        Some(("paging", sub)) => run_paging(&mut cfg, sub),
        _ => Err(parse_err!("unknown subcommand")),
    }
}

fn run_sched(cfg: &mut Config, args: &ArgMatches) -> Result<()> {
    if let Some(algorithm) = args.get_one::<String>("algorithm") {
        cfg.algorithm = algorithm.parse::<Algorithm>()?;
    }
    if let Some(quantum) = args.get_one::<u64>("quantum") {
        cfg.quantum = *quantum;
    }
    cfg.validate()?;

    let processes = match (args.get_one::<String>("file"), args.get_one::<u64>("random")) {
        (Some(file), _) => load_process_table(file)?,
        (None, Some(ticks)) => {
            let seed = args.get_one::<u64>("seed").copied().unwrap_or_default();
            bernoulli_processes(*ticks, 0.3, 0.3, 2, 6, seed)
        }
        (None, None) => return Err(parse_err!("either --file or --random is required")),
    };

    let schedule = sched::simulate(cfg.algorithm, cfg.quantum, processes)?;
    print_schedule(cfg, &schedule, args.get_flag("timeline"));
    Ok(())
}

fn run_paging(cfg: &mut Config, args: &ArgMatches) -> Result<()> {
    if let Some(policy) = args.get_one::<String>("policy") {
        cfg.policy = policy.parse::<Policy>()?;
    }
    if let Some(frames) = args.get_one::<usize>("frames") {
        cfg.frames = *frames;
    }
    cfg.validate()?;

    let refs = args.get_one::<String>("refs").map(String::as_str).unwrap_or_default();
    let references = parse_reference_string(refs)?;
    let report = cfg.policy.simulate(&references, cfg.frames)?;
    println!("{}", report);
    Ok(())
}

fn print_schedule(cfg: &Config, schedule: &Schedule, timeline: bool) {
    match cfg.algorithm {
        Algorithm::RoundRobin => println!("{} (quantum {})", cfg.algorithm, cfg.quantum),
        _ => println!("{}", cfg.algorithm),
    }
    println!(
        "{:>6} {:>8} {:>6} {:>11} {:>11} {:>8}",
        "PID", "Arrival", "Burst", "Completion", "Turnaround", "Waiting"
    );
    for p in &schedule.processes {
        println!(
            "{:>6} {:>8} {:>6} {:>11} {:>11} {:>8}",
            format!("P{}", p.pid),
            p.arrival_time,
            p.burst_time,
            p.completion_time.unwrap_or_default(),
            p.turnaround_time,
            p.waiting_time
        );
    }
    if timeline {
        println!();
        for entry in &schedule.timeline {
            println!("{}", entry);
        }
    }
    println!();
    println!("{}", schedule.metrics());
}

/// Bernoulli arrivals: each tick spawns a process with probability `p_arrival`,
/// which is short with probability `p_short`.
fn bernoulli_processes(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_burst: Ticks,
    long_burst: Ticks,
    seed: u64,
) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.gen::<f64>() < p_arrival {
            let burst = if rng.gen::<f64>() < p_short { short_burst } else { long_burst };
            processes.push(Process::new(processes.len() as u32 + 1, t, burst));
        }
    }

    processes
}

use std::io::Write;

use goldenfile::Mint;
use ossim::error::Result;
use ossim::paging::{self, parse_reference_string, PageId, Policy, Status};

use super::workload::random_references;

const GOLDEN_DIR: &str = "tests/golden";

const TEXTBOOK: &str = "7,0,1,2,0,3,0,4,2,3,0,3,2,1,2,0,1,7,0,1";

#[test]
fn test_textbook_regression() -> Result<()> {
    setup!();
    let references = parse_reference_string(TEXTBOOK)?;
    let fifo = Policy::Fifo.simulate(&references, 3)?;
    let lru = Policy::Lru.simulate(&references, 3)?;
    assert_eq!(15, fifo.faults);
    assert_eq!(12, lru.faults);
    assert_eq!(5, fifo.hits());
    assert_eq!(8, lru.hits());
    Ok(())
}

macro_rules! test_golden_report {
    ($($name:ident: $policy:expr, $frames:expr, $refs:expr,)*) => {
        $(
            #[test]
            fn $name() -> Result<()> {
                setup!();
                let references = parse_reference_string($refs)?;
                let report = $policy.simulate(&references, $frames)?;

                let mut mint = Mint::new(GOLDEN_DIR);
                let mut f = mint.new_goldenfile(stringify!($name))?;
                write!(f, "{}\n", report)?;
                Ok(())
            }
        )*
    };
}

test_golden_report! {
    fifo_textbook: Policy::Fifo, 3, TEXTBOOK,
    lru_textbook: Policy::Lru, 3, TEXTBOOK,
    lru_single_frame: Policy::Lru, 1, "1, 1, 2, 1",
}

#[test]
fn test_paging_invariants() -> Result<()> {
    setup!();
    for seed in 0..20 {
        let references = random_references(seed, 200, 8);
        for frames in 1..=10 {
            for policy in [Policy::Fifo, Policy::Lru] {
                let report = policy.simulate(&references, frames)?;
                assert_eq!(references.len() as u64, report.faults + report.hits());
                assert_eq!(references.len(), report.steps.len());

                let mut previous: Option<PageId> = None;
                for (step, &page) in report.steps.iter().zip(&references) {
                    assert_eq!(page, step.page);
                    assert!(step.frames.len() <= frames);
                    assert!(step.frames.contains(&page));
                    // an immediate repeat can never have been evicted in between
                    if previous == Some(page) {
                        assert_eq!(Status::Hit, step.status);
                    }
                    previous = Some(page);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_lru_no_worse_with_more_frames() -> Result<()> {
    setup!();
    // LRU is a stack algorithm, adding frames never adds faults
    for seed in 0..10 {
        let references = random_references(seed, 150, 12);
        let mut last = u64::MAX;
        for frames in 1..=10 {
            let (faults, _) = paging::lru(&references, frames)?;
            assert!(faults <= last, "seed {} frames {}", seed, frames);
            last = faults;
        }
    }
    Ok(())
}

#[test]
fn test_enough_frames_only_compulsory_misses() -> Result<()> {
    setup!();
    let references = random_references(3, 100, 6);
    let mut distinct = references.clone();
    distinct.sort();
    distinct.dedup();
    for policy in [Policy::Fifo, Policy::Lru] {
        let report = policy.simulate(&references, distinct.len())?;
        assert_eq!(distinct.len() as u64, report.faults);
    }
    Ok(())
}

#[test]
fn test_malformed_reference_string() {
    setup!();
    assert!(parse_reference_string("1, 2, three").is_err());
    assert!(parse_reference_string("1;2").is_err());
}

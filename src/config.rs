use serde::Deserialize;

use crate::error::Result;
use crate::paging::Policy;
use crate::sched::{Algorithm, Ticks};
use crate::value_err;

/// Upper bound on the number of frames a paging run may be configured with.
pub const MAX_FRAMES: usize = 10;

#[derive(Debug, PartialEq, Deserialize)]
pub struct Config {
    pub log_level: String,

    pub algorithm: Algorithm,
    /// Time slice for round robin, ignored by the other algorithms.
    pub quantum: Ticks,

    pub policy: Policy,
    pub frames: usize,
}

impl Config {
    /// Load the configuration from the defaults, then `file` if given, then the
    /// `OSSIM_*` environment variables.
    pub fn new(file: &str) -> Result<Config> {
        let mut cfg = config::Config::builder()
            .set_default("log_level", "info")?
            .set_default("algorithm", "fcfs")?
            .set_default("quantum", 2)?
            .set_default("policy", "fifo")?
            .set_default("frames", 3)?;
        if !file.is_empty() {
            cfg = cfg.add_source(config::File::with_name(file))
        }
        cfg = cfg.add_source(config::Environment::with_prefix("OSSIM"));
        let cfg: Config = cfg.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.quantum == 0 {
            return Err(value_err!("quantum must be at least 1"));
        }
        if self.frames == 0 || self.frames > MAX_FRAMES {
            return Err(value_err!(
                "frames must be within [1, {}], got {}",
                MAX_FRAMES,
                self.frames
            ));
        }
        Ok(())
    }
}

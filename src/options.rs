use std::time::Duration;

use anyhow::{Context, Result};
use quadlife::{SeedMode, UpdateMode};

pub struct Args {
    matches: getopts::Matches,
    gens: Option<u64>,
    sleep: Option<u64>,
    rng_seed: Option<u64>,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "render in the terminal instead of a window");
        opts.optflag(
            "l",
            "legacy",
            "update cells in place over the interior instead of double-buffering",
        );
        opts.optflag("r", "random", "randomly drop cells from the seed pattern");
        opts.optopt("", "rng-seed", "seed for --random", "SEED");
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("", "log", "log filter, overrides RUST_LOG", "FILTER");
        opts
    }

    /// Parses `args` (without the program name). Returns `None` when help was printed.
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let opts = Self::options();
        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .context("invalid arguments")?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: quadlife [options]"));
            return Ok(None);
        }

        let gens = matches
            .opt_get("gens")
            .context("--gens expects a non-negative integer")?;
        let sleep = matches
            .opt_get("sleep")
            .context("--sleep expects milliseconds")?;
        let rng_seed = matches
            .opt_get("rng-seed")
            .context("--rng-seed expects an unsigned integer")?;

        Ok(Some(Self {
            matches,
            gens,
            sleep,
            rng_seed,
        }))
    }

    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }

    pub fn update_mode(&self) -> UpdateMode {
        if self.matches.opt_present("legacy") {
            UpdateMode::Legacy
        } else {
            UpdateMode::Buffered
        }
    }

    pub fn seed_mode(&self) -> SeedMode {
        if self.matches.opt_present("random") {
            SeedMode::Random
        } else {
            SeedMode::Pattern
        }
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// `None` means run until quit.
    pub fn generations(&self) -> Option<u64> {
        self.gens
    }

    pub fn sleep(&self) -> Option<Duration> {
        match self.sleep {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        }
    }

    pub fn log_filter(&self) -> Option<String> {
        self.matches.opt_str("log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::new(args).expect("valid args").expect("not help")
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);

        assert!(!args.console());
        assert_eq!(args.update_mode(), UpdateMode::Buffered);
        assert_eq!(args.seed_mode(), SeedMode::Pattern);
        assert_eq!(args.generations(), None);
        assert_eq!(args.sleep(), None);
        assert_eq!(args.rng_seed(), None);
        assert_eq!(args.log_filter(), None);
    }

    #[test]
    fn flags_select_modes() {
        let args = parse(&["--legacy", "-r", "--rng-seed", "12", "--log", "debug"]);

        assert_eq!(args.update_mode(), UpdateMode::Legacy);
        assert_eq!(args.seed_mode(), SeedMode::Random);
        assert_eq!(args.rng_seed(), Some(12));
        assert_eq!(args.log_filter().as_deref(), Some("debug"));
    }

    #[test]
    fn console_sleeps_by_default() {
        let args = parse(&["-c"]);
        assert_eq!(args.sleep(), Some(Duration::from_millis(100)));

        let args = parse(&["-c", "-s", "5", "-g", "30"]);
        assert_eq!(args.sleep(), Some(Duration::from_millis(5)));
        assert_eq!(args.generations(), Some(30));
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).expect("help parses").is_none());
    }

    #[test]
    fn bad_numbers_are_errors() {
        assert!(Args::new(&["--gens", "many"]).is_err());
        assert!(Args::new(&["--sleep", "-3"]).is_err());
        assert!(Args::new(&["--unknown"]).is_err());
    }
}

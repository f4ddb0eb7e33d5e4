use anyhow::{bail, Context, Result};

pub const DEFAULT_CYCLES: usize = 2000;

pub const USAGE: &str = "<num threads> <hashmap capacity> [cycles per thread] [key space]";

/// Settings for one stress run, read from positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressConfig {
    pub num_threads: usize,
    pub capacity: usize,
    pub cycles: usize,
    /// Keys are drawn from `0..key_space`, or from the whole `i32` range
    /// when unset.
    pub key_space: Option<u32>,
}

impl StressConfig {
    /// Parses arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        if args.len() < 2 {
            bail!("expected at least 2 arguments, got {}", args.len());
        }

        let num_threads: usize = args[0]
            .parse()
            .with_context(|| format!("invalid thread count {:?}", args[0]))?;
        if num_threads == 0 {
            bail!("thread count must be at least 1");
        }

        let capacity = args[1]
            .parse()
            .with_context(|| format!("invalid capacity {:?}", args[1]))?;

        let cycles = match args.get(2) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid cycle count {:?}", raw))?,
            None => DEFAULT_CYCLES,
        };

        let key_space = match args.get(3) {
            Some(raw) => {
                let space: u32 = raw
                    .parse()
                    .with_context(|| format!("invalid key space {:?}", raw))?;
                if space == 0 {
                    bail!("key space must be at least 1");
                }
                Some(space)
            }
            None => None,
        };

        Ok(StressConfig {
            num_threads,
            capacity,
            cycles,
            key_space,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StressConfig> {
        StressConfig::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn positional_arguments() {
        let config = parse(&["4", "100"]).unwrap();
        assert_eq!(
            config,
            StressConfig {
                num_threads: 4,
                capacity: 100,
                cycles: DEFAULT_CYCLES,
                key_space: None,
            }
        );

        let config = parse(&["2", "8", "50", "64"]).unwrap();
        assert_eq!(config.cycles, 50);
        assert_eq!(config.key_space, Some(64));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&["4"]).is_err());
        assert!(parse(&["0", "10"]).is_err());
        assert!(parse(&["four", "10"]).is_err());
        assert!(parse(&["4", "-1"]).is_err());
        assert!(parse(&["4", "10", "5", "0"]).is_err());
    }

    #[test]
    fn zero_capacity_is_left_to_the_map() {
        assert_eq!(parse(&["1", "0"]).unwrap().capacity, 0);
    }
}

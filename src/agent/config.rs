use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Learning rate used when `alpha=` is not given.
pub const DEFAULT_ALPHA: f32 = 0.0025;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for `{key}`: {value:?}")]
    InvalidNumber { key: String, value: String },
}

/// Agent settings parsed from whitespace-separated `key=value` tokens.
///
/// - `name`: display name (each agent has its own default).
/// - `seed`: seed for the agent's random source; entropy when absent.
/// - `alpha`: TD learning rate, default [`DEFAULT_ALPHA`]. `0` freezes the weights.
/// - `load`: weight file to start from (zeroed weights when absent).
/// - `save`: weight file written at shutdown.
///
/// Unknown keys are kept in `extra` and otherwise ignored. A later token
/// overrides an earlier one with the same key.
///
/// ```
/// use ntuple_2048::agent::AgentConfig;
/// let cfg: AgentConfig = "alpha=0.1 save=w.bin seed=7 foo=bar".parse().unwrap();
/// assert_eq!(cfg.alpha, 0.1);
/// assert_eq!(cfg.seed, Some(7));
/// assert_eq!(cfg.extra.get("foo").map(String::as_str), Some("bar"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub name: Option<String>,
    pub seed: Option<u64>,
    pub alpha: f32,
    pub load: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub extra: BTreeMap<String, String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { name: None, seed: None, alpha: DEFAULT_ALPHA, load: None, save: None, extra: BTreeMap::new() }
    }
}

impl FromStr for AgentConfig {
    type Err = ConfigError;

    fn from_str(args: &str) -> Result<Self, Self::Err> {
        let mut cfg = AgentConfig::default();
        for token in args.split_whitespace() {
            let (key, value) = token.split_once('=').unwrap_or((token, ""));
            match key {
                "name" => cfg.name = Some(value.to_string()),
                "seed" => cfg.seed = Some(parse_number(key, value)?),
                "alpha" => cfg.alpha = parse_number(key, value)?,
                "load" => cfg.load = Some(PathBuf::from(value)),
                "save" => cfg.save = Some(PathBuf::from(value)),
                _ => {
                    cfg.extra.insert(key.to_string(), value.to_string());
                }
            }
        }
        Ok(cfg)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key: key.to_string(), value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_gives_defaults() {
        let cfg: AgentConfig = "".parse().unwrap();
        assert_eq!(cfg, AgentConfig::default());
        assert_eq!(cfg.alpha, 0.0025);
    }

    #[test]
    fn parses_all_known_keys() {
        let cfg: AgentConfig = "name=td seed=42 alpha=0.5 load=in.bin save=out.bin".parse().unwrap();
        assert_eq!(cfg.name.as_deref(), Some("td"));
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.alpha, 0.5);
        assert_eq!(cfg.load, Some(PathBuf::from("in.bin")));
        assert_eq!(cfg.save, Some(PathBuf::from("out.bin")));
        assert!(cfg.extra.is_empty());
    }

    #[test]
    fn later_tokens_override_and_unknown_keys_are_kept() {
        let cfg: AgentConfig = "alpha=0.1  alpha=0 verbose mode=fast".parse().unwrap();
        assert_eq!(cfg.alpha, 0.0);
        assert_eq!(cfg.extra.get("verbose").map(String::as_str), Some(""));
        assert_eq!(cfg.extra.get("mode").map(String::as_str), Some("fast"));
    }

    #[test]
    fn value_may_contain_equals() {
        let cfg: AgentConfig = "save=dir/a=b.bin".parse().unwrap();
        assert_eq!(cfg.save, Some(PathBuf::from("dir/a=b.bin")));
    }

    #[test]
    fn bad_numbers_are_errors() {
        let err = "alpha=fast".parse::<AgentConfig>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidNumber { key: "alpha".into(), value: "fast".into() });
        assert!("seed=-3".parse::<AgentConfig>().is_err());
    }
}

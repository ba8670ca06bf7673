use std::fmt;
use std::path::PathBuf;

use tutor_core::model::TopicId;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidThreshold { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidThreshold { raw } => {
                write!(f, "invalid --threshold value: {raw} (expected 0-100)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  tutor [--topic <id>] [--threshold <0-100>] [--config <path>] [--catalog <path>] [-v|-vv|-vvv]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --threshold 70 (or quiz.pass_threshold from tutor.toml)");
    eprintln!("  --catalog   bundled topics");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_CONFIG, TUTOR_TOPIC, TUTOR_QUIZ__PASS_THRESHOLD, RUST_LOG");
}

/// Command-line options for a tutor session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub topic: Option<TopicId>,
    pub threshold: Option<u8>,
    pub verbose: u8,
    pub help: bool,
}

impl Args {
    /// Parse process arguments, falling back to `TUTOR_CONFIG` / `TUTOR_TOPIC`.
    pub fn from_env() -> Result<Self, ArgsError> {
        let parsed = Self::parse(std::env::args().skip(1))?;
        Ok(parsed.with_env_defaults(|key| std::env::var(key).ok()))
    }

    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    parsed.config = Some(PathBuf::from(require_value(&mut args, "--config")?));
                }
                "--catalog" => {
                    parsed.catalog = Some(PathBuf::from(require_value(&mut args, "--catalog")?));
                }
                "--topic" => {
                    parsed.topic = Some(TopicId::new(require_value(&mut args, "--topic")?));
                }
                "--threshold" => {
                    let value = require_value(&mut args, "--threshold")?;
                    let threshold = value
                        .trim()
                        .parse::<u8>()
                        .ok()
                        .filter(|threshold| *threshold <= 100)
                        .ok_or(ArgsError::InvalidThreshold { raw: value.clone() })?;
                    parsed.threshold = Some(threshold);
                }
                "-v" => parsed.verbose = parsed.verbose.saturating_add(1),
                "-vv" => parsed.verbose = parsed.verbose.saturating_add(2),
                "-vvv" => parsed.verbose = parsed.verbose.saturating_add(3),
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn with_env_defaults(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if self.config.is_none() {
            self.config = non_empty("TUTOR_CONFIG").map(PathBuf::from);
        }
        if self.topic.is_none() {
            self.topic = non_empty("TUTOR_TOPIC").map(TopicId::new);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn parses_all_flags() {
        let args = parse(&[
            "--topic", "hooks", "--threshold", "80", "--config", "my.toml", "-vv",
        ])
        .unwrap();
        assert_eq!(args.topic, Some(TopicId::new("hooks")));
        assert_eq!(args.threshold, Some(80));
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert_eq!(args.verbose, 2);
        assert!(!args.help);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&["--topic"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--topic" }
        );
        assert_eq!(
            parse(&["--threshold", "101"]).unwrap_err(),
            ArgsError::InvalidThreshold { raw: "101".into() }
        );
        assert_eq!(
            parse(&["--colour"]).unwrap_err(),
            ArgsError::UnknownArg("--colour".into())
        );
    }

    #[test]
    fn env_fills_only_missing_values() {
        let lookup = |key: &str| match key {
            "TUTOR_TOPIC" => Some("forms".to_string()),
            "TUTOR_CONFIG" => Some("  ".to_string()),
            _ => None,
        };
        let args = parse(&[]).unwrap().with_env_defaults(lookup);
        assert_eq!(args.topic, Some(TopicId::new("forms")));
        assert_eq!(args.config, None);

        let args = parse(&["--topic", "hooks"]).unwrap().with_env_defaults(lookup);
        assert_eq!(args.topic, Some(TopicId::new("hooks")));
    }
}

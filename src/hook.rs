use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use crate::error::HookError;

const VERB_POSITION: usize = 1;
const DOMAIN_POSITION: usize = 2;
const VALUE_POSITION: usize = 3;

/// lego's raw convention puts `--` where the domain belongs.
const RAW_MODE_MARKER: &str = "--";

/// The two lego hook verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Create (or update) the challenge record.
    Present,
    /// Remove the challenge record.
    Cleanup,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Self::Present => Method::PUT,
            Self::Cleanup => Method::DELETE,
        }
    }
}

impl FromStr for Verb {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "cleanup" => Ok(Self::Cleanup),
            other => Err(HookError::InvalidVerb(other.to_string())),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// Drops a single trailing dot from a fully qualified name.
pub fn normalize_domain(domain: &str) -> &str {
    domain.strip_suffix('.').unwrap_or(domain)
}

/// A validated `<verb> <domain> [<value>]` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub verb: Verb,
    pub domain: String,
    pub value: String,
}

impl Invocation {
    /// Reads `argv` (program name first) by fixed position: verb, domain,
    /// then the optional value. Nothing is treated as a flag, so `--` and
    /// `--help` land in whichever slot they were given in. Extra arguments
    /// are ignored.
    pub fn from_argv(argv: &[String]) -> Result<Self, HookError> {
        let provided = argv.len().saturating_sub(1);
        let arg = |index: usize| argv.get(index).map(String::as_str);

        let verb: Verb = required(arg(VERB_POSITION), VERB_POSITION, provided)?.parse()?;

        let domain = required(arg(DOMAIN_POSITION), DOMAIN_POSITION, provided)?;
        if domain == RAW_MODE_MARKER {
            return Err(HookError::RawMode);
        }

        Ok(Self {
            verb,
            domain: normalize_domain(domain).to_string(),
            value: arg(VALUE_POSITION).unwrap_or_default().to_string(),
        })
    }
}

fn required(arg: Option<&str>, index: usize, provided: usize) -> Result<&str, HookError> {
    match arg {
        None => Err(HookError::MissingArgument { index, provided }),
        Some("") => Err(HookError::EmptyArgument(index)),
        Some(value) => Ok(value),
    }
}

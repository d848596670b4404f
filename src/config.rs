use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::HookError;

pub const USER_VAR: &str = "LEGO_MIAB_USER";
pub const PASS_VAR: &str = "LEGO_MIAB_PASS";
pub const HOST_VAR: &str = "LEGO_MIAB_HOST";

/// Where the hook lives on disk. The log and env files sit beside it.
#[derive(Debug, Clone)]
pub struct ProgramPaths {
    program: PathBuf,
}

impl ProgramPaths {
    /// Absolute form of argv[0], falling back to the running executable.
    pub fn resolve(arg0: Option<&str>) -> Self {
        let program = arg0
            .filter(|a| !a.is_empty())
            .and_then(|a| std::path::absolute(a).ok())
            .or_else(|| env::current_exe().ok())
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_PKG_NAME")));
        Self { program }
    }

    pub fn log_file(&self) -> PathBuf {
        self.with_suffix(".log")
    }

    pub fn env_file(&self) -> PathBuf {
        self.with_suffix(".env")
    }

    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut path = self.program.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }
}

/// Variables read from the optional `.env` file.
#[derive(Debug, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Reads `path` if it exists. A missing or malformed file yields an
    /// empty set and never fails the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                debug!("No env file at {}", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Ignoring env file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        let mut vars = HashMap::new();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    vars.insert(key, value);
                }
                Err(e) => {
                    warn!("Ignoring env file {}: {}", path.display(), e);
                    return Self::default();
                }
            }
        }
        debug!("Loaded {} variable(s) from {}", vars.len(), path.display());
        Self { vars }
    }

    /// The process environment wins; the file only fills in what is unset.
    pub fn lookup(&self, name: &str) -> Option<String> {
        env::var(name).ok().or_else(|| self.vars.get(name).cloned())
    }
}

/// Credentials and host of the Mail-in-a-Box admin API.
#[derive(Debug, Clone)]
pub struct Settings {
    pub user: String,
    pub pass: String,
    pub host: String,
}

impl Settings {
    /// Reads the three required variables in order, failing on the first one
    /// that is unset. An empty value counts as set.
    pub fn resolve<F>(lookup: F, program: &str) -> Result<Self, HookError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name).ok_or_else(|| HookError::MissingEnv {
                name,
                program: program.to_string(),
            })
        };

        Ok(Self {
            user: require(USER_VAR)?,
            pass: require(PASS_VAR)?,
            host: require(HOST_VAR)?,
        })
    }
}

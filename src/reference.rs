use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing::warn;

/// Names closer than this to a known keeper are flagged as wicketkeepers.
pub const KEEPER_SIMILARITY_CUTOFF: f64 = 0.7;

const DEFAULT_KEEPERS: [&str; 12] = [
    "AJ Healy",
    "AE Jones",
    "Richa Ghosh",
    "Muneeba Ali",
    "T Chetty",
    "Yastika Bhatia",
    "Alyssa Healy",
    "Amy Jones",
    "B Mooney",
    "SJ McGlashan",
    "TC Beaumont",
    "N de Klerk",
];

const INTERNATIONAL_TEAMS: [&str; 10] = [
    "Australia",
    "England",
    "India",
    "New Zealand",
    "South Africa",
    "Pakistan",
    "West Indies",
    "Sri Lanka",
    "Bangladesh",
    "Ireland",
];

#[derive(Debug, Clone)]
pub struct KeeperList {
    names: Vec<String>,
}

impl KeeperList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| normalize_name(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_KEEPERS)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_keeper(&self, name: &str) -> bool {
        let name = normalize_name(name);
        if name.is_empty() {
            return false;
        }
        self.names
            .iter()
            .any(|k| similarity(&name, k) >= KEEPER_SIMILARITY_CUTOFF)
    }
}

/// Process-wide keeper list: `SQUADMIND_KEEPERS_PATH` (a JSON array of names)
/// when set and readable, else the built-in list.
pub fn keepers() -> &'static KeeperList {
    static KEEPERS: OnceLock<KeeperList> = OnceLock::new();
    KEEPERS.get_or_init(|| match keepers_path_override() {
        Some(path) => load_keepers(&path).unwrap_or_else(|err| {
            warn!("keeper override unusable, using built-in list: {err:#}");
            KeeperList::builtin()
        }),
        None => KeeperList::builtin(),
    })
}

pub fn load_keepers(path: &Path) -> Result<KeeperList> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read keeper list {}", path.display()))?;
    let names = serde_json::from_str::<Vec<String>>(&raw)
        .with_context(|| format!("parse keeper list {}", path.display()))?;
    Ok(KeeperList::new(names))
}

fn keepers_path_override() -> Option<PathBuf> {
    env::var("SQUADMIND_KEEPERS_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

pub fn is_international_team(team: &str) -> bool {
    INTERNATIONAL_TEAMS.contains(&team)
}

pub fn international_teams() -> &'static [&'static str] {
    &INTERNATIONAL_TEAMS
}

/// Lowercase, keep letters and digits, collapse everything else into a single
/// space.
pub fn normalize_name(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut prev_space = false;
    for ch in lower.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            prev_space = false;
        } else if !prev_space && !out.is_empty() {
            out.push(' ');
            prev_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Normalized Levenshtein similarity in [0, 1]. Callers pass names that
/// already went through `normalize_name`.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

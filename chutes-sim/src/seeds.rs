use anyhow::{Result, bail};
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_SEED: u64 = 1337;

/// One requested simulation run: a fixed seed or a fresh entropy stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedInput {
    Fixed(u64),
    Random,
}

impl SeedInput {
    #[must_use]
    pub const fn seed(self) -> Option<u64> {
        match self {
            Self::Fixed(seed) => Some(seed),
            Self::Random => None,
        }
    }
}

impl fmt::Display for SeedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(seed) => write!(f, "{seed}"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// Resolve CLI seed tokens into the runs to perform.
///
/// Accepts integers (negative values use their magnitude) and the keyword
/// `random`, which asks for an entropy-seeded run each time it appears.
/// Duplicate numeric seeds collapse to their first occurrence; an empty list
/// falls back to [`DEFAULT_SEED`].
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInput>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("random") {
            resolved.push(SeedInput::Random);
            continue;
        }

        let seed = if let Ok(value) = token.parse::<i64>() {
            value.unsigned_abs()
        } else if let Ok(value) = token.parse::<u64>() {
            value
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        if seen.insert(seed) {
            resolved.push(SeedInput::Fixed(seed));
        }
    }

    if resolved.is_empty() {
        resolved.push(SeedInput::Fixed(DEFAULT_SEED));
    }

    Ok(resolved)
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Starting hands win probabilities.
//!
//! One table for each number of players from 2 to 10, each table maps a
//! starting hand key (see [hand_key](crate::hand_key)) to the percentage of
//! hands won by that starting hand at a table with that number of players.
//!
//! Tables are loaded from text files named `<players>players.stat` with one
//! `<key> <probability>` record per line.
use ahash::AHashMap;
use std::{
    fs, io,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::hand_key;

/// The number of players with statistics.
pub const PLAYERS: RangeInclusive<usize> = 2..=10;

/// Statistics shipped with the bot.
const BUILTIN: [(usize, &str); 9] = [
    (2, include_str!("../stats/2players.stat")),
    (3, include_str!("../stats/3players.stat")),
    (4, include_str!("../stats/4players.stat")),
    (5, include_str!("../stats/5players.stat")),
    (6, include_str!("../stats/6players.stat")),
    (7, include_str!("../stats/7players.stat")),
    (8, include_str!("../stats/8players.stat")),
    (9, include_str!("../stats/9players.stat")),
    (10, include_str!("../stats/10players.stat")),
];

/// Statistics loading and lookup errors.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A statistics file could not be read.
    #[error("cannot read {path:?}: {source}")]
    Io {
        /// The file path.
        path: PathBuf,
        /// The read error.
        source: io::Error,
    },
    /// A record is not a `<key> <probability>` pair.
    #[error("{source_name}:{line}: malformed record {record:?}")]
    Malformed {
        /// The statistics source.
        source_name: String,
        /// The line number.
        line: usize,
        /// The bad record.
        record: String,
    },
    /// A probability is not a percentage.
    #[error("{source_name}:{line}: probability {value} is not in 0..=100")]
    Probability {
        /// The statistics source.
        source_name: String,
        /// The line number.
        line: usize,
        /// The bad value.
        value: f64,
    },
    /// A table for a number of players is missing.
    #[error("missing statistics for {0} players")]
    MissingTable(usize),
    /// The number of players has no statistics.
    #[error("invalid number of players {0}, expected 2..=10")]
    InvalidPlayers(usize),
}

/// Starting hands win probabilities for each number of players.
#[derive(Debug)]
pub struct StartingHands {
    tables: Vec<AHashMap<String, f64>>,
}

impl StartingHands {
    /// Loads the statistics shipped with the bot.
    pub fn builtin() -> Result<Self, StatsError> {
        Self::from_sources(
            BUILTIN
                .iter()
                .map(|(players, text)| (*players, format!("builtin:{players}players.stat"), *text)),
        )
    }

    /// Loads the statistics files from a directory.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, StatsError> {
        let dir = dir.as_ref();
        let mut sources = Vec::with_capacity(PLAYERS.count());
        for players in PLAYERS {
            let path = dir.join(format!("{players}players.stat"));
            let text = fs::read_to_string(&path).map_err(|source| StatsError::Io {
                path: path.clone(),
                source,
            })?;

            sources.push((players, path.display().to_string(), text));
        }

        Self::from_sources(
            sources
                .iter()
                .map(|(players, name, text)| (*players, name.clone(), text.as_str())),
        )
    }

    /// Creates the statistics from `(players, source name, text)` sources, there
    /// must be a source for each number of players.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = (usize, String, &'a str)>,
    {
        let mut tables = vec![None; PLAYERS.count()];
        for (players, name, text) in sources {
            if !PLAYERS.contains(&players) {
                return Err(StatsError::InvalidPlayers(players));
            }

            tables[players - PLAYERS.start()] = Some(parse_table(&name, text)?);
        }

        let tables = tables
            .into_iter()
            .zip(PLAYERS)
            .map(|(table, players)| table.ok_or(StatsError::MissingTable(players)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tables })
    }

    /// Returns the win probability percentage for a starting hand key at a
    /// table with the given number of players, or `None` if the key is not in
    /// the statistics.
    pub fn lookup(&self, key: &str, players: usize) -> Result<Option<f64>, StatsError> {
        if !PLAYERS.contains(&players) {
            return Err(StatsError::InvalidPlayers(players));
        }

        Ok(self.tables[players - PLAYERS.start()].get(key).copied())
    }

    /// The number of starting hands for the given number of players.
    pub fn len(&self, players: usize) -> usize {
        self.table(players).map(|t| t.len()).unwrap_or(0)
    }

    fn table(&self, players: usize) -> Option<&AHashMap<String, f64>> {
        PLAYERS
            .contains(&players)
            .then(|| &self.tables[players - PLAYERS.start()])
    }
}

/// Parses a statistics table.
fn parse_table(source_name: &str, text: &str) -> Result<AHashMap<String, f64>, StatsError> {
    let mut table = AHashMap::with_capacity(169);

    for (idx, record) in text.lines().enumerate() {
        if record.trim().is_empty() {
            continue;
        }

        let malformed = || StatsError::Malformed {
            source_name: source_name.to_string(),
            line: idx + 1,
            record: record.to_string(),
        };

        let mut fields = record.split_whitespace();
        let (Some(key), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed());
        };

        if !hand_key::is_canonical(key) {
            return Err(malformed());
        }

        let value = value.parse::<f64>().map_err(|_| malformed())?;
        if !(0.0..=100.0).contains(&value) {
            return Err(StatsError::Probability {
                source_name: source_name.to_string(),
                line: idx + 1,
                value,
            });
        }

        table.insert(key.to_string(), value);
    }

    Ok(table)
}

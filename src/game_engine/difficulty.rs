//! Parsing of the overloaded difficulty spec string.
//!
//! | Form | Used by | Example |
//! |------|---------|---------|
//! | flat tag | most games | `"HARD"` |
//! | `REGION\|DIFFICULTY` | flag / map quiz | `"EUROPE\|EASY"` |
//! | `TABLE_n` | multiplication | `"TABLE_7"` |
//!
//! Parsing is lenient: unknown input falls back to a default rather than
//! failing, because the spec string comes straight from UI selection.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::game_engine::catalog::Continent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Difficulty> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY"   => Some(Difficulty::Easy),
            "MEDIUM" => Some(Difficulty::Medium),
            "HARD"   => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Flat difficulty with MEDIUM for anything unrecognised.
    pub fn from_spec(s: &str) -> Difficulty {
        Difficulty::parse(s).unwrap_or(Difficulty::Medium)
    }

    /// Highest catalog tier admitted at this difficulty.
    pub fn max_tier(self) -> u8 {
        match self {
            Difficulty::Easy   => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard   => 3,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Difficulty::Easy   => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard   => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Region selector for geography games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    World,
    Continent(Continent),
}

impl Region {
    pub fn parse(s: &str) -> Option<Region> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("WORLD") {
            return Some(Region::World);
        }
        Continent::parse(s).map(Region::Continent)
    }
}

/// `REGION|DIFFICULTY`. Without a `|` the whole string is the region and the
/// difficulty is MEDIUM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoSpec {
    /// `None` when the region tag is unknown; such specs match no region and
    /// draw from the whole catalog.
    pub region: Option<Region>,
    pub difficulty: Difficulty,
}

impl GeoSpec {
    pub fn parse(spec: &str) -> GeoSpec {
        let mut parts = spec.split('|');
        let region = parts.next().and_then(Region::parse);
        let difficulty = parts.next().map(Difficulty::from_spec).unwrap_or(Difficulty::Medium);
        GeoSpec { region, difficulty }
    }
}

/// Which multiplication facts to drill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSpec {
    Single(u32),
    Range(RangeInclusive<u32>),
}

impl TableSpec {
    const DEFAULT_TABLE: u32 = 7;
    /// Largest table accepted from `TABLE_n`.
    pub const MAX_TABLE: u32 = 99;

    pub fn parse(spec: &str) -> TableSpec {
        let spec = spec.trim();
        if let Some(n) = spec.strip_prefix("TABLE_") {
            let table = n
                .parse()
                .ok()
                .filter(|t| (1..=Self::MAX_TABLE).contains(t))
                .unwrap_or(Self::DEFAULT_TABLE);
            return TableSpec::Single(table);
        }
        match Difficulty::parse(spec) {
            Some(Difficulty::Easy)   => TableSpec::Range(1..=5),
            Some(Difficulty::Medium) => TableSpec::Range(6..=10),
            Some(Difficulty::Hard)   => TableSpec::Range(11..=15),
            None                     => TableSpec::Range(2..=9),
        }
    }

    pub fn tables(&self) -> RangeInclusive<u32> {
        match self {
            TableSpec::Single(t) => *t..=*t,
            TableSpec::Range(r)  => r.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_spec_splits_region_and_difficulty() {
        let spec = GeoSpec::parse("EUROPE|EASY");
        assert_eq!(spec.region, Some(Region::Continent(Continent::Europe)));
        assert_eq!(spec.difficulty, Difficulty::Easy);
    }

    #[test]
    fn geo_spec_without_pipe_defaults_to_medium() {
        let spec = GeoSpec::parse("WORLD");
        assert_eq!(spec.region, Some(Region::World));
        assert_eq!(spec.difficulty, Difficulty::Medium);
    }

    #[test]
    fn geo_spec_with_unknown_region() {
        let spec = GeoSpec::parse("HARD");
        assert_eq!(spec.region, None);
        assert_eq!(spec.difficulty, Difficulty::Medium);
    }

    #[test]
    fn table_spec_forms() {
        assert_eq!(TableSpec::parse("TABLE_9").tables(), 9..=9);
        assert_eq!(TableSpec::parse("TABLE_x").tables(), 7..=7);
        assert_eq!(TableSpec::parse("EASY").tables(), 1..=5);
        assert_eq!(TableSpec::parse("HARD").tables(), 11..=15);
        assert_eq!(TableSpec::parse("whatever").tables(), 2..=9);
    }

    #[test]
    fn out_of_range_tables_fall_back_to_seven() {
        assert_eq!(TableSpec::parse("TABLE_99").tables(), 99..=99);
        assert_eq!(TableSpec::parse("TABLE_100").tables(), 7..=7);
        assert_eq!(TableSpec::parse("TABLE_0").tables(), 7..=7);
        assert_eq!(TableSpec::parse("TABLE_999999999").tables(), 7..=7);
    }
}

//! FLAG_QUIZ and MAP_QUIZ: name the country.
//!
//! Both read a `REGION|DIFFICULTY` spec and draw from the same catalog. The
//! difficulty caps the tier; each instance remembers the codes it has asked
//! so a session does not repeat a country until its pool runs dry. The pick
//! relaxes in this order:
//!
//! 1. unused, in region, within tier
//! 2. unused, in region, any tier
//! 3. in region, within tier (repeats allowed)
//! 4. in region, any tier
//! 5. the whole catalog

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::warn;

use crate::game_engine::catalog::{self, Country, COUNTRIES, FALLBACK_MAP_ASSET, FALLBACK_MAP_COUNTRY};
use crate::game_engine::difficulty::GeoSpec;
use crate::game_engine::helpers::{fill_options, question_id};
use crate::game_engine::models::{GameType, Question};
use crate::game_engine::strategies::QuestionStrategy;

/// Per-session memory of asked countries.
#[derive(Debug, Clone, Default)]
struct CountryPicker {
    used: HashSet<&'static str>,
}

impl CountryPicker {
    /// Candidates for the next question, already restricted to `eligible`.
    fn candidates(
        &self,
        spec: GeoSpec,
        eligible: impl Fn(&Country) -> bool,
    ) -> Vec<&'static Country> {
        let region: Vec<&'static Country> = catalog::countries_in(spec.region)
            .filter(|c| eligible(c))
            .collect();
        let max_tier = spec.difficulty.max_tier();
        let within_tier = |c: &&'static Country| c.tier <= max_tier;
        let unused = |c: &&'static Country| !self.used.contains(c.code);

        let cascade: [Vec<&'static Country>; 4] = [
            region.iter().copied().filter(within_tier).filter(unused).collect(),
            region.iter().copied().filter(unused).collect(),
            region.iter().copied().filter(within_tier).collect(),
            region.clone(),
        ];
        cascade
            .into_iter()
            .find(|pool| !pool.is_empty())
            .unwrap_or_else(|| COUNTRIES.iter().filter(|c| eligible(c)).collect())
    }

    fn mark_used(&mut self, country: &'static Country) {
        self.used.insert(country.code);
    }
}

/// Three other display names from the whole catalog.
fn country_options(rng: &mut dyn RngCore, answer: &'static Country) -> Vec<String> {
    fill_options(
        rng,
        answer.display_name().to_string(),
        |r| COUNTRIES.choose(r).map(|c| c.display_name().to_string()),
        COUNTRIES.iter().map(|c| c.display_name().to_string()),
    )
}

// ---------------------------------------------------------------------------
// FLAG_QUIZ
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct FlagQuizStrategy {
    picker: CountryPicker,
}

impl QuestionStrategy for FlagQuizStrategy {
    fn game_type(&self) -> GameType {
        GameType::FlagQuiz
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let spec = GeoSpec::parse(difficulty);
        let id = question_id(rng, GameType::FlagQuiz);

        let pool = self.picker.candidates(spec, |_| true);
        let country = match pool.choose(rng) {
            Some(c) => *c,
            // The catalog is never empty; this only guards the type.
            None => &COUNTRIES[0],
        };
        self.picker.mark_used(country);

        let options = country_options(rng, country);
        Question::multiple_choice(id, country.flag_emoji(), options, country.display_name())
    }

    fn duration_seconds(&self) -> u32 {
        60
    }

    fn target_question_count(&self) -> u32 {
        15
    }
}

// ---------------------------------------------------------------------------
// MAP_QUIZ
// ---------------------------------------------------------------------------

/// Outline map shown as an image; only countries with a map asset qualify.
#[derive(Debug, Clone, Default)]
pub struct MapQuizStrategy {
    picker: CountryPicker,
}

impl MapQuizStrategy {
    fn fallback() -> (&'static Country, &'static str) {
        let country = catalog::find(FALLBACK_MAP_COUNTRY).unwrap_or(&COUNTRIES[0]);
        let asset = catalog::map_asset(country.code).unwrap_or(FALLBACK_MAP_ASSET);
        (country, asset)
    }

    /// First country in a shuffled `pool` that has a map, else the fallback.
    fn pick_mapped(
        rng: &mut dyn RngCore,
        mut pool: Vec<&'static Country>,
        difficulty: &str,
    ) -> (&'static Country, &'static str) {
        pool.shuffle(rng);
        pool.iter()
            .find_map(|c| c.map_asset().map(|asset| (*c, asset)))
            .unwrap_or_else(|| {
                warn!(target: "strategy", spec = difficulty, "no map asset in pool, using fallback");
                Self::fallback()
            })
    }
}

impl QuestionStrategy for MapQuizStrategy {
    fn game_type(&self) -> GameType {
        GameType::MapQuiz
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let spec = GeoSpec::parse(difficulty);
        let id = question_id(rng, GameType::MapQuiz);

        let pool = self.picker.candidates(spec, |c| c.map_asset().is_some());
        let (country, asset) = Self::pick_mapped(rng, pool, difficulty);
        self.picker.mark_used(country);

        let options = country_options(rng, country);
        Question::multiple_choice(id, "", options, country.display_name()).with_image(asset)
    }

    fn duration_seconds(&self) -> u32 {
        60
    }

    fn target_question_count(&self) -> u32 {
        15
    }

    /// Countries in the region that have a map, at least 1.
    fn max_questions(&self, difficulty: &str) -> u32 {
        let spec = GeoSpec::parse(difficulty);
        let with_map = catalog::countries_in(spec.region)
            .filter(|c| c.map_asset().is_some())
            .count();
        (with_map as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::catalog::Continent;
    use crate::game_engine::difficulty::Region;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn code_of(name: &str) -> &'static str {
        COUNTRIES.iter().find(|c| c.display_name() == name).map(|c| c.code).unwrap()
    }

    #[test]
    fn flag_quiz_does_not_repeat_until_the_pool_is_used() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = FlagQuizStrategy::default();
        let pool_size = catalog::countries_in(Some(Region::Continent(Continent::Europe))).count();

        let mut seen = HashSet::new();
        for _ in 0..pool_size {
            let q = s.generate_question(&mut rng, "EUROPE|EASY");
            let code = code_of(&q.answer);
            assert!(seen.insert(code), "{code} repeated early");
            assert_eq!(catalog::find(code).unwrap().continent, Continent::Europe);
        }
    }

    #[test]
    fn flag_quiz_prefers_the_requested_tier() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut s = FlagQuizStrategy::default();
        let easy = catalog::countries_in(Some(Region::World)).filter(|c| c.tier == 1).count();
        for _ in 0..easy {
            let q = s.generate_question(&mut rng, "WORLD|EASY");
            assert_eq!(catalog::find(code_of(&q.answer)).unwrap().tier, 1);
            assert_eq!(q.prompt, catalog::find(code_of(&q.answer)).unwrap().flag_emoji());
        }
        // Tier 1 exhausted: next pick relaxes to harder tiers, still unused.
        let q = s.generate_question(&mut rng, "WORLD|EASY");
        assert!(catalog::find(code_of(&q.answer)).unwrap().tier > 1);
    }

    #[test]
    fn options_contain_the_answer_once() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = FlagQuizStrategy::default();
        for _ in 0..50 {
            let q = s.generate_question(&mut rng, "ASIA|HARD");
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.options.iter().filter(|o| **o == q.answer).count(), 1);
        }
    }

    #[test]
    fn map_quiz_only_asks_countries_with_a_map() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut s = MapQuizStrategy::default();
        let max = s.max_questions("AMERICAS|HARD");
        assert!(max >= 1);

        let mut seen = HashSet::new();
        for _ in 0..max {
            let q = s.generate_question(&mut rng, "AMERICAS|HARD");
            assert!(q.prompt.is_empty());
            let code = code_of(&q.answer);
            assert_eq!(q.image_res.as_deref(), catalog::map_asset(code));
            assert!(seen.insert(code), "{code} repeated early");
        }
    }

    #[test]
    fn map_pick_without_any_mapped_country_falls_back_to_australia() {
        let mut rng = StdRng::seed_from_u64(8);
        let unmapped: Vec<&'static Country> = COUNTRIES.iter().filter(|c| c.map_asset().is_none()).collect();
        assert!(!unmapped.is_empty());

        for pool in [unmapped, Vec::new()] {
            let (country, asset) = MapQuizStrategy::pick_mapped(&mut rng, pool, "WORLD|EASY");
            assert_eq!(country.code, FALLBACK_MAP_COUNTRY);
            assert_eq!(Some(asset), catalog::map_asset(FALLBACK_MAP_COUNTRY));
        }
    }

    #[test]
    fn map_pick_skips_unmapped_countries() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut pool: Vec<&'static Country> = COUNTRIES.iter().filter(|c| c.map_asset().is_none()).take(5).collect();
        let france = catalog::find("FR").unwrap();
        pool.push(france);
        let (country, asset) = MapQuizStrategy::pick_mapped(&mut rng, pool, "EUROPE|EASY");
        assert_eq!(country.code, "FR");
        assert_eq!(Some(asset), catalog::map_asset("FR"));
    }

    #[test]
    fn map_max_questions_counts_assets_in_region() {
        let s = MapQuizStrategy::default();
        let oceania = catalog::countries_in(Some(Region::Continent(Continent::Oceania)))
            .filter(|c| c.map_asset().is_some())
            .count() as u32;
        assert_eq!(s.max_questions("OCEANIA"), oceania.max(1));
        assert_eq!(s.max_questions("WORLD|EASY"), catalog::MAP_ASSETS.len() as u32);
    }
}

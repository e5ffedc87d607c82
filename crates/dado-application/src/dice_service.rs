//! Use cases behind every user action.
//!
//! `DiceService` is the composition point: it owns the configured dice, the
//! random source, the clock and the history store. Each front-end action
//! maps to exactly one method call.

use std::path::PathBuf;

use dado_core::DiceError;
use dado_core::assets::AssetCatalog;
use dado_core::config::RootConfig;
use dado_core::dice::{
    DiceSet, RandomSource, RollOutcome, RollRequest, SeededRandom, SumOutcome, dice_count,
    parse_modifier, roll_sum,
};
use dado_core::error::Result;
use dado_core::history::{HistoryEntry, HistoryLog, HistoryRepository, HistoryStore};
use dado_infrastructure::{ConfigService, JsonHistoryRepository};

use crate::clock::{Clock, SystemClock};

/// What a single roll produced and what was recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollReport {
    pub request: RollRequest,
    pub outcome: RollOutcome,
    pub entry: HistoryEntry,
}

pub struct DiceService<R> {
    dice: DiceSet,
    assets: AssetCatalog,
    max_dice_per_roll: u32,
    history: HistoryStore<R>,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl DiceService<JsonHistoryRepository> {
    /// Loads configuration and history from disk.
    ///
    /// `history_file` overrides both the configured and the default history
    /// location.
    pub fn open(config_service: &ConfigService, history_file: Option<PathBuf>) -> Result<Self> {
        let config = config_service.load()?;
        let history_path = match history_file {
            Some(path) => path,
            None => config_service.history_path(&config)?,
        };
        tracing::info!("[DiceService] Using history file {:?}", history_path);

        Self::new(&config, JsonHistoryRepository::with_path(history_path))
    }
}

impl<R: HistoryRepository> DiceService<R> {
    /// Builds the service with an entropy-seeded PRNG and the system clock.
    pub fn new(config: &RootConfig, repository: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dice: config.dice_set()?,
            assets: config.asset_catalog(),
            max_dice_per_roll: config.max_dice_per_roll,
            history: HistoryStore::load(repository),
            rng: Box::new(SeededRandom::from_entropy()),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Rolls the die named `label` with the modifier typed by the user.
    ///
    /// Text that is not an integer, or does not fit an `i32`, is treated as
    /// no modifier.
    pub fn roll(&mut self, label: &str, modifier_text: &str) -> Result<RollReport> {
        let modifier = parse_modifier(modifier_text);
        let trimmed = modifier_text.trim();
        if !trimmed.is_empty() && trimmed.parse::<i32>().is_err() {
            let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
            let reason = if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                "is out of range"
            } else {
                "is not an integer"
            };
            tracing::debug!(
                "[DiceService] Modifier '{}' {}, rolling without one",
                modifier_text,
                reason
            );
        }
        self.roll_with_modifier(label, modifier)
    }

    /// Rolls and records one die. The result is only returned once the
    /// history write succeeded.
    pub fn roll_with_modifier(&mut self, label: &str, modifier: i32) -> Result<RollReport> {
        let die = self.dice.get(label)?.clone();
        self.check_dice_limit(dice_count(modifier) as u64)?;

        let request = RollRequest::new(die, modifier);
        let outcome = request.roll(self.rng.as_mut())?;
        let entry = HistoryEntry::from_roll(&self.clock.now(), &request, &outcome);

        self.history.append(entry.clone())?;
        tracing::info!(
            "[DiceService] Rolled {} (modifier {}): {} from {:?}",
            request.die.label(),
            modifier,
            outcome.final_value,
            outcome.all_rolls
        );

        Ok(RollReport {
            request,
            outcome,
            entry,
        })
    }

    /// Rolls a mix of dice and adds them up. Sums are not recorded.
    pub fn roll_sum<S: AsRef<str>>(&mut self, counts: &[(S, u32)]) -> Result<SumOutcome> {
        let resolved = self.dice.resolve_counts(counts)?;
        let requested: u64 = resolved.iter().map(|(_, count)| u64::from(*count)).sum();
        self.check_dice_limit(requested)?;

        let outcome = roll_sum(self.rng.as_mut(), &resolved);
        tracing::info!(
            "[DiceService] Summed {} dice: {}",
            outcome.details.len(),
            outcome.total
        );
        Ok(outcome)
    }

    pub fn history(&self) -> &HistoryLog {
        self.history.log()
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn assets(&self) -> &AssetCatalog {
        &self.assets
    }

    fn check_dice_limit(&self, requested: u64) -> Result<()> {
        if requested > u64::from(self.max_dice_per_roll) {
            return Err(DiceError::TooManyDice {
                requested,
                max: self.max_dice_per_roll,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use dado_core::dice::SequenceRandom;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct SharedRepository {
        stored: Rc<RefCell<HistoryLog>>,
    }

    impl HistoryRepository for SharedRepository {
        fn load(&self) -> Result<HistoryLog> {
            Ok(self.stored.borrow().clone())
        }

        fn save(&self, log: &HistoryLog) -> Result<()> {
            *self.stored.borrow_mut() = log.clone();
            Ok(())
        }
    }

    fn service(values: Vec<u32>) -> (DiceService<SharedRepository>, SharedRepository) {
        let repo = SharedRepository::default();
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap();
        let service = DiceService::new(&RootConfig::default(), repo.clone())
            .unwrap()
            .with_random(SequenceRandom::new(values))
            .with_clock(FixedClock(at));
        (service, repo)
    }

    #[test]
    fn test_roll_records_history() {
        let (mut service, repo) = service(vec![4, 9]);

        let report = service.roll("d12", "-2").unwrap();
        assert_eq!(report.outcome.final_value, 4);
        assert_eq!(report.outcome.all_rolls, vec![4, 9]);
        assert_eq!(
            report.entry,
            HistoryEntry::new("05/03/2024 14:07:09", "D12", -2, 4, vec![4, 9])
        );

        assert_eq!(service.history().last(), Some(&report.entry));
        assert_eq!(repo.stored.borrow().len(), 1);
    }

    #[test]
    fn test_invalid_modifier_text_rolls_once() {
        let (mut service, _) = service(vec![15, 2]);

        let report = service.roll("D20", "lots").unwrap();
        assert_eq!(report.request.modifier, 0);
        assert_eq!(report.outcome.all_rolls, vec![15]);
        assert_eq!(report.entry.modifier(), 0);
    }

    #[test]
    fn test_out_of_range_modifier_rolls_once() {
        let (mut service, _) = service(vec![9, 4]);

        let report = service.roll("D10", "3000000000").unwrap();
        assert_eq!(report.request.modifier, 0);
        assert_eq!(report.outcome.all_rolls, vec![9]);

        let report = service.roll("D10", "-3000000000").unwrap();
        assert_eq!(report.entry.modifier(), 0);
        assert_eq!(report.outcome.all_rolls.len(), 1);
    }

    #[test]
    fn test_unknown_die_is_rejected_without_recording() {
        let (mut service, repo) = service(vec![1]);

        assert_eq!(
            service.roll("D7", "0").unwrap_err(),
            DiceError::unknown_die("D7")
        );
        assert!(repo.stored.borrow().is_empty());
    }

    #[test]
    fn test_modifier_above_limit_is_rejected() {
        let (mut service, _) = service(vec![1]);

        let err = service.roll_with_modifier("D6", -101).unwrap_err();
        assert_eq!(
            err,
            DiceError::TooManyDice {
                requested: 101,
                max: 100
            }
        );
        assert!(service.history().is_empty());
    }

    #[test]
    fn test_sum_is_not_recorded() {
        let (mut service, repo) = service(vec![3, 5, 2]);

        let outcome = service.roll_sum(&[("D6", 2), ("D4", 1)]).unwrap();
        assert_eq!(outcome.total, 10);
        assert_eq!(outcome.details_line(), "D6:3 | D6:5 | D4:2");
        assert!(repo.stored.borrow().is_empty());
    }

    #[test]
    fn test_sum_limit_counts_all_dice() {
        let (mut service, _) = service(vec![1]);
        assert!(matches!(
            service.roll_sum(&[("D6", 60), ("D4", 41)]),
            Err(DiceError::TooManyDice { requested: 101, .. })
        ));
    }

    #[test]
    fn test_clear_history() {
        let (mut service, repo) = service(vec![6]);
        service.roll("D8", "").unwrap();
        service.clear_history().unwrap();

        assert!(service.history().is_empty());
        assert!(repo.stored.borrow().is_empty());
    }

    #[test]
    fn test_history_is_loaded_at_start() {
        let repo = SharedRepository::default();
        *repo.stored.borrow_mut() = HistoryLog::from_entries(vec![HistoryEntry::new(
            "01/01/2024 00:00:00",
            "D4",
            0,
            2,
            vec![2],
        )]);

        let service = DiceService::new(&RootConfig::default(), repo).unwrap();
        assert_eq!(service.history().len(), 1);
    }
}

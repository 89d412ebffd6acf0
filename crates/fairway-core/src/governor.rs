//! Daily bound on AI swing analyses

use chrono::NaiveDate;
use fairway_api::UsageCounter;
use fairway_store::{RecordKey, RecordStore, RecordStoreExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tracks how many analyses were consumed today.
///
/// The counter resets lazily: whenever it is loaded or checked on a day other
/// than the stored one, it starts again from zero and is persisted at once.
pub struct UsageGovernor {
    store: Arc<dyn RecordStore>,
    limit: u32,
    counter: UsageCounter,
}

impl UsageGovernor {
    /// Load the stored counter. Missing or unreadable records start a fresh day.
    pub fn load(store: Arc<dyn RecordStore>, limit: u32, today: NaiveDate) -> Self {
        let stored: Option<UsageCounter> = store.load_record(RecordKey::Usage);

        let mut governor = Self {
            store,
            limit,
            counter: UsageCounter::fresh(today),
        };

        match stored {
            Some(counter) if counter.is_for(today) => {
                debug!(date = %today, count = counter.count, "Loaded usage counter");
                governor.counter = counter;
            }
            Some(counter) => {
                info!(
                    stored_date = %counter.date,
                    date = %today,
                    "New day, usage counter reset"
                );
                governor.persist();
            }
            None => governor.persist(),
        }

        governor
    }

    /// Consume one analysis if today's limit allows it.
    ///
    /// A denied call leaves the counter untouched.
    pub fn check_and_consume(&mut self, today: NaiveDate) -> bool {
        self.roll_over(today);

        if self.counter.count >= self.limit {
            info!(count = self.counter.count, limit = self.limit, "Analysis denied, daily limit reached");
            return false;
        }

        self.counter.count += 1;
        self.persist();
        info!(count = self.counter.count, limit = self.limit, "Analysis allowed");
        true
    }

    /// Analyses consumed on the counter's day
    pub fn count(&self) -> u32 {
        self.counter.count
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Analyses still available on `today`
    pub fn remaining(&self, today: NaiveDate) -> u32 {
        if !self.counter.is_for(today) {
            return self.limit;
        }
        self.limit.saturating_sub(self.counter.count)
    }

    pub fn is_limit_reached(&self, today: NaiveDate) -> bool {
        self.remaining(today) == 0
    }

    fn roll_over(&mut self, today: NaiveDate) {
        if !self.counter.is_for(today) {
            info!(stored_date = %self.counter.date, date = %today, "Day rollover, usage counter reset");
            self.counter = UsageCounter::fresh(today);
            self.persist();
        }
    }

    // Failures are logged only; the in-memory count stays authoritative
    fn persist(&self) {
        if let Err(e) = self.store.save_record(RecordKey::Usage, &self.counter) {
            warn!(error = %e, count = self.counter.count, "Failed to persist usage counter");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_store::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_five_allowed_then_denied() {
        let store = Arc::new(MemoryStore::new());
        let mut governor = UsageGovernor::load(store.clone(), 5, day(1));

        for expected in 1..=5 {
            assert!(governor.check_and_consume(day(1)));
            assert_eq!(governor.count(), expected);
        }

        assert!(!governor.check_and_consume(day(1)));
        assert_eq!(governor.count(), 5);
        assert!(governor.is_limit_reached(day(1)));

        let stored: UsageCounter = store.load_record(RecordKey::Usage).unwrap();
        assert_eq!(stored, UsageCounter { date: day(1), count: 5 });
    }

    #[test]
    fn test_denial_does_not_write() {
        let store = Arc::new(MemoryStore::new());
        let mut governor = UsageGovernor::load(store.clone(), 1, day(1));
        assert!(governor.check_and_consume(day(1)));

        let writes = store.write_count();
        assert!(!governor.check_and_consume(day(1)));
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_stale_day_reset_on_load() {
        let store = Arc::new(MemoryStore::new());
        store
            .save_record(RecordKey::Usage, &UsageCounter { date: day(1), count: 5 })
            .unwrap();

        let governor = UsageGovernor::load(store.clone(), 5, day(2));
        assert_eq!(governor.count(), 0);
        assert_eq!(governor.remaining(day(2)), 5);

        let stored: UsageCounter = store.load_record(RecordKey::Usage).unwrap();
        assert_eq!(stored, UsageCounter::fresh(day(2)));
    }

    #[test]
    fn test_rollover_between_checks() {
        let store = Arc::new(MemoryStore::new());
        let mut governor = UsageGovernor::load(store, 2, day(1));
        assert!(governor.check_and_consume(day(1)));
        assert!(governor.check_and_consume(day(1)));
        assert!(!governor.check_and_consume(day(1)));

        assert!(governor.check_and_consume(day(2)));
        assert_eq!(governor.count(), 1);
    }

    #[test]
    fn test_corrupted_record_starts_fresh() {
        let store = Arc::new(MemoryStore::new());
        store.set(RecordKey::Usage, "not a counter").unwrap();

        let mut governor = UsageGovernor::load(store, 5, day(1));
        assert_eq!(governor.count(), 0);
        assert!(governor.check_and_consume(day(1)));
    }

    #[test]
    fn test_persist_failure_is_not_fatal() {
        let store = Arc::new(MemoryStore::new());
        let mut governor = UsageGovernor::load(store.clone(), 5, day(1));

        store.fail_writes(true);
        assert!(governor.check_and_consume(day(1)));
        assert_eq!(governor.count(), 1);

        let stored: UsageCounter = store.load_record(RecordKey::Usage).unwrap();
        assert_eq!(stored.count, 0);
    }
}

//! Admission Gate: decides, before the model is called, whether a request fits
//! inside the rolling per-minute rate and the calendar-day budget.
//!
//! All quota state lives behind a single mutex: the day rollover, the pruning of
//! the rolling window, the limit check and the record happen in one critical
//! section (`try_admit`), so concurrent callers can never overshoot a limit.
//!
//! Every operation has an `_at` variant taking the current time explicitly.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Requests allowed inside the rolling window.
pub const PER_MINUTE_LIMIT: usize = 15;
/// Requests allowed per local calendar day.
pub const PER_DAY_LIMIT: u32 = 1500;
const WINDOW_SECS: i64 = 60;

#[derive(Debug, Clone, Copy)]
pub struct QuotaLimits {
    pub per_minute: usize,
    pub per_day: u32,
    pub window: Duration,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            per_minute: PER_MINUTE_LIMIT,
            per_day: PER_DAY_LIMIT,
            window: Duration::seconds(WINDOW_SECS),
        }
    }
}

/// Which quota refused the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaExceeded {
    #[error("per-minute limit of {limit} requests reached")]
    PerMinute { limit: usize },

    #[error("daily limit of {limit} requests reached")]
    PerDay { limit: u32 },
}

/// Point-in-time view of quota usage.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaStatus {
    pub admitting: bool,
    pub minute_used: usize,
    pub minute_limit: usize,
    pub day_used: u32,
    pub day_limit: u32,
    pub reset_date: NaiveDate,
}

struct QuotaState {
    /// Admissions inside the trailing window, oldest first.
    recent: VecDeque<DateTime<Local>>,
    daily_count: u32,
    last_reset: NaiveDate,
}

impl QuotaState {
    fn roll_over(&mut self, now: DateTime<Local>) {
        let today = now.date_naive();
        if today > self.last_reset {
            debug!(
                "Daily quota reset: {} -> {} ({} requests on previous day)",
                self.last_reset, today, self.daily_count
            );
            self.daily_count = 0;
            self.last_reset = today;
        }
    }

    fn prune(&mut self, now: DateTime<Local>, window: Duration) {
        let boundary = now - window;
        self.recent.retain(|t| *t > boundary);
    }

    fn refresh(&mut self, now: DateTime<Local>, window: Duration) {
        self.roll_over(now);
        self.prune(now, window);
    }

    fn check(&self, limits: &QuotaLimits) -> Result<(), QuotaExceeded> {
        if self.recent.len() >= limits.per_minute {
            return Err(QuotaExceeded::PerMinute {
                limit: limits.per_minute,
            });
        }
        if self.daily_count >= limits.per_day {
            return Err(QuotaExceeded::PerDay {
                limit: limits.per_day,
            });
        }
        Ok(())
    }

    fn record(&mut self, now: DateTime<Local>) {
        self.recent.push_back(now);
        self.daily_count += 1;
    }
}

/// Process-wide admission gate. Built once at startup and shared through `AppState`.
pub struct AdmissionGate {
    limits: QuotaLimits,
    state: Mutex<QuotaState>,
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new(QuotaLimits::default())
    }
}

impl AdmissionGate {
    pub fn new(limits: QuotaLimits) -> Self {
        Self::starting_at(limits, Local::now())
    }

    /// Builds a gate whose daily counter was last reset on `now`'s date.
    pub fn starting_at(limits: QuotaLimits, now: DateTime<Local>) -> Self {
        Self {
            limits,
            state: Mutex::new(QuotaState {
                recent: VecDeque::with_capacity(limits.per_minute),
                daily_count: 0,
                last_reset: now.date_naive(),
            }),
        }
    }

    /// Returns whether a request would be admitted right now, without recording it.
    #[allow(dead_code)]
    pub fn can_admit(&self) -> bool {
        self.can_admit_at(Local::now())
    }

    pub fn can_admit_at(&self, now: DateTime<Local>) -> bool {
        let mut state = self.lock();
        state.refresh(now, self.limits.window);
        state.check(&self.limits).is_ok()
    }

    /// Records an admitted request. Callers using the split protocol must have
    /// seen `can_admit() == true` first; prefer `try_admit`.
    #[allow(dead_code)]
    pub fn record_admission(&self) {
        self.record_admission_at(Local::now());
    }

    pub fn record_admission_at(&self, now: DateTime<Local>) {
        let mut state = self.lock();
        state.roll_over(now);
        state.record(now);
    }

    /// Checks both quotas and records the request in one step.
    pub fn try_admit(&self) -> Result<(), QuotaExceeded> {
        self.try_admit_at(Local::now())
    }

    pub fn try_admit_at(&self, now: DateTime<Local>) -> Result<(), QuotaExceeded> {
        let mut state = self.lock();
        state.refresh(now, self.limits.window);
        state.check(&self.limits)?;
        state.record(now);
        Ok(())
    }

    pub fn status(&self) -> QuotaStatus {
        self.status_at(Local::now())
    }

    pub fn status_at(&self, now: DateTime<Local>) -> QuotaStatus {
        let mut state = self.lock();
        state.refresh(now, self.limits.window);
        QuotaStatus {
            admitting: state.check(&self.limits).is_ok(),
            minute_used: state.recent.len(),
            minute_limit: self.limits.per_minute,
            day_used: state.daily_count,
            day_limit: self.limits.per_day,
            reset_date: state.last_reset,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QuotaState> {
        // Quota state stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::TimeZone;

    use super::*;

    fn at(day: u32, h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, day, h, m, s).unwrap()
    }

    fn gate_at(now: DateTime<Local>) -> AdmissionGate {
        AdmissionGate::starting_at(QuotaLimits::default(), now)
    }

    #[test]
    fn test_fourteen_requests_in_a_minute_are_admitted() {
        let start = at(10, 12, 0, 0);
        let gate = gate_at(start);
        for i in 0..14 {
            let now = start + Duration::seconds(i * 2);
            assert!(gate.can_admit_at(now), "request {} should be admitted", i + 1);
            gate.record_admission_at(now);
        }
        assert!(gate.can_admit_at(start + Duration::seconds(30)));
    }

    #[test]
    fn test_fifteenth_request_in_a_minute_is_refused() {
        let start = at(10, 12, 0, 0);
        let gate = gate_at(start);
        for i in 0..15 {
            assert!(gate.try_admit_at(start + Duration::seconds(i)).is_ok());
        }
        let now = start + Duration::seconds(20);
        assert!(!gate.can_admit_at(now));
        assert_eq!(
            gate.try_admit_at(now),
            Err(QuotaExceeded::PerMinute { limit: 15 })
        );
    }

    #[test]
    fn test_window_frees_up_as_entries_age_out() {
        let start = at(10, 12, 0, 0);
        let gate = gate_at(start);
        for i in 0..15 {
            gate.try_admit_at(start + Duration::seconds(i)).unwrap();
        }
        // At +59s all fifteen are still inside the window.
        assert!(!gate.can_admit_at(start + Duration::seconds(59)));
        // At +60s the first entry sits on the boundary and is dropped.
        assert!(gate.can_admit_at(start + Duration::seconds(60)));
    }

    #[test]
    fn test_refused_requests_are_not_recorded() {
        let start = at(10, 12, 0, 0);
        let gate = gate_at(start);
        for _ in 0..15 {
            gate.try_admit_at(start).unwrap();
        }
        for _ in 0..10 {
            assert!(gate.try_admit_at(start).is_err());
        }
        let status = gate.status_at(start);
        assert_eq!(status.minute_used, 15);
        assert_eq!(status.day_used, 15);
        assert!(!status.admitting);
    }

    #[test]
    fn test_daily_budget_exhausts_and_resets_at_date_rollover() {
        let start = at(10, 8, 0, 0);
        let gate = gate_at(start);
        // 5s spacing keeps the rolling window at 12 entries, under the minute limit.
        for i in 0..1500 {
            gate.try_admit_at(start + Duration::seconds(i * 5))
                .unwrap_or_else(|e| panic!("admission {} refused: {e}", i + 1));
        }

        let later_same_day = at(10, 23, 59, 0);
        assert!(!gate.can_admit_at(later_same_day));
        assert_eq!(
            gate.try_admit_at(later_same_day),
            Err(QuotaExceeded::PerDay { limit: 1500 })
        );

        let next_day = at(11, 0, 0, 1);
        assert!(gate.can_admit_at(next_day));
        let status = gate.status_at(next_day);
        assert_eq!(status.day_used, 0);
        assert_eq!(status.reset_date, next_day.date_naive());
    }

    #[test]
    fn test_date_rollover_resets_only_once() {
        let start = at(10, 23, 59, 0);
        let gate = gate_at(start);
        gate.try_admit_at(start).unwrap();

        let after_midnight = at(11, 0, 5, 0);
        gate.try_admit_at(after_midnight).unwrap();
        gate.try_admit_at(after_midnight + Duration::seconds(1)).unwrap();

        let status = gate.status_at(after_midnight + Duration::seconds(2));
        assert_eq!(status.day_used, 2, "second check on the new day must not reset again");
    }

    #[test]
    fn test_status_reports_limits() {
        let now = at(10, 9, 0, 0);
        let gate = gate_at(now);
        let status = gate.status_at(now);
        assert_eq!(status.minute_limit, PER_MINUTE_LIMIT);
        assert_eq!(status.day_limit, PER_DAY_LIMIT);
        assert_eq!(status.minute_used, 0);
        assert!(status.admitting);
    }

    #[test]
    fn test_custom_limits_are_honoured() {
        let now = at(10, 9, 0, 0);
        let gate = AdmissionGate::starting_at(
            QuotaLimits {
                per_minute: 100,
                per_day: 2,
                window: Duration::seconds(60),
            },
            now,
        );
        assert!(gate.try_admit_at(now).is_ok());
        assert!(gate.try_admit_at(now).is_ok());
        assert_eq!(gate.try_admit_at(now), Err(QuotaExceeded::PerDay { limit: 2 }));
    }

    #[test]
    fn test_concurrent_try_admit_never_overshoots() {
        let now = at(10, 12, 0, 0);
        let gate = Arc::new(gate_at(now));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || (0..10).filter(|_| gate.try_admit_at(now).is_ok()).count())
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, PER_MINUTE_LIMIT);
        assert_eq!(gate.status_at(now).day_used, PER_MINUTE_LIMIT as u32);
    }
}

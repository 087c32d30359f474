use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::config::BookingPolicy;
use crate::domain::models::reservation::Reservation;
use crate::domain::models::slot::TimeSlot;
use crate::domain::models::slot_config::SlotConfig;

/// Whether a calendar date is open for new reservations under the
/// advance-notice rule, evaluated in the club timezone.
///
/// Anything before tomorrow is closed (24h minimum notice). Tomorrow itself
/// stays open until the cutoff hour the evening before; later dates are
/// always open.
pub fn is_date_bookable(date: NaiveDate, now: DateTime<Utc>, policy: &BookingPolicy) -> bool {
    let local_now = now.with_timezone(&policy.timezone);
    let tomorrow = local_now.date_naive() + Duration::days(1);

    if date < tomorrow {
        return false;
    }
    if date == tomorrow {
        return local_now.hour() < policy.cutoff_hour;
    }
    true
}

/// UTC bounds of a club-local calendar day, for reservation-store queries.
/// None when midnight is ambiguous or skipped in the club timezone.
pub fn day_window_utc(date: NaiveDate, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()?;
    let end = tz.from_local_datetime(&date.and_hms_opt(23, 59, 59)?).single()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Generates every candidate window for `date`: the cross product of
/// granularity-aligned start times within opening hours and the active slot
/// configs, each flagged available or not against the blocking reservations.
///
/// Deterministic in its inputs; ordering is start time ascending, then config
/// order. Configs with identical durations intentionally produce duplicate
/// windows as distinct entries (the frontend groups them by config).
pub fn generate_time_slots(
    date: NaiveDate,
    configs: &[SlotConfig],
    reservations: &[Reservation],
    now: DateTime<Utc>,
    policy: &BookingPolicy,
) -> Vec<TimeSlot> {
    let tz = policy.timezone;
    let earliest_start = now + Duration::hours(policy.min_advance_hours);
    let closing_min = policy.closing_hour * 60;

    let mut candidate_starts = Vec::new();
    let mut cursor = policy.opening_hour * 60;
    while cursor < closing_min {
        if let Some(t) = NaiveTime::from_hms_opt(cursor / 60, cursor % 60, 0) {
            candidate_starts.push((cursor, t));
        }
        cursor += policy.granularity_min;
    }

    let active: Vec<&SlotConfig> = configs.iter().filter(|c| c.is_active).collect();
    let blocking: Vec<&Reservation> = reservations.iter().filter(|r| r.is_blocking()).collect();

    let mut slots = Vec::new();

    for (start_min, start_local) in candidate_starts {
        // Skipped local times (DST spring-forward) produce no slot.
        let Some(start_tz) = tz.from_local_datetime(&date.and_time(start_local)).single() else {
            continue;
        };
        let start_utc = start_tz.with_timezone(&Utc);

        if start_utc < earliest_start {
            continue;
        }

        for config in &active {
            let total = config.total_min();
            if total <= 0 || start_min + total as u32 > closing_min {
                continue;
            }

            let end_utc = start_utc + Duration::minutes(total as i64);
            let end_local = start_local + Duration::minutes(total as i64);

            // Open-interval test: windows that merely touch do not overlap.
            let is_available = !blocking
                .iter()
                .any(|r| start_utc < r.end_time && end_utc > r.start_time);

            slots.push(TimeSlot {
                id: format!(
                    "{}-{}-{}",
                    start_local.format("%H:%M"),
                    end_local.format("%H:%M"),
                    config.id
                ),
                start_time: start_utc,
                end_time: end_utc,
                is_available,
            });
        }
    }

    slots
}

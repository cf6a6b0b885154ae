//! Proration calculator.
//!
//! Pure computation of the refund/penalty split for cancelling a booking,
//! as a function of who cancels and how long after the reference point the
//! cancellation happens.
//!
//! Both parties get a 2-hour window with a full refund. Past the window the
//! refund percent moves 30 points per extra hour: down for a player
//! (floored at 0%), up for an owner who must compensate the player (capped
//! at 200% of the deposit).

use crate::domain::foundation::{Money, Timestamp};

use super::RequesterRole;

/// Hours after the reference point during which cancellation is free.
pub const FREE_CANCEL_WINDOW_HOURS: f64 = 2.0;

/// Refund-percent change per hour past the free window.
pub const RATE_PER_EXTRA_HOUR: f64 = 0.3;

/// Ceiling for an owner's compensation (double the deposit).
pub const OWNER_REFUND_CEILING: f64 = 2.0;

/// Outcome of the proration computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Proration {
    /// Fraction of the deposit refunded: [0, 1] for players, [1, 2] for owners.
    pub refund_percent: f64,

    /// The would-be full refund (the deposit itself), kept as the baseline.
    pub refund_amount: Money,

    /// Deposit scaled by the refund percent, rounded to minor units.
    pub final_refund_amount: Money,

    /// Absolute difference between baseline and final refund.
    pub penalty_amount: Money,

    /// Customer-facing justification, Vietnamese.
    pub note: String,
}

impl Proration {
    /// Computes the proration for a deposit and an elapsed time in hours.
    ///
    /// `elapsed_hours` must already be non-negative; callers going through
    /// [`prorate`] get the clamp for free.
    pub fn compute(role: RequesterRole, deposit: Money, elapsed_hours: f64) -> Self {
        let (refund_percent, note) = match role {
            RequesterRole::Player => {
                if elapsed_hours <= FREE_CANCEL_WINDOW_HOURS {
                    (
                        1.0,
                        "Hủy trong vòng 2 tiếng đầu sau khi đặt sân, hoàn lại toàn bộ tiền cọc."
                            .to_string(),
                    )
                } else {
                    let extra = elapsed_hours - FREE_CANCEL_WINDOW_HOURS;
                    let percent = (1.0 - RATE_PER_EXTRA_HOUR * extra).max(0.0);
                    let penalty_rate = 1.0 - percent;
                    let note = format!(
                        "Hủy trễ {} sau 2 tiếng đầu, phạt {}% tiền cọc.",
                        format_extra_duration(extra),
                        display_percent(penalty_rate),
                    );
                    (percent, note)
                }
            }
            RequesterRole::Owner => {
                if elapsed_hours <= FREE_CANCEL_WINDOW_HOURS {
                    (
                        1.0,
                        "Chủ sân hủy trong vòng 2 tiếng đầu sau khi xác nhận, không phát sinh bồi thường thêm."
                            .to_string(),
                    )
                } else {
                    let extra = elapsed_hours - FREE_CANCEL_WINDOW_HOURS;
                    let percent =
                        (1.0 + RATE_PER_EXTRA_HOUR * extra).min(OWNER_REFUND_CEILING);
                    let bonus_rate = percent - 1.0;
                    let note = format!(
                        "Chủ sân hủy trễ {} sau 2 tiếng đầu, bồi thường thêm {}% tiền cọc cho người đặt.",
                        format_extra_duration(extra),
                        display_percent(bonus_rate),
                    );
                    (percent, note)
                }
            }
        };

        let refund_amount = deposit;
        let final_refund_amount = deposit.scale(refund_percent);
        let penalty_amount = refund_amount.abs_diff(final_refund_amount);

        Self {
            refund_percent,
            refund_amount,
            final_refund_amount,
            penalty_amount,
            note,
        }
    }
}

/// Computes the proration from the booking's reference timestamp.
///
/// Elapsed time is clamped to zero when the reference is in the future.
pub fn prorate(
    role: RequesterRole,
    deposit: Money,
    reference: Timestamp,
    now: Timestamp,
) -> Proration {
    Proration::compute(role, deposit, now.hours_since(&reference))
}

/// Formats an extra duration as whole hours and minutes, Vietnamese.
///
/// "3 tiếng 45 phút", "3 tiếng", or "45 phút" depending on which parts are
/// non-zero. A sub-minute duration renders as "0 phút".
fn format_extra_duration(extra_hours: f64) -> String {
    let mut hours = extra_hours.floor() as i64;
    let mut minutes = ((extra_hours - extra_hours.floor()) * 60.0).round() as i64;
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }

    if hours > 0 && minutes > 0 {
        format!("{} tiếng {} phút", hours, minutes)
    } else if hours > 0 {
        format!("{} tiếng", hours)
    } else {
        format!("{} phút", minutes)
    }
}

/// Rounds a rate to a whole display percentage.
fn display_percent(rate: f64) -> i64 {
    (rate * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vnd(major: i64) -> Money {
        Money::from_major(major)
    }

    #[test]
    fn player_within_window_gets_full_refund() {
        let p = Proration::compute(RequesterRole::Player, vnd(200_000), 1.5);
        assert_eq!(p.refund_percent, 1.0);
        assert_eq!(p.final_refund_amount, vnd(200_000));
        assert_eq!(p.penalty_amount, Money::ZERO);
        assert!(p.note.contains("hoàn lại toàn bộ"));
    }

    #[test]
    fn player_two_hours_late_pays_sixty_percent() {
        let p = Proration::compute(RequesterRole::Player, vnd(200_000), 4.0);
        assert!((p.refund_percent - 0.4).abs() < 1e-9);
        assert_eq!(p.final_refund_amount, vnd(80_000));
        assert_eq!(p.penalty_amount, vnd(120_000));
        assert!(p.note.contains("2 tiếng"));
        assert!(p.note.contains("60%"));
    }

    #[test]
    fn player_refund_is_floored_at_zero() {
        // 8 extra hours would be 1 - 2.4 = -1.4
        let p = Proration::compute(RequesterRole::Player, vnd(100_000), 10.0);
        assert_eq!(p.refund_percent, 0.0);
        assert_eq!(p.final_refund_amount, Money::ZERO);
        assert_eq!(p.penalty_amount, vnd(100_000));
    }

    #[test]
    fn owner_three_hours_late_compensates_ninety_percent() {
        let p = Proration::compute(RequesterRole::Owner, vnd(150_000), 5.0);
        assert!((p.refund_percent - 1.9).abs() < 1e-9);
        assert_eq!(p.final_refund_amount, vnd(285_000));
        assert_eq!(p.penalty_amount, vnd(135_000));
        assert!(p.note.contains("90%"));
    }

    #[test]
    fn owner_compensation_is_capped_at_double() {
        // 18 extra hours would be 1 + 5.4 = 6.4
        let p = Proration::compute(RequesterRole::Owner, vnd(150_000), 20.0);
        assert_eq!(p.refund_percent, 2.0);
        assert_eq!(p.final_refund_amount, vnd(300_000));
        assert_eq!(p.penalty_amount, vnd(150_000));
    }

    #[test]
    fn window_boundary_is_inclusive_for_both_roles() {
        for role in [RequesterRole::Player, RequesterRole::Owner] {
            let p = Proration::compute(role, vnd(200_000), 2.0);
            assert_eq!(p.refund_percent, 1.0, "role {:?}", role);
            assert_eq!(p.penalty_amount, Money::ZERO);
        }
    }

    #[test]
    fn owner_within_window_owes_no_compensation() {
        let p = Proration::compute(RequesterRole::Owner, vnd(150_000), 0.5);
        assert_eq!(p.refund_percent, 1.0);
        assert_eq!(p.penalty_amount, Money::ZERO);
        assert!(p.note.contains("không phát sinh"));
    }

    #[test]
    fn prorate_clamps_future_reference_to_full_refund() {
        let now = Timestamp::now();
        let future = now.plus_minutes(90);
        let p = prorate(RequesterRole::Player, vnd(200_000), future, now);
        assert_eq!(p.refund_percent, 1.0);
        assert_eq!(p.penalty_amount, Money::ZERO);
    }

    #[test]
    fn prorate_uses_fractional_elapsed_hours() {
        let now = Timestamp::now();
        // 2h45m elapsed -> 45 minutes extra -> 1 - 0.3 * 0.75 = 0.775
        let reference = now.minus_minutes(165);
        let p = prorate(RequesterRole::Player, vnd(200_000), reference, now);
        assert!((p.refund_percent - 0.775).abs() < 1e-9);
        assert!(p.note.contains("45 phút"));
    }

    #[test]
    fn extra_duration_formats_hours_and_minutes() {
        assert_eq!(format_extra_duration(3.75), "3 tiếng 45 phút");
        assert_eq!(format_extra_duration(3.0), "3 tiếng");
        assert_eq!(format_extra_duration(0.5), "30 phút");
        assert_eq!(format_extra_duration(0.0), "0 phút");
        // 59.6 minutes rounds up to a whole hour
        assert_eq!(format_extra_duration(0.9934), "1 tiếng");
    }

    proptest! {
        #[test]
        fn player_percent_stays_within_unit_interval(
            minor in 0i64..=100_000_000_00,
            hours in 0.0f64..200.0,
        ) {
            let p = Proration::compute(RequesterRole::Player, Money::from_minor(minor), hours);
            prop_assert!(p.refund_percent >= 0.0);
            prop_assert!(p.refund_percent <= 1.0);
        }

        #[test]
        fn owner_percent_stays_within_one_to_two(
            minor in 0i64..=100_000_000_00,
            hours in 0.0f64..200.0,
        ) {
            let p = Proration::compute(RequesterRole::Owner, Money::from_minor(minor), hours);
            prop_assert!(p.refund_percent >= 1.0);
            prop_assert!(p.refund_percent <= 2.0);
            if hours <= FREE_CANCEL_WINDOW_HOURS {
                prop_assert_eq!(p.refund_percent, 1.0);
            }
        }

        #[test]
        fn amounts_satisfy_the_proration_identities(
            minor in 0i64..=100_000_000_00,
            hours in 0.0f64..200.0,
        ) {
            let deposit = Money::from_minor(minor);
            for role in [RequesterRole::Player, RequesterRole::Owner] {
                let p = Proration::compute(role, deposit, hours);
                prop_assert_eq!(p.refund_amount, deposit);
                prop_assert_eq!(p.final_refund_amount, deposit.scale(p.refund_percent));
                prop_assert_eq!(
                    p.penalty_amount,
                    p.refund_amount.abs_diff(p.final_refund_amount)
                );
                prop_assert!(p.penalty_amount.as_minor() >= 0);
            }
        }
    }
}

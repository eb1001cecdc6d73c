use time::macros::time;
use time::{Date, OffsetDateTime};

/// Rounds half away from zero to 2 fractional digits. This is the pinned
/// rounding mode for all calorie arithmetic.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Calories for `grams` of a food rated `rate_per_100g` kcal per 100g.
pub fn total_calories(rate_per_100g: f64, grams: f64) -> f64 {
    round2(rate_per_100g / 100.0 * grams)
}

/// Inclusive UTC window covering one calendar day:
/// [00:00:00.000000, 23:59:59.999999].
pub fn day_window_utc(date: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.midnight().assume_utc();
    let end = date.with_time(time!(23:59:59.999999)).assume_utc();
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn apple_example() {
        // FoodItem(calories_per_100g=52), 150g -> 78.0
        assert_eq!(total_calories(52.0, 150.0), 78.0);
    }

    #[test]
    fn protein_bar_example() {
        // custom 400 kcal/100g, 50g -> 200.0
        assert_eq!(total_calories(400.0, 50.0), 200.0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 1 kcal/100g of 12.5g -> 0.125, exactly representable; half-up gives
        // 0.13 where half-to-even would give 0.12.
        assert_eq!(total_calories(1.0, 12.5), 0.13);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.875), 0.88);
    }

    #[test]
    fn monotonic_in_grams_and_rate() {
        let base = total_calories(52.0, 150.0);
        assert!(total_calories(52.0, 151.0) > base);
        assert!(total_calories(53.0, 150.0) > base);
    }

    #[test]
    fn window_covers_whole_day() {
        let (start, end) = day_window_utc(date!(2024 - 03 - 10));
        assert_eq!(start.date(), date!(2024 - 03 - 10));
        assert_eq!(start.time(), time!(00:00:00));
        assert_eq!(end.date(), date!(2024 - 03 - 10));
        assert_eq!(end.time(), time!(23:59:59.999999));
    }

    #[test]
    fn window_boundaries_split_adjacent_days() {
        let (start, end) = day_window_utc(date!(2024 - 03 - 10));
        let last_second = date!(2024 - 03 - 10).with_time(time!(23:59:59)).assume_utc();
        let next_midnight = date!(2024 - 03 - 11).midnight().assume_utc();
        // 23:59:59 belongs to the day, 00:00:00 of the next day does not
        assert!(last_second >= start && last_second <= end);
        assert!(next_midnight > end);
    }
}

//! Contact-method decision rules.
//!
//! Rules are checked top to bottom and the first match wins. They overlap
//! (a warm sample outside daylight is neither "sunny" nor "nice"), so the
//! order of [`RULES`] is part of the contract.

use crate::types::{ClassifiedForecast, ContactMethod, DaylightWindow, RelevantForecast};

/// Below this temperature (°F) it is too cold to be anywhere but on the phone
pub const COLD_BELOW_F: f64 = 55.0;
/// Above this temperature (°F) a clear day counts as warm
pub const WARM_ABOVE_F: f64 = 75.0;
/// Highest cloud coverage still considered sunny
pub const MAX_SUNNY_CLOUD_PERCENT: u8 = 50;

type Predicate = fn(&RelevantForecast, &DaylightWindow) -> bool;

const RULES: [(Predicate, ContactMethod); 3] = [
    (is_cold_or_rainy, ContactMethod::Phone),
    (is_warm_and_sunny, ContactMethod::Text),
    (is_nice, ContactMethod::Email),
];

/// Pick the contact method for a single forecast record.
///
/// Total over its inputs: anything no rule claims gets [`ContactMethod::Default`].
#[must_use]
pub fn classify(record: &RelevantForecast, window: &DaylightWindow) -> ContactMethod {
    RULES
        .iter()
        .find(|(matches, _)| matches(record, window))
        .map_or(ContactMethod::Default, |(_, method)| *method)
}

/// Classify every record against the same daylight window, keeping order.
#[must_use]
pub fn classify_all(
    records: &[RelevantForecast],
    window: &DaylightWindow,
) -> Vec<ClassifiedForecast> {
    records
        .iter()
        .map(|forecast| ClassifiedForecast {
            forecast: *forecast,
            method: classify(forecast, window),
        })
        .collect()
}

fn is_cold_or_rainy(record: &RelevantForecast, _window: &DaylightWindow) -> bool {
    record.temperature < COLD_BELOW_F || record.rain > 0.0
}

fn is_warm_and_sunny(record: &RelevantForecast, window: &DaylightWindow) -> bool {
    record.temperature > WARM_ABOVE_F
        && record.cloud_percentage <= MAX_SUNNY_CLOUD_PERCENT
        && window.contains(record.time)
}

fn is_nice(record: &RelevantForecast, _window: &DaylightWindow) -> bool {
    (COLD_BELOW_F..=WARM_ABOVE_F).contains(&record.temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    // Sunrise 06:00, sunset 20:00 (UTC)
    fn window() -> DaylightWindow {
        DaylightWindow::new(at(6, 0), at(20, 0))
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, min, 0).unwrap()
    }

    fn record(temperature: f64, cloud: u8, rain: f64, time: DateTime<Utc>) -> RelevantForecast {
        RelevantForecast {
            time,
            temperature,
            cloud_percentage: cloud,
            rain,
        }
    }

    fn noon() -> DateTime<Utc> {
        at(12, 0)
    }

    #[test]
    fn test_cold_is_phone_regardless_of_other_fields() {
        for cloud in [0, 50, 100] {
            for time in [at(0, 0), noon(), at(23, 0)] {
                assert_eq!(
                    classify(&record(54.9, cloud, 0.0, time), &window()),
                    ContactMethod::Phone
                );
                assert_eq!(
                    classify(&record(-10.0, cloud, 0.3, time), &window()),
                    ContactMethod::Phone
                );
            }
        }
    }

    #[test]
    fn test_any_rain_is_phone() {
        for temp in [40.0, 55.0, 65.0, 75.0, 90.0] {
            assert_eq!(
                classify(&record(temp, 0, 0.01, noon()), &window()),
                ContactMethod::Phone,
                "temp {} with rain",
                temp
            );
        }
    }

    #[test]
    fn test_warm_sunny_daytime_is_text() {
        assert_eq!(
            classify(&record(80.0, 20, 0.0, noon()), &window()),
            ContactMethod::Text
        );
        assert_eq!(
            classify(&record(75.1, 50, 0.0, at(6, 1)), &window()),
            ContactMethod::Text
        );
    }

    #[test]
    fn test_sunrise_and_sunset_instants_are_not_daylight() {
        assert_eq!(
            classify(&record(80.0, 20, 0.0, at(6, 0)), &window()),
            ContactMethod::Default
        );
        assert_eq!(
            classify(&record(80.0, 20, 0.0, at(20, 0)), &window()),
            ContactMethod::Default
        );
    }

    #[test]
    fn test_nice_range_is_email() {
        for temp in [55.0, 60.0, 65.5, 75.0] {
            for cloud in [0, 100] {
                assert_eq!(
                    classify(&record(temp, cloud, 0.0, at(2, 0)), &window()),
                    ContactMethod::Email
                );
            }
        }
    }

    #[test]
    fn test_exactly_55_is_email_not_phone() {
        assert_eq!(
            classify(&record(55.0, 10, 0.0, noon()), &window()),
            ContactMethod::Email
        );
    }

    #[test]
    fn test_exactly_75_is_email_not_text() {
        assert_eq!(
            classify(&record(75.0, 10, 0.0, noon()), &window()),
            ContactMethod::Email
        );
    }

    #[test]
    fn test_warm_but_cloudy_is_default() {
        assert_eq!(
            classify(&record(80.0, 51, 0.0, noon()), &window()),
            ContactMethod::Default
        );
    }

    #[test]
    fn test_warm_at_night_is_default() {
        assert_eq!(
            classify(&record(85.0, 0, 0.0, at(23, 0)), &window()),
            ContactMethod::Default
        );
    }

    #[test]
    fn test_reference_examples() {
        assert_eq!(
            classify(&record(50.0, 10, 0.0, noon()), &window()),
            ContactMethod::Phone
        );
        assert_eq!(
            classify(&record(80.0, 20, 0.0, at(15, 0)), &window()),
            ContactMethod::Text
        );
        assert_eq!(
            classify(&record(65.0, 90, 0.0, at(0, 0)), &window()),
            ContactMethod::Email
        );
        assert_eq!(
            classify(&record(80.0, 90, 0.0, noon()), &window()),
            ContactMethod::Default
        );
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let records = vec![
            record(50.0, 10, 0.0, at(0, 0)),
            record(65.0, 10, 0.0, at(3, 0)),
            record(80.0, 10, 0.0, at(12, 0)),
        ];

        let classified = classify_all(&records, &window());

        let methods: Vec<_> = classified.iter().map(|c| c.method).collect();
        assert_eq!(
            methods,
            vec![ContactMethod::Phone, ContactMethod::Email, ContactMethod::Text]
        );
        assert_eq!(classified[1].forecast, records[1]);
    }
}

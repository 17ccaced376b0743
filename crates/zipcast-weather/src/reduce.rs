//! Forecast reduction: 3-hourly buckets to one day/night summary per slot.
//!
//! The upstream feed has 8 buckets per calendar day. The bucket at offset 0
//! of each block stands in for the day and the one at offset 4 (12 hours
//! later) for the night. This is positional only; timestamps are not used to
//! find a real day/night boundary.

use crate::error::MalformedForecast;
use crate::types::{DaySummary, RawForecastEntry, RawForecastResponse};

/// Buckets per calendar day (3-hour cadence)
pub const ENTRIES_PER_DAY: usize = 8;

/// Offset of the night reading within a day block
pub const NIGHT_OFFSET: usize = 4;

/// Reduce `response` to exactly `slot_count` summaries.
///
/// Fails without partial output when the list is missing, too short, or a
/// selected bucket lacks its timestamp or condition.
pub fn reduce(
    response: &RawForecastResponse,
    slot_count: usize,
) -> Result<Vec<DaySummary>, MalformedForecast> {
    let entries = match (&response.list, &response.error) {
        (Some(list), _) => list,
        (None, Some(upstream)) => return Err(MalformedForecast::Upstream(upstream.clone())),
        (None, None) => return Err(MalformedForecast::MissingList),
    };

    let required = slot_count
        .checked_mul(ENTRIES_PER_DAY)
        .ok_or(MalformedForecast::TooShort {
            required: usize::MAX,
            actual: entries.len(),
        })?;
    if entries.len() < required {
        return Err(MalformedForecast::TooShort {
            required,
            actual: entries.len(),
        });
    }

    (0..slot_count)
        .map(|slot| {
            let day_index = slot * ENTRIES_PER_DAY;
            let night_index = day_index + NIGHT_OFFSET;
            let day = &entries[day_index];
            let night = &entries[night_index];

            Ok(DaySummary {
                date: day
                    .date_part()
                    .ok_or(MalformedForecast::MissingField {
                        index: day_index,
                        field: "dt_txt",
                    })?
                    .to_string(),
                day_temperature: day.temperature(),
                night_temperature: night.temperature(),
                day_condition: condition(day, day_index)?,
                night_condition: condition(night, night_index)?,
            })
        })
        .collect()
}

fn condition(entry: &RawForecastEntry, index: usize) -> Result<String, MalformedForecast> {
    entry
        .condition_label()
        .map(str::to_string)
        .ok_or(MalformedForecast::MissingField {
            index,
            field: "weather[0].main",
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::{ConditionDescriptor, MainReadings};

    /// `count` buckets, Clear/Cloudy alternating, temperature `280 + index`
    fn sample(count: usize) -> RawForecastResponse {
        let list = (0..count)
            .map(|i| RawForecastEntry {
                timestamp_text: Some(format!(
                    "2025-01-{:02} {:02}:00:00",
                    i / ENTRIES_PER_DAY + 1,
                    (i % ENTRIES_PER_DAY) * 3
                )),
                main: Some(MainReadings {
                    temp: Some(280.0 + i as f64),
                }),
                weather: vec![ConditionDescriptor {
                    main: Some(if i % 2 == 0 { "Clear" } else { "Cloudy" }.to_string()),
                }],
            })
            .collect();

        RawForecastResponse {
            list: Some(list),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_offsets() {
        let summaries = reduce(&sample(24), 3).unwrap();

        assert_eq!(summaries.len(), 3);
        for (i, s) in summaries.iter().enumerate() {
            assert_eq!(s.day_temperature, Some(280.0 + 8.0 * i as f64));
            assert_eq!(s.night_temperature, Some(284.0 + 8.0 * i as f64));
            assert_eq!(s.day_condition, "Clear");
            assert_eq!(s.night_condition, "Clear");
            assert_eq!(s.date, format!("2025-01-{:02}", i + 1));
        }
    }

    #[test]
    fn test_output_length_follows_slots_not_response() {
        let summaries = reduce(&sample(40), 2).unwrap();
        assert_eq!(summaries.len(), 2);

        assert!(reduce(&sample(40), 0).unwrap().is_empty());
    }

    #[test]
    fn test_missing_list() {
        let err = reduce(&RawForecastResponse::default(), 3).unwrap_err();
        assert_eq!(err, MalformedForecast::MissingList);
    }

    #[test]
    fn test_upstream_error_body() {
        let response = RawForecastResponse {
            error: Some("Invalid zip code. Must be a 5-digit number.".into()),
            ..Default::default()
        };
        let err = reduce(&response, 3).unwrap_err();
        assert!(matches!(err, MalformedForecast::Upstream(ref m) if m.contains("5-digit")));
    }

    #[test]
    fn test_too_short_is_all_or_nothing() {
        // Enough for two days but not the night reading of the third
        let err = reduce(&sample(20), 3).unwrap_err();
        assert_eq!(
            err,
            MalformedForecast::TooShort {
                required: 24,
                actual: 20
            }
        );
    }

    #[test]
    fn test_unfillable_slot_count_is_too_short() {
        let err = reduce(&sample(40), usize::MAX / 4).unwrap_err();
        assert_eq!(
            err,
            MalformedForecast::TooShort {
                required: usize::MAX,
                actual: 40
            }
        );
    }

    #[test]
    fn test_missing_timestamp() {
        let mut response = sample(16);
        response.list.as_mut().unwrap()[8].timestamp_text = None;

        let err = reduce(&response, 2).unwrap_err();
        assert_eq!(
            err,
            MalformedForecast::MissingField {
                index: 8,
                field: "dt_txt"
            }
        );
    }

    #[test]
    fn test_missing_night_condition() {
        let mut response = sample(8);
        response.list.as_mut().unwrap()[4].weather.clear();

        let err = reduce(&response, 1).unwrap_err();
        assert!(matches!(err, MalformedForecast::MissingField { index: 4, .. }));
    }

    #[test]
    fn test_absent_temperature_is_carried() {
        let mut response = sample(8);
        response.list.as_mut().unwrap()[0].main = None;

        let summaries = reduce(&response, 1).unwrap();
        assert_eq!(summaries[0].day_temperature, None);
        assert_eq!(summaries[0].night_temperature, Some(284.0));
    }

    #[test]
    fn test_ignores_entries_between_offsets() {
        let mut response = sample(8);
        for i in [1, 2, 3, 5, 6, 7] {
            response.list.as_mut().unwrap()[i] = RawForecastEntry::default();
        }
        assert!(reduce(&response, 1).is_ok());
    }
}

//! Writing summaries into host-owned display slots.

use std::fmt;

use crate::error::{RenderError, SlotWriteError};
use crate::types::{DaySummary, Period};
use crate::units::to_display_unit;

/// One day region of the render target.
///
/// The host owns the slots and passes them in; rendering only writes to them.
pub trait DisplaySlot {
    fn set_date(&mut self, date: &str) -> Result<(), SlotWriteError>;

    /// `reference` is `"<condition>.png"`
    fn set_icon(&mut self, period: Period, reference: &str) -> Result<(), SlotWriteError>;

    /// `label` is `"<n>°F"` or `"N/A"`
    fn set_temperature_label(&mut self, period: Period, label: &str)
        -> Result<(), SlotWriteError>;
}

/// Icon reference for a condition label
pub fn icon_reference(condition: &str) -> String {
    format!("{}.png", condition)
}

/// Render one summary per slot, in order.
///
/// Stops at the first failed write. Writes already made are left in place.
pub fn render<S: DisplaySlot>(
    summaries: &[DaySummary],
    slots: &mut [S],
) -> Result<(), RenderError> {
    let available = slots.len();

    for (index, summary) in summaries.iter().enumerate() {
        let slot = slots
            .get_mut(index)
            .ok_or(RenderError::MissingSlot { index, available })?;

        let write_err = move |field: &'static str| {
            move |source: SlotWriteError| RenderError::SlotWrite {
                index,
                field,
                source,
            }
        };

        slot.set_date(&summary.date).map_err(write_err("date"))?;

        for period in Period::ALL {
            let (icon_field, temp_field) = match period {
                Period::Day => ("day icon", "day temperature"),
                Period::Night => ("night icon", "night temperature"),
            };

            slot.set_icon(period, &icon_reference(summary.condition(period)))
                .map_err(write_err(icon_field))?;

            let label = to_display_unit(summary.temperature(period)).to_string();
            slot.set_temperature_label(period, &label)
                .map_err(write_err(temp_field))?;
        }
    }

    Ok(())
}

/// Write each rendered day to the diagnostic channel
pub fn log_summaries(summaries: &[DaySummary]) {
    for summary in summaries {
        tracing::info!(
            date = %summary.date,
            day_temp = %to_display_unit(summary.day_temperature),
            night_temp = %to_display_unit(summary.night_temperature),
            day = %summary.day_condition,
            night = %summary.night_condition,
            "Forecast day"
        );
    }
}

/// In-memory slot. Used by the terminal front-end and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSlot {
    pub date: Option<String>,
    pub day_icon: Option<String>,
    pub night_icon: Option<String>,
    pub day_temperature: Option<String>,
    pub night_temperature: Option<String>,
}

impl DisplaySlot for TextSlot {
    fn set_date(&mut self, date: &str) -> Result<(), SlotWriteError> {
        self.date = Some(date.to_string());
        Ok(())
    }

    fn set_icon(&mut self, period: Period, reference: &str) -> Result<(), SlotWriteError> {
        match period {
            Period::Day => self.day_icon = Some(reference.to_string()),
            Period::Night => self.night_icon = Some(reference.to_string()),
        }
        Ok(())
    }

    fn set_temperature_label(
        &mut self,
        period: Period,
        label: &str,
    ) -> Result<(), SlotWriteError> {
        match period {
            Period::Day => self.day_temperature = Some(label.to_string()),
            Period::Night => self.night_temperature = Some(label.to_string()),
        }
        Ok(())
    }
}

impl fmt::Display for TextSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{:<10}  day {:<16} {:>6}  night {:<16} {:>6}",
            show(&self.date),
            show(&self.day_icon),
            show(&self.day_temperature),
            show(&self.night_icon),
            show(&self.night_temperature),
        )
    }
}

use std::ops::RangeInclusive;

use crate::config::{
    Configuration, Settings, DPI_RANGE, REACTION_MS_RANGE, SCREEN_HEIGHT_RANGE, SCREEN_WIDTH_RANGE,
};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Dpi,
    ReactionMs,
    ScreenWidth,
    ScreenHeight,
}

impl SetupField {
    pub const ALL: [SetupField; 4] = [
        SetupField::Dpi,
        SetupField::ReactionMs,
        SetupField::ScreenWidth,
        SetupField::ScreenHeight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SetupField::Dpi => "Mouse DPI",
            SetupField::ReactionMs => "Reaction Time (ms)",
            SetupField::ScreenWidth => "Screen Width (px)",
            SetupField::ScreenHeight => "Screen Height (px)",
        }
    }

    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            SetupField::Dpi => DPI_RANGE,
            SetupField::ReactionMs => REACTION_MS_RANGE,
            SetupField::ScreenWidth => SCREEN_WIDTH_RANGE,
            SetupField::ScreenHeight => SCREEN_HEIGHT_RANGE,
        }
    }

    /// Increment applied by one arrow press
    pub fn step(self) -> u32 {
        match self {
            SetupField::Dpi => 100,
            SetupField::ReactionMs => 1,
            SetupField::ScreenWidth | SetupField::ScreenHeight => 10,
        }
    }
}

/// State of the setup screen: which field is selected and the values
/// being edited
#[derive(Debug, Clone, PartialEq)]
pub struct SetupForm {
    pub settings: Settings,
    pub selected: usize,
    pub error: Option<String>,
}

impl SetupForm {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            selected: 0,
            error: None,
        }
    }

    pub fn selected_field(&self) -> SetupField {
        SetupField::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SetupField::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + SetupField::ALL.len() - 1) % SetupField::ALL.len();
    }

    pub fn value(&self, field: SetupField) -> u32 {
        match field {
            SetupField::Dpi => self.settings.dpi,
            SetupField::ReactionMs => self.settings.reaction_ms,
            SetupField::ScreenWidth => self.settings.screen_width,
            SetupField::ScreenHeight => self.settings.screen_height,
        }
    }

    fn value_mut(&mut self, field: SetupField) -> &mut u32 {
        match field {
            SetupField::Dpi => &mut self.settings.dpi,
            SetupField::ReactionMs => &mut self.settings.reaction_ms,
            SetupField::ScreenWidth => &mut self.settings.screen_width,
            SetupField::ScreenHeight => &mut self.settings.screen_height,
        }
    }

    /// Move the selected value by `steps` increments, clamped to its range.
    /// Out-of-range values from a preset are pulled back in on first edit.
    pub fn adjust(&mut self, steps: i32) {
        let field = self.selected_field();
        let range = field.range();
        let delta = i64::from(field.step()) * i64::from(steps);
        let value = self.value_mut(field);
        let next = (i64::from(*value) + delta)
            .clamp(i64::from(*range.start()), i64::from(*range.end()));
        *value = u32::try_from(next).unwrap_or(*range.start());
        self.error = None;
    }

    /// Validate the form. On failure the message is kept for display.
    pub fn submit(&mut self) -> Result<Configuration> {
        match self.settings.validate() {
            Ok(config) => {
                self.error = None;
                Ok(config)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Position of the current value within its range, for gauges
    pub fn ratio(&self, field: SetupField) -> f64 {
        let range = field.range();
        let span = f64::from(range.end() - range.start());
        let offset = f64::from(self.value(field).saturating_sub(*range.start()));
        (offset / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        let mut form = SetupForm::new(Settings::default());
        assert_eq!(form.selected_field(), SetupField::Dpi);
        form.select_prev();
        assert_eq!(form.selected_field(), SetupField::ScreenHeight);
        form.select_next();
        form.select_next();
        assert_eq!(form.selected_field(), SetupField::ReactionMs);
    }

    #[test]
    fn dpi_moves_in_hundreds_and_clamps() {
        let mut form = SetupForm::new(Settings::default());
        form.adjust(1);
        assert_eq!(form.settings.dpi, 900);
        form.adjust(100);
        assert_eq!(form.settings.dpi, 1600);
        form.adjust(-100);
        assert_eq!(form.settings.dpi, 100);
    }

    #[test]
    fn reaction_moves_by_one_ms() {
        let mut form = SetupForm::new(Settings::default());
        form.select_next();
        form.adjust(-1);
        assert_eq!(form.settings.reaction_ms, 249);
        form.adjust(-1000);
        assert_eq!(form.settings.reaction_ms, 0);
    }

    #[test]
    fn submit_reports_invalid_preset() {
        let mut form = SetupForm::new(Settings {
            dpi: 0,
            ..Settings::default()
        });
        assert!(form.submit().is_err());
        assert!(form.error.as_deref().unwrap().contains("dpi"));

        // editing pulls the value back into range and clears the message
        form.adjust(0);
        assert_eq!(form.settings.dpi, 100);
        assert!(form.error.is_none());
        assert!(form.submit().is_ok());
    }

    #[test]
    fn ratio_tracks_position_in_range() {
        let form = SetupForm::new(Settings::default());
        assert_eq!(form.ratio(SetupField::ReactionMs), 0.5);
        assert!((form.ratio(SetupField::Dpi) - 700.0 / 1500.0).abs() < 1e-12);
    }
}

//! Player-facing settings, persisted by the host as console variables.

use crate::host::{ConsoleVariables, CvarSpec};

pub const COLUMNS_COUNT: CvarSpec = CvarSpec {
    name: "bswl_columns_count",
    default: 5,
    min: 1,
    max: 10,
};

pub const PREVIEW_SIZE: CvarSpec = CvarSpec {
    name: "bswl_preview_size",
    default: 0,
    min: 0,
    max: 2,
};

/// Preview image size tier of the workshop grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl PreviewSize {
    pub const ALL: [PreviewSize; 3] = [PreviewSize::Small, PreviewSize::Medium, PreviewSize::Large];

    /// Out-of-range values snap to the nearest tier.
    pub fn from_index(index: i32) -> Self {
        match PREVIEW_SIZE.clamp(index) {
            0 => PreviewSize::Small,
            1 => PreviewSize::Medium,
            _ => PreviewSize::Large,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            PreviewSize::Small => 0,
            PreviewSize::Medium => 1,
            PreviewSize::Large => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewSize::Small => "small",
            PreviewSize::Medium => "medium",
            PreviewSize::Large => "large",
        }
    }

    /// Image size in pixels; all tiers are 16:9.
    pub fn dimensions(self) -> [f32; 2] {
        match self {
            PreviewSize::Small => [192.0, 108.0],
            PreviewSize::Medium => [240.0, 135.0],
            PreviewSize::Large => [288.0, 162.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub columns_count: i32,
    pub preview_size: PreviewSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns_count: COLUMNS_COUNT.default,
            preview_size: PreviewSize::from_index(PREVIEW_SIZE.default),
        }
    }
}

impl Settings {
    pub fn register<C: ConsoleVariables + ?Sized>(cvars: &mut C) {
        cvars.register_int(&COLUMNS_COUNT);
        cvars.register_int(&PREVIEW_SIZE);
    }

    /// Current values, clamped to their bounds.
    pub fn read<C: ConsoleVariables + ?Sized>(cvars: &C) -> Self {
        let columns_count = cvars
            .get_int(COLUMNS_COUNT.name)
            .map(|v| COLUMNS_COUNT.clamp(v))
            .unwrap_or(COLUMNS_COUNT.default);
        let preview_size = cvars
            .get_int(PREVIEW_SIZE.name)
            .map(PreviewSize::from_index)
            .unwrap_or_default();

        Self {
            columns_count,
            preview_size,
        }
    }

    /// Write back any value that differs from `previous`.
    pub fn apply<C: ConsoleVariables + ?Sized>(&self, previous: &Settings, cvars: &mut C) {
        if self.columns_count != previous.columns_count {
            cvars.set_int(COLUMNS_COUNT.name, COLUMNS_COUNT.clamp(self.columns_count));
        }
        if self.preview_size != previous.preview_size {
            cvars.set_int(PREVIEW_SIZE.name, self.preview_size.index());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Cvars(HashMap<String, i32>);

    impl ConsoleVariables for Cvars {
        fn register_int(&mut self, spec: &CvarSpec) {
            self.0.entry(spec.name.to_string()).or_insert(spec.default);
        }
        fn get_int(&self, name: &str) -> Option<i32> {
            self.0.get(name).copied()
        }
        fn set_int(&mut self, name: &str, value: i32) {
            self.0.insert(name.to_string(), value);
        }
    }

    #[test]
    fn test_defaults_after_register() {
        let mut cvars = Cvars::default();
        Settings::register(&mut cvars);

        assert_eq!(Settings::read(&cvars), Settings::default());
        assert_eq!(Settings::default().columns_count, 5);
        assert_eq!(Settings::default().preview_size, PreviewSize::Small);
    }

    #[test]
    fn test_read_clamps() {
        let mut cvars = Cvars::default();
        cvars.set_int(COLUMNS_COUNT.name, 0);
        cvars.set_int(PREVIEW_SIZE.name, 9);

        let settings = Settings::read(&cvars);
        assert_eq!(settings.columns_count, 1);
        assert_eq!(settings.preview_size, PreviewSize::Large);
    }

    #[test]
    fn test_apply_writes_changes_only() {
        let mut cvars = Cvars::default();
        let previous = Settings::default();
        let updated = Settings {
            columns_count: 12,
            ..previous
        };

        updated.apply(&previous, &mut cvars);
        assert_eq!(cvars.get_int(COLUMNS_COUNT.name), Some(10));
        assert_eq!(cvars.get_int(PREVIEW_SIZE.name), None);
    }

    #[test]
    fn test_preview_dimensions() {
        assert_eq!(PreviewSize::Medium.dimensions(), [240.0, 135.0]);
        for size in PreviewSize::ALL {
            assert_eq!(PreviewSize::from_index(size.index()), size);
        }
    }
}

//! Deck configuration — the cards to present plus timing and gesture tuning.
//!
//! A deck is a YAML file:
//!
//! ```yaml
//! cards:
//!   - title: Horizon
//!     body: First light over the ridge.
//!   - title: Meridian
//! timing:
//!   throw_secs: 1.2
//! gesture:
//!   tolerance: 10
//! seed: 7
//! ```
//!
//! Resolution: `--deck` flag → `CARDSTACK_DECK` env var → built-in deck.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{StackError, StackResult};

/// Environment variable consulted when no `--deck` flag is given.
pub const DECK_ENV: &str = "CARDSTACK_DECK";

/// One card as written in the deck file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Durations (seconds) and distances for every animated step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Outgoing card flies off the top.
    pub throw_secs: f64,
    /// Next card grows to the front.
    pub front_secs: f64,
    pub front_delay_secs: f64,
    /// Trailing cards close (or reopen) the gap.
    pub restack_secs: f64,
    /// Returning card drops back in on retreat.
    pub drop_in_secs: f64,
    pub text_out_secs: f64,
    /// Pause between the title leaving and the new one arriving.
    pub text_gap_secs: f64,
    pub text_in_secs: f64,
    pub progress_secs: f64,
    /// Throw distance as a multiple of the viewport height.
    pub throw_distance: f64,
    /// Upper bound (degrees) of the random tilt given to a thrown card.
    pub max_throw_rotation_deg: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            throw_secs: 1.2,
            front_secs: 1.0,
            front_delay_secs: 0.1,
            restack_secs: 1.0,
            drop_in_secs: 1.2,
            text_out_secs: 0.2,
            text_gap_secs: 0.7,
            text_in_secs: 0.6,
            progress_secs: 0.5,
            throw_distance: 1.2,
            max_throw_rotation_deg: 5.0,
        }
    }
}

/// Longest single animation step, in seconds.
pub const MAX_STEP_SECS: f64 = 60.0;
/// Farthest throw, in viewport heights.
pub const MAX_THROW_DISTANCE: f64 = 100.0;
pub const MAX_THROW_ROTATION_DEG: f64 = 180.0;

/// Convert a validated seconds value into a `Duration`. Saturates instead
/// of panicking on values `validate` would reject.
pub fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::MAX)
}

/// Gesture normalization tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Accumulated travel (layout units) before a gesture registers.
    pub tolerance: f64,
    /// Travel contributed by one wheel notch.
    pub wheel_delta: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tolerance: 10.0,
            wheel_delta: 10.0,
        }
    }
}

/// How layout units map onto terminal cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Layout units per terminal row. One depth step is 15 units.
    pub units_per_row: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            units_per_row: 15.0,
        }
    }
}

/// Top-level deck file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub cards: Vec<CardSpec>,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    /// Seed for throw rotation. `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DeckConfig {
    /// The deck shown when no file is configured.
    pub fn builtin() -> Self {
        let cards = [
            ("Horizon", "Where the stack begins."),
            ("Meridian", "Scroll, drag or press j to move on."),
            ("Ember", "Each card falls away as the next steps forward."),
            ("Tide", "Scroll back up to bring them home."),
        ]
        .into_iter()
        .map(|(title, body)| CardSpec {
            title: title.into(),
            body: Some(body.into()),
        })
        .collect();

        Self {
            cards,
            timing: Timing::default(),
            gesture: GestureSettings::default(),
            display: DisplaySettings::default(),
            seed: None,
        }
    }

    /// Parse and validate a deck from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> StackResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a deck file.
    pub fn load(path: &Path) -> StackResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load the deck named by the CLI flag or env var, else the built-in one.
    pub fn resolve(cli_path: Option<&Path>) -> StackResult<(Self, Option<PathBuf>)> {
        let path = cli_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(DECK_ENV).map(PathBuf::from));
        match path {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::builtin(), None)),
        }
    }

    /// Fail fast on decks the controller cannot present sensibly.
    pub fn validate(&self) -> StackResult<()> {
        if self.cards.is_empty() {
            return Err(StackError::EmptyDeck);
        }
        if let Some(index) = self.cards.iter().position(|c| c.title.trim().is_empty()) {
            return Err(StackError::BlankTitle { index });
        }

        let t = &self.timing;
        let durations = [
            ("timing.throw_secs", t.throw_secs),
            ("timing.front_secs", t.front_secs),
            ("timing.front_delay_secs", t.front_delay_secs),
            ("timing.restack_secs", t.restack_secs),
            ("timing.drop_in_secs", t.drop_in_secs),
            ("timing.text_out_secs", t.text_out_secs),
            ("timing.text_gap_secs", t.text_gap_secs),
            ("timing.text_in_secs", t.text_in_secs),
            ("timing.progress_secs", t.progress_secs),
        ];
        for (name, value) in durations {
            bounded(name, value, MAX_STEP_SECS)?;
        }
        bounded("timing.throw_distance", t.throw_distance, MAX_THROW_DISTANCE)?;
        bounded(
            "timing.max_throw_rotation_deg",
            t.max_throw_rotation_deg,
            MAX_THROW_ROTATION_DEG,
        )?;

        positive("gesture.tolerance", self.gesture.tolerance)?;
        positive("gesture.wheel_delta", self.gesture.wheel_delta)?;
        positive("display.units_per_row", self.display.units_per_row)?;
        Ok(())
    }
}

fn bounded(name: &'static str, value: f64, max: f64) -> StackResult<()> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(StackError::InvalidSetting {
            name,
            reason: format!("expected a value in 0..={max}, got {value}"),
        })
    }
}

fn positive(name: &'static str, value: f64) -> StackResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StackError::InvalidSetting {
            name,
            reason: format!("expected a finite value > 0, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_yaml_string() {
        let yaml = r#"
cards:
  - title: One
    body: first
  - title: Two
timing:
  throw_secs: 0.8
gesture:
  tolerance: 4
seed: 42
"#;
        let config = DeckConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.cards.len(), 2);
        assert_eq!(config.cards[0].body.as_deref(), Some("first"));
        assert_eq!(config.cards[1].body, None);
        assert_eq!(config.timing.throw_secs, 0.8);
        // Untouched fields keep their defaults
        assert_eq!(config.timing.text_gap_secs, 0.7);
        assert_eq!(config.gesture.tolerance, 4.0);
        assert_eq!(config.gesture.wheel_delta, 10.0);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn builtin_deck_is_valid() {
        let config = DeckConfig::builtin();
        assert_eq!(config.cards.len(), 4);
        config.validate().unwrap();
    }

    #[test]
    fn empty_deck_rejected() {
        let err = DeckConfig::from_yaml_str("cards: []").unwrap_err();
        assert!(matches!(err, StackError::EmptyDeck));
    }

    #[test]
    fn blank_title_rejected() {
        let yaml = "cards:\n  - title: ok\n  - title: '  '\n";
        let err = DeckConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, StackError::BlankTitle { index: 1 }));
    }

    #[test]
    fn negative_duration_rejected() {
        let yaml = "cards:\n  - title: a\ntiming:\n  text_in_secs: -1\n";
        let err = DeckConfig::from_yaml_str(yaml).unwrap_err();
        match err {
            StackError::InvalidSetting { name, .. } => assert_eq!(name, "timing.text_in_secs"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn huge_duration_rejected() {
        let yaml = "cards:\n  - title: a\ntiming:\n  text_out_secs: 1.0e30\n";
        assert!(matches!(
            DeckConfig::from_yaml_str(yaml),
            Err(StackError::InvalidSetting { name: "timing.text_out_secs", .. })
        ));
    }

    #[test]
    fn duration_at_limit_accepted() {
        let mut deck = DeckConfig::builtin();
        deck.timing.throw_secs = MAX_STEP_SECS;
        deck.timing.throw_distance = MAX_THROW_DISTANCE;
        deck.timing.max_throw_rotation_deg = MAX_THROW_ROTATION_DEG;
        assert!(deck.validate().is_ok());

        deck.timing.throw_secs = MAX_STEP_SECS + 0.5;
        assert!(matches!(
            deck.validate(),
            Err(StackError::InvalidSetting { name: "timing.throw_secs", .. })
        ));
    }

    #[test]
    fn huge_rotation_rejected() {
        let yaml = "cards:\n  - title: a\ntiming:\n  max_throw_rotation_deg: 1.0e308\n";
        assert!(matches!(
            DeckConfig::from_yaml_str(yaml),
            Err(StackError::InvalidSetting { name: "timing.max_throw_rotation_deg", .. })
        ));
    }

    #[test]
    fn huge_throw_distance_rejected() {
        let mut deck = DeckConfig::builtin();
        deck.timing.throw_distance = 1.0e300;
        assert!(matches!(
            deck.validate(),
            Err(StackError::InvalidSetting { name: "timing.throw_distance", .. })
        ));
    }

    #[test]
    fn zero_tolerance_rejected() {
        let yaml = "cards:\n  - title: a\ngesture:\n  tolerance: 0\n";
        assert!(matches!(
            DeckConfig::from_yaml_str(yaml),
            Err(StackError::InvalidSetting { name: "gesture.tolerance", .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let err = DeckConfig::from_yaml_str("cards: [").unwrap_err();
        assert!(matches!(err, StackError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cards:\n  - title: Alpha\n  - title: Beta").unwrap();
        let config = DeckConfig::load(file.path()).unwrap();
        assert_eq!(config.cards[1].title, "Beta");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        match DeckConfig::load(&path) {
            Err(StackError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn resolve_prefers_cli_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cards:\n  - title: FromFlag").unwrap();
        let (config, path) = DeckConfig::resolve(Some(file.path())).unwrap();
        assert_eq!(config.cards[0].title, "FromFlag");
        assert_eq!(path.as_deref(), Some(file.path()));
    }

    #[test]
    fn round_trip_yaml() {
        let config = DeckConfig::builtin();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back = DeckConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn secs_clamps_negative() {
        assert_eq!(secs(-3.0), Duration::ZERO);
        assert_eq!(secs(0.5), Duration::from_millis(500));
        assert_eq!(secs(1.0e30), Duration::MAX);
    }
}

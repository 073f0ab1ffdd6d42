use serde::{Deserialize, Serialize};

/// Tunable game settings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Player is driven by the AI when the runtime ticks.
    pub autopilot: bool,
    /// Turns a headless run lasts at most.
    pub turn_limit: u32,
    /// Each critical effect of a penetrating hit triggers with one chance
    /// in this many.
    pub critical_chance: usize,
    pub player_name: String,
    /// Humanoids act on their gear needs instead of only noting them.
    pub gear_seeking: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            autopilot: false,
            turn_limit: 1000,
            critical_chance: 4,
            player_name: "Adventurer".into(),
            gear_seeking: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings() {
        let s: Settings =
            serde_json::from_str(r#"{"autopilot": true, "critical-chance": 2}"#)
                .unwrap();
        assert!(s.autopilot);
        assert_eq!(s.critical_chance, 2);
        assert_eq!(s.turn_limit, Settings::default().turn_limit);
        assert!(!s.gear_seeking);
    }
}

use serde::{Deserialize, Serialize};

use crate::models::lenient::{lenient_opt_i64, null_as_default, string_or_number};

/// Payload of `GET /gsi/status`: what the bot last heard from Dota 2 game state integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GsiStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub connected: bool,
    #[serde(default)]
    pub last_update_seconds_ago: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_game: bool,
    #[serde(default)]
    pub game_mode: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub match_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub game_time: Option<i64>,
    #[serde(default)]
    pub player_team: Option<String>,
}

impl GsiStatus {
    /// `"all_pick"` → `"All Pick"`.
    pub fn game_mode_label(&self) -> Option<String> {
        self.game_mode.as_deref().map(|mode| {
            mode.split('_')
                .filter(|w| !w.is_empty())
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    pub fn team_label(&self) -> Option<String> {
        self.player_team.as_deref().filter(|t| !t.is_empty()).map(capitalize)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_in_game_status() {
        let body = r#"{"connected": true, "last_update": 1712345678.5, "last_update_seconds_ago": 2.4,
                       "in_game": true, "game_mode": "DOTA_GAMEMODE_ALL_DRAFT", "match_id": "7712345678",
                       "game_time": -30, "player_team": "radiant"}"#;
        let s: GsiStatus = serde_json::from_str(body).unwrap();
        assert!(s.connected && s.in_game);
        assert_eq!(s.game_time, Some(-30));
        assert_eq!(s.team_label().as_deref(), Some("Radiant"));
        assert_eq!(s.game_mode_label().as_deref(), Some("DOTA GAMEMODE ALL DRAFT"));
    }

    #[test]
    fn disconnected_status_has_no_game_fields() {
        let body = r#"{"connected": false, "last_update": 0, "last_update_seconds_ago": null,
                       "in_game": false, "game_mode": null, "match_id": null,
                       "game_time": null, "player_team": null}"#;
        let s: GsiStatus = serde_json::from_str(body).unwrap();
        assert_eq!(s, GsiStatus::default());
    }

    #[test]
    fn mode_label_title_cases_words() {
        let s = GsiStatus { game_mode: Some("all_pick".into()), ..Default::default() };
        assert_eq!(s.game_mode_label().as_deref(), Some("All Pick"));
    }
}

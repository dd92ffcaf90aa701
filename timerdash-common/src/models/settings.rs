use serde::{Deserialize, Serialize};

/// Per-guild bot settings (`GET`/`PUT /settings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildSettings {
    pub prefix: String,
    pub timer_channel: String,
    pub voice_channel: String,
    pub tts_language: String,
    pub mindful_messages_enabled: bool,
}

impl Default for GuildSettings {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            timer_channel: "timer-bot".to_string(),
            voice_channel: "DOTA".to_string(),
            tts_language: "en-US-AriaNeural".to_string(),
            mindful_messages_enabled: false,
        }
    }
}

impl GuildSettings {
    /// Applies a single `key value` edit from the prompt.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "prefix" => self.prefix = value.to_string(),
            "timer_channel" => self.timer_channel = value.to_string(),
            "voice_channel" => self.voice_channel = value.to_string(),
            "tts_language" => self.tts_language = value.to_string(),
            "mindful_messages_enabled" => {
                self.mindful_messages_enabled = match value.to_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => return Err(format!("expected a boolean, got '{}'", other)),
                }
            }
            other => return Err(format!("unknown setting '{}'", other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSettingsRequest {
    pub guild_id: String,
    pub settings: GuildSettings,
}

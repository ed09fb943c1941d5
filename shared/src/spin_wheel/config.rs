use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::countdown::Countdown;
use super::lenient;
use super::links::{cookie_value, PageLocation};
use super::milestones::{
    parse_achieved_details, parse_milestones, AchievedMilestone, MilestoneDefinition,
    MilestoneProgress,
};
use super::segments::{parse_segments, Segment};
use crate::constants::CSRF_COOKIE_NAME;
use crate::error::WheelError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownIds {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub next_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub prize_id: Option<String>,
}

/// A malformed `countdownIds` block only disables the countdowns.
fn opt_countdown_ids<'de, D>(deserializer: D) -> Result<Option<CountdownIds>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(ids) => Some(ids),
        Err(e) => {
            warn!("Ignoring countdownIds: {}", e);
            None
        }
    }))
}

/// Only an explicit `false` (or `"false"`/`0`) turns spinning off.
fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => Some(flag),
        Some(Value::String(s)) => Some(!matches!(s.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "")),
        Some(Value::Number(n)) => Some(n.as_f64() != Some(0.0)),
        _ => None,
    })
}

/// Options supplied by the hosting page, keyed the way the page writes them.
/// A mistyped field is dropped on its own; only unparseable JSON fails.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelConfig {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub canvas_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub legend_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub btn_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub result_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub coupon_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub milestone_progress_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub milestone_label_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub fallback_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub center_image_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub reset_iso: Option<String>,
    #[serde(deserialize_with = "opt_countdown_ids")]
    pub countdown_ids: Option<CountdownIds>,
    pub prizes_json: Option<Value>,
    pub milestones_json: Option<Value>,
    pub milestone_progress_json: Option<Value>,
    pub achieved_details_json: Option<Value>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub spin_url: Option<String>,
    #[serde(deserialize_with = "opt_flag")]
    pub can_spin: Option<bool>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub csrf_token: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub sign_in_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub sign_up_url: Option<String>,
}

impl WheelConfig {
    pub fn from_json(raw: &str) -> Result<Self, WheelError> {
        serde_json::from_str(raw).map_err(|e| WheelError::Config(e.to_string()))
    }

    pub fn reset_countdown(&self) -> Option<Countdown> {
        let raw = self.reset_iso.as_deref().filter(|s| !s.trim().is_empty())?;
        match Countdown::parse(raw) {
            Ok(countdown) => Some(countdown),
            Err(e) => {
                warn!("{}; countdowns disabled", e);
                None
            }
        }
    }

    /// Element ids of every configured countdown display.
    pub fn countdown_targets(&self) -> Vec<String> {
        self.countdown_ids
            .iter()
            .flat_map(|ids| [ids.next_id.clone(), ids.prize_id.clone()])
            .flatten()
            .filter(|id| !id.is_empty())
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

/// Parsed, fallback-applied view of a [`WheelConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSettings {
    pub segments: Vec<Segment>,
    pub milestones: Vec<MilestoneDefinition>,
    pub progress: MilestoneProgress,
    pub achieved: Vec<AchievedMilestone>,
    pub spin_url: Option<String>,
    pub can_spin: bool,
    pub has_button: bool,
    pub csrf_token: Option<String>,
    pub sign_in_url: Option<String>,
    pub sign_up_url: Option<String>,
    pub page: PageLocation,
}

impl WheelSettings {
    pub fn from_config(config: &WheelConfig, page: PageLocation) -> Self {
        Self {
            segments: parse_segments(config.prizes_json.as_ref()),
            milestones: parse_milestones(config.milestones_json.as_ref()),
            progress: MilestoneProgress::parse(config.milestone_progress_json.as_ref()),
            achieved: parse_achieved_details(config.achieved_details_json.as_ref()),
            spin_url: non_empty(&config.spin_url),
            can_spin: config.can_spin != Some(false),
            has_button: non_empty(&config.btn_id).is_some(),
            csrf_token: non_empty(&config.csrf_token),
            sign_in_url: non_empty(&config.sign_in_url),
            sign_up_url: non_empty(&config.sign_up_url),
            page,
        }
    }

    /// The configured token, else the `csrftoken` cookie in `cookies`.
    /// The cookie can rotate while the page is open, so pass the current string.
    pub fn csrf_token(&self, cookies: &str) -> String {
        self.csrf_token
            .clone()
            .or_else(|| cookie_value(cookies, CSRF_COOKIE_NAME))
            .unwrap_or_default()
    }

    pub fn thresholds(&self) -> Vec<u32> {
        self.milestones.iter().map(|m| m.threshold_spins).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_CONFIG: &str = r##"{
        "canvasId": "spin-canvas",
        "btnId": "spin-btn",
        "resultId": "spin-result",
        "resetIso": "2026-10-20T00:00:00+03:00",
        "countdownIds": {"nextId": "next-spin", "prizeId": ""},
        "prizesJson": "[{\"label\": \"A\", \"color\": \"#111\"}]",
        "milestonesJson": [5, 10],
        "milestoneProgressJson": {"spins": 2, "achieved": []},
        "spinUrl": "/spin/",
        "canSpin": "False"
    }"##;

    #[test]
    fn test_host_config_keys() {
        let config = WheelConfig::from_json(HOST_CONFIG).unwrap();
        assert_eq!(config.btn_id.as_deref(), Some("spin-btn"));
        assert_eq!(config.can_spin, Some(false));
        assert_eq!(config.countdown_targets(), vec!["next-spin".to_string()]);
        assert!(config.reset_countdown().is_some());
    }

    #[test]
    fn test_settings_from_config() {
        let config = WheelConfig::from_json(HOST_CONFIG).unwrap();
        let settings = WheelSettings::from_config(&config, PageLocation::default());
        assert_eq!(settings.segments.len(), 1);
        assert_eq!(settings.thresholds(), vec![5, 10]);
        assert_eq!(settings.progress.spins, 2);
        assert!(!settings.can_spin);
        assert!(settings.has_button);
        assert_eq!(settings.csrf_token("csrftoken=abc"), "abc");
        assert_eq!(settings.csrf_token("sessionid=1"), "");
    }

    #[test]
    fn test_configured_token_beats_cookie() {
        let config = WheelConfig {
            csrf_token: Some("from-page".to_string()),
            ..WheelConfig::default()
        };
        let settings = WheelSettings::from_config(&config, PageLocation::default());
        assert_eq!(settings.csrf_token("csrftoken=abc"), "from-page");
        assert!(settings.can_spin);
        assert!(settings.spin_url.is_none());
    }

    #[test]
    fn test_mistyped_field_only_blanks_itself() {
        let config = WheelConfig::from_json(
            r#"{"canvasId": 7, "btnId": {"id": "b"}, "spinUrl": "/spin/", "countdownIds": "next", "centerImageUrl": false}"#,
        )
        .unwrap();
        assert_eq!(config.canvas_id.as_deref(), Some("7"));
        assert!(config.btn_id.is_none());
        assert!(config.center_image_url.is_none());
        assert!(config.countdown_targets().is_empty());
        assert_eq!(config.spin_url.as_deref(), Some("/spin/"));
    }

    #[test]
    fn test_empty_config_is_usable() {
        let config = WheelConfig::from_json("{}").unwrap();
        let settings = WheelSettings::from_config(&config, PageLocation::default());
        assert_eq!(settings.segments.len(), 5);
        assert!(settings.milestones.is_empty());
        assert!(config.reset_countdown().is_none());
        assert!(WheelConfig::from_json("[").is_err());
    }
}

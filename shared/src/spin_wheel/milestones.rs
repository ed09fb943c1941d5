use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::lenient;
use super::segments::json_list;
use crate::error::WheelError;

/// Kind of bonus prize unlocked by a milestone or awarded by a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeType {
    DiscountPercent,
    FreeShipping,
    MysteryBoxMinTotal,
}

impl PrizeType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "discount_percent" => Some(Self::DiscountPercent),
            "free_shipping" => Some(Self::FreeShipping),
            "mystery_box_min_total" => Some(Self::MysteryBoxMinTotal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MilestoneDefinition {
    #[validate(range(min = 1))]
    pub threshold_spins: u32,
    pub prize_type: Option<PrizeType>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_percent: Option<f64>,
    #[validate(range(min = 0.0))]
    pub min_order_total: Option<f64>,
    pub label: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMilestone {
    Threshold(f64),
    Detailed(RawMilestoneFields),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMilestoneFields {
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub threshold_spins: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub prize_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub discount_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub min_order_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub coupon_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
}

impl RawMilestone {
    fn into_definition(self) -> Option<MilestoneDefinition> {
        match self {
            RawMilestone::Threshold(n) if n.is_finite() && n >= 0.0 => Some(MilestoneDefinition {
                threshold_spins: n.trunc() as u32,
                prize_type: None,
                discount_percent: None,
                min_order_total: None,
                label: String::new(),
            }),
            RawMilestone::Threshold(_) => None,
            RawMilestone::Detailed(fields) => Some(MilestoneDefinition {
                threshold_spins: fields.threshold_spins?,
                prize_type: fields.prize_type.as_deref().and_then(PrizeType::parse),
                discount_percent: fields.discount_percent,
                min_order_total: fields.min_order_total,
                label: fields.label.unwrap_or_default(),
            }),
        }
    }
}

pub fn try_parse_milestones(value: Option<&Value>) -> Result<Vec<MilestoneDefinition>, WheelError> {
    let items = json_list(value).map_err(WheelError::Milestones)?;
    let mut milestones = Vec::with_capacity(items.len());

    for item in items {
        let definition = serde_json::from_value::<RawMilestone>(item)
            .ok()
            .and_then(RawMilestone::into_definition);
        match definition {
            Some(definition) => match definition.validate() {
                Ok(()) => milestones.push(definition),
                Err(e) => warn!("Dropping milestone {}: {}", definition.threshold_spins, e),
            },
            None => warn!("Dropping milestone without a usable threshold"),
        }
    }

    milestones.sort_by_key(|m| m.threshold_spins);
    Ok(milestones)
}

pub fn parse_milestones(value: Option<&Value>) -> Vec<MilestoneDefinition> {
    try_parse_milestones(value).unwrap_or_else(|e| {
        warn!("{}; milestones disabled", e);
        Vec::new()
    })
}

/// Client-side mirror of the server's spin counter. Never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MilestoneProgress {
    pub spins: u32,
    pub achieved: BTreeSet<u32>,
}

impl MilestoneProgress {
    pub fn try_parse(value: Option<&Value>) -> Result<Self, WheelError> {
        let object = match value {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::String(raw)) if raw.trim().is_empty() => return Ok(Self::default()),
            Some(Value::String(raw)) => serde_json::from_str::<Value>(raw)
                .map_err(|e| WheelError::Progress(e.to_string()))?,
            Some(other) => other.clone(),
        };
        let fields = match object {
            Value::Object(fields) => fields,
            other => {
                return Err(WheelError::Progress(format!("expected an object, got {}", other)))
            }
        };

        let spins = fields
            .get("spins")
            .and_then(Value::as_u64)
            .map(|n| n.min(u32::MAX as u64) as u32)
            .unwrap_or(0);
        let achieved = fields
            .get("achieved")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_u64)
                    .filter_map(|n| u32::try_from(n).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { spins, achieved })
    }

    pub fn parse(value: Option<&Value>) -> Self {
        Self::try_parse(value).unwrap_or_else(|e| {
            warn!("{}; starting from zero spins", e);
            Self::default()
        })
    }

    /// Optimistic local update after a successful spin.
    pub fn record_spin(&mut self, crossed_threshold: Option<u32>) {
        self.spins = self.spins.saturating_add(1);
        if let Some(threshold) = crossed_threshold {
            self.achieved.insert(threshold);
        }
    }
}

/// A milestone prize that has already been awarded, shown inline in the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievedMilestone {
    pub threshold_spins: u32,
    pub prize_type: Option<PrizeType>,
    pub discount_percent: Option<f64>,
    pub coupon_code: Option<String>,
    pub label: String,
}

impl AchievedMilestone {
    pub(crate) fn from_fields(fields: RawMilestoneFields) -> Option<Self> {
        Some(Self {
            threshold_spins: fields.threshold_spins?,
            prize_type: fields.prize_type.as_deref().and_then(PrizeType::parse),
            discount_percent: fields.discount_percent,
            coupon_code: fields.coupon_code,
            label: fields.label.unwrap_or_default(),
        })
    }
}

pub fn parse_achieved_details(value: Option<&Value>) -> Vec<AchievedMilestone> {
    let items = match json_list(value) {
        Ok(items) => items,
        Err(e) => {
            warn!("Ignoring achieved milestone details: {}", e);
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawMilestoneFields>(item).ok())
        .filter_map(AchievedMilestone::from_fields)
        .collect()
}

/// Progress towards the next milestone threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneBar {
    pub spins: u32,
    pub goal: u32,
    pub percent: u32,
}

impl MilestoneBar {
    pub fn compute(spins: u32, thresholds: &[u32]) -> Self {
        let mut sorted = thresholds.to_vec();
        sorted.sort_unstable();

        let prev = sorted.iter().copied().filter(|t| *t <= spins).max().unwrap_or(0);
        // Past the last threshold the goal stays at the last one.
        let next = sorted
            .iter()
            .copied()
            .find(|t| *t > spins)
            .or_else(|| sorted.last().copied())
            .unwrap_or(spins);

        let span = next.saturating_sub(prev).max(1);
        let done = spins.saturating_sub(prev).min(span);
        let percent = ((done as f64 / span as f64) * 100.0).round() as u32;

        Self {
            spins,
            goal: next,
            percent: percent.min(100),
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {}", self.spins, self.goal)
    }

    pub fn width_style(&self) -> String {
        format!("width: {}%", self.percent)
    }
}

/// One milestone line in the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneLegendEntry {
    pub threshold_spins: u32,
    pub label: String,
    pub achieved: bool,
    pub coupon_code: Option<String>,
}

pub fn milestone_legend(
    milestones: &[MilestoneDefinition],
    progress: &MilestoneProgress,
    details: &[AchievedMilestone],
) -> Vec<MilestoneLegendEntry> {
    milestones
        .iter()
        .map(|m| {
            let detail = details.iter().find(|d| d.threshold_spins == m.threshold_spins);
            MilestoneLegendEntry {
                threshold_spins: m.threshold_spins,
                label: m.label.clone(),
                achieved: progress.achieved.contains(&m.threshold_spins) || detail.is_some(),
                coupon_code: detail.and_then(|d| d.coupon_code.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_detailed_and_bare_thresholds() {
        let value = json!([
            {"threshold_spins": 10, "prize_type": "free_shipping", "label": "Доставка"},
            3,
            {"threshold_spins": "5", "prize_type": "discount_percent", "discount_percent": "10"}
        ]);
        let milestones = parse_milestones(Some(&value));
        let thresholds: Vec<u32> = milestones.iter().map(|m| m.threshold_spins).collect();
        assert_eq!(thresholds, vec![3, 5, 10]);
        assert_eq!(milestones[1].prize_type, Some(PrizeType::DiscountPercent));
        assert_eq!(milestones[1].discount_percent, Some(10.0));
    }

    #[test]
    fn test_invalid_milestones_dropped() {
        let value = json!([
            {"threshold_spins": 0},
            {"threshold_spins": 4, "discount_percent": 150},
            {"prize_type": "free_shipping"},
            {"threshold_spins": 7}
        ]);
        let milestones = parse_milestones(Some(&value));
        assert_eq!(milestones.len(), 1);
        assert_eq!(milestones[0].threshold_spins, 7);
    }

    #[test]
    fn test_malformed_milestones_degrade_to_empty() {
        assert!(parse_milestones(Some(&json!("not json"))).is_empty());
        assert!(parse_milestones(None).is_empty());
    }

    #[test]
    fn test_progress_parse() {
        let progress = MilestoneProgress::parse(Some(&json!(r#"{"spins": 4, "achieved": [3]}"#)));
        assert_eq!(progress.spins, 4);
        assert!(progress.achieved.contains(&3));

        let broken = MilestoneProgress::parse(Some(&json!("{spins")));
        assert_eq!(broken, MilestoneProgress::default());

        let partial = MilestoneProgress::parse(Some(&json!({"spins": "x", "achieved": [1, "2"]})));
        assert_eq!(partial.spins, 0);
        assert_eq!(partial.achieved.len(), 1);
    }

    #[test]
    fn test_record_spin_is_monotonic() {
        let mut progress = MilestoneProgress::default();
        progress.record_spin(None);
        progress.record_spin(Some(2));
        progress.record_spin(Some(2));
        assert_eq!(progress.spins, 3);
        assert_eq!(progress.achieved.len(), 1);
    }

    #[test]
    fn test_bar_between_thresholds() {
        let bar = MilestoneBar::compute(4, &[10, 3]);
        assert_eq!(bar.goal, 10);
        // (4 - 3) / (10 - 3)
        assert_eq!(bar.percent, 14);
        assert_eq!(bar.label(), "4 / 10");
    }

    #[test]
    fn test_bar_before_first_threshold() {
        let bar = MilestoneBar::compute(0, &[5]);
        assert_eq!(bar.percent, 0);
        assert_eq!(bar.label(), "0 / 5");
    }

    #[test]
    fn test_bar_at_last_threshold_starts_empty() {
        let bar = MilestoneBar::compute(10, &[5, 10]);
        assert_eq!(bar.goal, 10);
        assert_eq!(bar.percent, 0);
        assert_eq!(bar.label(), "10 / 10");
    }

    #[test]
    fn test_bar_past_last_threshold_is_capped() {
        let bar = MilestoneBar::compute(12, &[5, 10]);
        assert_eq!(bar.goal, 10);
        assert_eq!(bar.percent, 100);
    }

    #[test]
    fn test_bar_without_milestones() {
        assert_eq!(MilestoneBar::compute(0, &[]).percent, 0);
        let bar = MilestoneBar::compute(3, &[]);
        assert_eq!(bar.percent, 100);
        assert_eq!(bar.label(), "3 / 3");
    }

    #[test]
    fn test_bar_percent_always_in_range() {
        let configs: [&[u32]; 5] = [&[], &[1], &[7], &[1, 2, 3], &[50, 5, 20]];
        for thresholds in configs {
            for spins in 0..80 {
                let bar = MilestoneBar::compute(spins, thresholds);
                assert!(bar.percent <= 100, "{:?} at {}", thresholds, spins);
            }
        }
    }

    #[test]
    fn test_legend_marks_achieved() {
        let milestones = parse_milestones(Some(&json!([
            {"threshold_spins": 3, "label": "Бонус"},
            {"threshold_spins": 6, "label": "Голям бонус"}
        ])));
        let mut progress = MilestoneProgress::default();
        progress.achieved.insert(3);
        let details = parse_achieved_details(Some(&json!([
            {"threshold_spins": 3, "coupon_code": "MS3-ABC"}
        ])));

        let legend = milestone_legend(&milestones, &progress, &details);
        assert!(legend[0].achieved);
        assert_eq!(legend[0].coupon_code.as_deref(), Some("MS3-ABC"));
        assert!(!legend[1].achieved);
    }
}

//! What the widget shows in its result and coupon areas, independent of the DOM.

use super::currency::{format_dual_currency, format_percent};
use super::links::AuthLinks;
use super::milestones::PrizeType;
use super::response::{SpinMilestone, SpinResponse};
use crate::constants::{
    COUPON_PREFIX, FREE_SHIPPING_TEXT, MILESTONE_PREFIX, MILESTONE_SPINS_WORD, MYSTERY_BOX_PREFIX,
};

/// A run of text, optionally emphasised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPart {
    Plain(String),
    Strong(String),
}

impl TextPart {
    fn plain(text: impl Into<String>) -> Self {
        TextPart::Plain(text.into())
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        match self {
            TextPart::Plain(text) | TextPart::Strong(text) => text,
        }
    }
}

#[cfg(test)]
pub fn plain_text(parts: &[TextPart]) -> String {
    parts.iter().map(TextPart::text).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Empty,
    Prize(String),
    AuthPrompt { message: String, links: AuthLinks },
    Failure(String),
}

impl ResultView {
    /// Text content as the result element would report it.
    #[cfg(test)]
    pub fn text(&self) -> String {
        match self {
            ResultView::Empty => String::new(),
            ResultView::Prize(label) => label.clone(),
            ResultView::AuthPrompt { message, .. } => message.clone(),
            ResultView::Failure(message) => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrizeNote {
    Coupon { code: String, discount_percent: Option<f64> },
    FreeShipping,
    MysteryBox { min_order_total: Option<f64> },
}

impl PrizeNote {
    pub fn from_response(response: &SpinResponse) -> Option<Self> {
        if let Some(code) = &response.coupon_code {
            return Some(PrizeNote::Coupon {
                code: code.clone(),
                discount_percent: response.discount_percent,
            });
        }
        match response.prize_type {
            Some(PrizeType::FreeShipping) => Some(PrizeNote::FreeShipping),
            Some(PrizeType::MysteryBoxMinTotal) => Some(PrizeNote::MysteryBox {
                min_order_total: response.min_order_total,
            }),
            _ => None,
        }
    }

    pub fn parts(&self) -> Vec<TextPart> {
        match self {
            PrizeNote::Coupon { code, discount_percent } => {
                let mut parts = vec![TextPart::plain(COUPON_PREFIX), TextPart::Strong(code.clone())];
                if let Some(percent) = discount_percent {
                    parts.push(TextPart::plain(format!(" ( -{}% )", format_percent(*percent))));
                }
                parts
            }
            PrizeNote::FreeShipping => vec![TextPart::plain(FREE_SHIPPING_TEXT)],
            PrizeNote::MysteryBox { min_order_total } => vec![TextPart::plain(format!(
                "{}{}",
                MYSTERY_BOX_PREFIX,
                format_dual_currency(*min_order_total)
            ))],
        }
    }
}

/// Highlighted note for a milestone reached by this spin.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneNote {
    pub milestone: SpinMilestone,
}

impl MilestoneNote {
    pub fn parts(&self) -> Vec<TextPart> {
        let m = &self.milestone;
        let heading = match m.threshold_spins {
            Some(threshold) => format!("{} ({} {}): ", MILESTONE_PREFIX, threshold, MILESTONE_SPINS_WORD),
            None => format!("{}: ", MILESTONE_PREFIX),
        };

        match (m.prize_type, &m.coupon_code) {
            (Some(PrizeType::DiscountPercent), Some(code)) => {
                let percent = m.discount_percent.map(format_percent).unwrap_or_default();
                vec![
                    TextPart::plain(format!("{}-{}% с код ", heading, percent)),
                    TextPart::Strong(code.clone()),
                    TextPart::plain("."),
                ]
            }
            (Some(PrizeType::FreeShipping), _) => {
                vec![TextPart::plain(format!("{}Безплатна доставка.", heading))]
            }
            (Some(PrizeType::MysteryBoxMinTotal), _) => vec![TextPart::plain(format!(
                "{}Mystery Box при поръчка над {}.",
                heading,
                format_dual_currency(m.min_order_total)
            ))],
            _ => vec![TextPart::plain(format!("{}{}", heading, m.label))],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CouponView {
    pub prize: Option<PrizeNote>,
    pub milestone: Option<MilestoneNote>,
}

impl CouponView {
    pub fn from_response(response: &SpinResponse) -> Self {
        Self {
            prize: PrizeNote::from_response(response),
            milestone: response.milestone.clone().map(|milestone| MilestoneNote { milestone }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prize.is_none() && self.milestone.is_none()
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        let mut text = self.prize.as_ref().map(|p| plain_text(&p.parts())).unwrap_or_default();
        if let Some(note) = &self.milestone {
            text.push(' ');
            text.push_str(&plain_text(&note.parts()));
        }
        text
    }
}

/// Snapshot of everything the widget renders outside the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelView {
    pub result: ResultView,
    pub coupon: CouponView,
    pub button_disabled: bool,
    pub spinning: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> SpinResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_coupon_note() {
        let view = CouponView::from_response(&response(
            r#"{"success": true, "label": "Отстъпка 5%", "coupon_code": "SPIN5", "discount_percent": 5}"#,
        ));
        assert_eq!(view.text(), "Код за отстъпка: SPIN5 ( -5% )");
        let parts = view.prize.unwrap().parts();
        assert_eq!(parts[1], TextPart::Strong("SPIN5".to_string()));
    }

    #[test]
    fn test_free_shipping_and_mystery_box_notes() {
        let shipping = CouponView::from_response(&response(
            r#"{"success": true, "label": "x", "prize_type": "free_shipping"}"#,
        ));
        assert_eq!(shipping.text(), FREE_SHIPPING_TEXT);

        let mystery = CouponView::from_response(&response(
            r#"{"success": true, "label": "x", "prize_type": "mystery_box_min_total", "min_order_total": "97.79"}"#,
        ));
        assert_eq!(
            mystery.text(),
            "Спечели: Mystery Box при поръчка над 50,00 € / 97,79 лв."
        );
    }

    #[test]
    fn test_milestone_note() {
        let view = CouponView::from_response(&response(
            r#"{"success": true, "label": "x", "milestone": {"threshold_spins": 5, "prize_type": "discount_percent", "discount_percent": 10, "coupon_code": "MS5"}}"#,
        ));
        assert!(view.prize.is_none());
        assert_eq!(
            view.text(),
            " Милестон награда (5 завъртания): -10% с код MS5."
        );
    }

    #[test]
    fn test_plain_label_has_no_coupon() {
        let view = CouponView::from_response(&response(r#"{"success": true, "label": "Опитай пак утре"}"#));
        assert!(view.is_empty());
        assert_eq!(view.text(), "");
    }
}

use log::{error, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::lenient;
use super::milestones::{PrizeType, RawMilestoneFields};
use crate::constants::{AUTH_REQUIRED_MESSAGE, RETRY_TOMORROW_MESSAGE};
use crate::error::WheelError;

/// Status and raw body of the spin endpoint's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Milestone reached by the spin that was just performed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinMilestone {
    pub threshold_spins: Option<u32>,
    pub prize_type: Option<PrizeType>,
    pub discount_percent: Option<f64>,
    pub min_order_total: Option<f64>,
    pub coupon_code: Option<String>,
    pub label: String,
}

fn opt_milestone<'de, D>(deserializer: D) -> Result<Option<SpinMilestone>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(value @ Value::Object(_)) = value else {
        return Ok(None);
    };
    Ok(serde_json::from_value::<RawMilestoneFields>(value)
        .ok()
        .map(|fields| SpinMilestone {
            threshold_spins: fields.threshold_spins,
            prize_type: fields.prize_type.as_deref().and_then(PrizeType::parse),
            discount_percent: fields.discount_percent,
            min_order_total: fields.min_order_total,
            coupon_code: fields.coupon_code,
            label: fields.label.unwrap_or_default(),
        }))
}

fn opt_prize_type<'de, D>(deserializer: D) -> Result<Option<PrizeType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::opt_string(deserializer)?.as_deref().and_then(PrizeType::parse))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpinResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub coupon_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub discount_percent: Option<f64>,
    #[serde(default, deserialize_with = "opt_prize_type")]
    pub prize_type: Option<PrizeType>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub min_order_total: Option<f64>,
    #[serde(default, deserialize_with = "opt_milestone")]
    pub milestone: Option<SpinMilestone>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthRequiredBody {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    login_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    message: Option<String>,
}

/// What a finished request means for the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Won { label: String, response: SpinResponse },
    AuthRequired { login_url: Option<String>, message: String },
    Failed { message: String },
}

impl SpinOutcome {
    fn failed(message: Option<String>) -> Self {
        SpinOutcome::Failed {
            message: message.unwrap_or_else(|| RETRY_TOMORROW_MESSAGE.to_string()),
        }
    }
}

pub fn classify_reply(reply: Result<HttpReply, WheelError>) -> SpinOutcome {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            error!("Spin request failed: {}", e);
            return SpinOutcome::failed(None);
        }
    };

    if reply.status == 401 {
        let body = serde_json::from_str::<AuthRequiredBody>(&reply.body).unwrap_or_default();
        return SpinOutcome::AuthRequired {
            login_url: body.login_url,
            message: body.message.unwrap_or_else(|| AUTH_REQUIRED_MESSAGE.to_string()),
        };
    }

    if !reply.is_ok() {
        warn!("Spin endpoint answered {}", reply.status);
        let body = serde_json::from_str::<ErrorBody>(&reply.body).unwrap_or_default();
        return SpinOutcome::failed(body.message);
    }

    let response = match serde_json::from_str::<SpinResponse>(&reply.body) {
        Ok(response) => response,
        Err(e) => {
            error!("{}", WheelError::from(e));
            return SpinOutcome::failed(None);
        }
    };

    if !response.success {
        return SpinOutcome::failed(response.message);
    }

    match response.label.clone() {
        Some(label) => SpinOutcome::Won { label, response },
        None => {
            warn!("Successful spin without a label");
            SpinOutcome::failed(response.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_won_with_coupon() {
        let body = r#"{"success": true, "label": "Отстъпка 5%", "coupon_code": "SPIN-5", "discount_percent": "5.00", "prize_type": "discount_percent"}"#;
        match classify_reply(Ok(HttpReply::new(200, body))) {
            SpinOutcome::Won { label, response } => {
                assert_eq!(label, "Отстъпка 5%");
                assert_eq!(response.coupon_code.as_deref(), Some("SPIN-5"));
                assert_eq!(response.discount_percent, Some(5.0));
                assert_eq!(response.prize_type, Some(PrizeType::DiscountPercent));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_milestone_is_parsed_leniently() {
        let body = r#"{"success": true, "label": "A", "milestone": {"threshold_spins": "10", "prize_type": "free_shipping"}}"#;
        let SpinOutcome::Won { response, .. } = classify_reply(Ok(HttpReply::new(200, body))) else {
            panic!("expected a win");
        };
        let milestone = response.milestone.unwrap();
        assert_eq!(milestone.threshold_spins, Some(10));
        assert_eq!(milestone.prize_type, Some(PrizeType::FreeShipping));

        let odd = r#"{"success": true, "label": "A", "milestone": "yes"}"#;
        let SpinOutcome::Won { response, .. } = classify_reply(Ok(HttpReply::new(200, odd))) else {
            panic!("expected a win");
        };
        assert!(response.milestone.is_none());
    }

    #[test]
    fn test_unauthorized() {
        let outcome = classify_reply(Ok(HttpReply::new(401, r#"{"login_url": "/login/"}"#)));
        assert_eq!(
            outcome,
            SpinOutcome::AuthRequired {
                login_url: Some("/login/".to_string()),
                message: AUTH_REQUIRED_MESSAGE.to_string(),
            }
        );

        let html = classify_reply(Ok(HttpReply::new(401, "<html>")));
        assert!(matches!(html, SpinOutcome::AuthRequired { login_url: None, .. }));
    }

    #[test]
    fn test_failures_use_server_message_or_retry_text() {
        let limited = classify_reply(Ok(HttpReply::new(429, r#"{"message": "Вече завъртяхте днес."}"#)));
        assert_eq!(limited, SpinOutcome::Failed { message: "Вече завъртяхте днес.".to_string() });

        let refused = classify_reply(Ok(HttpReply::new(200, r#"{"success": false}"#)));
        assert_eq!(refused, SpinOutcome::Failed { message: RETRY_TOMORROW_MESSAGE.to_string() });

        let garbage = classify_reply(Ok(HttpReply::new(200, "oops")));
        assert_eq!(garbage, SpinOutcome::Failed { message: RETRY_TOMORROW_MESSAGE.to_string() });

        let unlabeled = classify_reply(Ok(HttpReply::new(200, r#"{"success": true}"#)));
        assert!(matches!(unlabeled, SpinOutcome::Failed { .. }));

        let offline = classify_reply(Err(WheelError::Network("Failed to fetch".to_string())));
        assert_eq!(offline, SpinOutcome::Failed { message: RETRY_TOMORROW_MESSAGE.to_string() });
    }
}

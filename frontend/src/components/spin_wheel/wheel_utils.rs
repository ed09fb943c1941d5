use std::rc::Rc;

use gloo_net::http::Request;
use log::{debug, error};
use wheel_shared::constants::{MILESTONE_SPINS_WORD, SIGN_IN_LINK_TEXT, SIGN_UP_LINK_TEXT, SPIN_BUTTON_LABEL};
use wheel_shared::spin_wheel::{
    CouponView, HttpReply, MilestoneLegendEntry, ResultView, Segment, SpinRequest, SpinTransport,
    TextPart,
};
use wheel_shared::WheelError;
use yew::prelude::*;

use crate::styles;

/// Posts to the spin endpoint with the form content type and CSRF header the
/// server expects. The body is always empty.
pub struct FetchTransport;

impl SpinTransport for FetchTransport {
    async fn post_spin(&self, request: &SpinRequest) -> Result<HttpReply, WheelError> {
        debug!("POST {}", request.url);
        let response = Request::post(&request.url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("X-CSRFToken", &request.csrf_token)
            .body("")
            .map_err(|e| WheelError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| {
                error!("Spin request failed: {}", e);
                WheelError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| WheelError::Body(e.to_string()))?;
        Ok(HttpReply::new(status, body))
    }
}

pub fn render_parts(parts: &[TextPart]) -> Html {
    parts
        .iter()
        .map(|part| match part {
            TextPart::Plain(text) => html! { {text.clone()} },
            TextPart::Strong(text) => html! { <strong>{text.clone()}</strong> },
        })
        .collect::<Html>()
}

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub id: AttrValue,
    pub result: ResultView,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let content = match &props.result {
        ResultView::Empty => html! {},
        ResultView::Prize(label) => html! { {label.clone()} },
        ResultView::Failure(message) => html! { {message.clone()} },
        ResultView::AuthPrompt { message, links } => html! {
            <span class="spin-auth-prompt">
                {message.clone()}
                {" "}
                <a class={styles::RESULT_LINK} href={links.sign_in.clone()}>{SIGN_IN_LINK_TEXT}</a>
                {" "}
                <a class={styles::RESULT_LINK} href={links.sign_up.clone()}>{SIGN_UP_LINK_TEXT}</a>
            </span>
        },
    };

    html! {
        <div id={props.id.clone()} class={styles::RESULT} aria-live="polite">
            {content}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CouponDisplayProps {
    pub id: AttrValue,
    pub coupon: CouponView,
}

#[function_component(CouponDisplay)]
pub fn coupon_display(props: &CouponDisplayProps) -> Html {
    let coupon = &props.coupon;
    html! {
        <div id={props.id.clone()} class={styles::COUPON} hidden={coupon.is_empty()}>
            if let Some(prize) = &coupon.prize {
                <span>{render_parts(&prize.parts())}</span>
            }
            if let Some(note) = &coupon.milestone {
                <div class={styles::COUPON_MILESTONE}>{render_parts(&note.parts())}</div>
            }
        </div>
    }
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub id: AttrValue,
    pub disabled: bool,
    pub spinning: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let class = if props.disabled {
        styles::SPIN_BUTTON_DISABLED
    } else {
        styles::SPIN_BUTTON
    };

    html! {
        <button
            id={props.id.clone()}
            type="button"
            {class}
            disabled={props.disabled}
            aria-busy={props.spinning.to_string()}
            onclick={props.onclick.clone()}
        >
            {SPIN_BUTTON_LABEL}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct WheelLegendProps {
    pub id: AttrValue,
    pub segments: Rc<Vec<Segment>>,
    pub milestones: Vec<MilestoneLegendEntry>,
}

/// Prize swatches followed by the milestone list, with codes shown inline once achieved.
#[function_component(WheelLegend)]
pub fn wheel_legend(props: &WheelLegendProps) -> Html {
    html! {
        <div id={props.id.clone()}>
            <ul class={styles::LEGEND}>
                { for props.segments.iter().map(|segment| html! {
                    <li class={styles::LEGEND_ITEM}>
                        <span class={styles::LEGEND_SWATCH} style={format!("background: {}", segment.color)}></span>
                        {segment.label.clone()}
                    </li>
                }) }
            </ul>
            if !props.milestones.is_empty() {
                <ul class={styles::MILESTONE_LIST}>
                    { for props.milestones.iter().map(milestone_entry) }
                </ul>
            }
        </div>
    }
}

fn milestone_entry(entry: &MilestoneLegendEntry) -> Html {
    let class = if entry.achieved {
        styles::MILESTONE_ENTRY_ACHIEVED
    } else {
        styles::MILESTONE_ENTRY
    };
    let title = if entry.label.is_empty() {
        format!("{} {}", entry.threshold_spins, MILESTONE_SPINS_WORD)
    } else {
        format!("{} {}: {}", entry.threshold_spins, MILESTONE_SPINS_WORD, entry.label)
    };

    html! {
        <li {class}>
            <span>{title}</span>
            if entry.achieved {
                <span>
                    {"✓"}
                    if let Some(code) = &entry.coupon_code {
                        {" "}<strong>{code.clone()}</strong>
                    }
                </span>
            }
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct WheelFallbackProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    pub segments: Rc<Vec<Segment>>,
}

/// Static prize list shown when the browser cannot draw on a canvas.
#[function_component(WheelFallback)]
pub fn wheel_fallback(props: &WheelFallbackProps) -> Html {
    html! {
        <div id={props.id.clone()} class={styles::WHEEL_FALLBACK}>
            <ul>
                { for props.segments.iter().map(|segment| html! { <li>{segment.label.clone()}</li> }) }
            </ul>
        </div>
    }
}

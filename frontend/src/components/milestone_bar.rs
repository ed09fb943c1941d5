use wheel_shared::spin_wheel::MilestoneBar;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct MilestoneBarProps {
    #[prop_or_default]
    pub progress_id: Option<AttrValue>,
    #[prop_or_default]
    pub label_id: Option<AttrValue>,
    pub bar: MilestoneBar,
}

/// Progress towards the next milestone. Each half renders only when the host configured an id for it.
#[function_component(MilestoneBarDisplay)]
pub fn milestone_bar_display(props: &MilestoneBarProps) -> Html {
    if props.progress_id.is_none() && props.label_id.is_none() {
        return html! {};
    }

    html! {
        <div class="w-full flex flex-col gap-1">
            if let Some(id) = props.progress_id.clone() {
                <div class={styles::MILESTONE_TRACK}>
                    <div
                        {id}
                        class={styles::MILESTONE_FILL}
                        style={props.bar.width_style()}
                        role="progressbar"
                        aria-valuenow={props.bar.percent.to_string()}
                        aria-valuemin="0"
                        aria-valuemax="100"
                    ></div>
                </div>
            }
            if let Some(id) = props.label_id.clone() {
                <span {id} class={styles::MILESTONE_LABEL}>{props.bar.label()}</span>
            }
        </div>
    }
}

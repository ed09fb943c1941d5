use wheel_shared::spin_wheel::Countdown;
use yew::prelude::*;

use crate::hooks::use_countdown;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct CountdownDisplayProps {
    pub countdown: Countdown,
}

/// `HH:MM:SS` until the next daily reset, mounted straight into a host page element.
#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownDisplayProps) -> Html {
    let tick = use_countdown(props.countdown);

    html! {
        <span class={styles::COUNTDOWN} data-finished={tick.finished.to_string()}>
            {tick.text}
        </span>
    }
}

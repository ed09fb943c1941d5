pub mod components;
pub mod config;
pub mod hooks;
pub mod styles;

use std::rc::Rc;

use gloo_utils::document;
use log::{debug, info};
use yew::Renderer;

use crate::components::countdown::{CountdownDisplay, CountdownDisplayProps};
use crate::components::spin_wheel::{SpinWheelProps, SpinWheelWidget};

/// Mounts a widget into every wheel root the host page declares, plus the
/// countdown displays each wheel points at.
pub fn mount_all() {
    let page = config::page_location();
    let wheels = config::host_wheels();
    info!("Mounting {} spin wheel(s)", wheels.len());

    for wheel in wheels {
        debug!("Mounting wheel into `{}`", wheel.root_id);
        let config = Rc::new(wheel.config);
        let props = SpinWheelProps {
            config: config.clone(),
            page: page.clone(),
        };
        wheel.root.set_text_content(None);
        Renderer::<SpinWheelWidget>::with_root_and_props(wheel.root, props).render();

        let Some(countdown) = config.reset_countdown() else {
            continue;
        };
        for id in config.countdown_targets() {
            match document().get_element_by_id(&id) {
                Some(target) => {
                    target.set_text_content(None);
                    Renderer::<CountdownDisplay>::with_root_and_props(target, CountdownDisplayProps { countdown })
                        .render();
                }
                None => debug!("Countdown element `{}` not in page", id),
            }
        }
    }
}

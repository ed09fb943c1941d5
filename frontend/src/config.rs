use gloo_utils::{document, window};
use log::{error, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDocument};
use wheel_shared::spin_wheel::{PageLocation, WheelConfig};

/// The host page embeds one of these per wheel; the attribute value is the root element id.
pub const CONFIG_SELECTOR: &str = "script[type=\"application/json\"][data-spin-wheel-config]";
const ROOT_ID_ATTRIBUTE: &str = "data-spin-wheel-config";

/// A wheel declared by the host page, ready to mount.
pub struct HostWheel {
    pub root_id: String,
    pub root: Element,
    pub config: WheelConfig,
}

pub fn host_wheels() -> Vec<HostWheel> {
    let document = document();
    let scripts = match document.query_selector_all(CONFIG_SELECTOR) {
        Ok(scripts) => scripts,
        Err(e) => {
            error!("Failed to look up wheel configs: {:?}", e);
            return Vec::new();
        }
    };

    let mut wheels = Vec::new();
    for index in 0..scripts.length() {
        let Some(script) = scripts.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let root_id = script.get_attribute(ROOT_ID_ATTRIBUTE).unwrap_or_default();
        let Some(root) = document.get_element_by_id(&root_id) else {
            warn!("Wheel root `{}` not found; skipping", root_id);
            continue;
        };

        let raw = script.text_content().unwrap_or_default();
        match WheelConfig::from_json(&raw) {
            Ok(config) => wheels.push(HostWheel { root_id, root, config }),
            Err(e) => error!("Skipping wheel `{}`: {}", root_id, e),
        }
    }
    wheels
}

pub fn page_location() -> PageLocation {
    let location = window().location();
    PageLocation {
        href: location.href().unwrap_or_default(),
        pathname: location.pathname().unwrap_or_default(),
    }
}

pub fn page_cookies() -> String {
    document()
        .dyn_into::<HtmlDocument>()
        .ok()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

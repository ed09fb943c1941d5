use log::{debug, error};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;
use yew::prelude::*;

/// Loads the hub image in the background. Returns the element once it has
/// finished loading and calls `on_load` at that point.
#[hook]
pub fn use_hub_image(url: Option<String>, on_load: Callback<()>) -> Option<HtmlImageElement> {
    let loaded = use_state(|| None::<HtmlImageElement>);

    {
        let loaded = loaded.clone();
        use_effect_with(url, move |url| {
            let pending = url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .and_then(|url| start_loading(url, loaded, on_load));

            move || {
                if let Some((image, _onload)) = pending {
                    image.set_onload(None);
                }
            }
        });
    }

    (*loaded).clone()
}

fn start_loading(
    url: &str,
    loaded: UseStateHandle<Option<HtmlImageElement>>,
    on_load: Callback<()>,
) -> Option<(HtmlImageElement, Closure<dyn FnMut()>)> {
    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(e) => {
            error!("Failed to create hub image: {:?}", e);
            return None;
        }
    };

    let onload = {
        let image = image.clone();
        let url = url.to_string();
        Closure::wrap(Box::new(move || {
            debug!("Hub image `{}` loaded", url);
            loaded.set(Some(image.clone()));
            on_load.emit(());
        }) as Box<dyn FnMut()>)
    };
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_src(url);
    Some((image, onload))
}

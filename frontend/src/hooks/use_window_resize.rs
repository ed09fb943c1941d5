use gloo_events::EventListener;
use gloo_utils::window;
use yew::prelude::*;

/// Calls `on_resize` for every window `resize` event while the component is mounted.
#[hook]
pub fn use_window_resize(on_resize: Callback<()>) {
    use_effect_with(on_resize, |on_resize| {
        let on_resize = on_resize.clone();
        let listener = EventListener::new(&window(), "resize", move |_| on_resize.emit(()));
        move || drop(listener)
    });
}

mod wheel_canvas;
mod wheel_utils;

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use wheel_shared::spin_wheel::{run_spin, PageLocation, SpinAnimation, SpinWheel, WheelConfig, WheelSettings};
use yew::prelude::*;

use crate::components::MilestoneBarDisplay;
use crate::hooks::{use_hub_image, use_redraw, use_window_resize};
use crate::styles;

pub use wheel_canvas::{context_2d, draw_wheel, WheelCanvas};
pub use wheel_utils::{
    render_parts, CouponDisplay, FetchTransport, ResultDisplay, SpinButton, WheelFallback, WheelLegend,
};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(callback: &FrameCallback) {
    if let (Some(window), Some(closure)) = (web_sys::window(), callback.borrow().as_ref()) {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

/// Eases the wheel from 0 to the animation's target, one frame at a time,
/// then hands control to `on_done`.
fn animate_spin(animation: SpinAnimation, rotation: UseStateHandle<f64>, on_done: impl FnOnce() + 'static) {
    let start_time = js_sys::Date::now();
    let mut on_done = Some(on_done);

    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let elapsed = js_sys::Date::now() - start_time;
        rotation.set(animation.angle_at(elapsed));

        if animation.is_complete(elapsed) {
            // Drop our own closure to break the Rc cycle.
            let _ = f.borrow_mut().take();
            if let Some(done) = on_done.take() {
                done();
            }
        } else {
            request_frame(&f);
        }
    }) as Box<dyn FnMut()>));

    request_frame(&g);
}

#[derive(Properties, PartialEq)]
pub struct SpinWheelProps {
    pub config: Rc<WheelConfig>,
    pub page: PageLocation,
}

#[function_component(SpinWheelWidget)]
pub fn spin_wheel_widget(props: &SpinWheelProps) -> Html {
    let wheel = {
        let config = props.config.clone();
        let page = props.page.clone();
        use_mut_ref(move || SpinWheel::new(WheelSettings::from_config(&config, page)))
    };
    let segments = {
        let wheel = wheel.clone();
        use_memo((), move |_| wheel.borrow().segments().to_vec())
    };

    let refresh = use_force_update();
    let rotation = use_state(|| 0.0_f64);
    let surface_missing = use_state(|| false);
    let (generation, bump_generation) = use_redraw();

    // Layout changes and the hub image both repaint the wheel at rest.
    let redraw_at_rest = {
        let rotation = rotation.clone();
        use_callback(bump_generation, move |_: (), bump| {
            rotation.set(0.0);
            bump.emit(());
        })
    };
    use_window_resize(redraw_at_rest.clone());
    let hub_image = use_hub_image(props.config.center_image_url.clone(), redraw_at_rest);

    let on_unavailable = {
        let surface_missing = surface_missing.clone();
        Callback::from(move |_: ()| {
            warn!("Canvas 2D context unavailable; showing the static fallback");
            surface_missing.set(true);
        })
    };

    let start_spin = {
        let wheel = wheel.clone();
        let refresh = refresh.clone();
        let rotation = rotation.clone();
        let animate = !*surface_missing;

        Callback::from(move |_: ()| {
            let Some(request) = wheel.borrow_mut().begin_spin(&crate::config::page_cookies()) else {
                return;
            };
            refresh.force_update();

            let wheel = wheel.clone();
            let refresh = refresh.clone();
            let rotation = rotation.clone();
            spawn_local(async move {
                let mut rng = rand::thread_rng();
                let animation = run_spin(&wheel, &FetchTransport, request, &mut rng).await;
                refresh.force_update();

                let Some(animation) = animation else {
                    return;
                };
                let finish = move || {
                    wheel.borrow_mut().finish_spin();
                    refresh.force_update();
                };
                if animate {
                    animate_spin(animation, rotation, finish);
                } else {
                    debug!("No canvas; settling the spin without animation");
                    finish();
                }
            });
        })
    };

    let on_button_click = {
        let start_spin = start_spin.clone();
        Callback::from(move |_: MouseEvent| start_spin.emit(()))
    };

    let (view, bar, legend, hub_clickable, spin_enabled) = {
        let wheel = wheel.borrow();
        (
            wheel.view(),
            wheel.milestone_bar(),
            wheel.milestone_legend(),
            wheel.can_spin(),
            wheel.spin_enabled(),
        )
    };
    let config = &props.config;
    let attr = |id: &Option<String>| id.clone().filter(|id| !id.is_empty()).map(AttrValue::from);

    html! {
        <div class={styles::WHEEL_ROOT}>
            <div class={classes!(styles::WHEEL_WRAPPER, view.spinning.then_some("is-spinning"))}>
                if *surface_missing {
                    <WheelFallback id={attr(&config.fallback_id)} segments={segments.clone()} />
                } else {
                    <div class={styles::WHEEL_POINTER} aria-hidden="true"></div>
                    <WheelCanvas
                        id={attr(&config.canvas_id)}
                        segments={segments.clone()}
                        rotation={*rotation}
                        {generation}
                        {hub_image}
                        {hub_clickable}
                        on_hub_click={start_spin}
                        {on_unavailable}
                    />
                }
            </div>
            if let Some(id) = attr(&config.legend_id) {
                <WheelLegend {id} segments={segments.clone()} milestones={legend} />
            }
            if let Some(id) = attr(&config.btn_id) {
                <SpinButton
                    {id}
                    disabled={view.button_disabled || !spin_enabled}
                    spinning={view.spinning}
                    onclick={on_button_click}
                />
            }
            if let Some(id) = attr(&config.result_id) {
                <ResultDisplay {id} result={view.result.clone()} />
            }
            if let Some(id) = attr(&config.coupon_id) {
                <CouponDisplay {id} coupon={view.coupon.clone()} />
            }
            <MilestoneBarDisplay
                progress_id={attr(&config.milestone_progress_id)}
                label_id={attr(&config.milestone_label_id)}
                {bar}
            />
        </div>
    }
}

use std::f64::consts::TAU;
use std::rc::Rc;

use log::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};
use wheel_shared::spin_wheel::geometry::{fit_font_size, in_hub, wedges, LABEL_FONT_FLOOR};
use wheel_shared::spin_wheel::{hex_to_rgba, Segment, WheelLayout};
use yew::prelude::*;

use crate::styles;

const WEDGE_ALPHA: f64 = 0.85;
const RIM_STROKE: &str = "rgba(255,255,255,0.65)";
const LABEL_FILL: &str = "#111";
const LABEL_SHADOW: &str = "rgba(255,255,255,0.35)";
const GLOSS_INNER: &str = "rgba(255,255,255,0.18)";
const GLOSS_OUTER: &str = "rgba(255,255,255,0.02)";
const HUB_FILL: &str = "#ffffff";
const HUB_STROKE: &str = "rgba(0,0,0,0.08)";

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Resizes the backing store to the wrapper width and device pixel ratio, then
/// scales the context so drawing happens in CSS pixels.
fn setup_hidpi(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) -> Result<WheelLayout, JsValue> {
    let wrapper_width = canvas
        .parent_element()
        .map(|wrapper| wrapper.client_width() as f64)
        .unwrap_or(0.0);
    let dpr = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let layout = WheelLayout::new(wrapper_width, dpr);

    canvas.set_width(layout.backing_size);
    canvas.set_height(layout.backing_size);
    let style = canvas.style();
    style.set_property("width", &format!("{}px", layout.size))?;
    style.set_property("height", &format!("{}px", layout.size))?;
    ctx.set_transform(layout.dpr, 0.0, 0.0, layout.dpr, 0.0, 0.0)?;
    Ok(layout)
}

/// Paints the whole wheel with the first wedge starting at `angle`.
pub fn draw_wheel(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    segments: &[Segment],
    angle: f64,
    hub_image: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    let layout = setup_hidpi(canvas, ctx)?;
    ctx.clear_rect(0.0, 0.0, layout.size, layout.size);

    ctx.save();
    ctx.translate(layout.center, layout.center)?;
    ctx.set_line_width(layout.rim_line_width);
    ctx.set_stroke_style_str(RIM_STROKE);

    for (segment, wedge) in segments.iter().zip(wedges(segments.len(), angle)) {
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.arc(0.0, 0.0, layout.radius, wedge.start, wedge.end)?;
        ctx.close_path();
        ctx.set_fill_style_str(&hex_to_rgba(&segment.color, WEDGE_ALPHA));
        ctx.fill();
        ctx.stroke();
        draw_label(ctx, &layout, &segment.label, wedge.mid())?;
    }

    draw_gloss(ctx, &layout)?;
    draw_hub(ctx, &layout, hub_image)?;
    ctx.restore();
    Ok(())
}

fn draw_label(ctx: &CanvasRenderingContext2d, layout: &WheelLayout, label: &str, mid: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.rotate(mid)?;
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.set_shadow_color(LABEL_SHADOW);
    ctx.set_shadow_blur(0.0);

    let px = fit_font_size(layout.base_font_px, LABEL_FONT_FLOOR, layout.label_space, |px| {
        ctx.set_font(&WheelLayout::font(px));
        ctx.measure_text(label).map(|m| m.width()).unwrap_or(0.0)
    });
    ctx.set_font(&WheelLayout::font(px));
    ctx.set_text_align("right");
    ctx.set_text_baseline("middle");
    ctx.fill_text(label, layout.label_x_end, 0.0)?;

    ctx.restore();
    Ok(())
}

fn draw_gloss(ctx: &CanvasRenderingContext2d, layout: &WheelLayout) -> Result<(), JsValue> {
    let gloss = ctx.create_radial_gradient(0.0, 0.0, layout.radius * 0.1, 0.0, 0.0, layout.radius)?;
    gloss.add_color_stop(0.0, GLOSS_INNER)?;
    gloss.add_color_stop(1.0, GLOSS_OUTER)?;

    ctx.begin_path();
    ctx.arc(0.0, 0.0, layout.radius, 0.0, TAU)?;
    ctx.close_path();
    ctx.set_fill_style_canvas_gradient(&gloss);
    ctx.fill();
    Ok(())
}

// Drawn last so it covers the point where the wedges meet.
fn draw_hub(
    ctx: &CanvasRenderingContext2d,
    layout: &WheelLayout,
    hub_image: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    let hub = layout.hub_radius;
    ctx.begin_path();
    ctx.arc(0.0, 0.0, hub, 0.0, TAU)?;
    ctx.close_path();

    match hub_image.filter(|image| image.complete()) {
        Some(image) => {
            ctx.save();
            ctx.clip();
            ctx.set_fill_style_str(HUB_FILL);
            ctx.fill_rect(-hub, -hub, hub * 2.0, hub * 2.0);
            let r = layout.hub_image_radius;
            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, -r, -r, r * 2.0, r * 2.0)?;
            ctx.restore();
        }
        None => {
            ctx.set_fill_style_str(HUB_FILL);
            ctx.fill();
        }
    }

    ctx.set_line_width(layout.hub_line_width);
    ctx.set_stroke_style_str(HUB_STROKE);
    ctx.stroke();
    Ok(())
}

fn pointer_in_hub(canvas: &HtmlCanvasElement, e: &MouseEvent) -> bool {
    let rect = canvas.get_bounding_client_rect();
    let dx = e.client_x() as f64 - (rect.left() + rect.width() / 2.0);
    let dy = e.client_y() as f64 - (rect.top() + rect.height() / 2.0);
    in_hub(dx, dy, rect.width(), rect.height())
}

fn set_cursor(canvas: &HtmlCanvasElement, pointer: bool) {
    let style = canvas.style();
    let _ = if pointer {
        style.set_property("cursor", "pointer")
    } else {
        style.remove_property("cursor").map(|_| ())
    };
}

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    pub segments: Rc<Vec<Segment>>,
    pub rotation: f64,
    /// Bumped to force a redraw at an unchanged rotation.
    pub generation: u32,
    #[prop_or_default]
    pub hub_image: Option<HtmlImageElement>,
    pub hub_clickable: bool,
    pub on_hub_click: Callback<()>,
    pub on_unavailable: Callback<()>,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let segments = props.segments.clone();
        let rotation = props.rotation;
        let hub_image = props.hub_image.clone();
        let on_unavailable = props.on_unavailable.clone();

        use_effect(move || {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                match context_2d(&canvas) {
                    Some(ctx) => {
                        if let Err(e) = draw_wheel(&canvas, &ctx, &segments, rotation, hub_image.as_ref()) {
                            error!("Failed to draw wheel: {:?}", e);
                        }
                    }
                    None => on_unavailable.emit(()),
                }
            }
            || ()
        });
    }

    let onclick = {
        let canvas_ref = canvas_ref.clone();
        let hub_clickable = props.hub_clickable;
        let on_hub_click = props.on_hub_click.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if hub_clickable && pointer_in_hub(&canvas, &e) {
                    on_hub_click.emit(());
                }
            }
        })
    };

    let onmousemove = {
        let canvas_ref = canvas_ref.clone();
        let hub_clickable = props.hub_clickable;
        Callback::from(move |e: MouseEvent| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                set_cursor(&canvas, hub_clickable && pointer_in_hub(&canvas, &e));
            }
        })
    };

    let onmouseleave = {
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                set_cursor(&canvas, false);
            }
        })
    };

    html! {
        <canvas
            id={props.id.clone()}
            ref={canvas_ref}
            class={styles::WHEEL_CANVAS}
            {onclick}
            {onmousemove}
            {onmouseleave}
        />
    }
}

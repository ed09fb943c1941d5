//! Wheel geometry: wedge layout, canvas sizing, hub hit-testing and the spin
//! animation curve. Angles are radians in canvas orientation (y grows down),
//! so the pointer at the top of the wheel sits at `-π/2`.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::Rng;

use crate::constants::{SPIN_DURATION_MS, SPIN_FULL_TURNS};

pub const MIN_DISPLAY_SIZE: f64 = 260.0;
pub const MAX_DISPLAY_SIZE: f64 = 480.0;
pub const FALLBACK_WRAPPER_WIDTH: f64 = 320.0;
pub const HUB_HIT_FACTOR: f64 = 0.12;
pub const LABEL_FONT_FLOOR: u32 = 10;
pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

pub fn slice_angle(count: usize) -> f64 {
    TAU / count.max(1) as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[cfg(test)]
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal wedges for `count` segments with the first one starting at `angle`.
pub fn wedges(count: usize, angle: f64) -> Vec<Wedge> {
    let slice = slice_angle(count);
    (0..count)
        .map(|index| {
            let start = index as f64 * slice + angle;
            Wedge {
                index,
                start,
                end: start + slice,
            }
        })
        .collect()
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Smallest signed distance between two angles, in `(-π, π]`.
pub fn angle_distance(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    if d > std::f64::consts::PI {
        d - TAU
    } else {
        d
    }
}

/// Logical and backing dimensions of the canvas for one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub size: f64,
    pub dpr: f64,
    pub backing_size: u32,
    pub center: f64,
    pub radius: f64,
    pub hub_radius: f64,
    pub hub_image_radius: f64,
    pub rim_line_width: f64,
    pub hub_line_width: f64,
    pub label_x_end: f64,
    pub label_space: f64,
    pub base_font_px: u32,
}

impl WheelLayout {
    pub fn new(wrapper_width: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.max(1.0)
        } else {
            1.0
        };
        let width = if wrapper_width.is_finite() && wrapper_width > 0.0 {
            wrapper_width
        } else {
            FALLBACK_WRAPPER_WIDTH
        };
        let size = width.clamp(MIN_DISPLAY_SIZE, MAX_DISPLAY_SIZE);
        let radius = size / 2.0 - 10.0;
        let hub_radius = (size * 0.06).floor().max(14.0);
        let inner_pad = (size * 0.02).floor().max(8.0);
        let label_x_end = radius - 12.0;

        Self {
            size,
            dpr,
            backing_size: (size * dpr).floor() as u32,
            center: size / 2.0,
            radius,
            hub_radius,
            hub_image_radius: (hub_radius * 0.82).floor(),
            rim_line_width: (size * 0.02).floor().max(2.0),
            hub_line_width: (size * 0.01).floor().max(2.0),
            label_x_end,
            label_space: (label_x_end - (hub_radius + inner_pad)).max(20.0),
            base_font_px: ((size * 0.042).floor() as u32).max(LABEL_FONT_FLOOR),
        }
    }

    pub fn font(px: u32) -> String {
        format!("{}px Roboto, Arial, sans-serif", px)
    }
}

/// Shrinks the point size one step at a time until `measure(size)` fits or the floor is hit.
pub fn fit_font_size<F>(start_px: u32, floor_px: u32, available: f64, mut measure: F) -> u32
where
    F: FnMut(u32) -> f64,
{
    let mut px = start_px.max(floor_px);
    while px > floor_px && measure(px) > available {
        px -= 1;
    }
    px
}

/// `dx`/`dy` are the pointer offsets from the rendered canvas centre.
pub fn in_hub(dx: f64, dy: f64, rect_width: f64, rect_height: f64) -> bool {
    let hub = rect_width.min(rect_height) * HUB_HIT_FACTOR;
    dx * dx + dy * dy <= hub * hub
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Final wheel angle that parks segment `index` under the pointer.
/// `jitter` is a fraction in `[-0.5, 0.5)` of half a slice.
pub fn target_rotation(index: usize, count: usize, jitter: f64) -> f64 {
    let slice = slice_angle(count);
    let segment_mid = index as f64 * slice + slice / 2.0;
    POINTER_ANGLE - segment_mid + SPIN_FULL_TURNS * TAU + jitter * slice * 0.5
}

pub fn random_target_rotation<R: Rng + ?Sized>(index: usize, count: usize, rng: &mut R) -> f64 {
    target_rotation(index, count, rng.gen_range(-0.5..0.5))
}

/// Eased rotation from 0 to `target` over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    pub target: f64,
    pub duration_ms: f64,
}

impl SpinAnimation {
    pub fn new(target: f64) -> Self {
        Self {
            target,
            duration_ms: SPIN_DURATION_MS,
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn angle_at(&self, elapsed_ms: f64) -> f64 {
        self.target * ease_out_cubic(self.progress(elapsed_ms))
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}

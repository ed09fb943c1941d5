//! Prize wheel domain: segments, milestones, geometry and the spin state machine.
//!
//! Nothing in here touches the browser. The frontend supplies a canvas, a
//! [`SpinTransport`] and animation frames; this module decides what to draw and
//! what to show.

pub mod config;
pub mod countdown;
pub mod currency;
pub mod geometry;
mod lenient;
pub mod links;
pub mod machine;
pub mod milestones;
pub mod response;
pub mod segments;
pub mod view;

pub use config::{CountdownIds, WheelConfig, WheelSettings};
pub use countdown::{Countdown, CountdownTick};
pub use geometry::{SpinAnimation, WheelLayout, Wedge};
pub use links::PageLocation;
pub use machine::{run_spin, SpinRequest, SpinStep, SpinTransport, SpinWheel};
pub use milestones::{MilestoneBar, MilestoneLegendEntry, PrizeType};
pub use response::HttpReply;
pub use segments::{hex_to_rgba, Segment};
pub use view::{CouponView, MilestoneNote, PrizeNote, ResultView, TextPart, WheelView};

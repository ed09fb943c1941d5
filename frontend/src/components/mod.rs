pub mod countdown;
pub mod milestone_bar;
pub mod spin_wheel;

pub use countdown::CountdownDisplay;
pub use milestone_bar::MilestoneBarDisplay;
pub use spin_wheel::SpinWheelWidget;

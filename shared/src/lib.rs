pub mod constants;
pub mod error;
pub mod spin_wheel;
pub mod validation;

pub use error::WheelError;

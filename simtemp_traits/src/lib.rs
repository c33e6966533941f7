pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// A backend that produces temperature samples in milli-degrees Celsius.
///
/// The scheduler calls `sample` once per tick. An `Err` skips that tick only;
/// sampling continues on the next one.
pub trait TempSource {
    fn sample(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: TempSource + ?Sized> TempSource for Box<T> {
    fn sample(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        (**self).sample()
    }
}

pub mod birth;
pub mod chart;
pub mod horoscope;

pub use birth::*;
pub use chart::*;
pub use horoscope::*;

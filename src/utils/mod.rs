pub mod interval;
pub mod time;

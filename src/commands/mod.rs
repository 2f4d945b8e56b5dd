pub mod calendar;
pub mod config;
pub mod dates;
pub mod describe;
pub mod new;
pub mod summary;

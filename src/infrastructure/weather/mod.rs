//! Weather-forecast lookup implementations

mod nws;

pub use nws::NwsWeatherService;

//! Currency-rate lookup implementations

mod frankfurter;

pub use frankfurter::FrankfurterCurrencyService;

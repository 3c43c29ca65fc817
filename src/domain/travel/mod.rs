//! Travel planning domain: requests, collaborator capabilities and the
//! final itinerary

mod budget;
mod currency;
mod destination;
mod itinerary;
mod request;
mod weather;

pub use budget::{
    AllocationTable, BudgetBreakdown, BUDGET_ALLOCATION, LUXURY_ALLOCATION, MODERATE_ALLOCATION,
};
pub(crate) use currency::format_grouped;
pub use currency::{CurrencyConversion, CurrencyService};
pub use destination::{Coordinates, DestinationResolver, KeywordDestinationResolver, HOME_CURRENCY};
pub use itinerary::{Activity, DayPlan, EmergencyInfo, TravelItinerary};
pub use request::{TravelPlanRequest, TravelStyle};
pub use weather::{WeatherForecast, WeatherService};

#[cfg(test)]
pub use currency::MockCurrencyService;
#[cfg(test)]
pub use destination::MockDestinationResolver;
#[cfg(test)]
pub use weather::MockWeatherService;

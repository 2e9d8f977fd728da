//! Dashboard view: lifecycle state and the controller driving the datafeed.

mod controller;
mod state;

pub use controller::{DashboardController, FeedMessage, RepaintCallback};
pub use state::{
    price_one_minute_ago, ApplyOutcome, DashboardState, FetchTicket, PriceTicket, PriceUpdate,
    ViewPhase, ONE_MINUTE_AGO_LIMIT,
};

//! Dashboard view state: lifecycle, active time frame and price readouts.
//!
//! Fetch results are tagged with the generation that requested them. Only a
//! result carrying the latest generation is applied, so a slow response for
//! a previous time frame can never overwrite fresher data.

use tracing::{debug, warn};

use crate::chart::ChartSurface;
use crate::error::FetchError;
use crate::market::{KlineSeries, PriceReadout, TimeFrame};

/// Candles needed to derive the price one minute ago
pub const ONE_MINUTE_AGO_LIMIT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// No surface yet
    Uninitialized,
    /// Surface created, series empty
    Mounted,
    /// Series hold the data of the latest successful fetch
    Populated,
}

/// Identifies one candle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub time_frame: TimeFrame,
}

/// Identifies one manual price refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTicket {
    pub generation: u64,
}

/// One half of a price refresh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceUpdate {
    Current(f64),
    OneMinuteAgo(f64),
}

/// What happened to a delivered result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Superseded by a newer request
    Stale,
    /// The request failed; previous data is kept
    Failed,
    NotMounted,
}

#[derive(Debug)]
pub struct DashboardState {
    phase: ViewPhase,
    default_time_frame: TimeFrame,
    time_frame: TimeFrame,
    candle_generation: u64,
    price_generation: u64,
    current_price: PriceReadout,
    price_one_min_ago: PriceReadout,
}

impl DashboardState {
    pub fn new(time_frame: TimeFrame) -> Self {
        Self {
            phase: ViewPhase::Uninitialized,
            default_time_frame: time_frame,
            time_frame,
            candle_generation: 0,
            price_generation: 0,
            current_price: PriceReadout::Loading,
            price_one_min_ago: PriceReadout::Loading,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn time_frame(&self) -> TimeFrame {
        self.time_frame
    }

    pub fn current_price(&self) -> PriceReadout {
        self.current_price
    }

    pub fn price_one_min_ago(&self) -> PriceReadout {
        self.price_one_min_ago
    }

    /// Create the surface and request data for the active time frame.
    ///
    /// Returns `None` when already mounted.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        if self.phase != ViewPhase::Uninitialized {
            return None;
        }
        self.phase = ViewPhase::Mounted;
        Some(self.next_candle_ticket())
    }

    /// Make `time_frame` active. Returns the request to issue, if any.
    pub fn select_time_frame(&mut self, time_frame: TimeFrame) -> Option<FetchTicket> {
        if time_frame == self.time_frame {
            return None;
        }
        self.time_frame = time_frame;
        if self.phase == ViewPhase::Uninitialized {
            return None;
        }
        Some(self.next_candle_ticket())
    }

    /// Push a candle fetch result into the surface if it is still current.
    pub fn apply_candles(
        &mut self,
        ticket: FetchTicket,
        result: Result<KlineSeries, FetchError>,
        surface: &mut ChartSurface,
    ) -> ApplyOutcome {
        if self.phase == ViewPhase::Uninitialized {
            return ApplyOutcome::NotMounted;
        }
        if ticket.generation != self.candle_generation {
            debug!(
                "Discarding stale {} klines (generation {})",
                ticket.time_frame, ticket.generation
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(series) => {
                debug!("Showing {} {} klines", series.len(), ticket.time_frame);
                surface.set_data(series);
                self.phase = ViewPhase::Populated;
                ApplyOutcome::Applied
            }
            Err(e) => {
                warn!("Failed to fetch {} klines: {}", ticket.time_frame, e);
                ApplyOutcome::Failed
            }
        }
    }

    pub fn begin_price_refresh(&mut self) -> PriceTicket {
        self.price_generation += 1;
        PriceTicket {
            generation: self.price_generation,
        }
    }

    /// Update one price readout. A failure leaves the readout unchanged.
    pub fn apply_price(
        &mut self,
        ticket: PriceTicket,
        result: Result<PriceUpdate, FetchError>,
    ) -> ApplyOutcome {
        if self.phase == ViewPhase::Uninitialized {
            return ApplyOutcome::NotMounted;
        }
        if ticket.generation != self.price_generation {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(PriceUpdate::Current(price)) => {
                self.current_price = PriceReadout::Value(price);
                ApplyOutcome::Applied
            }
            Ok(PriceUpdate::OneMinuteAgo(price)) => {
                self.price_one_min_ago = PriceReadout::Value(price);
                ApplyOutcome::Applied
            }
            Err(e) => {
                warn!("Failed to refresh prices: {}", e);
                ApplyOutcome::Failed
            }
        }
    }

    /// Release the surface. Results of requests issued before this call are
    /// ignored from now on.
    pub fn unmount(&mut self, surface: &mut ChartSurface) {
        surface.clear();
        self.phase = ViewPhase::Uninitialized;
        self.time_frame = self.default_time_frame;
        self.candle_generation += 1;
        self.price_generation += 1;
        self.current_price = PriceReadout::Loading;
        self.price_one_min_ago = PriceReadout::Loading;
    }

    fn next_candle_ticket(&mut self) -> FetchTicket {
        self.candle_generation += 1;
        FetchTicket {
            generation: self.candle_generation,
            time_frame: self.time_frame,
        }
    }
}

/// Close of the older candle of a two-candle 1m fetch
pub fn price_one_minute_ago(series: &KlineSeries) -> Result<f64, FetchError> {
    let expected = ONE_MINUTE_AGO_LIMIT as usize;
    if series.len() < expected {
        return Err(FetchError::InsufficientData {
            expected,
            actual: series.len(),
        });
    }
    Ok(series.candles[0].close)
}

//! Runs datafeed requests off the UI thread and feeds results back into the
//! dashboard state once per frame.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::state::{
    price_one_minute_ago, ApplyOutcome, DashboardState, FetchTicket, PriceTicket, PriceUpdate,
    ONE_MINUTE_AGO_LIMIT,
};
use crate::chart::ChartSurface;
use crate::error::FetchError;
use crate::market::{KlineSeries, MarketDataFeed, TimeFrame};

/// Called from worker tasks after a result was queued
pub type RepaintCallback = Arc<dyn Fn() + Send + Sync>;

/// Result delivered from a worker task
#[derive(Debug)]
pub enum FeedMessage {
    Candles {
        ticket: FetchTicket,
        result: Result<KlineSeries, FetchError>,
    },
    Price {
        ticket: PriceTicket,
        result: Result<PriceUpdate, FetchError>,
    },
}

pub struct DashboardController {
    feed: Arc<dyn MarketDataFeed>,
    state: DashboardState,
    runtime: Handle,
    tx: UnboundedSender<FeedMessage>,
    rx: UnboundedReceiver<FeedMessage>,
    candle_task: Option<JoinHandle<()>>,
    price_task: Option<JoinHandle<()>>,
    candle_limit: u32,
    repaint: Option<RepaintCallback>,
}

impl DashboardController {
    pub fn new(
        feed: Arc<dyn MarketDataFeed>,
        runtime: Handle,
        time_frame: TimeFrame,
        candle_limit: u32,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            feed,
            state: DashboardState::new(time_frame),
            runtime,
            tx,
            rx,
            candle_task: None,
            price_task: None,
            candle_limit,
            repaint: None,
        }
    }

    /// Request a repaint whenever a worker delivers a result
    pub fn with_repaint(mut self, repaint: RepaintCallback) -> Self {
        self.repaint = Some(repaint);
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn mount(&mut self) {
        if let Some(ticket) = self.state.mount() {
            info!("Dashboard mounted, loading {} klines", ticket.time_frame);
            self.spawn_candle_fetch(ticket);
        }
    }

    pub fn select_time_frame(&mut self, time_frame: TimeFrame) {
        if let Some(ticket) = self.state.select_time_frame(time_frame) {
            debug!("Time frame switched to {}", time_frame);
            self.spawn_candle_fetch(ticket);
        }
    }

    /// Fetch the current price, then the close of the previous minute.
    /// The second request is only issued when the first one succeeded.
    pub fn refresh_prices(&mut self) {
        let ticket = self.state.begin_price_refresh();
        if let Some(task) = self.price_task.take() {
            task.abort();
        }

        let feed = Arc::clone(&self.feed);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();

        self.price_task = Some(self.runtime.spawn(async move {
            let current = feed.fetch_current_price().await;
            let failed = current.is_err();
            deliver(
                &tx,
                repaint.as_ref(),
                FeedMessage::Price {
                    ticket,
                    result: current.map(PriceUpdate::Current),
                },
            );
            if failed {
                return;
            }

            let result = feed
                .fetch_candles(TimeFrame::Minute1, ONE_MINUTE_AGO_LIMIT)
                .await
                .and_then(|series| price_one_minute_ago(&series))
                .map(PriceUpdate::OneMinuteAgo);
            deliver(&tx, repaint.as_ref(), FeedMessage::Price { ticket, result });
        }));
    }

    /// Apply every result received since the last call. Returns how many
    /// results changed the view.
    pub fn poll(&mut self, surface: &mut ChartSurface) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            let outcome = match message {
                FeedMessage::Candles { ticket, result } => {
                    self.state.apply_candles(ticket, result, surface)
                }
                FeedMessage::Price { ticket, result } => self.state.apply_price(ticket, result),
            };
            if outcome == ApplyOutcome::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Number of worker tasks still running
    pub fn active_tasks(&self) -> usize {
        [&self.candle_task, &self.price_task]
            .into_iter()
            .flatten()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Stop all workers, drop queued results and release the surface
    pub fn unmount(&mut self, surface: &mut ChartSurface) {
        self.abort_tasks();
        while self.rx.try_recv().is_ok() {}
        self.state.unmount(surface);
        info!("Dashboard unmounted");
    }

    fn spawn_candle_fetch(&mut self, ticket: FetchTicket) {
        if let Some(task) = self.candle_task.take() {
            task.abort();
        }

        let feed = Arc::clone(&self.feed);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let limit = self.candle_limit;

        self.candle_task = Some(self.runtime.spawn(async move {
            let result = feed.fetch_candles(ticket.time_frame, limit).await;
            deliver(&tx, repaint.as_ref(), FeedMessage::Candles { ticket, result });
        }));
    }

    fn abort_tasks(&mut self) {
        let tasks = [self.candle_task.take(), self.price_task.take()];
        for task in tasks.into_iter().flatten() {
            task.abort();
        }
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

fn deliver(
    tx: &UnboundedSender<FeedMessage>,
    repaint: Option<&RepaintCallback>,
    message: FeedMessage,
) {
    // The receiver is gone once the controller is dropped
    if tx.send(message).is_ok() {
        if let Some(repaint) = repaint {
            repaint();
        }
    }
}

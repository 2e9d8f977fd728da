//! Dashboard application window.

use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;
use tracing::info;

use crate::chart::ChartWidget;
use crate::config::DashboardConfig;
use crate::market::{MarketDataFeed, PriceReadout, TimeFrame};
use crate::view::DashboardController;

const CARD_WIDTH: f32 = 220.0;

pub struct DashboardApp {
    controller: DashboardController,
    chart: ChartWidget,
}

impl DashboardApp {
    /// Build the window and start loading the default time frame
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        feed: Arc<dyn MarketDataFeed>,
        config: &DashboardConfig,
        runtime: Handle,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        let controller = DashboardController::new(
            feed,
            runtime,
            config.default_time_frame,
            config.candle_limit,
        )
        .with_repaint(Arc::new(move || ctx.request_repaint()));

        let mut app = Self {
            controller,
            chart: ChartWidget::new(config.chart_height),
        };
        app.controller.mount();
        app
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Bitcoin");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_buttons(ui);
                });
            });
        });
    }

    fn show_time_frames(&mut self, ui: &mut egui::Ui) {
        let active = self.controller.state().time_frame();
        ui.horizontal(|ui| {
            for time_frame in TimeFrame::ALL {
                if ui.selectable_label(time_frame == active, time_frame.value()).clicked() {
                    self.controller.select_time_frame(time_frame);
                }
            }
        });
    }

    fn show_prices(&mut self, ui: &mut egui::Ui) {
        let state = self.controller.state();
        let (current, one_min_ago) = (state.current_price(), state.price_one_min_ago());

        ui.horizontal(|ui| {
            price_card(ui, "Current Price", current);
            price_card(ui, "Price 1 Min Ago", one_min_ago);
            if ui.button("Update Prices").clicked() {
                self.controller.refresh_prices();
            }
        });
    }
}

fn price_card(ui: &mut egui::Ui, title: &str, readout: PriceReadout) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(CARD_WIDTH);
        ui.vertical(|ui| {
            ui.label(title);
            ui.label(egui::RichText::new(readout.to_string()).size(22.0).strong());
        });
    });
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll(self.chart.surface_mut());

        self.show_header(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_time_frames(ui);
                ui.add_space(8.0);
                self.show_prices(ui);
                ui.add_space(8.0);
                let time_frame = self.controller.state().time_frame();
                self.chart.show(ui, time_frame);
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Closing dashboard...");
        self.controller.unmount(self.chart.surface_mut());
    }
}

//! Volarb GUI
//!
//! egui front end for the dashboard: surface canvas, metric cards, option
//! chain, alerts, trade ideas, risk bars and the performance chart.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use volarb::core::ExpiryTenor;
use volarb::prelude::*;
use volarb::surface::{Point, Stroke, TextStyle};
use volarb::views::{self, Tone, BENCHMARK_SERIES, CHAIN_COLUMNS, STRATEGY_SERIES};

const SURFACE_HEIGHT: f32 = 400.0;

#[derive(Parser, Debug)]
#[command(name = "volarb-gui")]
#[command(about = "Volatility surface arbitrage dashboard")]
struct Args {
    /// Dashboard config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file to read instead of the bundled sample
    #[arg(short, long)]
    snapshot: Option<PathBuf>,
}

/// Draws surface commands with an egui painter, offset to the allocated rect
struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl EguiCanvas<'_> {
    fn pos(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32)
    }
}

fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn stroke32(s: Stroke) -> egui::Stroke {
    egui::Stroke::new(s.width as f32, color32(s.color))
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        let rect = egui::Rect::from_min_size(self.origin, egui::vec2(width as f32, height as f32));
        self.painter
            .rect_filled(rect, 4.0, egui::Color32::from_rgb(0x11, 0x18, 0x27));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.painter
            .line_segment([self.pos(from), self.pos(to)], stroke32(stroke));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.painter
            .circle_filled(self.pos(center), radius as f32, color32(color));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) {
        self.painter
            .circle_stroke(self.pos(center), radius as f32, stroke32(stroke));
    }

    fn text(&mut self, anchor: Point, text: &str, style: &TextStyle) {
        // no bold face in the default fonts, bump the size instead
        let size = if style.bold { style.size + 1.0 } else { style.size };
        let font = egui::FontId::proportional(size as f32);
        let color = color32(style.color);

        if style.rotation == 0.0 {
            self.painter
                .text(self.pos(anchor), egui::Align2::CENTER_CENTER, text, font, color);
            return;
        }

        let galley = self.painter.layout_no_wrap(text.to_string(), font, color);
        let angle = style.rotation as f32;
        let half = egui::emath::Rot2::from_angle(angle) * (galley.size() / 2.0);
        let shape = egui::epaint::TextShape::new(self.pos(anchor) - half, galley, color)
            .with_angle(angle);
        self.painter.add(shape);
    }
}

fn tone_color(tone: Tone) -> egui::Color32 {
    match tone {
        Tone::Neutral => egui::Color32::from_rgb(0x9c, 0xa3, 0xaf),
        Tone::Positive => egui::Color32::from_rgb(0x22, 0xc5, 0x5e),
        Tone::Negative | Tone::Destructive => egui::Color32::from_rgb(0xef, 0x44, 0x44),
        Tone::Warning => egui::Color32::from_rgb(0xf5, 0x9e, 0x0b),
        Tone::Primary => egui::Color32::from_rgb(0x3b, 0x82, 0xf6),
    }
}

struct DashboardApp {
    dashboard: Dashboard<DashboardSnapshot>,
    surface_size: Option<egui::Vec2>,

    // UI state
    underlying_query: String,
    strike_query: String,
    highlight: HighlightMode,
    threshold: f64,
}

impl DashboardApp {
    fn new(dashboard: Dashboard<DashboardSnapshot>) -> Self {
        let state = dashboard.state();
        Self {
            highlight: state.highlight,
            threshold: state.detection.threshold,
            strike_query: state.strike_query.clone(),
            underlying_query: String::new(),
            surface_size: None,
            dashboard,
        }
    }

    fn header(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let status = self.dashboard.status_bar();
        ui.horizontal(|ui| {
            ui.heading(status.title);
            ui.label(egui::RichText::new(&status.mode_badge).strong());
            ui.separator();
            for mode in DataMode::ALL {
                if ui
                    .selectable_label(self.dashboard.mode() == mode, mode.label())
                    .clicked()
                {
                    events.push(UiEvent::ModeChanged { mode });
                }
            }
            ui.separator();
            if ui.button("Refresh").clicked() {
                events.push(UiEvent::RefreshRequested);
            }
            ui.label(status.last_update);
        });
    }

    fn footer(&self, ui: &mut egui::Ui) {
        let status = self.dashboard.status_bar();
        ui.horizontal(|ui| {
            ui.label(status.copyright);
            ui.separator();
            ui.label(status.data_note);
            ui.separator();
            ui.label(status.system);
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        ui.heading("Underlying");
        ui.text_edit_singleline(&mut self.underlying_query);
        egui::ScrollArea::vertical()
            .max_height(260.0)
            .show(ui, |ui| {
                for item in self.dashboard.selector_items(&self.underlying_query) {
                    let label = format!("{}  {}  {}", item.symbol, item.market_cap, item.sector);
                    if ui.selectable_label(item.selected, label).clicked() {
                        events.push(UiEvent::UnderlyingSelected {
                            symbol: item.symbol.clone(),
                        });
                    }
                }
            });

        ui.separator();
        ui.heading("Detection");
        egui::ComboBox::from_label("Highlight")
            .selected_text(self.highlight.label())
            .show_ui(ui, |ui| {
                for mode in [HighlightMode::Detector, HighlightMode::Always, HighlightMode::Off] {
                    ui.selectable_value(&mut self.highlight, mode, mode.label());
                }
            });
        ui.horizontal(|ui| {
            ui.label("Threshold:");
            ui.add(
                egui::DragValue::new(&mut self.threshold)
                    .speed(0.1)
                    .clamp_range(0.5..=10.0),
            );
        });
        if ui.button("Apply").clicked() {
            events.push(UiEvent::SettingsApplied {
                highlight: self.highlight,
                threshold: self.threshold,
            });
        }

        let found = self.dashboard.scan();
        ui.label(format!("Dislocations: {}", found.len()));
        for d in found.iter().take(5) {
            ui.label(format!(
                "  {} ({}, {}) z {:+.2}",
                d.kind.label(),
                d.strike_idx,
                d.maturity_idx,
                d.z_score
            ));
        }
    }

    fn alerts(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Volatility Anomalies");
            ui.label(views::active_badge(&self.dashboard.state().anomalies));
        });
        for card in self.dashboard.anomaly_cards() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&card.title).strong());
                    ui.colored_label(tone_color(card.severity_tone), card.severity);
                });
                ui.label(&card.age);
                ui.horizontal(|ui| {
                    ui.label(format!("IV {} / exp {}", card.implied_vol, card.expected_vol));
                    ui.colored_label(
                        tone_color(card.difference_tone),
                        format!("{} {}", card.difference_arrow.glyph(), card.difference),
                    );
                });
                ui.label(format!("Action: {}", card.action));
            });
        }

        ui.separator();
        ui.heading("Trade Recommendations");
        for card in self.dashboard.trade_cards() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&card.strategy).strong());
                    ui.colored_label(tone_color(card.status_tone), card.status);
                });
                ui.label(&card.description);
                for leg in &card.legs {
                    ui.colored_label(tone_color(leg.tone), &leg.text);
                }
                ui.label(format!(
                    "Premium {}  Return {}  Prob {}",
                    card.premium, card.expected_return, card.probability
                ));
            });
        }
    }

    fn metrics(&self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for card in self.dashboard.metric_cards() {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        ui.label(&card.name);
                        ui.label(egui::RichText::new(&card.value).size(20.0).strong());
                        if let Some(change) = &card.change {
                            ui.colored_label(
                                tone_color(change.tone),
                                format!("{} {}", change.arrow.glyph(), change.text),
                            );
                        }
                    });
                });
            }
        });
    }

    fn surface(&mut self, ui: &mut egui::Ui) {
        ui.heading("Volatility Surface");
        let size = egui::vec2(ui.available_width(), SURFACE_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;

        if self.surface_size != Some(rect.size()) {
            self.surface_size = Some(rect.size());
            self.dashboard
                .container_resized(Size::new(rect.width() as f64, rect.height() as f64));
        }

        let mut canvas = EguiCanvas {
            painter: &painter,
            origin: rect.min,
        };
        self.dashboard.surface_display().replay(&mut canvas);
    }

    fn chain(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let Some(view) = self.dashboard.chain_view() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.heading("Option Chain");
            ui.label(&view.badge);
            egui::ComboBox::from_id_source("tenor")
                .selected_text(view.tenor.label())
                .show_ui(ui, |ui| {
                    for (code, label) in views::tenor_options() {
                        let selected = view.tenor.code() == code;
                        if ui.selectable_label(selected, label).clicked() {
                            if let Some(tenor) = ExpiryTenor::from_code(&code) {
                                events.push(UiEvent::ExpiryChanged { tenor });
                            }
                        }
                    }
                });
            ui.label("Strike:");
            if ui.text_edit_singleline(&mut self.strike_query).changed() {
                events.push(UiEvent::StrikeSearchChanged {
                    query: self.strike_query.clone(),
                });
            }
        });

        egui::Grid::new("chain").striped(true).show(ui, |ui| {
            for column in CHAIN_COLUMNS {
                ui.label(egui::RichText::new(column).strong());
            }
            ui.end_row();
            for row in &view.rows {
                for (i, cell) in row.cells().iter().enumerate() {
                    if i == CHAIN_COLUMNS.len() - 1 || row.highlighted {
                        ui.colored_label(tone_color(row.status_tone), *cell);
                    } else {
                        ui.label(*cell);
                    }
                }
                ui.end_row();
            }
        });
        if view.rows.is_empty() {
            ui.label("No quotes for this selection");
        }
    }

    fn risk(&self, ui: &mut egui::Ui) {
        let view = self.dashboard.risk_view();
        ui.heading("Risk Analysis");
        for bar in &view.metrics {
            ui.horizontal(|ui| {
                ui.label(&bar.name);
                ui.add(
                    egui::ProgressBar::new((bar.progress / 100.0) as f32)
                        .desired_width(160.0)
                        .text(bar.value.as_str()),
                );
                ui.label(&bar.description);
            });
        }

        ui.label(egui::RichText::new("Factor Exposure").strong());
        for bar in &view.exposures {
            ui.horizontal(|ui| {
                ui.label(format!("{:<18}", bar.factor));
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(160.0, 10.0), egui::Sense::hover());
                let painter = ui.painter();
                painter.rect_filled(rect, 2.0, egui::Color32::from_gray(55));
                let fill = rect.width() * bar.width as f32;
                let filled = if bar.from_right {
                    egui::Rect::from_min_max(egui::pos2(rect.max.x - fill, rect.min.y), rect.max)
                } else {
                    egui::Rect::from_min_max(rect.min, egui::pos2(rect.min.x + fill, rect.max.y))
                };
                painter.rect_filled(filled, 2.0, color32(Rgba::from_hex(bar.color)));
                ui.label(&bar.value);
            });
        }
    }

    fn performance(&self, ui: &mut egui::Ui) {
        let view = self.dashboard.performance_view();
        ui.heading("Historical Performance");
        ui.horizontal(|ui| {
            ui.label(&view.strategy_summary);
            ui.label(&view.benchmark_summary);
        });

        let periods = view.periods.clone();
        Plot::new("performance")
            .view_aspect(3.0)
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _, _| {
                periods
                    .get(mark.value.round() as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .y_axis_formatter(|mark, _, _| views::percent_tick(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::new(view.strategy.clone()))
                        .name(STRATEGY_SERIES)
                        .color(egui::Color32::from_rgb(0x3b, 0x82, 0xf6))
                        .width(2.0),
                );
                plot_ui.line(
                    Line::new(PlotPoints::new(view.benchmark.clone()))
                        .name(BENCHMARK_SERIES)
                        .color(egui::Color32::from_rgb(0x9c, 0xa3, 0xaf))
                        .width(2.0),
                );
            });
    }

    fn toasts(&self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .show(ctx, |ui| {
                for toast in self.dashboard.toasts() {
                    let fill = match toast.spec.variant {
                        ToastVariant::Destructive => egui::Color32::from_rgb(0x7f, 0x1d, 0x1d),
                        ToastVariant::Default => egui::Color32::from_rgb(0x1f, 0x29, 0x37),
                    };
                    egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&toast.spec.title).strong());
                            if ui.small_button("x").clicked() {
                                events.push(UiEvent::ToastDismissed { id: toast.id });
                            }
                        });
                        ui.label(&toast.spec.description);
                    });
                }
            });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);
        self.dashboard.tick(Duration::from_secs_f32(dt.max(0.0)));
        self.dashboard.frame();

        let mut events = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.header(ui, &mut events);
        });
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            self.footer(ui);
        });
        egui::SidePanel::left("controls").show(ctx, |ui| {
            self.controls(ui, &mut events);
        });
        egui::SidePanel::right("alerts")
            .min_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.alerts(ui));
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.metrics(ui);
                ui.separator();
                self.surface(ui);
                ui.separator();
                self.chain(ui, &mut events);
                ui.separator();
                self.risk(ui);
                ui.separator();
                self.performance(ui);
            });
        });
        self.toasts(ctx, &mut events);

        for event in events {
            if let UiEvent::UnderlyingSelected { .. } = event {
                self.strike_query.clear();
            }
            self.dashboard.dispatch(event);
        }

        let wait = self
            .dashboard
            .runtime()
            .next_deadline()
            .unwrap_or(Duration::from_millis(250))
            .min(Duration::from_millis(250));
        ctx.request_repaint_after(wait);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let snapshot = match &args.snapshot {
        Some(path) => DashboardSnapshot::load(path)?,
        None => sample_snapshot(),
    };

    let mut dashboard = Dashboard::new(snapshot, config);
    dashboard.start(None)?;
    let app = DashboardApp::new(dashboard);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 950.0])
            .with_title("Volatility Surface Arbitrage"),
        ..Default::default()
    };

    eframe::run_native(
        "Volarb",
        options,
        Box::new(move |_cc| Box::new(app)),
    )?;
    Ok(())
}

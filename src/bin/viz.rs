use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use fixed_wing_sim::config::SimConfig;
use fixed_wing_sim::dynamics::state::{POS_A, POS_B};
use fixed_wing_sim::io::{FlightSummary, Telemetry};
use fixed_wing_sim::sim::{self, Flight, Sample};
use fixed_wing_sim::vehicle::presets;

fn main() -> eframe::Result {
    let aircraft = presets::cessna_172();
    let config = SimConfig { dt: 0.01, max_time: 120.0, floor: -1.0 };
    let flight = sim::simulate(&aircraft, &config);
    let summary = FlightSummary::from_flight(&flight);

    let app = FlightViz { flight, summary };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Fixed-Wing Flight Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct FlightViz {
    flight: Flight,
    summary: FlightSummary,
}

impl FlightViz {
    fn series(sampled: &[&Sample], f: impl Fn(&Sample) -> [f64; 2]) -> PlotPoints<'static> {
        sampled.iter().map(|s| f(*s)).collect()
    }
}

impl eframe::App for FlightViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.flight.samples.len() / 2000).max(1);
        let sampled: Vec<&Sample> = self.flight.samples.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Aircraft: {}", self.flight.aircraft));
            ui.label(format!(
                "Max altitude: {:.0} m  |  Max airspeed: {:.1} m/s  |  Liftoffs: {}  |  Crashes: {}  |  Flight: {:.0} s",
                self.summary.max_altitude,
                self.summary.max_airspeed,
                self.summary.liftoffs,
                self.summary.crashes,
                self.summary.flight_time,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Altitude (m)");
                    let points = Self::series(&sampled, |s| [s.elapsed, s.state.altitude()]);
                    Plot::new("altitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Altitude", points));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Airspeed (m/s)");
                    let points = Self::series(&sampled, |s| [s.elapsed, s.state.airspeed()]);
                    Plot::new("airspeed")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Airspeed", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Climb Angle (deg)");
                    let points = Self::series(&sampled, |s| {
                        [s.elapsed, Telemetry::from_state(&s.state).climb_angle]
                    });
                    Plot::new("climb")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Climb angle", points));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Ground Track (m)");
                    let points = Self::series(&sampled, |s| [s.state.q[POS_A], s.state.q[POS_B]]);
                    Plot::new("track")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("A (m)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Track", points));
                        });
                });
            });
        });
    }
}

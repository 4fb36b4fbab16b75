use eframe::egui;
use egui::plot::{Legend, Line, Plot, PlotPoint, PlotPoints};
use egui::{vec2, Vec2};

use crate::spectrum::Spectrum;

const X_LABEL: &str = "Frequency (Hz)";
const Y_LABEL: &str = "Magnitude";
const LABEL_HEIGHT: f32 = 24.0;

/// How the spectrum window is laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotView {
    pub title: String,
    /// Upper bound of the x axis in Hz; the lower bound is always 0.
    pub max_freq: f32,
    pub window_size: Vec2,
}

impl Default for PlotView {
    fn default() -> Self {
        Self {
            title: "Frequency Spectrum".to_owned(),
            max_freq: 1000.0,
            window_size: vec2(800.0, 600.0),
        }
    }
}

/// Line points for the bins inside `[0, max_freq]`.
pub fn line_points(spectrum: &Spectrum, max_freq: f32) -> Vec<[f64; 2]> {
    let window = spectrum.window(max_freq);
    window
        .frequencies()
        .iter()
        .zip(window.magnitudes())
        .map(|(&f, &m)| [f as f64, m as f64])
        .collect()
}

/// Opens a native window with the magnitude spectrum and blocks until it is
/// closed.
pub fn plot_spectrum(spectrum: &Spectrum, view: PlotView) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        initial_window_size: Some(view.window_size),
        ..Default::default()
    };
    let app = SpectrumApp::new(spectrum, &view);
    eframe::run_native(&view.title, options, Box::new(move |_cc| Box::new(app)))
}

struct SpectrumApp {
    title: String,
    max_freq: f64,
    points: Vec<[f64; 2]>,
}

impl SpectrumApp {
    fn new(spectrum: &Spectrum, view: &PlotView) -> Self {
        Self {
            title: view.title.clone(),
            max_freq: view.max_freq as f64,
            points: line_points(spectrum, view.max_freq),
        }
    }
}

impl eframe::App for SpectrumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.heading(self.title.as_str()));
            ui.label(Y_LABEL);

            let plot = Plot::new("spectrum")
                .legend(Legend::default())
                .height(ui.available_height() - LABEL_HEIGHT)
                .include_x(0.0)
                .include_x(self.max_freq)
                .include_y(0.0)
                .set_margin_fraction(vec2(0.0, 0.05))
                .label_formatter(|_name, point: &PlotPoint| {
                    format!("{X_LABEL}: {:.2}\n{Y_LABEL}: {:.3}", point.x, point.y)
                });
            plot.show(ui, |plot_ui| {
                plot_ui.line(Line::new(PlotPoints::new(self.points.clone())).name(Y_LABEL));
            });

            ui.vertical_centered(|ui| ui.label(X_LABEL));
        });
    }
}

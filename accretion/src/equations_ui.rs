//! On-screen overlay: live readout plus the force law behind it
//!
//! The readout floats in the top-left corner so the field stays visible.
//! The equations panel is hidden until asked for with `E`.

use egui::{Align2, Color32, Context, Frame, RichText};

/// Live numbers shown in the readout
#[derive(Debug, Clone, Copy)]
pub struct Status {
    pub mass: f32,
    pub absorption_radius: f32,
    pub live: usize,
    pub absorbed: usize,
    pub layout: &'static str,
    pub paused: bool,
}

impl Status {
    fn summary(&self) -> String {
        format!(
            "M {:.0}   rₛ {:.1}   stars {}   absorbed {}",
            self.mass, self.absorption_radius, self.live, self.absorbed
        )
    }
}

const CONTROLS: &str = "Space pause · R reload · 1/2 layout · +/- mass · click add star · E equations";

/// (name, formula, note)
const FORCE_LAW: &[(&str, &str, &str)] = &[
    ("Gravitation", "F = G·M·m / r²", "pull of the hole on one star"),
    ("Direction", "F⃗ = |F|·(p⃗_bh - p⃗) / r", "always toward the hole"),
    ("Acceleration", "a⃗ = F⃗ / m", "summed, then cleared each frame"),
    ("Step", "v⃗ += a⃗,  p⃗ += v⃗", "semi-implicit Euler, dt = 1 frame"),
    ("Horizon", "rₛ = 0.01·M", "r < rₛ is swallowed"),
    ("Disk orbit", "v = √(G·M / r)", "tangential start speed in the disk layout"),
];

const SYMBOLS: &[(&str, &str)] = &[
    ("G", "gravitational constant (1)"),
    ("M, m", "hole mass, star mass"),
    ("r", "star to hole distance"),
    ("p⃗, v⃗, a⃗", "position, velocity, acceleration"),
];

/// Overlay state kept across frames
#[derive(Debug, Default)]
pub struct Hud {
    pub show_equations: bool,
}

impl Hud {
    pub fn toggle_equations(&mut self) {
        self.show_equations = !self.show_equations;
    }

    pub fn show(&self, ctx: &Context, status: &Status) {
        readout(ctx, status);
        egui::SidePanel::right("force_law")
            .resizable(false)
            .default_width(240.0)
            .show_animated(ctx, self.show_equations, force_law_panel);
    }
}

fn readout(ctx: &Context, status: &Status) {
    egui::Area::new(egui::Id::new("readout"))
        .anchor(Align2::LEFT_TOP, [8.0, 8.0])
        .interactable(false)
        .show(ctx, |ui| {
            Frame::popup(ui.style())
                .fill(Color32::from_black_alpha(160))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(status.layout).strong().color(Color32::LIGHT_BLUE));
                        if status.paused {
                            ui.label(RichText::new("PAUSED").color(Color32::YELLOW));
                        }
                    });
                    ui.label(RichText::new(status.summary()).monospace());
                    ui.label(RichText::new(CONTROLS).small().weak());
                });
        });
}

fn force_law_panel(ui: &mut egui::Ui) {
    ui.heading(RichText::new("Black Hole Pull").color(Color32::LIGHT_BLUE));
    ui.separator();

    egui::Grid::new("force_law_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (name, formula, note) in FORCE_LAW {
                ui.label(RichText::new(*name).strong().color(Color32::YELLOW));
                ui.vertical(|ui| {
                    ui.label(RichText::new(*formula).monospace());
                    ui.label(RichText::new(*note).small().italics());
                });
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    for (symbol, meaning) in SYMBOLS {
        ui.horizontal(|ui| {
            ui.label(RichText::new(*symbol).monospace().color(Color32::LIGHT_GREEN));
            ui.label(*meaning);
        });
    }
}

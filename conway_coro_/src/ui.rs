// ui.rs - Controls and cell painting for the Game of Life host

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use crate::GameOfLife;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("controls")
            .resizable(false)
            .exact_width(260.0)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            self.measure(available.x.floor() as i64, available.y.floor() as i64);
            self.draw_grid(ui);
        });
    }
}

impl GameOfLife {
    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Conway's Game of Life");
        ui.separator();

        ui.label("Any live cell with fewer than two or more than three live neighbours dies.");
        ui.label("Any live cell with two or three live neighbours lives on.");
        ui.label("Any dead cell with exactly three live neighbours becomes alive.");
        ui.separator();

        let running = self.simulation().is_some_and(|sim| sim.is_running());
        let button_text = if running { "⏸ Stop" } else { "▶ Start" };
        if ui.button(button_text).clicked() {
            self.toggle_running();
        }
        if ui.button("⏭ Step").clicked() {
            self.step_once();
        }
        if ui.button("🎲 Randomise").clicked() {
            self.randomise_grid();
        }
        if ui.button("⏹ Clear").clicked() {
            self.clear_grid();
        }

        ui.separator();

        // Speed control
        ui.label("Interval:");
        let interval_ms = self.config().slider_interval(self.speed).as_millis();
        if ui
            .add(egui::Slider::new(&mut self.speed, 1..=100).suffix(format!(" ({interval_ms} ms)")))
            .changed()
        {
            self.apply_speed();
        }

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });

        ui.separator();

        // Statistics
        if let Some(simulation) = self.simulation() {
            let snapshot = simulation.snapshot();
            let total = snapshot.grid.dims().len();
            let live = snapshot.grid.population();
            ui.label(format!("Generation: {}", snapshot.generation));
            ui.label(format!("Grid: {} x {}", snapshot.grid.rows(), snapshot.grid.cols()));
            ui.label(format!("Live cells: {live}"));
            if total > 0 {
                ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
            }
        }
    }

    fn draw_grid(&self, ui: &mut egui::Ui) {
        let Some(grid) = self.simulation().map(|sim| sim.current_grid()) else {
            return;
        };

        let box_size = self.cell_size();
        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(grid.cols() as f32, grid.rows() as f32) * box_size;

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        for (row, cells) in grid.rows_iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let rect = Rect::from_min_size(
                    start_pos + Vec2::new(col as f32, row as f32) * box_size,
                    Vec2::splat(box_size),
                );
                let cell_color = if cell.is_alive() { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 0.0, cell_color);
                painter.rect_stroke(rect, 0.0, Stroke::new(0.5, Color32::from_gray(200)));
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = (pos - start_pos) / box_size;
                if offset.x >= 0.0 && offset.y >= 0.0 {
                    self.toggle_cell(offset.y as usize, offset.x as usize);
                }
            }
        }
    }
}

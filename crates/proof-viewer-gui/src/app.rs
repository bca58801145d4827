use eframe::egui;
use proof_guides::{PaperCatalog, SheetSize, builtin_sheet_sizes};

use crate::logger::AppLogger;
use crate::views::{ImposeState, ProofState, show_impose, show_proof};

#[derive(Default, PartialEq)]
enum Mode {
    #[default]
    Proof,
    Impose,
}

pub struct ProofApp {
    mode: Mode,
    catalog: PaperCatalog,
    sheets: Vec<SheetSize>,
    proof: ProofState,
    impose: ImposeState,
    app_log: AppLogger,
    show_log: bool,
}

impl ProofApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, app_log: AppLogger) -> Self {
        Self {
            mode: Mode::default(),
            catalog: PaperCatalog::builtin(),
            sheets: builtin_sheet_sizes(),
            proof: ProofState::new(),
            impose: ImposeState::default(),
            app_log,
            show_log: false,
        }
    }
}

impl eframe::App for ProofApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.mode, Mode::Proof, "🔍 Proof");
                ui.selectable_value(&mut self.mode, Mode::Impose, "📑 Impose");
                ui.separator();
                ui.toggle_value(&mut self.show_log, "Log");
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            match self.app_log.latest() {
                Some(entry) => ui.label(format!(
                    "[{}] {} — {}",
                    entry.level,
                    entry.timestamp.format("%H:%M:%S"),
                    entry.message
                )),
                None => ui.label("Ready"),
            };
        });

        if self.show_log {
            let entries = self.app_log.entries();
            egui::Window::new("Log")
                .open(&mut self.show_log)
                .default_width(420.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &entries {
                                ui.label(format!(
                                    "{} [{}] {}",
                                    entry.timestamp.format("%H:%M:%S"),
                                    entry.level,
                                    entry.message
                                ));
                            }
                        });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.mode {
            Mode::Proof => show_proof(ui, &mut self.proof, &self.catalog),
            Mode::Impose => show_impose(ui, &mut self.impose, &self.sheets),
        });
    }
}

// src/app.rs
//
// Calculatrice: module App (racine)
// --------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + affichage.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter est géré dans vue.rs (quand le champ a le focus).
// - Escape = AC, ici, globalement.
// - save : thème, mode, mémoire et historique (voir AppCalc::sauver).

pub mod affichage;
pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sauver(storage);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.reset_total();
        }

        ctx.set_visuals(if self.theme_sombre {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        egui::SidePanel::right("historique")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| {
                self.ui_historique(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

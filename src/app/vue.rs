// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus), "=" évalue sans s’insérer,
//   Ctrl+P insère pi, Escape géré dans app.rs
// - Pavé 8 colonnes : fonctions, constantes, mémoire, opérateurs, chiffres
// - Historique cliquable dans un panneau latéral
//
// Note :
// - Toute action passe par AppCalc::appuyer / egal / reutiliser : la vue ne touche pas au noyau.

use calculatrice_sci::noyau::AngleMode;
use eframe::egui;

use super::etat::AppCalc;

/// Pavé : une ligne par rangée de la grille.
const PAVE: [&[&str]; 6] = [
    &["sin", "cos", "tan", "asin", "acos", "atan", "ln", "log"],
    &["π", "e", "M+", "M-", "MR", "MC", "|x|", "exp"],
    &["x²", "xʸ", "√x", "1/x", "%", "!", "(", ")"],
    &["AC", "DEL", "÷", "×", "-", "+", ",", "="],
    &["7", "8", "9", "4", "5", "6", "1", "2"],
    &["3", "0", "."],
];

const TAILLE_TOUCHE: [f32; 2] = [52.0, 34.0];

impl AppCalc {
    /// Panneau latéral : historique (à appeler avant le panneau central).
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Historique");
            if ui.button("Effacer").clicked() {
                self.vider_historique();
            }
        });
        ui.separator();

        if self.historique.is_empty() {
            ui.weak("Aucun calcul pour l’instant");
            return;
        }

        let mut choisi = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, h) in self.historique.iter().enumerate() {
                    let texte = format!("{}\n= {}", h.expr, h.res);
                    if ui
                        .selectable_label(false, egui::RichText::new(texte).monospace())
                        .on_hover_text("Reprendre ce résultat")
                        .clicked()
                    {
                        choisi = Some(i);
                    }
                }
            });

        if let Some(i) = choisi {
            self.reutiliser(i);
        }
    }

    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_barre(ui);

        ui.add_space(8.0);
        self.ui_ecran(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        self.ui_pave(ui);

        ui.add_space(8.0);
        self.ui_demarche(ui);
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut mode = self.mode;
            ui.selectable_value(&mut mode, AngleMode::Deg, "DEG");
            ui.selectable_value(&mut mode, AngleMode::Rad, "RAD");
            self.set_mode(mode);

            ui.separator();

            if ui.button("AC").clicked() {
                self.reset_total();
            }

            ui.separator();

            ui.selectable_value(&mut self.theme_sombre, true, "Sombre");
            ui.selectable_value(&mut self.theme_sombre, false, "Clair");
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        // Avant le TextEdit : sinon "=" et "p" finissent dans l’expression.
        let egal = ui.input_mut(|i| intercepter_egal(&mut i.events));
        let ctrl_p = ui.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::P));

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2+3×4, sin(30), pow(2,10), 5!")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if resp.changed() {
            self.apercu();
        }

        if ctrl_p {
            self.appuyer("π");
        }

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if egal || ((resp.has_focus() || resp.lost_focus()) && enter) {
            self.egal();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            ui.label(egui::RichText::new(&self.resultat).size(30.0).monospace());
        });

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let mut appuyee = None;

        egui::Grid::new("pave_calc")
            .num_columns(8)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for touche in rangee {
                        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(*touche));
                        if resp.clicked() {
                            appuyee = Some(*touche);
                        }
                    }
                    ui.end_row();
                }
            });

        if let Some(t) = appuyee {
            self.appuyer(t);
        }

        ui.add_space(4.0);
        ui.weak(format!("M = {}", self.memoire));
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));

        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}

/// Retire les frappes "=" du flux d’événements ; vrai s’il y en avait.
fn intercepter_egal(evenements: &mut Vec<egui::Event>) -> bool {
    let avant = evenements.len();
    evenements.retain(|e| !matches!(e, egui::Event::Text(t) if t == "="));
    evenements.len() != avant
}

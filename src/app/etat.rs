//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (expression, résultat, mode d’angle, mémoire,
//! historique, démarche) et offrir les actions des touches sans logique d’affichage egui.
//!
//! Contrats :
//! - Le noyau est appelé ici, jamais dans vue.rs.
//! - Aperçu “live” : chaque modification de l’expression ré-évalue ; un échec vide le résultat.
//! - Historique borné.
//! - Thème, mode d’angle, mémoire et historique sont sauvegardés (eframe persistence) ;
//!   le reste de l’état repart de zéro à chaque lancement.

use calculatrice_sci::noyau::{evaluate_detailed, AngleMode, Demarche};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::affichage::formater_resultat;

/// Garde-fou : nombre d’entrées conservées dans l’historique.
const HISTORIQUE_MAX: usize = 50;

/// Le noyau ne dépend pas de serde : description distante de `AngleMode`.
#[derive(Serialize, Deserialize)]
#[serde(remote = "AngleMode")]
enum AngleModeSauve {
    Deg,
    Rad,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expr: String,
    pub res: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    #[serde(skip)]
    pub entree: String,

    // --- sorties ---
    #[serde(skip)]
    pub resultat: String, // résultat formaté (aperçu ou "=")
    #[serde(skip)]
    pub erreur: String, // message d’erreur du dernier "="
    #[serde(skip)]
    pub demarche: Demarche,

    // --- paramètres ---
    #[serde(with = "AngleModeSauve")]
    pub mode: AngleMode,
    pub theme_sombre: bool,

    // --- registres ---
    pub memoire: f64,
    pub historique: Vec<EntreeHistorique>, // plus récent en tête

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    #[serde(skip)]
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(AngleMode::default())
    }
}

impl AppCalc {
    pub fn new(mode: AngleMode) -> Self {
        Self {
            entree: String::new(),
            resultat: "0".to_string(),
            erreur: String::new(),
            demarche: Demarche::default(),
            mode,
            theme_sombre: true,
            memoire: 0.0,
            historique: Vec::new(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /// Reprend l’état sauvegardé s’il existe ; `mode` (ligne de commande) a priorité.
    pub fn restaurer(stockage: Option<&dyn eframe::Storage>, mode: Option<AngleMode>) -> Self {
        let sauve: Option<Self> = stockage.and_then(|s| eframe::get_value(s, eframe::APP_KEY));
        let mut app = match sauve {
            Some(app) => {
                debug!(entrees = app.historique.len(), "état restauré");
                app
            }
            None => Self::default(),
        };
        app.historique.truncate(HISTORIQUE_MAX);
        if let Some(m) = mode {
            app.mode = m;
        }
        app
    }

    pub fn sauver(&self, stockage: &mut dyn eframe::Storage) {
        eframe::set_value(stockage, eframe::APP_KEY, self);
    }

    /* ------------------------ Actions “touches” ------------------------ */

    /// Dispatch d’une touche du pavé (libellé affiché).
    pub fn appuyer(&mut self, touche: &str) {
        match touche {
            "AC" => self.reset_total(),
            "DEL" => self.backspace_entree(),
            "=" => self.egal(),

            "M+" => self.memoire_ajouter(1.0),
            "M-" => self.memoire_ajouter(-1.0),
            "MR" => {
                let m = format!("{}", self.memoire);
                self.inserer(&m);
            }
            "MC" => {
                self.memoire = 0.0;
                debug!("mémoire effacée");
            }

            "π" => self.inserer("pi"),
            "x²" => self.inserer("^2"),
            "xʸ" => self.inserer("^"),
            "√x" => self.inserer("sqrt("),
            "1/x" => self.inserer("^(-1)"),
            "|x|" => self.inserer("abs("),
            "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "ln" | "log" | "exp" => {
                self.inserer(&format!("{touche}("));
            }

            // chiffres, opérateurs, parenthèses, virgule, "e"
            _ => self.inserer(touche),
        }
        self.focus_entree = true;
    }

    /// AC : remise à zéro de l’expression et du résultat (mémoire et historique conservés).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.resultat = "0".to_string();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère.
    pub fn backspace_entree(&mut self) {
        self.entree.pop();
        self.apercu();
    }

    pub fn inserer(&mut self, texte: &str) {
        self.entree.push_str(texte);
        self.apercu();
    }

    pub fn set_mode(&mut self, mode: AngleMode) {
        if self.mode != mode {
            debug!(mode = mode.libelle(), "mode d’angle");
            self.mode = mode;
            self.apercu();
        }
    }

    /// Réutilise le résultat d’une entrée d’historique comme nouvelle expression.
    pub fn reutiliser(&mut self, index: usize) {
        if let Some(h) = self.historique.get(index) {
            self.entree = h.res.clone();
            self.apercu();
        }
        self.focus_entree = true;
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Aperçu “live” : appelé après chaque modification de l’expression.
    pub fn apercu(&mut self) {
        self.erreur.clear();

        if self.entree.trim().is_empty() {
            self.resultat = "0".to_string();
            self.demarche = Demarche::default();
            return;
        }

        match evaluate_detailed(&self.entree, self.mode) {
            Ok((v, d)) => {
                self.resultat = formater_resultat(v);
                self.demarche = d;
            }
            Err(_) => {
                // expression en cours de frappe : pas d’erreur affichée
                self.resultat.clear();
                self.demarche = Demarche::default();
            }
        }
    }

    /// "=" : dépose le résultat, l’ajoute à l’historique et le reprend comme expression.
    pub fn egal(&mut self) {
        match evaluate_detailed(&self.entree, self.mode) {
            Ok((v, d)) => {
                let res = formater_resultat(v);
                self.demarche = d;
                self.erreur.clear();

                if v.is_finite() {
                    debug!(expr = %self.entree, res = %res, "évaluation");
                    self.historique.insert(
                        0,
                        EntreeHistorique {
                            expr: self.entree.clone(),
                            res: res.clone(),
                        },
                    );
                    self.historique.truncate(HISTORIQUE_MAX);
                    self.entree = res.clone();
                } else {
                    debug!(expr = %self.entree, valeur = v, "résultat non fini");
                }
                self.resultat = res;
            }
            Err(e) => {
                debug!(expr = %self.entree, erreur = %e, "évaluation impossible");
                self.resultat = "Error".to_string();
                self.erreur = e.to_string();
                self.demarche = Demarche::default();
            }
        }
        self.focus_entree = true;
    }

    /// M+ / M- : ajoute (signe = 1) ou retire (signe = -1) le résultat affiché.
    fn memoire_ajouter(&mut self, signe: f64) {
        let v = self.resultat.parse::<f64>().unwrap_or(0.0);
        self.memoire += signe * v;
        debug!(memoire = self.memoire, "mémoire");
    }
}

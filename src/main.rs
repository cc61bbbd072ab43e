// src/main.rs
//
// Calculatrice scientifique: point d’entrée NATIF + WEB (WASM)
// --------------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : ligne de commande (clap) + journal (tracing)
//     * --eval "expr"  : évalue sans fenêtre, affiche le résultat, code de sortie != 0 si erreur
//     * sinon          : eframe::run_native
// - WEB  (wasm32)    : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice scientifique";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::process::ExitCode;

    use calculatrice_sci::noyau::{evaluate_expression, AngleMode, CalcError};
    use clap::{Parser, ValueEnum};
    use tracing::{debug, error, info};
    use tracing_subscriber::EnvFilter;

    use super::{egui, AppCalc, TITRE_APP};
    use crate::app::affichage::formater_resultat;

    #[derive(Clone, Copy, Debug, ValueEnum)]
    pub enum AngleArg {
        Deg,
        Rad,
    }

    impl From<AngleArg> for AngleMode {
        fn from(a: AngleArg) -> Self {
            match a {
                AngleArg::Deg => AngleMode::Deg,
                AngleArg::Rad => AngleMode::Rad,
            }
        }
    }

    /// Calculatrice scientifique (fenêtre, ou évaluation directe avec --eval)
    #[derive(Debug, Parser)]
    #[command(author, version, about)]
    pub struct Args {
        /// Unité d’angle des fonctions trigonométriques (défaut : celle sauvegardée, sinon deg)
        #[arg(short, long, value_enum)]
        pub angle: Option<AngleArg>,

        /// Évalue cette expression, affiche le résultat et quitte (pas de fenêtre)
        #[arg(short, long, value_name = "EXPR")]
        pub eval: Option<String>,

        /// Niveau de journal (trace, debug, info, warn, error) ; RUST_LOG a priorité
        #[arg(short, long, default_value = "warn")]
        pub log_level: String,
    }

    fn init_journal(niveau: &str) {
        let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(niveau));
        tracing_subscriber::fmt()
            .with_env_filter(filtre)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Mode sans fenêtre : résultat formaté pour stdout, ou l’erreur du noyau.
    fn evaluer_sans_fenetre(expr: &str, mode: AngleMode) -> Result<String, CalcError> {
        let v = evaluate_expression(expr, mode)?;
        debug!(expr, valeur = v, "évaluation");
        Ok(formater_resultat(v))
    }

    fn lancer_fenetre(mode: Option<AngleMode>) -> eframe::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(TITRE_APP)
                .with_inner_size([760.0, 620.0])
                .with_min_inner_size([560.0, 480.0]),
            ..Default::default()
        };

        eframe::run_native(
            TITRE_APP,
            options,
            Box::new(move |cc| Ok(Box::new(AppCalc::restaurer(cc.storage, mode)))),
        )
    }

    pub fn main() -> ExitCode {
        let args = Args::parse();
        init_journal(&args.log_level);

        let mode = args.angle.map(AngleMode::from);

        if let Some(expr) = args.eval.as_deref() {
            return match evaluer_sans_fenetre(expr, mode.unwrap_or_default()) {
                Ok(res) => {
                    println!("{res}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            };
        }

        info!(mode = ?mode, "démarrage de la fenêtre");
        match lancer_fenetre(mode) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(erreur = %e, "fenêtre impossible");
                ExitCode::FAILURE
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    natif::main()
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus (état restauré depuis le stockage local)
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(AppCalc::restaurer(cc.storage, None)))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}

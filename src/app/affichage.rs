//! src/app/affichage.rs
//!
//! Mise en forme d’un résultat f64 pour l’écran (responsabilité de l’appelant, pas du noyau).
//!
//! - non fini (NaN, ±∞)            -> "Error"
//! - |v| < 1e-6 ou |v| >= 1e9      -> exponentielle, 8 décimales ("1.50000000e+10", "1e-7")
//! - sinon                         -> arrondi à 12 décimales, forme la plus courte ("0.3")

/// Bornes de la notation décimale fixe.
const PETIT: f64 = 1e-6;
const GRAND: f64 = 1e9;

pub fn formater_resultat(v: f64) -> String {
    if !v.is_finite() {
        return "Error".to_string();
    }

    let abs = v.abs();
    if abs != 0.0 && !(PETIT..GRAND).contains(&abs) {
        return formater_exponentiel(v);
    }

    // arrondi à 12 décimales puis forme courte (0.1+0.2 -> 0.3)
    let arrondi: f64 = format!("{v:.12}").parse().unwrap_or(v);
    if arrondi == 0.0 {
        // pas de "-0"
        return "0".to_string();
    }
    format!("{arrondi}")
}

fn formater_exponentiel(v: f64) -> String {
    let brut = format!("{v:.8e}");
    let (mantisse, exposant) = brut.split_once('e').unwrap_or((brut.as_str(), "0"));

    // ".00000000" seul est retiré ; une mantisse non ronde garde ses 8 décimales
    let mantisse = match mantisse.split_once('.') {
        Some((entier, frac)) if frac.bytes().all(|b| b == b'0') => entier,
        _ => mantisse,
    };

    if exposant.starts_with('-') {
        format!("{mantisse}e{exposant}")
    } else {
        format!("{mantisse}e+{exposant}")
    }
}

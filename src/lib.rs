//! Calculatrice scientifique: bibliothèque
//!
//! Le noyau (`noyau`) est une fonction pure : chaîne + mode d’angle -> f64 ou erreur typée.
//! L’interface (eframe) vit dans le binaire.

pub mod noyau;

pub use noyau::{evaluate_expression, AngleMode, CalcError};

//! Noyau flottant
//!
//! Organisation interne :
//! - tables.rs   : opérateurs, fonctions, constantes (statiques, lecture seule)
//! - erreurs.rs  : erreurs typées par étape + CalcError
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard (infixe -> postfixe)
//! - eval.rs     : évaluation RPN + pipeline complet

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod rpn;
pub mod tables;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use erreurs::{CalcError, ConvertError, EvalError, LexError};
pub use eval::{evaluate, evaluate_detailed, evaluate_expression, AngleMode, Demarche};
pub use jetons::{format_tokens, tokenize, Arity, Token};
pub use rpn::to_postfix;

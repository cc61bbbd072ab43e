// src/noyau/tables.rs
//
// Tables fixes du noyau : opérateurs, fonctions, constantes.
// Construites une seule fois (lazy_static), jamais modifiées ensuite :
// partageables entre threads sans verrou.

use std::collections::HashMap;

use lazy_static::lazy_static;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

/// Métadonnées d’un opérateur : précédence, associativité, arité (1 ou 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoOp {
    pub precedence: u8,
    pub assoc: Assoc,
    pub arite: u8,
}

impl InfoOp {
    const fn new(precedence: u8, assoc: Assoc, arite: u8) -> Self {
        Self {
            precedence,
            assoc,
            arite,
        }
    }
}

/// Signe préfixe (`+x`, `-x`) : entrée distincte du `+`/`-` binaire.
/// Au-dessus de tous les binaires (y compris `^`), sous `%` et `!`.
pub const SIGNE_UNAIRE: InfoOp = InfoOp::new(5, Assoc::Droite, 1);

/// Ensemble fermé des fonctions reconnues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Abs,
    Log,
    Ln,
    Pow,
    Exp,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sqrt => "sqrt",
            Fonction::Abs => "abs",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Pow => "pow",
            Fonction::Exp => "exp",
        }
    }
}

lazy_static! {
    /// Opérateurs binaires et postfixes, indexés par symbole.
    pub static ref OPERATEURS: HashMap<char, InfoOp> = {
        let mut m = HashMap::new();
        m.insert('+', InfoOp::new(2, Assoc::Gauche, 2));
        m.insert('-', InfoOp::new(2, Assoc::Gauche, 2));
        m.insert('×', InfoOp::new(3, Assoc::Gauche, 2));
        m.insert('*', InfoOp::new(3, Assoc::Gauche, 2));
        m.insert('÷', InfoOp::new(3, Assoc::Gauche, 2));
        m.insert('/', InfoOp::new(3, Assoc::Gauche, 2));
        m.insert('^', InfoOp::new(4, Assoc::Droite, 2));
        m.insert('%', InfoOp::new(5, Assoc::Droite, 1));
        m.insert('!', InfoOp::new(6, Assoc::Droite, 1));
        m
    };

    pub static ref FONCTIONS: HashMap<&'static str, Fonction> = {
        use Fonction::*;
        [Sin, Cos, Tan, Asin, Acos, Atan, Sqrt, Abs, Log, Ln, Pow, Exp]
            .into_iter()
            .map(|f| (f.nom(), f))
            .collect()
    };

    pub static ref CONSTANTES: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("pi", std::f64::consts::PI);
        m.insert("e", std::f64::consts::E);
        m
    };
}

/// `%` et `!` : toujours unaires postfixés, quelle que soit leur position.
pub fn est_postfixe(symbole: char) -> bool {
    matches!(symbole, '%' | '!')
}

/// `+` et `-` peuvent être binaires ou signes préfixes.
pub fn peut_etre_signe(symbole: char) -> bool {
    matches!(symbole, '+' | '-')
}

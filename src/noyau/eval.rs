//! Noyau: évaluation (pipeline réel)
//!
//! tokenize -> RPN (shunting-yard) -> pile d’opérandes f64 -> résultat
//!
//! Pur et sans état : chaque appel alloue ses propres séquences, donc réentrant.
//! NaN / ±∞ (division par zéro, sqrt(-1)…) sont des résultats valides, pas des erreurs.

use super::erreurs::{CalcError, EvalError};
use super::jetons::{format_tokens, tokenize, Arity, Token};
use super::rpn::to_postfix;
use super::tables::{est_postfixe, Fonction};

/// Unité d’angle des fonctions trigonométriques.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleMode {
    #[default]
    Deg,
    Rad,
}

impl AngleMode {
    fn vers_radians(self, x: f64) -> f64 {
        match self {
            AngleMode::Deg => x.to_radians(),
            AngleMode::Rad => x,
        }
    }

    fn depuis_radians(self, x: f64) -> f64 {
        match self {
            AngleMode::Deg => x.to_degrees(),
            AngleMode::Rad => x,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            AngleMode::Deg => "DEG",
            AngleMode::Rad => "RAD",
        }
    }
}

/// Trace lisible des étapes intermédiaires (pour l’affichage “démarche”).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression dans le mode d’angle donné.
pub fn evaluate_expression(expr_str: &str, mode: AngleMode) -> Result<f64, CalcError> {
    let jetons = tokenize(expr_str)?;
    let rpn = to_postfix(&jetons)?;
    Ok(evaluate(&rpn, mode)?)
}

/// Comme `evaluate_expression`, mais retourne aussi la démarche (jetons, RPN).
pub fn evaluate_detailed(expr_str: &str, mode: AngleMode) -> Result<(f64, Demarche), CalcError> {
    // 1) Jetons
    let jetons = tokenize(expr_str)?;

    // 2) RPN
    let rpn = to_postfix(&jetons)?;

    // 3) Pile
    let valeur = evaluate(&rpn, mode)?;

    let d = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
    };
    Ok((valeur, d))
}

/// Évalue une suite RPN avec une pile d’opérandes.
///
/// Succès seulement s’il reste exactement une valeur sur la pile à la fin.
pub fn evaluate(rpn: &[Token], mode: AngleMode) -> Result<f64, EvalError> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Token::Number(v) => st.push(*v),

            Token::Identifier(name) => {
                return Err(EvalError::UnboundVariable { name: name.clone() });
            }

            Token::Function(f) => {
                let v = appliquer_fonction(*f, &mut st, mode)?;
                st.push(v);
            }

            Token::Operator(symbole, arite) => {
                let unaire = match arite {
                    Arity::Unary => true,
                    Arity::Binary => false,
                    // non passé par le shunting-yard : arité naturelle
                    Arity::Unknown => est_postfixe(*symbole),
                };

                let v = if unaire {
                    let a = depiler(&mut st)?;
                    appliquer_unaire(*symbole, a)?
                } else {
                    let b = depiler(&mut st)?;
                    let a = depiler(&mut st)?;
                    appliquer_binaire(*symbole, a, b)?
                };
                st.push(v);
            }

            Token::LeftParen | Token::RightParen | Token::Comma => {
                return Err(EvalError::MalformedExpression);
            }
        }
    }

    match st.as_slice() {
        [v] => Ok(*v),
        _ => Err(EvalError::MalformedExpression),
    }
}

fn depiler(st: &mut Vec<f64>) -> Result<f64, EvalError> {
    st.pop().ok_or(EvalError::StackUnderflow)
}

fn appliquer_fonction(f: Fonction, st: &mut Vec<f64>, mode: AngleMode) -> Result<f64, EvalError> {
    // pow : b au sommet, a dessous
    let b = depiler(st)?;
    let v = match f {
        Fonction::Pow => depiler(st)?.powf(b),
        Fonction::Sin => mode.vers_radians(b).sin(),
        Fonction::Cos => mode.vers_radians(b).cos(),
        Fonction::Tan => mode.vers_radians(b).tan(),
        Fonction::Asin => mode.depuis_radians(b.asin()),
        Fonction::Acos => mode.depuis_radians(b.acos()),
        Fonction::Atan => mode.depuis_radians(b.atan()),
        Fonction::Sqrt => b.sqrt(),
        Fonction::Abs => b.abs(),
        Fonction::Log => b.log10(),
        Fonction::Ln => b.ln(),
        Fonction::Exp => b.exp(),
    };
    Ok(v)
}

fn appliquer_unaire(symbole: char, a: f64) -> Result<f64, EvalError> {
    match symbole {
        '+' => Ok(a),
        '-' => Ok(-a),
        '%' => Ok(a / 100.0),
        '!' => factorielle(a),
        _ => Err(EvalError::MalformedExpression),
    }
}

fn appliquer_binaire(symbole: char, a: f64, b: f64) -> Result<f64, EvalError> {
    let v = match symbole {
        '+' => a + b,
        '-' => a - b,
        '×' | '*' => a * b,
        '÷' | '/' => a / b,
        '^' => a.powf(b),
        _ => return Err(EvalError::MalformedExpression),
    };
    Ok(v)
}

/// Au-delà, le produit dépasse f64::MAX.
const FACTORIELLE_MAX: f64 = 170.0;

/// n! itératif (2·3·…·n). Pas d’arrondi : n doit déjà être entier et positif.
fn factorielle(n: f64) -> Result<f64, EvalError> {
    if n < 0.0 {
        return Err(EvalError::NegativeFactorial);
    }
    if n.fract() != 0.0 {
        // couvre aussi NaN et +∞
        return Err(EvalError::NonIntegerFactorial);
    }
    if n > FACTORIELLE_MAX {
        return Ok(f64::INFINITY);
    }

    let mut res = 1.0;
    let mut i = 2.0;
    while i <= n {
        res *= i;
        i += 1.0;
    }
    Ok(res)
}

//! Tests scientifiques (campagne) : propriétés du pipeline complet.
//!
//! But : vérifier les conventions de précédence et les frontières d’erreur sans faire
//! chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes importantes (aligné avec la table d’opérateurs) :
//! - Le signe préfixe (précédence 5) lie plus fort que `^` (4) : "-5^2" vaut 25.
//! - `%` et `!` (5 et 6) lient plus fort que le signe : "-3!" vaut -6.
//! - Les non-finis (1/0, sqrt(-1)) sont des Ok, jamais des erreurs.

use std::time::{Duration, Instant};

use super::erreurs::{CalcError, ConvertError, EvalError, LexError};
use super::eval::{evaluate, evaluate_expression, AngleMode};
use super::jetons::tokenize;
use super::rpn::to_postfix;

fn eval_ok(expr: &str, mode: AngleMode) -> f64 {
    evaluate_expression(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_vaut(expr: &str, attendu: f64) {
    let v = eval_ok(expr, AngleMode::Deg);
    assert_eq!(v, attendu, "expr={expr:?}");
}

fn assert_proche(expr: &str, mode: AngleMode, attendu: f64) {
    let v = eval_ok(expr, mode);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} mode={mode:?}: {v} != {attendu}"
    );
}

fn assert_erreur(expr: &str, attendue: CalcError) {
    let e = evaluate_expression(expr, AngleMode::Deg).expect_err(expr);
    assert_eq!(e, attendue, "expr={expr:?}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence_conventionnelle() {
    assert_vaut("2+3×4", 14.0);
    assert_vaut("(2+3)×4", 20.0);
    assert_vaut("2*3+4*5", 26.0);
    assert_vaut("2×(3+4)×5", 70.0);
    assert_vaut("100÷10÷5", 2.0);
    assert_vaut("1-2-3", -4.0);
    assert_vaut("((((1))))", 1.0);
}

#[test]
fn sci_puissance_droite() {
    assert_vaut("2^3^2", 512.0);
    assert_vaut("(2^3)^2", 64.0);
    assert_vaut("2^3×2", 16.0);
}

#[test]
fn sci_signes_prefixes() {
    assert_vaut("--5", 5.0);
    assert_vaut("---5", -5.0);
    assert_vaut("-+-5", 5.0);
    assert_vaut("-5^2", 25.0);
    assert_vaut("-(5^2)", -25.0);
    assert_vaut("3--2", 5.0);
    assert_vaut("3×-2", -6.0);
    assert_vaut("(-2)×(-3)", 6.0);
}

#[test]
fn sci_postfixes() {
    assert_vaut("5!", 120.0);
    assert_vaut("50%", 0.5);
    assert_vaut("3!+1", 7.0);
    assert_vaut("3!!", 720.0);
    assert_vaut("(1+2)!", 6.0);
    assert_vaut("2^3!", 64.0);
    assert_vaut("5!%", 1.2);
    assert_vaut("10%×50", 5.0);
}

/* ------------------------ Fonctions / constantes ------------------------ */

#[test]
fn sci_fonctions_deux_modes() {
    for mode in [AngleMode::Deg, AngleMode::Rad] {
        assert_eq!(eval_ok("sin(0)", mode), 0.0, "mode={mode:?}");
        assert_eq!(eval_ok("sqrt(16)", mode), 4.0, "mode={mode:?}");
    }
    assert_proche("cos(60)", AngleMode::Deg, 0.5);
    assert_proche("tan(45)", AngleMode::Deg, 1.0);
    assert_proche("acos(0)", AngleMode::Deg, 90.0);
    assert_proche("acos(0)", AngleMode::Rad, std::f64::consts::FRAC_PI_2);
    assert_proche("sin(pi/2)", AngleMode::Rad, 1.0);
}

#[test]
fn sci_fonctions_imbriquees() {
    assert_proche("sqrt(abs(-16))+log(100)", AngleMode::Deg, 6.0);
    assert_proche("ln(exp(2))", AngleMode::Deg, 2.0);
    assert_proche("pow(sqrt(4), pow(2,2))", AngleMode::Deg, 16.0);
    assert_proche("asin(sin(30))", AngleMode::Deg, 30.0);
}

#[test]
fn sci_constantes() {
    assert_proche("pi", AngleMode::Deg, std::f64::consts::PI);
    assert_proche("e", AngleMode::Deg, std::f64::consts::E);
    assert_proche("PI×2", AngleMode::Deg, std::f64::consts::TAU);
    assert_proche("e^1", AngleMode::Deg, std::f64::consts::E);
}

#[test]
fn sci_espaces_et_majuscules() {
    assert_vaut("  SQRT ( 1_6 )\t+ 1 ", 5.0);
}

/* ------------------------ Frontière erreur / non-fini ------------------------ */

#[test]
fn sci_non_finis_valides() {
    assert_eq!(eval_ok("1÷0", AngleMode::Deg), f64::INFINITY);
    assert_eq!(eval_ok("-1/0", AngleMode::Deg), f64::NEG_INFINITY);
    assert!(eval_ok("sqrt(-1)", AngleMode::Deg).is_nan());
    assert!(eval_ok("ln(-1)", AngleMode::Deg).is_nan());
    assert_eq!(eval_ok("log(0)", AngleMode::Deg), f64::NEG_INFINITY);
}

#[test]
fn sci_erreurs() {
    assert_erreur("1/", CalcError::Eval(EvalError::StackUnderflow));
    assert_erreur("×2", CalcError::Eval(EvalError::StackUnderflow));
    assert_erreur("(1+2", CalcError::Convert(ConvertError::MismatchedParen));
    assert_erreur("sin(1))", CalcError::Convert(ConvertError::MismatchedParen));
    assert_erreur("2,3", CalcError::Convert(ConvertError::UnexpectedComma));
    assert_erreur("(-1)!", CalcError::Eval(EvalError::NegativeFactorial));
    assert_erreur("2.5!", CalcError::Eval(EvalError::NonIntegerFactorial));
    assert_erreur(
        "x+1",
        CalcError::Eval(EvalError::UnboundVariable {
            name: "x".to_string(),
        }),
    );
    assert_erreur("()", CalcError::Eval(EvalError::MalformedExpression));
    assert_erreur("2 3", CalcError::Eval(EvalError::MalformedExpression));
    assert_erreur(
        "2 # 3",
        CalcError::Lex(LexError::UnknownCharacter {
            ch: '#',
            position: 2,
        }),
    );
}

#[test]
fn sci_premiere_erreur_gagne() {
    // erreur lexicale avant le déséquilibre de parenthèses
    assert_erreur(
        "(1+$",
        CalcError::Lex(LexError::UnknownCharacter {
            ch: '$',
            position: 3,
        }),
    );
    // déséquilibre avant la variable non liée
    assert_erreur("(x", CalcError::Convert(ConvertError::MismatchedParen));
}

/* ------------------------ Pureté ------------------------ */

#[test]
fn sci_evaluateur_idempotent() {
    for expr in ["2+3×4", "sin(30)+5!", "pow(2,10)-1%", "1/0", "0/0"] {
        let rpn = to_postfix(&tokenize(expr).unwrap()).unwrap();
        let a = evaluate(&rpn, AngleMode::Deg).unwrap();
        let b = evaluate(&rpn, AngleMode::Deg).unwrap();
        assert_eq!(a.to_bits(), b.to_bits(), "expr={expr:?}");
    }
}

#[test]
fn sci_appels_concurrents() {
    let fils: Vec<_> = (0..4)
        .map(|k| {
            std::thread::spawn(move || {
                (0..200)
                    .map(|i| evaluate_expression(&format!("{k}×{i}+1"), AngleMode::Rad))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (k, f) in fils.into_iter().enumerate() {
        let resultats = f.join().expect("thread");
        for (i, r) in resultats.into_iter().enumerate() {
            assert_eq!(r, Ok((k * i + 1) as f64));
        }
    }
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // profondeur 2000 : tout est itératif, pas de récursion
    let n = 2000;
    let expr = format!("{}1{}", "(".repeat(n), "+1)".repeat(n));
    budget(t0, max);

    assert_vaut(&expr, (n + 1) as f64);
    budget(t0, max);
}

#[test]
fn sci_stress_chaine_signes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = format!("{}7", "-".repeat(1001));
    assert_vaut(&expr, -7.0);
    budget(t0, max);
}

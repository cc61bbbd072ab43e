// src/noyau/jetons.rs

use super::erreurs::LexError;
use super::tables::{Fonction, CONSTANTES, FONCTIONS};

/// Arité d’un opérateur : inconnue à la tokenisation, résolue par le shunting-yard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Unknown,
    Unary,
    Binary,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Littéral ou constante nommée déjà résolue (pi, e).
    Number(f64),

    /// Mot nu inconnu : variable non liée (l’évaluation échouera).
    Identifier(String),

    Function(Fonction),

    Operator(char, Arity),

    LeftParen,
    RightParen,
    Comma,
}

const SYMBOLES_OPERATEURS: &str = "+-×*÷/^%!";

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux : 12, 3.25, .5, séparateur `_` ignoré (1_000)
/// - identifiants [a-zA-Z][a-zA-Z0-9_]* (insensibles à la casse)
///   -> fonction, constante (pi, e) ou variable
/// - opérateurs + - × * ÷ / ^ % !
/// - ( ) ,
/// - √ (équivaut à ident("sqrt")), π (équivaut à "pi")
///
/// Seuls l’espace et la tabulation sont ignorés ; tout autre caractère est une erreur.
/// La position rapportée est l’indice du caractère (pas de l’octet).
pub fn tokenize(s: &str) -> Result<Vec<Token>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == ' ' || c == '\t' {
            i += 1;
            continue;
        }

        // Nombre : commence par un chiffre, ou par '.' suivi d’un chiffre
        let suivant_chiffre = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        if c.is_ascii_digit() || (c == '.' && suivant_chiffre) {
            let debut = i;
            let (valeur, fin) = lire_nombre(&chars, i)
                .ok_or(LexError::UnknownCharacter { ch: c, position: debut })?;
            out.push(Token::Number(valeur));
            i = fin;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(classer_mot(word.to_ascii_lowercase()));
            continue;
        }

        let jeton = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            '√' => Token::Function(Fonction::Sqrt),
            'π' => Token::Number(std::f64::consts::PI),
            _ if SYMBOLES_OPERATEURS.contains(c) => Token::Operator(c, Arity::Unknown),
            _ => return Err(LexError::UnknownCharacter { ch: c, position: i }),
        };
        out.push(jeton);
        i += 1;
    }

    Ok(out)
}

/// Lit `chiffres ('.' chiffres)?` à partir de `i` ; `_` est toléré (et retiré) dans les chiffres.
/// Retourne la valeur et l’indice juste après le nombre.
fn lire_nombre(chars: &[char], mut i: usize) -> Option<(f64, usize)> {
    let mut texte = String::new();

    let lire_chiffres = |i: &mut usize, texte: &mut String| {
        while *i < chars.len() && (chars[*i].is_ascii_digit() || chars[*i] == '_') {
            if chars[*i] != '_' {
                texte.push(chars[*i]);
            }
            *i += 1;
        }
    };

    lire_chiffres(&mut i, &mut texte);

    // partie décimale seulement si un chiffre suit le point
    if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
        if texte.is_empty() {
            texte.push('0');
        }
        texte.push('.');
        i += 1;
        lire_chiffres(&mut i, &mut texte);
    }

    texte.parse::<f64>().ok().map(|v| (v, i))
}

fn classer_mot(w: String) -> Token {
    if let Some(f) = FONCTIONS.get(w.as_str()) {
        Token::Function(*f)
    } else if let Some(v) = CONSTANTES.get(w.as_str()) {
        Token::Number(*v)
    } else {
        Token::Identifier(w)
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
/// Les signes préfixes résolus sont notés `neg` / `pos` pour les distinguer du binaire.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Token::Number(v) => format!("{v}"),
            Token::Identifier(name) => name.clone(),
            Token::Function(f) => f.nom().to_string(),

            Token::Operator('-', Arity::Unary) => "neg".to_string(),
            Token::Operator('+', Arity::Unary) => "pos".to_string(),
            Token::Operator(op, _) => op.to_string(),

            Token::LeftParen => "(".to_string(),
            Token::RightParen => ")".to_string(),
            Token::Comma => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

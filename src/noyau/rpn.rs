// src/noyau/rpn.rs
//
// Shunting-yard : infixe (avec signes préfixes et opérateurs postfixés) -> RPN
//
// Règles:
// - Number / Identifier : sortie directe
// - Function : empilée, sortie à sa parenthèse fermante
// - `+`/`-` : signe préfixe si rien avant, ou si le jeton précédent n’est ni une valeur,
//   ni `)`, ni un postfixe (`%`, `!`) ; sinon binaire
// - `%`, `!` : toujours unaires postfixés
// - Virgule : sépare les arguments d’une fonction (dépile jusqu’à la `(` sans la retirer)
//
// NOTE:
// - Une fonction au sommet de la pile est toujours dépilée par un opérateur entrant
//   (forme sans parenthèses : `√4+1` => `4 sqrt 1 +`).

use super::erreurs::ConvertError;
use super::jetons::{Arity, Token};
use super::tables::{est_postfixe, peut_etre_signe, Assoc, InfoOp, OPERATEURS, SIGNE_UNAIRE};

/// Nature du jeton précédent, seule information utile pour trancher unaire / binaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Precedent {
    Debut,
    /// Nombre ou `)` : une valeur vient d’être fermée.
    Valeur,
    /// `%` ou `!` : la valeur précédente est complète.
    Postfixe,
    Autre,
}

impl Precedent {
    fn attend_operande(self) -> bool {
        !matches!(self, Precedent::Valeur | Precedent::Postfixe)
    }
}

/// État explicite du convertisseur, passé à chaque étape.
struct EtatConversion {
    sortie: Vec<Token>,
    pile: Vec<Token>,
    precedent: Precedent,
}

impl EtatConversion {
    fn new(capacite: usize) -> Self {
        Self {
            sortie: Vec::with_capacity(capacite),
            pile: Vec::new(),
            precedent: Precedent::Debut,
        }
    }
}

/// Métadonnées d’un opérateur déjà résolu (sur la pile).
fn info_resolue(symbole: char, arite: Arity) -> Result<InfoOp, ConvertError> {
    if arite == Arity::Unary && peut_etre_signe(symbole) {
        return Ok(SIGNE_UNAIRE);
    }
    OPERATEURS
        .get(&symbole)
        .copied()
        .ok_or(ConvertError::UnknownOperator(symbole))
}

/// Convertit une suite de jetons infixe en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Function(sin), LeftParen, Number(0), RightParen, Operator('+'), Number(1)]
///   rpn:    [Number(0), Function(sin), Number(1), Operator('+', Binary)]
///
/// Chaque opérateur de la sortie porte son arité résolue (`Unary` / `Binary`).
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, ConvertError> {
    let mut etat = EtatConversion::new(tokens.len());

    for tok in tokens.iter().cloned() {
        etape(&mut etat, tok)?;
    }

    terminer(etat)
}

fn etape(etat: &mut EtatConversion, tok: Token) -> Result<(), ConvertError> {
    match tok {
        Token::Number(_) => {
            etat.sortie.push(tok);
            etat.precedent = Precedent::Valeur;
        }

        Token::Identifier(_) => {
            // variable non liée : sortie directe, l’évaluation la refusera
            etat.sortie.push(tok);
            etat.precedent = Precedent::Autre;
        }

        Token::Function(_) | Token::LeftParen => {
            etat.pile.push(tok);
            etat.precedent = Precedent::Autre;
        }

        Token::Comma => {
            loop {
                match etat.pile.last() {
                    Some(Token::LeftParen) => break,
                    Some(_) => {
                        if let Some(top) = etat.pile.pop() {
                            etat.sortie.push(top);
                        }
                    }
                    None => return Err(ConvertError::UnexpectedComma),
                }
            }
            etat.precedent = Precedent::Autre;
        }

        Token::RightParen => {
            // dépile jusqu’à '('
            loop {
                match etat.pile.pop() {
                    Some(Token::LeftParen) => break,
                    Some(top) => etat.sortie.push(top),
                    None => return Err(ConvertError::MismatchedParen),
                }
            }

            // si une fonction est au sommet, elle s’applique à la liste qu’on vient de fermer
            if matches!(etat.pile.last(), Some(Token::Function(_))) {
                if let Some(f) = etat.pile.pop() {
                    etat.sortie.push(f);
                }
            }

            etat.precedent = Precedent::Valeur;
        }

        Token::Operator(symbole, _) => {
            let unaire = peut_etre_signe(symbole) && etat.precedent.attend_operande();

            let (info, arite) = if unaire {
                (SIGNE_UNAIRE, Arity::Unary)
            } else {
                let info = OPERATEURS
                    .get(&symbole)
                    .copied()
                    .ok_or(ConvertError::UnknownOperator(symbole))?;
                let arite = if info.arite == 1 {
                    Arity::Unary
                } else {
                    Arity::Binary
                };
                (info, arite)
            };

            // dépile tant que le sommet lie plus fort (ou autant, si l’opérateur courant est
            // associatif à gauche)
            while let Some(top) = etat.pile.last() {
                let doit_pop = match top {
                    Token::Function(_) => true,
                    Token::Operator(s, a) => {
                        let p_top = info_resolue(*s, *a)?.precedence;
                        p_top > info.precedence
                            || (p_top == info.precedence && info.assoc == Assoc::Gauche)
                    }
                    _ => false,
                };

                if !doit_pop {
                    break;
                }
                if let Some(t) = etat.pile.pop() {
                    etat.sortie.push(t);
                }
            }

            etat.pile.push(Token::Operator(symbole, arite));
            etat.precedent = if est_postfixe(symbole) {
                Precedent::Postfixe
            } else {
                Precedent::Autre
            };
        }
    }

    Ok(())
}

/// Vide la pile ; une parenthèse restante signifie un déséquilibre.
fn terminer(mut etat: EtatConversion) -> Result<Vec<Token>, ConvertError> {
    while let Some(top) = etat.pile.pop() {
        if matches!(top, Token::LeftParen | Token::RightParen) {
            return Err(ConvertError::MismatchedParen);
        }
        etat.sortie.push(top);
    }
    Ok(etat.sortie)
}

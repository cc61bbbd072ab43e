//! Erreurs du noyau : une énumération par étape, regroupées dans `CalcError`.
//!
//! Toutes sont terminales pour l’appel : la première erreur court-circuite le pipeline.
//! Les résultats non finis (NaN, ±∞) ne sont PAS des erreurs.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("caractère inattendu: '{ch}' (position {position})")]
    UnknownCharacter { ch: char, position: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("parenthèses non équilibrées")]
    MismatchedParen,

    #[error("virgule hors d’une liste d’arguments")]
    UnexpectedComma,

    #[error("opérateur inconnu: '{0}'")]
    UnknownOperator(char),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("opérande manquant")]
    StackUnderflow,

    #[error("variable non définie: {name}")]
    UnboundVariable { name: String },

    #[error("factorielle d’un nombre négatif")]
    NegativeFactorial,

    #[error("factorielle d’un nombre non entier")]
    NonIntegerFactorial,

    #[error("expression invalide")]
    MalformedExpression,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

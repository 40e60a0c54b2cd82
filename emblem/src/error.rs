use strum::EnumIs;
use thiserror::Error;

/// Recoverable failures reported by expression evaluation.
///
/// Construction, substitution and rendering are total and never produce an
/// [`Error`]. A tree with missing operands is a construction bug and panics
/// instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// A symbol leaf has no entry in the binding passed to `evaluate`.
    #[error(
        "Symbol `{name}` is not bound. Supply a value for `{name}` in the binding and evaluate again."
    )]
    UnboundSymbol { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Invalid-argument conditions raised by the name-matching core.
///
/// These are caller mistakes (bad configuration), never data-quality
/// problems: an unparseable name simply fails to match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("author-list separator {separator:?} conflicts with name order {order:?}")]
    SeparatorConflictsWithOrder { separator: String, order: String },

    #[error("author-list separator must not be empty")]
    EmptySeparator,

    #[error("unknown author name order {0:?} (expected \",\", \"LAST_FIRST\" or \"FIRST_FIRST\")")]
    UnknownOrder(String),

    #[error("invalid author position {0:?} (expected a non-negative index or \"FIRST\")")]
    InvalidPosition(String),

    #[error("{field} = {value} exceeds the maximum reconciliation edit distance {max}")]
    EditDistanceTooLarge {
        field: &'static str,
        value: usize,
        max: usize,
    },
}

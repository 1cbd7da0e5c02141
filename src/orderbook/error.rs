//! Order book error types

use std::fmt;

/// Errors that can occur within the order book.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// `send` was called with a NaN price, or `TickGrid::shift` was asked
    /// to resolve a price outside the grid and outside the extrapolation
    /// rules.
    InvalidPrice {
        /// Human-readable detail of what was invalid.
        message: String,
    },

    /// `get` (or another uid-keyed lookup) was called with a uid that was
    /// never passed to `send`.
    UnknownUid {
        /// The uid that was looked up.
        uid: i64,
    },

    /// `send` was called with a uid/`is_mine` combination that violates the
    /// sign convention (`uid < 0 <=> is_mine`).
    InvalidSide {
        /// The uid that was supplied.
        uid: i64,
        /// The `is_mine` flag that was supplied alongside it.
        is_mine: bool,
    },

    /// `send` was called with a non-positive quantity.
    InvalidQuantity {
        /// The quantity that was rejected.
        qty: u64,
    },

    /// `send` was called with a uid that is already present in the order
    /// index.
    DuplicateUid {
        /// The uid that collided.
        uid: i64,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidPrice { message } => {
                write!(f, "invalid price: {message}")
            }
            OrderBookError::UnknownUid { uid } => {
                write!(f, "unknown uid: {uid}")
            }
            OrderBookError::InvalidSide { uid, is_mine } => {
                write!(
                    f,
                    "invalid side: uid {uid} is inconsistent with is_mine={is_mine}"
                )
            }
            OrderBookError::InvalidQuantity { qty } => {
                write!(f, "invalid quantity: {qty} (must be > 0)")
            }
            OrderBookError::DuplicateUid { uid } => {
                write!(f, "uid already exists in this order book: {uid}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}

use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// The red-black rule that a tree was found to break.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// The sentinel has been colored red.
    Sentinel,
    /// The root of a non-empty tree is red.
    RedRoot,
    /// A red node has a red child.
    RedRed,
    /// Two paths from the same node to a leaf pass through a different number of black nodes.
    BlackHeight,
    /// An in-order neighbour compares less than its predecessor.
    Order,
    /// A child does not point back at its parent.
    Parent,
    /// The live count disagrees with the number of reachable nodes.
    Len,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            Violation::Sentinel => "sentinel is red",
            Violation::RedRoot => "root is red",
            Violation::RedRed => "red node has a red child",
            Violation::BlackHeight => "black height differs between paths",
            Violation::Order => "keys are out of order",
            Violation::Parent => "child does not link back to its parent",
            Violation::Len => "live count does not match reachable nodes",
        };
        write!(f, "{}", message)
    }
}

#[derive(Debug)]
pub enum Error {
    Alloc(TryReserveError),
    Invariant(Violation),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::Alloc(err)
    }
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Error {
        Error::Invariant(violation)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Alloc(error) => Some(error),
            Error::Invariant(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Alloc(error) => write!(f, "{}", error),
            Error::Invariant(violation) => write!(f, "invariant violated: {}", violation),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

//! Call / Put for option contracts and for the filter form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contract right of a trade.
///
/// On the wire this is the upper-case string `"CALL"` or `"PUT"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallPut {
    #[serde(rename = "CALL")]
    Call,
    #[serde(rename = "PUT")]
    Put,
}

impl CallPut {
    pub fn as_str(self) -> &'static str {
        match self {
            CallPut::Call => "CALL",
            CallPut::Put => "PUT",
        }
    }

    /// Single-letter form used in the compact contract column.
    pub fn as_char(self) -> char {
        match self {
            CallPut::Call => 'C',
            CallPut::Put => 'P',
        }
    }
}

impl fmt::Display for CallPut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call/put choice in the filter dialog. `All` emits no constraint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CallPutSelection {
    #[default]
    All,
    Call,
    Put,
}

impl CallPutSelection {
    /// The exact-match value this selection constrains to, if any.
    pub fn constraint(self) -> Option<CallPut> {
        match self {
            CallPutSelection::All => None,
            CallPutSelection::Call => Some(CallPut::Call),
            CallPutSelection::Put => Some(CallPut::Put),
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            CallPutSelection::All => CallPutSelection::Call,
            CallPutSelection::Call => CallPutSelection::Put,
            CallPutSelection::Put => CallPutSelection::All,
        }
    }

    pub fn cycle_back(self) -> Self {
        match self {
            CallPutSelection::All => CallPutSelection::Put,
            CallPutSelection::Call => CallPutSelection::All,
            CallPutSelection::Put => CallPutSelection::Call,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CallPutSelection::All => "All",
            CallPutSelection::Call => "Call",
            CallPutSelection::Put => "Put",
        }
    }
}

//! Provenance of hybrid service results.

use crate::error::ContractError;
use std::fmt;

/// Operations the hybrid service routes between the real and mock paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateToken,
    CreatePool,
    SwapTokens,
    InitializeWhitelist,
    AddToWhitelist,
    IsWhitelisted,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateToken => "create token",
            Operation::CreatePool => "create pool",
            Operation::SwapTokens => "swap tokens",
            Operation::InitializeWhitelist => "initialize whitelist",
            Operation::AddToWhitelist => "add to whitelist",
            Operation::IsWhitelisted => "check whitelist status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the real service implements an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealSupport {
    /// Submits to the deployed program.
    Live,
    /// Returns fabricated data without touching the network.
    Stub,
}

/// Which path produced a result.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Genuine result from the deployed program.
    Real,
    /// Fabricated by a placeholder on the real path.
    RealStub,
    /// Real path not enabled; served by the mock.
    Mock,
    /// Real path failed; served by the mock.
    Fallback { real_error: ContractError },
}

/// A hybrid service result together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Routed<T> {
    pub value: T,
    pub route: Route,
}

impl<T> Routed<T> {
    pub fn new(value: T, route: Route) -> Self {
        Self { value, route }
    }

    /// True only for results the deployed program actually produced.
    pub fn is_genuine(&self) -> bool {
        matches!(self.route, Route::Real)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.route, Route::Fallback { .. })
    }

    /// The real-path error this result stands in for, if any.
    pub fn real_error(&self) -> Option<&ContractError> {
        match &self.route {
            Route::Fallback { real_error } => Some(real_error),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Routed<U> {
        Routed {
            value: f(self.value),
            route: self.route,
        }
    }
}

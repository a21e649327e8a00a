//! Component names.
//!
//! The set of loadable components is closed and known at compile time.
//! String names coming from templates or configuration are parsed into a
//! [`ComponentName`]; anything else is a [`DispatchError::NotFound`].

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog tier of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentTier {
    /// Small components loaded directly
    Core,
    /// Heavy components always wrapped for deferred rendering
    Complex,
}

/// Every component known to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentName {
    /// Button
    Button,
    /// Card container
    Card,
    /// Card header section
    CardHeader,
    /// Card body section
    CardContent,
    /// Card footer section
    CardFooter,
    /// Text input
    Input,
    /// Modal dialog
    Dialog,
    /// Select dropdown
    Select,
}

impl ComponentName {
    /// All names, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Button,
        Self::Card,
        Self::CardHeader,
        Self::CardContent,
        Self::CardFooter,
        Self::Input,
        Self::Dialog,
        Self::Select,
    ];

    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::Card => "Card",
            Self::CardHeader => "CardHeader",
            Self::CardContent => "CardContent",
            Self::CardFooter => "CardFooter",
            Self::Input => "Input",
            Self::Dialog => "Dialog",
            Self::Select => "Select",
        }
    }

    /// Catalog tier used when building the standard registry.
    #[must_use]
    pub const fn tier(self) -> ComponentTier {
        match self {
            Self::Dialog | Self::Select => ComponentTier::Complex,
            _ => ComponentTier::Core,
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentName {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DispatchError::not_found(s))
    }
}

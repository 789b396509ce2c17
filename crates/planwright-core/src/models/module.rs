//! The mandatory modules of a design document.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five mandatory design document modules.
///
/// The declaration order is the canonical document order; `Ord` follows it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DesignModule {
    Architecture,
    Components,
    DataFlow,
    ErrorHandling,
    Testing,
}

impl DesignModule {
    /// All modules in canonical order.
    pub const ALL: [DesignModule; 5] = [
        DesignModule::Architecture,
        DesignModule::Components,
        DesignModule::DataFlow,
        DesignModule::ErrorHandling,
        DesignModule::Testing,
    ];

    /// Heading used in the design document and in missing-requirement sets.
    pub fn title(&self) -> &'static str {
        match self {
            DesignModule::Architecture => "Architecture",
            DesignModule::Components => "Components",
            DesignModule::DataFlow => "Data Flow",
            DesignModule::ErrorHandling => "Error Handling",
            DesignModule::Testing => "Testing",
        }
    }

    /// Command-line friendly identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignModule::Architecture => "architecture",
            DesignModule::Components => "components",
            DesignModule::DataFlow => "data-flow",
            DesignModule::ErrorHandling => "error-handling",
            DesignModule::Testing => "testing",
        }
    }

    /// 0-based position in canonical order.
    pub fn position(self) -> usize {
        self as usize
    }
}

impl FromStr for DesignModule {
    type Err = String;

    /// Accepts both the identifier (`data-flow`) and the title (`Data Flow`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        DesignModule::ALL
            .into_iter()
            .find(|module| module.as_str() == normalized)
            .ok_or_else(|| format!("Invalid design module: {s}"))
    }
}

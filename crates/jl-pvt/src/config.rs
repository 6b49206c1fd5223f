//! PVT correlation selection.

use serde::{Deserialize, Serialize};

/// Which closed-form correlation family populates the saturated oil
/// properties (bubble point, solution GOR, oil formation volume factor).
///
/// Viscosity (Beggs-Robinson), gas (Sutton pseudo-criticals, Papay z-factor,
/// Lee viscosity) and water (McCain) correlations are common to both sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorrelationSet {
    #[default]
    Standing,
    VazquezBeggs,
}

/// Configuration for the fluid property model.
///
/// Passed by value through every property call; no process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PvtConfig {
    pub correlation_set: CorrelationSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standing() {
        let cfg = PvtConfig::default();
        assert_eq!(cfg.correlation_set, CorrelationSet::Standing);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = PvtConfig {
            correlation_set: CorrelationSet::VazquezBeggs,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PvtConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}

//! Search configuration.

/// Per-run search settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Paint the best-known path as [`FrontierPreview`] after every
    /// relaxation so a host can animate the search.
    ///
    /// [`FrontierPreview`]: pathgrid_core::Terrain::FrontierPreview
    pub visualize: bool,
    /// Paint the interior of a found path as [`PathTrail`].
    ///
    /// [`PathTrail`]: pathgrid_core::Terrain::PathTrail
    pub mark_trail: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            visualize: true,
            mark_trail: true,
        }
    }
}

impl SearchConfig {
    /// No board painting at all: the run only updates costs and routes.
    pub const QUIET: Self = Self {
        visualize: false,
        mark_trail: false,
    };
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"visualize": false}"#).unwrap();
        assert_eq!(
            cfg,
            SearchConfig {
                visualize: false,
                mark_trail: true,
            }
        );
        let mode: crate::SearchMode = serde_json::from_str(r#""UniformCost""#).unwrap();
        assert_eq!(mode, crate::SearchMode::UniformCost);
    }
}

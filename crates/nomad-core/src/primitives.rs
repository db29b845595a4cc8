//! # Fixed Constants
//!
//! Upstream endpoints, request limits and the strings every display surface
//! shares. These are compiled in; the base URL can be overridden through
//! configuration, nothing else can.

/// Default NOMAD API root. Both endpoints hang off this.
pub const DEFAULT_BASE_URL: &str = "https://nomad-lab.eu/prod/rae/api/v1";

/// Path of the entry search endpoint, relative to the API root.
pub const ENTRIES_PATH: &str = "entries";

/// Trailing path segment of the per-entry archive endpoint.
pub const ARCHIVE_SEGMENT: &str = "archive";

/// Only the first match is ever shown.
pub const RESULTS_PER_PAGE: u32 = 1;

/// JSON pointer to the band gap inside an archive document.
pub const BAND_GAP_POINTER: &str =
    "/results/properties/electronic/band_structure_electronic/band_gap";

// =============================================================================
// DISPLAY STRINGS
// =============================================================================

/// Substituted for any absent text field.
pub const PLACEHOLDER: &str = "N/A";

/// Subheader fallback when an entry carries no formula.
pub const UNKNOWN_FORMULA: &str = "Unknown";

/// Separator for the element list.
pub const ELEMENT_SEPARATOR: &str = ", ";

/// Decimal places used for the band gap.
pub const BAND_GAP_PRECISION: usize = 3;

/// Unit suffix for the band gap.
pub const BAND_GAP_UNIT: &str = "eV";

pub const PAGE_TITLE: &str = "NOMAD Material Explorer";

pub const PAGE_CAPTION: &str =
    "Enter a material formula (e.g., Li, Mg, CrTe2) to fetch metadata from the NOMAD database.";

pub const INPUT_LABEL: &str = "Material formula or element symbol:";

pub const NO_RESULTS_WARNING: &str = "No results found for the entered formula.";

pub const BAND_GAP_UNAVAILABLE_WARNING: &str = "Band gap not available in archive.";

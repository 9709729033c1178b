/// Celestial target catalog
///
/// The four observable targets and their fixed metadata. Coordinates are
/// catalog constants, nothing is computed.
use std::fmt;
use std::str::FromStr;

use crate::error::ViewerError;

/// Identifier of a catalog target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    Andromeda,
    Orion,
    Pillars,
    Crab,
}

impl TargetId {
    /// All targets, in the order they appear in the selector
    pub const ALL: [TargetId; 4] = [
        TargetId::Andromeda,
        TargetId::Orion,
        TargetId::Pillars,
        TargetId::Crab,
    ];

    /// Stable lowercase key
    pub fn key(self) -> &'static str {
        match self {
            TargetId::Andromeda => "andromeda",
            TargetId::Orion => "orion",
            TargetId::Pillars => "pillars",
            TargetId::Crab => "crab",
        }
    }

    /// Catalog record for this target
    pub fn target(self) -> &'static Target {
        match self {
            TargetId::Andromeda => &CATALOG[0],
            TargetId::Orion => &CATALOG[1],
            TargetId::Pillars => &CATALOG[2],
            TargetId::Crab => &CATALOG[3],
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TargetId {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TargetId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| ViewerError::UnknownTarget(s.to_string()))
    }
}

/// Fixed metadata for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: TargetId,
    /// Human readable name (e.g., "Andromeda Galaxy (M31)")
    pub name: &'static str,
    /// Where the image is fetched from (https URI or local path)
    pub image_uri: &'static str,
    pub right_ascension: &'static str,
    pub declination: &'static str,
    pub distance: &'static str,
}

static CATALOG: [Target; 4] = [
    Target {
        id: TargetId::Andromeda,
        name: "Andromeda Galaxy (M31)",
        image_uri: "https://upload.wikimedia.org/wikipedia/commons/thumb/9/98/Andromeda_Galaxy_%28with_h-alpha%29.jpg/1280px-Andromeda_Galaxy_%28with_h-alpha%29.jpg",
        right_ascension: "00h 42m 44.3s",
        declination: "+41° 16′ 09″",
        distance: "2.537 Mly",
    },
    Target {
        id: TargetId::Orion,
        name: "Orion Nebula (M42)",
        image_uri: "https://upload.wikimedia.org/wikipedia/commons/thumb/f/f3/Orion_Nebula_-_Hubble_2006_mosaic_18000.jpg/1280px-Orion_Nebula_-_Hubble_2006_mosaic_18000.jpg",
        right_ascension: "05h 35m 17.3s",
        declination: "−05° 23′ 28″",
        distance: "1,344 ly",
    },
    Target {
        id: TargetId::Pillars,
        name: "Pillars of Creation (M16)",
        image_uri: "https://upload.wikimedia.org/wikipedia/commons/thumb/6/68/Pillars_of_creation_2014_HST_WFC3-UVIS_full-res_denoised.jpg/1280px-Pillars_of_creation_2014_HST_WFC3-UVIS_full-res_denoised.jpg",
        right_ascension: "18h 18m 48.0s",
        declination: "−13° 49′ 00″",
        distance: "6,500 ly",
    },
    Target {
        id: TargetId::Crab,
        name: "Crab Nebula (M1)",
        image_uri: "https://upload.wikimedia.org/wikipedia/commons/thumb/0/00/Crab_Nebula.jpg/1280px-Crab_Nebula.jpg",
        right_ascension: "05h 34m 31.9s",
        declination: "+22° 00′ 52″",
        distance: "6,523 ly",
    },
];

/// Holds the currently selected target. There is always exactly one.
#[derive(Debug, Clone)]
pub struct TargetSelector {
    current: TargetId,
}

impl Default for TargetSelector {
    fn default() -> Self {
        Self::new(TargetId::Andromeda)
    }
}

impl TargetSelector {
    pub fn new(initial: TargetId) -> Self {
        Self { current: initial }
    }

    /// Metadata of the current target
    pub fn metadata(&self) -> &'static Target {
        self.current.target()
    }

    pub fn select(&mut self, id: TargetId) {
        self.current = id;
    }
}

//! # Species Catalog
//!
//! The four extinct-animal templates a pet can instantiate. The catalog is
//! static reference data, immutable for the process lifetime, and keyed by
//! the closed [`Species`] enumeration. Adding a species forces every
//! exhaustive `match` in the workspace to handle it.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of species in the catalog.
pub const SPECIES_COUNT: usize = 4;

/// A revivable species.
///
/// Serialized with the display identifiers the game has always used
/// (`"Dodo"`, `"Mammoth"`, `"Thylacine"`, `"Irish Elk"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Dodo,
    Mammoth,
    Thylacine,
    #[serde(rename = "Irish Elk", alias = "IrishElk", alias = "irish-elk")]
    IrishElk,
}

impl Species {
    /// Every species, in catalog order.
    pub const ALL: [Species; SPECIES_COUNT] = [
        Species::Dodo,
        Species::Mammoth,
        Species::Thylacine,
        Species::IrishElk,
    ];

    /// Display identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dodo => "Dodo",
            Self::Mammoth => "Mammoth",
            Self::Thylacine => "Thylacine",
            Self::IrishElk => "Irish Elk",
        }
    }

    /// URL-safe identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Dodo => "dodo",
            Self::Mammoth => "mammoth",
            Self::Thylacine => "thylacine",
            Self::IrishElk => "irish-elk",
        }
    }

    /// Dense index in `0..SPECIES_COUNT`, stable with [`Species::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Dodo => 0,
            Self::Mammoth => 1,
            Self::Thylacine => 2,
            Self::IrishElk => 3,
        }
    }

    /// Catalog entry for this species.
    pub fn data(&self) -> &'static SpeciesData {
        &CATALOG[self.index()]
    }

    /// Pick a species uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..SPECIES_COUNT)]
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = ValidationError;

    /// Accepts the display identifier, the slug, or the variant name,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|sp| {
                needle.eq_ignore_ascii_case(sp.as_str())
                    || needle.eq_ignore_ascii_case(sp.slug())
                    || needle.eq_ignore_ascii_case(&format!("{sp:?}"))
            })
            .ok_or_else(|| ValidationError::UnknownSpecies(s.to_string()))
    }
}

/// Immutable reference data for a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesData {
    pub id: Species,
    pub name: &'static str,
    pub scientific_name: &'static str,
    /// Free-form year, e.g. `"1662"` or `"2000 BC"`.
    pub extinction_year: &'static str,
    pub origin: &'static str,
    pub description: &'static str,
    pub story: &'static str,
    pub image_url: &'static str,
}

static CATALOG: [SpeciesData; SPECIES_COUNT] = [
    SpeciesData {
        id: Species::Dodo,
        name: "Dodo",
        scientific_name: "Raphus cucullatus",
        extinction_year: "1662",
        origin: "Mauritius",
        description: "A gentle, flightless bird that lived in peace until forgotten.",
        story: "The Dodo represents the innocence of an isolated paradise. Her return signifies a second chance for trust. In HerGenesis, she is the nurturer of the coast.",
        image_url: "https://picsum.photos/id/1062/600/600",
    },
    SpeciesData {
        id: Species::Mammoth,
        name: "Woolly Mammoth",
        scientific_name: "Mammuthus primigenius",
        extinction_year: "2000 BC",
        origin: "Arctic Tundra",
        description: "The matriarch of the ice, guiding her herd through the eternal winter.",
        story: "Carrying the wisdom of the frozen earth, the Mammoth brings resilience. Her thick fur weaves the history of a world before man.",
        image_url: "https://picsum.photos/id/1003/600/600",
    },
    SpeciesData {
        id: Species::Thylacine,
        name: "Thylacine",
        scientific_name: "Thylacinus cynocephalus",
        extinction_year: "1936",
        origin: "Tasmania",
        description: "The striped ghost of the bush, a shy and misunderstood hunter.",
        story: "Benjamin was the last male, but here we revive the females. The Thylacine teaches us the value of silence and observation in the digital wild.",
        image_url: "https://picsum.photos/id/1025/600/600",
    },
    SpeciesData {
        id: Species::IrishElk,
        name: "Irish Elk",
        scientific_name: "Megaloceros giganteus",
        extinction_year: "5000 BC",
        origin: "Eurasia",
        description: "Bearer of the great crown, wandering the ancient emerald forests.",
        story: "Her antlers are not for war, but for connecting to the stars. The Irish Elk symbolizes the grandeur of nature that cannot be contained.",
        image_url: "https://picsum.photos/id/1074/600/600",
    },
];

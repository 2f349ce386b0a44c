use std::str::FromStr;

use crate::NativeId;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    #[default]
    Dramabox,
    Reelshort,
    Netshort,
    Melolo,
    Flickreels,
    Freereels,
}

impl SourceId {
    pub const ALL: [SourceId; 6] = [
        Self::Dramabox,
        Self::Reelshort,
        Self::Netshort,
        Self::Melolo,
        Self::Flickreels,
        Self::Freereels,
    ];

    /// Position of the source in [`SourceId::ALL`] and [`DESCRIPTORS`].
    pub fn index(&self) -> usize {
        match self {
            Self::Dramabox => 0,
            Self::Reelshort => 1,
            Self::Netshort => 2,
            Self::Melolo => 3,
            Self::Flickreels => 4,
            Self::Freereels => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dramabox => "dramabox",
            Self::Reelshort => "reelshort",
            Self::Netshort => "netshort",
            Self::Melolo => "melolo",
            Self::Flickreels => "flickreels",
            Self::Freereels => "freereels",
        }
    }

    pub fn descriptor(&self) -> &'static SourceDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn qualify(&self, native: &NativeId) -> String {
        format!("{}:{native}", self.as_str())
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("invalid source {s:?}"))
    }
}

/// What happens to a record that comes without a usable cover image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverPolicy {
    /// Keep the record, the front-end shows a placeholder.
    Placeholder,
    /// Leave the record out of the result set.
    Drop,
}

#[derive(Debug, PartialEq, Eq, serde::Serialize)]
pub struct SourceDescriptor {
    pub id: SourceId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub logo: &'static str,
    pub api_base_path: &'static str,
    pub cover_policy: CoverPolicy,
}

pub static DESCRIPTORS: [SourceDescriptor; 6] = [
    SourceDescriptor {
        id: SourceId::Dramabox,
        display_name: "DramaBox",
        description: "The best short dramas from DramaBox.",
        logo: "/dramabox.webp",
        api_base_path: "/api/dramabox",
        cover_policy: CoverPolicy::Placeholder,
    },
    SourceDescriptor {
        id: SourceId::Reelshort,
        display_name: "ReelShort",
        description: "Exclusive short dramas from ReelShort.",
        logo: "/reelshort.webp",
        api_base_path: "/api/reelshort",
        cover_policy: CoverPolicy::Placeholder,
    },
    SourceDescriptor {
        id: SourceId::Netshort,
        display_name: "NetShort",
        description: "A collection of vertical dramas from NetShort.",
        logo: "/netshort.webp",
        api_base_path: "/api/netshort",
        cover_policy: CoverPolicy::Placeholder,
    },
    SourceDescriptor {
        id: SourceId::Melolo,
        display_name: "Melolo",
        description: "Popular short dramas streaming from Melolo.",
        logo: "/melolo.webp",
        api_base_path: "/api/melolo",
        cover_policy: CoverPolicy::Drop,
    },
    SourceDescriptor {
        id: SourceId::Flickreels,
        display_name: "FlickReels",
        description: "Quality short videos on FlickReels.",
        logo: "/flickreels.png",
        api_base_path: "/api/flickreels",
        cover_policy: CoverPolicy::Placeholder,
    },
    SourceDescriptor {
        id: SourceId::Freereels,
        display_name: "FreeReels",
        description: "Free short dramas streaming on FreeReels.",
        logo: "/freereels.webp",
        api_base_path: "/api/freereels",
        cover_policy: CoverPolicy::Placeholder,
    },
];

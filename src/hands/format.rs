/// the hand-history formats an upstream converter may have translated
/// into the canonical record. the extractor itself is agnostic: this
/// enumeration exists so the boundary has one authoritative list.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandFormat {
    XmlIpoker,
    TxtIpoker,
    TxtPokerstars,
    Phh,
}

impl HandFormat {
    pub const fn all() -> &'static [Self] {
        &[
            Self::XmlIpoker,
            Self::TxtIpoker,
            Self::TxtPokerstars,
            Self::Phh,
        ]
    }
}

impl std::fmt::Display for HandFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::XmlIpoker => write!(f, "xml_ipoker"),
            Self::TxtIpoker => write!(f, "txt_ipoker"),
            Self::TxtPokerstars => write!(f, "txt_pokerstars"),
            Self::Phh => write!(f, "phh"),
        }
    }
}

//! Coded values carried by ROSS 1000 fields.
//!
//! Each enum parses from the trimmed field content and renders back to the
//! exact text the fixed-width format expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// ISTAT country code for Italy.
pub const ITALY_CODE: &str = "100000100";

/// Placeholder used when tourism type or transport mode is unknown.
pub const UNSPECIFIED: &str = "Non Specificato";

/// Whether a country code denotes Italy.
///
/// Codes starting with `000` are treated as Italian as well.
pub fn is_italy(code: &str) -> bool {
    let code = code.trim();
    code == ITALY_CODE || code.starts_with("000")
}

/// Role of the reported guest (field 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuestType {
    /// 16: Ospite Singolo.
    LoneGuest,
    /// 17: Capo Famiglia.
    FamilyHead,
    /// 18: Capo Gruppo.
    GroupHead,
    /// 19: Familiare.
    FamilyMember,
    /// 20: Membro Gruppo.
    GroupMember,
}

impl GuestType {
    pub const ALL: [GuestType; 5] = [
        GuestType::LoneGuest,
        GuestType::FamilyHead,
        GuestType::GroupHead,
        GuestType::FamilyMember,
        GuestType::GroupMember,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            GuestType::LoneGuest => "16",
            GuestType::FamilyHead => "17",
            GuestType::GroupHead => "18",
            GuestType::FamilyMember => "19",
            GuestType::GroupMember => "20",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GuestType::LoneGuest => "Ospite Singolo",
            GuestType::FamilyHead => "Capo Famiglia",
            GuestType::GroupHead => "Capo Gruppo",
            GuestType::FamilyMember => "Familiare",
            GuestType::GroupMember => "Membro Gruppo",
        }
    }

    /// Family or group head (17, 18).
    pub fn is_head(&self) -> bool {
        matches!(self, GuestType::FamilyHead | GuestType::GroupHead)
    }

    /// Family or group member (19, 20).
    pub fn is_member(&self) -> bool {
        matches!(self, GuestType::FamilyMember | GuestType::GroupMember)
    }

    /// Guest types that report accommodation figures (16, 17, 18).
    pub fn occupies_rooms(&self) -> bool {
        !self.is_member()
    }

    /// Head kind a member belongs to.
    pub fn leader_kind(&self) -> Option<GuestType> {
        match self {
            GuestType::FamilyMember => Some(GuestType::FamilyHead),
            GuestType::GroupMember => Some(GuestType::GroupHead),
            _ => None,
        }
    }
}

impl fmt::Display for GuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for GuestType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        GuestType::ALL
            .into_iter()
            .find(|guest| guest.code() == code)
            .ok_or_else(|| ModelError::unknown_code("guest type", s))
    }
}

/// Operation carried by a record (field 26).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// 1: new position.
    New,
    /// 2: amendment of a reported position.
    Amend,
    /// 3: deletion of a reported position.
    Delete,
}

impl Modality {
    pub fn code(&self) -> &'static str {
        match self {
            Modality::New => "1",
            Modality::Amend => "2",
            Modality::Delete => "3",
        }
    }

    /// New and amended positions are transmitted as arrivals.
    pub fn is_transmitted(&self) -> bool {
        matches!(self, Modality::New | Modality::Amend)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Modality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Modality::New),
            "2" => Ok(Modality::Amend),
            "3" => Ok(Modality::Delete),
            _ => Err(ModelError::unknown_code("modality", s)),
        }
    }
}

/// Sex code (field 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "1",
            Sex::Female => "2",
        }
    }

    /// Letter used by the movement XML.
    pub fn letter(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter.trim() {
            "M" | "m" => Some(Sex::Male),
            "F" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Sex::Male),
            "2" => Ok(Sex::Female),
            _ => Err(ModelError::unknown_code("sex", s)),
        }
    }
}

/// Declares a closed list of textual categories with exact spellings.
macro_rules! text_codes {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            /// Exact match on the trimmed text.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let text = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == text)
                    .ok_or_else(|| ModelError::unknown_code($kind, s))
            }
        }
    };
}

text_codes! {
    /// Purpose of the stay (field 19).
    TourismType, "tourism type" {
        Cultural => "Culturale",
        Beach => "Balneare",
        Business => "Congressuale/Affari",
        TradeFair => "Fieristico",
        Sport => "Sportivo/Fitness",
        School => "Scolastico",
        Religious => "Religioso",
        Social => "Sociale",
        ThemeParks => "Parchi Tematici",
        Spa => "Termale/Trattamenti salute",
        FoodAndWine => "Enogastronomico",
        Cycling => "Cicloturismo",
        Hiking => "Escursionistico/Naturalistico",
        Other => "Altro motivo",
        Unspecified => "Non Specificato",
    }
}

text_codes! {
    /// Means of transport used to reach the facility (field 20).
    TransportMode, "transport mode" {
        Car => "Auto",
        Air => "Aereo",
        AirCoach => "Aereo+Pullman",
        AirShuttle => "Aereo+Navetta/Taxi/Auto",
        AirTrain => "Aereo+Treno",
        Train => "Treno",
        Coach => "Pullman",
        Caravan => "Caravan/Autocaravan",
        Boat => "Barca/Nave/Traghetto",
        Motorbike => "Moto",
        Bicycle => "Bicicletta",
        OnFoot => "A piedi",
        Other => "Altro mezzo",
        Unspecified => "Non Specificato",
    }
}

text_codes! {
    /// Italian region a submission is routed to.
    Region, "region" {
        Abruzzo => "Abruzzo",
        Basilicata => "Basilicata",
        Calabria => "Calabria",
        Campania => "Campania",
        EmiliaRomagna => "Emilia-Romagna",
        FriuliVeneziaGiulia => "Friuli-Venezia Giulia",
        Lazio => "Lazio",
        Liguria => "Liguria",
        Lombardia => "Lombardia",
        Marche => "Marche",
        Molise => "Molise",
        Piemonte => "Piemonte",
        Puglia => "Puglia",
        Sardegna => "Sardegna",
        Sicilia => "Sicilia",
        Toscana => "Toscana",
        TrentinoAltoAdige => "Trentino-Alto Adige",
        Umbria => "Umbria",
        ValleDAosta => "Valle d'Aosta",
        Veneto => "Veneto",
    }
}

impl Region {
    /// Routing slug, e.g. `emilia-romagna` or `valle-d'aosta`.
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase().replace(' ', "-")
    }

    /// Parse either the display name or the slug, case-insensitively.
    pub fn parse_loose(value: &str) -> Option<Self> {
        let needle = value.trim().to_lowercase();
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.slug() == needle || region.as_str().to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn italy_prefix_rule() {
        assert!(is_italy("100000100"));
        assert!(is_italy("000123456"));
        assert!(is_italy(" 100000100 "));
        assert!(!is_italy("100000219"));
        assert!(!is_italy(""));
    }

    #[test]
    fn guest_type_roles() {
        assert!(GuestType::FamilyHead.is_head());
        assert!(GuestType::GroupMember.is_member());
        assert!(GuestType::LoneGuest.occupies_rooms());
        assert!(!GuestType::FamilyMember.occupies_rooms());
        assert_eq!(
            GuestType::GroupMember.leader_kind(),
            Some(GuestType::GroupHead)
        );
        assert_eq!(GuestType::LoneGuest.leader_kind(), None);
    }

    #[test]
    fn list_sizes() {
        assert_eq!(TourismType::ALL.len(), 15);
        assert_eq!(TransportMode::ALL.len(), 14);
        assert_eq!(Region::ALL.len(), 20);
    }

    #[test]
    fn region_slugs() {
        assert_eq!(Region::FriuliVeneziaGiulia.slug(), "friuli-venezia-giulia");
        assert_eq!(Region::parse_loose("valle-d'aosta"), Some(Region::ValleDAosta));
        assert_eq!(Region::parse_loose("Lazio"), Some(Region::Lazio));
        assert_eq!(Region::parse_loose("atlantis"), None);
    }
}

//! Enumerations and small value types shared by mail records.

use std::fmt;

/// Physical category of a mail item.
///
/// Drives which inspection view is opened for the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MailKind {
    #[default]
    Letter,
    Package,
}

impl fmt::Display for MailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter => write!(f, "letter"),
            Self::Package => write!(f, "package"),
        }
    }
}

/// The four handling actions a player can take on a mail item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Forward to the recipient.
    #[default]
    Accept,
    /// One minor issue: send back so the sender can try again.
    Reply,
    /// Too many minor issues: reject outright.
    Reject,
    /// Dangerous or policy-violating content: escalate.
    Report,
}

impl Action {
    /// All actions in button order.
    pub const ALL: [Action; 4] = [Action::Accept, Action::Reply, Action::Reject, Action::Report];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Accept => "accept",
            Self::Reply => "reply",
            Self::Reject => "reject",
            Self::Report => "report",
        };
        write!(f, "{s}")
    }
}

/// Contraband categories selectable in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContrabandKind {
    Drugs,
    Substances,
    Nsfw,
    Food,
    Dangerous,
}

/// Suspicious substance categories selectable in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubstanceKind {
    Chemical,
    Biological,
    Powder,
    Liquid,
    Unknown,
}

/// Written-content offences found in letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffenceKind {
    Threatening,
    Stalking,
    Inappropriate,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PostageType {
    #[default]
    Standard,
    Express,
    Fake,
}

/// Country of origin, as printed on the envelope (ISO 3166 alpha-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Country {
    #[default]
    Gbr,
    Jpn,
    Usa,
    Deu,
    Fra,
    Can,
    Aus,
    Ind,
}

impl Country {
    /// Three-letter code shown on the envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Gbr => "GBR",
            Self::Jpn => "JPN",
            Self::Usa => "USA",
            Self::Deu => "DEU",
            Self::Fra => "FRA",
            Self::Can => "CAN",
            Self::Aus => "AUS",
            Self::Ind => "IND",
        }
    }
}

/// Narrative weight of a record. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NarrativeImportance {
    /// Filler mail.
    #[default]
    Generic,
    /// Develops a recurring character.
    Character,
    /// Advances the main story.
    Story,
    /// Major plot point.
    Critical,
}

/// Whether a record is authored as guaranteed story mail or pool filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnType {
    Guaranteed,
    #[default]
    Random,
}

/// Which reply template the presentation layer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplyCategory {
    Supportive,
    #[default]
    Nice,
    Pet,
    HateMail,
    /// Use the record's own override text.
    Custom,
}

/// Unique identifier of an authored record, e.g. `LTR_001` or `PKG_005`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MailId(String);

impl MailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MailId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque reference to an image owned by the rendering layer.
///
/// The core never resolves these; it only carries them to the view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssetHandle(pub String);

impl From<&str> for AssetHandle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Width x height in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width_cm: f32,
    pub height_cm: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width_cm: 21.0,
            height_cm: 15.0,
        }
    }
}

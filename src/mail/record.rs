//! The authored mail record.

use super::types::{
    Action, AssetHandle, ContrabandKind, Country, Dimensions, MailId, MailKind,
    NarrativeImportance, OffenceKind, PostageType, ReplyCategory, SpawnType, SubstanceKind,
};
use crate::rules::{correct_action, validate_authoring, RuleViolation};

/// One inspectable piece of mail.
///
/// Records are authored content: they are built once (usually deserialized
/// from design data) and then shared read-only, typically as
/// `Arc<MailRecord>`, by day configurations, shift queues, and inspection
/// sessions.
///
/// Fields fall into three groups:
///
/// - **Classification inputs** read by [`rules::correct_action`](crate::rules::correct_action):
///   `addressed_correctly`, `signed_correctly`, `sentence_count`,
///   `contraband`, `substance`, `offence`.
/// - **Presentation payload** carried to the view layer untouched.
/// - **Authored ground truth**: `ideal_action` and `broken_rules`, checked by
///   the authoring audit but never used for scoring.
///
/// Each danger category is a single `Option`: `Some(kind)` flags the record
/// and names the kind at once. A record cannot be flagged without a kind, so
/// content importers must supply one for every flagged category.
///
/// # Examples
///
/// ```
/// use u_mailroom::mail::{Action, ContrabandKind, MailRecord};
///
/// let record = MailRecord::letter("LTR_001")
///     .with_addressed_correctly(false)
///     .with_contraband(ContrabandKind::Drugs)
///     .with_ideal_action(Action::Report);
/// assert_eq!(u_mailroom::rules::correct_action(&record), Action::Report);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MailRecord {
    // ---- Identity ----
    pub id: MailId,
    pub kind: MailKind,
    /// Day (1-based) on which this record is meant to appear.
    pub appearance_day: u8,
    pub importance: NarrativeImportance,
    pub spawn_type: SpawnType,

    // ---- Sender ----
    pub sender_name: String,
    pub sender_address: String,
    /// Recurring fan profile, if the sender is not a one-off.
    pub fan_profile_id: Option<String>,

    // ---- Letter content ----
    /// How the sender addressed the recipient, as displayed.
    pub addressed_name: String,
    pub addressed_correctly: bool,
    /// How the sender signed the letter, as displayed.
    pub signature_name: String,
    pub signed_correctly: bool,
    pub letter_content: String,
    /// Pre-counted number of sentences in `letter_content`.
    pub sentence_count: u32,
    pub contains_question: bool,
    pub letter_image: Option<AssetHandle>,
    /// Shows the encrypted overlay in the letter view. Narrative only.
    pub is_encrypted: bool,

    // ---- Exterior ----
    pub country: Country,
    pub postage: PostageType,

    // ---- Physical ----
    pub weight_grams: f32,
    pub dimensions: Dimensions,

    // ---- Package-specific ----
    /// Front, right, back, left.
    pub package_sides: [Option<AssetHandle>; 4],
    pub item_inside_description: String,
    pub item_inside_image: Option<AssetHandle>,
    /// What the customs form claims is inside.
    pub customs_form: Option<String>,

    // ---- Danger ----
    pub contraband: Option<ContrabandKind>,
    pub contains_metal: bool,
    pub substance: Option<SubstanceKind>,
    pub offence: Option<OffenceKind>,
    pub gift_value: u32,

    // ---- Visual assets ----
    pub mail_image: Option<AssetHandle>,
    pub content_image: Option<AssetHandle>,
    pub stamp_image: Option<AssetHandle>,
    pub visual_clues: Vec<AssetHandle>,

    // ---- Reply ----
    pub reply_category: ReplyCategory,
    pub reply_override: Option<String>,

    // ---- Authored ground truth ----
    pub ideal_action: Action,
    pub broken_rules: Vec<RuleViolation>,
}

impl Default for MailRecord {
    fn default() -> Self {
        Self {
            id: MailId::new(""),
            kind: MailKind::Letter,
            appearance_day: 1,
            importance: NarrativeImportance::Generic,
            spawn_type: SpawnType::Random,
            sender_name: String::new(),
            sender_address: String::new(),
            fan_profile_id: None,
            addressed_name: String::new(),
            addressed_correctly: true,
            signature_name: String::new(),
            signed_correctly: true,
            letter_content: String::new(),
            sentence_count: 3,
            contains_question: false,
            letter_image: None,
            is_encrypted: false,
            country: Country::Gbr,
            postage: PostageType::Standard,
            weight_grams: 50.0,
            dimensions: Dimensions::default(),
            package_sides: [None, None, None, None],
            item_inside_description: String::new(),
            item_inside_image: None,
            customs_form: None,
            contraband: None,
            contains_metal: false,
            substance: None,
            offence: None,
            gift_value: 0,
            mail_image: None,
            content_image: None,
            stamp_image: None,
            visual_clues: Vec::new(),
            reply_category: ReplyCategory::Nice,
            reply_override: None,
            ideal_action: Action::Accept,
            broken_rules: Vec::new(),
        }
    }
}

impl MailRecord {
    /// Creates a clean letter (no violations) with the given id.
    pub fn letter(id: impl Into<String>) -> Self {
        Self {
            id: MailId::new(id),
            kind: MailKind::Letter,
            ..Self::default()
        }
    }

    /// Creates a clean package (no violations) with the given id.
    pub fn package(id: impl Into<String>) -> Self {
        Self {
            id: MailId::new(id),
            kind: MailKind::Package,
            ..Self::default()
        }
    }

    pub fn with_addressed_correctly(mut self, ok: bool) -> Self {
        self.addressed_correctly = ok;
        self
    }

    pub fn with_signed_correctly(mut self, ok: bool) -> Self {
        self.signed_correctly = ok;
        self
    }

    pub fn with_sentence_count(mut self, n: u32) -> Self {
        self.sentence_count = n;
        self
    }

    pub fn with_contraband(mut self, kind: ContrabandKind) -> Self {
        self.contraband = Some(kind);
        self
    }

    pub fn with_substance(mut self, kind: SubstanceKind) -> Self {
        self.substance = Some(kind);
        self
    }

    pub fn with_offence(mut self, kind: OffenceKind) -> Self {
        self.offence = Some(kind);
        self
    }

    pub fn with_encrypted(mut self, encrypted: bool) -> Self {
        self.is_encrypted = encrypted;
        self
    }

    pub fn with_spawn_type(mut self, spawn_type: SpawnType) -> Self {
        self.spawn_type = spawn_type;
        self
    }

    pub fn with_ideal_action(mut self, action: Action) -> Self {
        self.ideal_action = action;
        self
    }

    pub fn with_broken_rules(mut self, rules: Vec<RuleViolation>) -> Self {
        self.broken_rules = rules;
        self
    }

    pub fn with_reply(mut self, category: ReplyCategory, text: Option<&str>) -> Self {
        self.reply_category = category;
        self.reply_override = text.map(str::to_string);
        self
    }

    pub fn is_package(&self) -> bool {
        self.kind == MailKind::Package
    }

    /// Custom reply text, if this record overrides the reply template.
    ///
    /// Returns `None` for every non-`Custom` category and for an empty
    /// override; template lookup belongs to the presentation layer.
    pub fn reply_text(&self) -> Option<&str> {
        match (self.reply_category, self.reply_override.as_deref()) {
            (ReplyCategory::Custom, Some(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Multi-line dump for content review.
    ///
    /// The `Ideal action` line carries the authoring verdict: `VALID`, or
    /// `MISMATCH` with the computed action.
    pub fn debug_info(&self) -> String {
        let verdict = if validate_authoring(self) {
            "VALID".to_string()
        } else {
            format!("MISMATCH, computed: {}", correct_action(self))
        };
        let content = match (self.letter_content.is_empty(), self.letter_image.is_some()) {
            (true, false) => "empty",
            (true, true) => "image-only",
            (false, false) => "text-only",
            (false, true) => "text+image",
        };
        let ok = |b: bool| if b { "OK" } else { "WRONG" };
        let rules: Vec<&str> = self.broken_rules.iter().map(RuleViolation::code).collect();

        format!(
            "[{id}] {kind} from {sender} [{spawn:?}]\n\
             Addressed: \"{addressed}\" ({addressed_ok})\n\
             Signed: \"{signature}\" ({signed_ok})\n\
             Sentences: {sentences}, Question: {question}\n\
             Content: {content}, Encrypted: {encrypted}\n\
             Contraband: {contraband:?}, Substance: {substance:?}, Offence: {offence:?}\n\
             Weight: {weight}g, Dims: {w}x{h}cm\n\
             Country: {country}, Postage: {postage:?}\n\
             Reply: {reply:?}\n\
             Ideal action: {ideal} [{verdict}]\n\
             Broken rules: [{rules}]",
            id = self.id,
            kind = self.kind,
            sender = self.sender_name,
            spawn = self.spawn_type,
            addressed = self.addressed_name,
            addressed_ok = ok(self.addressed_correctly),
            signature = self.signature_name,
            signed_ok = ok(self.signed_correctly),
            sentences = self.sentence_count,
            question = self.contains_question,
            encrypted = self.is_encrypted,
            contraband = self.contraband,
            substance = self.substance,
            offence = self.offence,
            weight = self.weight_grams,
            w = self.dimensions.width_cm,
            h = self.dimensions.height_cm,
            country = self.country.code(),
            postage = self.postage,
            reply = self.reply_category,
            ideal = self.ideal_action,
            rules = rules.join(", "),
        )
    }
}

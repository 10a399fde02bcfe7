//! Category-specific inspection views.
//!
//! One tagged variant per mail category instead of one panel type per
//! category: [`InspectionView::open`] populates the right variant and
//! [`InspectionView::apply`] dispatches player commands to it.

use crate::error::WorkflowError;
use crate::mail::{AssetHandle, MailKind, MailRecord};

/// A navigation command from the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewCommand {
    /// Turn a letter between envelope front and letter back.
    Flip,
    NextSide,
    PreviousSide,
    /// Open a package. Works once per inspection.
    OpenPackage,
    /// Show the letter enclosed in a package.
    ViewEnclosedLetter,
    /// Return from the enclosed letter to the package.
    CloseEnclosedLetter,
}

impl ViewCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flip => "flip",
            Self::NextSide => "next side",
            Self::PreviousSide => "previous side",
            Self::OpenPackage => "open package",
            Self::ViewEnclosedLetter => "view enclosed letter",
            Self::CloseEnclosedLetter => "close enclosed letter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterFace {
    /// Envelope: sender, addressee, postage, visual clues.
    #[default]
    Front,
    /// Letter body and signature.
    Back,
}

/// Letter inspection: front/back flip with the encrypted overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterView {
    face: LetterFace,
    encrypted_overlay: bool,
}

impl LetterView {
    /// Opens on the envelope front.
    pub fn open(record: &MailRecord) -> Self {
        Self {
            face: LetterFace::Front,
            encrypted_overlay: record.is_encrypted,
        }
    }

    pub fn face(&self) -> LetterFace {
        self.face
    }

    /// Shown exactly when the record is encrypted.
    pub fn encrypted_overlay(&self) -> bool {
        self.encrypted_overlay
    }

    pub fn flip(&mut self) {
        self.face = match self.face {
            LetterFace::Front => LetterFace::Back,
            LetterFace::Back => LetterFace::Front,
        };
    }
}

/// The four faces of a package, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackageSide {
    #[default]
    Front,
    Right,
    Back,
    Left,
}

impl PackageSide {
    pub const ALL: [PackageSide; 4] = [Self::Front, Self::Right, Self::Back, Self::Left];

    /// Position in [`PackageSide::ALL`], matching `MailRecord::package_sides`.
    pub fn index(&self) -> usize {
        match self {
            Self::Front => 0,
            Self::Right => 1,
            Self::Back => 2,
            Self::Left => 3,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Right => "Right",
            Self::Back => "Back",
            Self::Left => "Left",
        }
    }
}

/// Package inspection: four-side rotation, one-shot open, and an optional
/// nested view of the enclosed letter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageView {
    side: PackageSide,
    opened: bool,
    enclosed_letter: Option<LetterView>,
}

impl PackageView {
    pub fn open(_record: &MailRecord) -> Self {
        Self {
            side: PackageSide::Front,
            opened: false,
            enclosed_letter: None,
        }
    }

    pub fn side(&self) -> PackageSide {
        self.side
    }

    /// Whether the contents have been revealed.
    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn enclosed_letter(&self) -> Option<&LetterView> {
        self.enclosed_letter.as_ref()
    }

    /// Image for the side currently facing the player, if one was authored.
    pub fn side_image<'r>(&self, record: &'r MailRecord) -> Option<&'r AssetHandle> {
        record.package_sides[self.side.index()].as_ref()
    }

    /// Image of the contents, once opened.
    pub fn contents_image<'r>(&self, record: &'r MailRecord) -> Option<&'r AssetHandle> {
        if self.opened {
            record.item_inside_image.as_ref()
        } else {
            None
        }
    }

    pub fn rotate_next(&mut self) {
        self.side = self.side.next();
    }

    pub fn rotate_previous(&mut self) {
        self.side = self.side.previous();
    }

    /// Reveals the contents. Returns `false` if already opened.
    pub fn open_package(&mut self) -> bool {
        if self.opened {
            return false;
        }
        self.opened = true;
        true
    }
}

/// The inspection view for the current item, tagged by category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InspectionView {
    Letter(LetterView),
    Package(PackageView),
}

impl InspectionView {
    /// Populates the view matching the record's category.
    pub fn open(record: &MailRecord) -> Self {
        match record.kind {
            MailKind::Letter => Self::Letter(LetterView::open(record)),
            MailKind::Package => Self::Package(PackageView::open(record)),
        }
    }

    pub fn kind(&self) -> MailKind {
        match self {
            Self::Letter(_) => MailKind::Letter,
            Self::Package(_) => MailKind::Package,
        }
    }

    /// Applies a navigation command.
    ///
    /// Returns whether anything changed; opening an already-open package is
    /// accepted but changes nothing. While a package's enclosed letter is
    /// shown, only `Flip` and `CloseEnclosedLetter` are accepted.
    pub fn apply(&mut self, command: ViewCommand, record: &MailRecord) -> Result<bool, WorkflowError> {
        let unsupported = |view: &'static str| WorkflowError::UnsupportedCommand {
            command: command.name(),
            view,
        };

        match self {
            Self::Letter(letter) => match command {
                ViewCommand::Flip => {
                    letter.flip();
                    Ok(true)
                }
                _ => Err(unsupported("letter view")),
            },
            Self::Package(package) => {
                if let Some(letter) = package.enclosed_letter.as_mut() {
                    return match command {
                        ViewCommand::Flip => {
                            letter.flip();
                            Ok(true)
                        }
                        ViewCommand::CloseEnclosedLetter => {
                            package.enclosed_letter = None;
                            Ok(true)
                        }
                        _ => Err(unsupported("enclosed letter view")),
                    };
                }
                match command {
                    ViewCommand::NextSide => {
                        package.rotate_next();
                        Ok(true)
                    }
                    ViewCommand::PreviousSide => {
                        package.rotate_previous();
                        Ok(true)
                    }
                    ViewCommand::OpenPackage => Ok(package.open_package()),
                    ViewCommand::ViewEnclosedLetter => {
                        package.enclosed_letter = Some(LetterView::open(record));
                        Ok(true)
                    }
                    ViewCommand::Flip | ViewCommand::CloseEnclosedLetter => {
                        Err(unsupported("package view"))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_opens_on_front_and_flips() {
        let record = MailRecord::letter("L");
        let mut view = InspectionView::open(&record);
        assert_eq!(view.kind(), MailKind::Letter);
        let InspectionView::Letter(letter) = &view else {
            panic!("expected letter view");
        };
        assert_eq!(letter.face(), LetterFace::Front);
        assert!(!letter.encrypted_overlay());

        assert_eq!(view.apply(ViewCommand::Flip, &record), Ok(true));
        let InspectionView::Letter(letter) = &view else {
            panic!("expected letter view");
        };
        assert_eq!(letter.face(), LetterFace::Back);
    }

    #[test]
    fn test_encrypted_overlay_follows_record() {
        let record = MailRecord::letter("L").with_encrypted(true);
        assert!(LetterView::open(&record).encrypted_overlay());
    }

    #[test]
    fn test_letter_rejects_package_commands() {
        let record = MailRecord::letter("L");
        let mut view = InspectionView::open(&record);
        let err = view.apply(ViewCommand::NextSide, &record).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::UnsupportedCommand {
                command: "next side",
                view: "letter view"
            }
        );
    }

    #[test]
    fn test_side_rotation_wraps() {
        assert_eq!(PackageSide::Left.next(), PackageSide::Front);
        assert_eq!(PackageSide::Front.previous(), PackageSide::Left);
        let mut side = PackageSide::Front;
        for _ in 0..4 {
            side = side.next();
        }
        assert_eq!(side, PackageSide::Front);
    }

    #[test]
    fn test_package_open_is_one_shot() {
        let mut record = MailRecord::package("P");
        record.item_inside_image = Some(AssetHandle::from("inside.png"));
        let mut view = InspectionView::open(&record);

        assert_eq!(view.apply(ViewCommand::OpenPackage, &record), Ok(true));
        assert_eq!(view.apply(ViewCommand::OpenPackage, &record), Ok(false));

        let InspectionView::Package(package) = &view else {
            panic!("expected package view");
        };
        assert!(package.is_opened());
        assert_eq!(
            package.contents_image(&record),
            Some(&AssetHandle::from("inside.png"))
        );
    }

    #[test]
    fn test_package_side_images() {
        let mut record = MailRecord::package("P");
        record.package_sides[1] = Some(AssetHandle::from("right.png"));
        let mut view = PackageView::open(&record);
        assert_eq!(view.side_image(&record), None);
        assert_eq!(view.contents_image(&record), None);
        view.rotate_next();
        assert_eq!(view.side(), PackageSide::Right);
        assert_eq!(view.side_image(&record), Some(&AssetHandle::from("right.png")));
    }

    #[test]
    fn test_enclosed_letter_round_trip() {
        let record = MailRecord::package("P").with_encrypted(true);
        let mut view = InspectionView::open(&record);
        view.apply(ViewCommand::NextSide, &record).unwrap();
        view.apply(ViewCommand::ViewEnclosedLetter, &record).unwrap();

        // Package navigation is hidden behind the letter.
        assert!(view.apply(ViewCommand::NextSide, &record).is_err());
        assert_eq!(view.apply(ViewCommand::Flip, &record), Ok(true));

        let InspectionView::Package(package) = &view else {
            panic!("expected package view");
        };
        let letter = package.enclosed_letter().unwrap();
        assert_eq!(letter.face(), LetterFace::Back);
        assert!(letter.encrypted_overlay());

        view.apply(ViewCommand::CloseEnclosedLetter, &record).unwrap();
        let InspectionView::Package(package) = &view else {
            panic!("expected package view");
        };
        assert!(package.enclosed_letter().is_none());
        // Side survives the detour.
        assert_eq!(package.side(), PackageSide::Right);
    }

    #[test]
    fn test_package_rejects_flip() {
        let record = MailRecord::package("P");
        let mut view = InspectionView::open(&record);
        assert!(view.apply(ViewCommand::Flip, &record).is_err());
        assert!(view.apply(ViewCommand::CloseEnclosedLetter, &record).is_err());
    }
}

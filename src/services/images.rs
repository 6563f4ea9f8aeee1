//! Image lookup for question directories.
//!
//! Images sit next to a question's definition file and follow fixed names:
//!
//! | Slot                       | Base name              |
//! |----------------------------|------------------------|
//! | Main question image        | `question`             |
//! | Option image               | `option_{a..d}`        |
//! | Sub-question image (1-based) | `subquestion_{n}`    |
//! | Sub-question option image  | `subq{n}_option_{a..d}` |
//!
//! Each base name is tried with [`IMAGE_EXTENSIONS`] in order; the first
//! existing file wins. A missing image is not an error, the slot is just empty.

use crate::models::OptionLabel;
use camino::{Utf8Path, Utf8PathBuf};

/// Accepted raster formats, in lookup order.
pub const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// A named image position within a question directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Question,
    Option(OptionLabel),
    /// Zero-based sub-question index.
    SubQuestion(usize),
    /// Zero-based sub-question index and option label.
    SubOption(usize, OptionLabel),
}

impl ImageSlot {
    /// File name without extension.
    pub fn base_name(self) -> String {
        match self {
            ImageSlot::Question => "question".to_string(),
            ImageSlot::Option(label) => format!("option_{}", label.file_suffix()),
            ImageSlot::SubQuestion(index) => format!("subquestion_{}", index + 1),
            ImageSlot::SubOption(index, label) => {
                format!("subq{}_option_{}", index + 1, label.file_suffix())
            }
        }
    }
}

/// Return the first `dir/base.ext` for which `exists` holds.
pub fn resolve_image_with<F>(
    dir: &Utf8Path,
    base: &str,
    extensions: &[&str],
    exists: F,
) -> Option<Utf8PathBuf>
where
    F: Fn(&Utf8Path) -> bool,
{
    extensions
        .iter()
        .map(|ext| dir.join(format!("{}.{}", base, ext)))
        .find(|candidate| exists(candidate))
}

/// Resolve an image on disk using the standard extensions.
pub fn resolve_image(dir: &Utf8Path, base: &str) -> Option<Utf8PathBuf> {
    resolve_image_with(dir, base, &IMAGE_EXTENSIONS, |p| p.is_file())
}

/// Resolve a slot within a question directory.
pub fn resolve_slot(dir: &Utf8Path, slot: ImageSlot) -> Option<Utf8PathBuf> {
    resolve_image(dir, &slot.base_name())
}

/// Something that can find images for a slot. The filesystem is the normal
/// implementation; tests substitute a fixed set of paths.
pub trait ImageResolver {
    fn resolve(&self, dir: &Utf8Path, slot: ImageSlot) -> Option<Utf8PathBuf>;
}

/// Looks images up on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageResolver;

impl ImageResolver for FsImageResolver {
    fn resolve(&self, dir: &Utf8Path, slot: ImageSlot) -> Option<Utf8PathBuf> {
        resolve_slot(dir, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_slot_base_names() {
        assert_eq!(ImageSlot::Question.base_name(), "question");
        assert_eq!(ImageSlot::Option(OptionLabel::C).base_name(), "option_c");
        assert_eq!(ImageSlot::SubQuestion(0).base_name(), "subquestion_1");
        assert_eq!(
            ImageSlot::SubOption(1, OptionLabel::A).base_name(),
            "subq2_option_a"
        );
    }

    #[test]
    fn test_resolve_prefers_first_extension() {
        let dir = Utf8Path::new("bank/easy/q1");
        let found = resolve_image_with(dir, "question", &IMAGE_EXTENSIONS, |_| true);
        assert_eq!(found, Some(Utf8PathBuf::from("bank/easy/q1/question.jpg")));
    }

    #[test]
    fn test_resolve_falls_back_to_png() {
        let dir = Utf8Path::new("q");
        let found = resolve_image_with(dir, "option_b", &IMAGE_EXTENSIONS, |p| {
            p.extension() == Some("png")
        });
        assert_eq!(found, Some(Utf8PathBuf::from("q/option_b.png")));
    }

    #[test]
    fn test_resolve_none_when_missing() {
        let found = resolve_image_with(Utf8Path::new("q"), "question", &IMAGE_EXTENSIONS, |_| false);
        assert_eq!(found, None);
    }

    #[test]
    fn test_resolve_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        fs::write(dir.join("subquestion_2.png"), b"png").unwrap();

        assert_eq!(
            resolve_slot(&dir, ImageSlot::SubQuestion(1)),
            Some(dir.join("subquestion_2.png"))
        );
        assert_eq!(resolve_slot(&dir, ImageSlot::Question), None);
        assert_eq!(
            FsImageResolver.resolve(&dir, ImageSlot::SubQuestion(1)),
            Some(dir.join("subquestion_2.png"))
        );
    }
}

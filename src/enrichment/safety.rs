//! Keyword safety filter for enrichment images
//!
//! Best-effort substring match over title and URL. Not a content classifier.

use crate::types::ImageResult;

/// Terms that exclude an image when found anywhere in its title or URL
pub const BANNED_TERMS: &[&str] = &[
    "nude",
    "naked",
    "sex",
    "bikini",
    "lingerie",
    "model",
    "hot",
    "sexy",
    "swimwear",
    "underwear",
    "nsfw",
    "porn",
    "xxx",
    "boudoir",
    "erotic",
];

/// Whether an image passes the banned-term check (case-insensitive)
pub fn is_safe(image: &ImageResult) -> bool {
    let haystack = format!("{} {}", image.title, image.url).to_lowercase();
    !BANNED_TERMS.iter().any(|term| haystack.contains(term))
}

/// Keep only safe images, preserving order
pub fn filter_safe(images: &[ImageResult]) -> Vec<ImageResult> {
    images.iter().filter(|image| is_safe(image)).cloned().collect()
}

//! Catalog endpoint and image address construction.
//!
//! Mapping a page number or a poster path to a fetchable address is
//! configuration, not core logic; everything here is pure string assembly.

/// Production catalog API host.
pub const CATALOG_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Production image host.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Default language/region selector for catalog requests.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Poster size variants offered by the image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosterSize {
    W185,
    W342,
    W500,
    Original,
}

impl PosterSize {
    /// The path segment the image host expects for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W185 => "w185",
            PosterSize::W342 => "w342",
            PosterSize::W500 => "w500",
            PosterSize::Original => "original",
        }
    }
}

/// Address of one page of the popular-titles list.
pub fn popular(base_url: &str, language: &str, page: u32) -> String {
    format!(
        "{}/movie/popular?language={}&page={}",
        base_url,
        urlencoding::encode(language),
        page
    )
}

/// Address of a poster image, given its catalog path and a size variant.
///
/// Poster paths arrive from the catalog with a leading slash.
pub fn poster_url(base_url: &str, size: PosterSize, path: &str) -> String {
    format!("{}/{}{}", base_url, size.as_str(), path)
}

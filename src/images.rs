//! Mapping an `<img src>` to image bytes.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// A resolved picture, ready to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Basename of the `src` attribute.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Looks up the bytes behind an image reference.
pub trait ImageResolver {
    /// Fails with `Error::ImageNotFound` when nothing backs `src`.
    fn resolve(&self, src: &str) -> Result<ResolvedImage>;
}

/// Final path component of `src`. Both `/` and `\` separate components, so
/// any directory part of the reference is discarded.
pub fn basename(src: &str) -> &str {
    src.rsplit(['/', '\\']).next().unwrap_or(src)
}

/// Resolves images against one flat directory, ignoring the directory part
/// of every reference.
#[derive(Debug, Clone)]
pub struct DirImageResolver {
    dir: PathBuf,
}

impl DirImageResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageResolver for DirImageResolver {
    fn resolve(&self, src: &str) -> Result<ResolvedImage> {
        let name = basename(src);
        let path = self.dir.join(name);
        if name.is_empty() || !path.is_file() {
            return Err(Error::ImageNotFound(path));
        }
        let bytes = std::fs::read(&path)?;
        Ok(ResolvedImage {
            name: name.to_string(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_drops_directories() {
        assert_eq!(basename("sub/pic.png"), "pic.png");
        assert_eq!(basename("../../etc/pic.png"), "pic.png");
        assert_eq!(basename(r"C:\images\pic.png"), "pic.png");
        assert_eq!(basename("pic.png"), "pic.png");
        assert_eq!(basename("dir/"), "");
    }

    #[test]
    fn resolves_existing_file_by_basename() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("pic.png"), b"PNGDATA").unwrap();

        let resolver = DirImageResolver::new(dir.path());
        let img = resolver.resolve("sub/deeper/pic.png").unwrap();
        assert_eq!(img.name, "pic.png");
        assert_eq!(img.bytes, b"PNGDATA");
    }

    #[test]
    fn missing_file_is_image_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let resolver = DirImageResolver::new(dir.path());
        assert!(matches!(
            resolver.resolve("nope.png"),
            Err(Error::ImageNotFound(_))
        ));
        assert!(matches!(resolver.resolve(""), Err(Error::ImageNotFound(_))));
    }
}

//! Client-side file type allow-lists.
//!
//! Filtering here only keeps obviously wrong files out of the form; the
//! backend remains the judge of what it accepts.

use crate::slots::FileHandle;

/// A fixed set of accepted file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowList {
    extensions: &'static [&'static str],
}

/// Claim documents: images and PDF.
pub const CLAIM_ACCEPT: AllowList = AllowList::new(&["jpg", "jpeg", "png", "pdf"]);

/// Workshop summaries: PDF and images.
pub const WORKSHOP_ACCEPT: AllowList = AllowList::new(&["pdf", "jpg", "jpeg", "png"]);

impl AllowList {
    /// Build from lowercase extensions without the leading dot.
    pub const fn new(extensions: &'static [&'static str]) -> Self {
        Self { extensions }
    }

    /// Extensions in display order.
    pub fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    /// Whether `file_name` ends in an accepted extension (case-insensitive).
    pub fn accepts(&self, file_name: &str) -> bool {
        match extension(file_name) {
            Some(ext) => self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    /// Value for an `<input accept=...>` attribute, e.g. `.jpg,.jpeg,.png,.pdf`.
    pub fn accept_attr(&self) -> String {
        self.extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Split `files` into accepted and rejected, keeping order in both.
    pub fn partition<F: FileHandle>(&self, files: impl IntoIterator<Item = F>) -> (Vec<F>, Vec<F>) {
        files.into_iter().partition(|f| self.accepts(&f.name()))
    }
}

/// MIME type to send for a file, guessed from its extension.
pub fn mime_for(file_name: &str) -> &'static str {
    match extension(file_name).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::testing::Doc;

    #[test]
    fn test_accepts_case_insensitive() {
        assert!(CLAIM_ACCEPT.accepts("id-front.JPG"));
        assert!(CLAIM_ACCEPT.accepts("claim.form.pdf"));
        assert!(!CLAIM_ACCEPT.accepts("notes.docx"));
        assert!(!CLAIM_ACCEPT.accepts("pdf"));
        assert!(!CLAIM_ACCEPT.accepts(".png"));
    }

    #[test]
    fn test_accept_attr_order() {
        assert_eq!(CLAIM_ACCEPT.accept_attr(), ".jpg,.jpeg,.png,.pdf");
        assert_eq!(WORKSHOP_ACCEPT.accept_attr(), ".pdf,.jpg,.jpeg,.png");
    }

    #[test]
    fn test_partition_keeps_order() {
        let files = vec![Doc::new("a.png"), Doc::new("b.txt"), Doc::new("c.pdf"), Doc::new("d.heic")];
        let (ok, rejected) = CLAIM_ACCEPT.partition(files);
        assert_eq!(ok, vec![Doc::new("a.png"), Doc::new("c.pdf")]);
        assert_eq!(rejected, vec![Doc::new("b.txt"), Doc::new("d.heic")]);
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("x.jpeg"), "image/jpeg");
        assert_eq!(mime_for("x.PNG"), "image/png");
        assert_eq!(mime_for("x.pdf"), "application/pdf");
        assert_eq!(mime_for("x"), "application/octet-stream");
    }
}

//! Mapping of the indexed upload form onto structured person records.
//!
//! The browser form sends one `names[]` field per person and the files for
//! person `i` as `fingerprints_{i}[]`. Everything past this module works
//! with [`PersonUpload`] records instead of field names.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::services::sheet::{PersonUpload, UploadedFile};

static RE_FINGERPRINT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fingerprints_(\d+)(\[\])?$").unwrap());

/// What a multipart field carries, judged by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Fingerprint(usize),
    Other,
}

/// Classify a multipart field name.
pub fn classify_field(name: &str) -> FieldKind {
    if name == "names[]" || name == "names" {
        return FieldKind::Name;
    }
    RE_FINGERPRINT_FIELD
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
        .map_or(FieldKind::Other, FieldKind::Fingerprint)
}

/// Accumulates form fields in arrival order.
#[derive(Debug, Default)]
pub struct FormCollector {
    names: Vec<String>,
    files: BTreeMap<usize, Vec<UploadedFile>>,
}

impl FormCollector {
    pub fn push_name(&mut self, name: String) {
        self.names.push(name);
    }

    pub fn push_file(&mut self, index: usize, file: UploadedFile) {
        if file.is_placeholder() {
            return;
        }
        self.files.entry(index).or_default().push(file);
    }

    /// One record per submitted name, in submission order.
    ///
    /// Files whose index has no matching name are dropped.
    pub fn into_records(mut self) -> Vec<PersonUpload> {
        let orphans: Vec<usize> = self
            .files
            .keys()
            .copied()
            .filter(|index| *index >= self.names.len())
            .collect();
        if !orphans.is_empty() {
            tracing::debug!(?orphans, "Ignoring fingerprints without a matching name");
        }

        self.names
            .into_iter()
            .enumerate()
            .map(|(index, name)| PersonUpload {
                position: index + 1,
                name: name.trim().to_string(),
                files: self.files.remove(&index).unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn file(name: &str, bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn classify_names() {
        assert_eq!(classify_field("names[]"), FieldKind::Name);
        assert_eq!(classify_field("names"), FieldKind::Name);
    }

    #[test]
    fn classify_fingerprints() {
        assert_eq!(
            classify_field("fingerprints_0[]"),
            FieldKind::Fingerprint(0)
        );
        assert_eq!(
            classify_field("fingerprints_12[]"),
            FieldKind::Fingerprint(12)
        );
        assert_eq!(classify_field("fingerprints_3"), FieldKind::Fingerprint(3));
    }

    #[test]
    fn classify_other() {
        assert_eq!(classify_field("fingerprints_[]"), FieldKind::Other);
        assert_eq!(classify_field("fingerprints_x[]"), FieldKind::Other);
        assert_eq!(classify_field("csrf_token"), FieldKind::Other);
    }

    #[test]
    fn records_follow_name_order() {
        let mut form = FormCollector::default();
        form.push_name("Alice".into());
        form.push_file(1, file("b1.png", b"b1"));
        form.push_name(" Bob ".into());
        form.push_file(0, file("a1.png", b"a1"));
        form.push_file(0, file("a2.png", b"a2"));

        let records = form.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, 1);
        assert_eq!(records[0].name, "Alice");
        let names: Vec<&str> = records[0]
            .files
            .iter()
            .map(|f| f.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a1.png", "a2.png"]);
        assert_eq!(records[1].name, "Bob");
        assert_eq!(records[1].files.len(), 1);
    }

    #[test]
    fn person_without_files_gets_empty_list() {
        let mut form = FormCollector::default();
        form.push_name("Carol".into());
        let records = form.into_records();
        assert!(records[0].files.is_empty());
    }

    #[test]
    fn empty_file_inputs_are_skipped() {
        let mut form = FormCollector::default();
        form.push_name("Dan".into());
        form.push_file(0, file("", b""));
        assert!(form.into_records()[0].files.is_empty());
    }

    #[test]
    fn orphan_files_are_dropped() {
        let mut form = FormCollector::default();
        form.push_name("Eve".into());
        form.push_file(5, file("x.png", b"x"));
        let records = form.into_records();
        assert_eq!(records.len(), 1);
        assert!(records[0].files.is_empty());
    }
}

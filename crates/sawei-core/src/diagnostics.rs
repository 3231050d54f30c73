//! Build-time diagnostics returned alongside a catalogue for operator review.
//!
//! None of these ever reach storefront users. `InvalidRecord` and
//! `InvalidPrice` mark records that were excluded from the build; every other
//! kind is informational.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Unusable source record: missing identity, source-locale title or cost.
    InvalidRecord {
        id: Option<String>,
        source: String,
        reason: String,
    },
    /// Non-positive, non-finite or non-numeric source cost.
    InvalidPrice {
        id: String,
        source: String,
        reason: String,
    },
    /// The product's only images are the placeholder; published but flagged.
    QrOnlyWarning { id: String, slug: String },
    /// A placeholder-only product borrowed images from a sibling record.
    QrRemediated {
        id: String,
        slug: String,
        donor_slug: String,
        images: usize,
    },
    /// Two records shared an id; the shorter slug was kept.
    DuplicateIdentifier {
        id: String,
        kept_slug: String,
        dropped_slug: String,
    },
    /// A later product named an existing category slug differently.
    CategoryNameConflict {
        slug: String,
        kept: String,
        ignored: String,
    },
    /// Two distinct products produced the same slug; the later one was renamed.
    SlugCollision {
        id: String,
        original_slug: String,
        assigned_slug: String,
    },
    /// A source file or directory could not be read or parsed.
    SkippedSource { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    InvalidRecord,
    InvalidPrice,
    QrOnlyWarning,
    QrRemediated,
    DuplicateIdentifier,
    CategoryNameConflict,
    SlugCollision,
    SkippedSource,
}

impl DiagnosticKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::InvalidRecord => "invalid_record",
            DiagnosticKind::InvalidPrice => "invalid_price",
            DiagnosticKind::QrOnlyWarning => "qr_only_warning",
            DiagnosticKind::QrRemediated => "qr_remediated",
            DiagnosticKind::DuplicateIdentifier => "duplicate_identifier",
            DiagnosticKind::CategoryNameConflict => "category_name_conflict",
            DiagnosticKind::SlugCollision => "slug_collision",
            DiagnosticKind::SkippedSource => "skipped_source",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Diagnostic {
    #[must_use]
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::InvalidRecord { .. } => DiagnosticKind::InvalidRecord,
            Diagnostic::InvalidPrice { .. } => DiagnosticKind::InvalidPrice,
            Diagnostic::QrOnlyWarning { .. } => DiagnosticKind::QrOnlyWarning,
            Diagnostic::QrRemediated { .. } => DiagnosticKind::QrRemediated,
            Diagnostic::DuplicateIdentifier { .. } => DiagnosticKind::DuplicateIdentifier,
            Diagnostic::CategoryNameConflict { .. } => DiagnosticKind::CategoryNameConflict,
            Diagnostic::SlugCollision { .. } => DiagnosticKind::SlugCollision,
            Diagnostic::SkippedSource { .. } => DiagnosticKind::SkippedSource,
        }
    }

    /// `true` for kinds that excluded a record from the build.
    #[must_use]
    pub fn is_exclusion(&self) -> bool {
        matches!(
            self,
            Diagnostic::InvalidRecord { .. }
                | Diagnostic::InvalidPrice { .. }
                | Diagnostic::SkippedSource { .. }
        )
    }
}

/// All diagnostics from one build, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind() == kind).count()
    }

    /// Number of records the build excluded.
    #[must_use]
    pub fn exclusions(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_exclusion()).count()
    }

    /// Per-kind counts, omitting kinds that never occurred.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<DiagnosticKind, usize> {
        let mut counts = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind() == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

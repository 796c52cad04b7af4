use serde::{Deserialize, Serialize};
use tracing::debug;

/// Return section a filing belongs to, inferred from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    B2b,
    B2c,
    Purchase,
}

impl FileKind {
    pub fn from_file_name(name: &str) -> Self {
        let lowered = name.to_lowercase();
        if lowered.contains("b2b") {
            Self::B2b
        } else if lowered.contains("b2c") {
            Self::B2c
        } else {
            Self::Purchase
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::B2b => "B2B",
            Self::B2c => "B2C",
            Self::Purchase => "Purchase",
        }
    }
}

/// Raw bytes of one uploaded filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl FilingUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_file_name(&self.file_name)
    }
}

/// Up to three filings that make up one reporting month.
#[derive(Debug, Clone, Default)]
pub struct MonthlyFilingSet {
    pub label: String,
    pub b2b: Option<FilingUpload>,
    pub b2c: Option<FilingUpload>,
    pub purchase: Option<FilingUpload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadCounts {
    pub b2b: usize,
    pub b2c: usize,
    pub purchase: usize,
}

/// Pair the n-th B2B, B2C and purchase upload into month n.
///
/// The month count follows whichever sales section has more uploads; purchase
/// uploads beyond that count are dropped.
pub fn group_into_months(uploads: Vec<FilingUpload>) -> (Vec<MonthlyFilingSet>, UploadCounts) {
    let mut b2b = Vec::new();
    let mut b2c = Vec::new();
    let mut purchase = Vec::new();

    for upload in uploads {
        match upload.kind() {
            FileKind::B2b => b2b.push(upload),
            FileKind::B2c => b2c.push(upload),
            FileKind::Purchase => purchase.push(upload),
        }
    }

    let counts = UploadCounts {
        b2b: b2b.len(),
        b2c: b2c.len(),
        purchase: purchase.len(),
    };
    let month_count = counts.b2b.max(counts.b2c);
    if counts.purchase > month_count {
        debug!(
            ignored = counts.purchase - month_count,
            "purchase uploads exceed sales months"
        );
    }

    let mut b2b = b2b.into_iter();
    let mut b2c = b2c.into_iter();
    let mut purchase = purchase.into_iter();

    let months = (0..month_count)
        .map(|index| {
            let b2b = b2b.next();
            let b2c = b2c.next();
            let label = month_label(index, b2b.as_ref(), b2c.as_ref());
            MonthlyFilingSet {
                label,
                b2b,
                b2c,
                purchase: purchase.next(),
            }
        })
        .collect();

    (months, counts)
}

fn month_label(index: usize, b2b: Option<&FilingUpload>, b2c: Option<&FilingUpload>) -> String {
    let base = format!("Month {}", index + 1);
    let tagged = b2b
        .map(|upload| (upload, FileKind::B2b))
        .or_else(|| b2c.map(|upload| (upload, FileKind::B2c)));

    match tagged {
        Some((upload, kind)) => {
            let prefix = upload
                .file_name
                .split_once('_')
                .map(|(prefix, _)| prefix)
                .unwrap_or(kind.label());
            format!("{base} ({prefix})")
        }
        None => base,
    }
}

//! Dataset discovery: decide which CSV files in the data directory belong
//! to a subject by inspecting only the header row and the first data row
//! of each candidate, so a large or malformed file can never stall a scan.
//!
//! Known limitation, preserved deliberately: a ledger whose first data row
//! does not carry the target identifier is never selected for that
//! subject, even when later rows do.

use super::domain::SubjectId;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Classification of one candidate file after bounded inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Unclassified,
    TransactionLedger,
    IncomeLedger,
}

/// Outcome of a resolution pass: at most one ledger of each kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedDatasets {
    pub transaction_ledger: Option<PathBuf>,
    pub income_ledger: Option<PathBuf>,
}

impl ResolvedDatasets {
    pub fn is_empty(&self) -> bool {
        self.transaction_ledger.is_none() && self.income_ledger.is_none()
    }

    fn is_complete(&self) -> bool {
        self.transaction_ledger.is_some() && self.income_ledger.is_some()
    }
}

/// Resolves subject identifiers to ledger files under one data directory.
///
/// The optional cache maps subject identifier to resolved paths with
/// insert-if-absent semantics, safe under concurrent read/insert.
pub struct DatasetResolver {
    data_dir: PathBuf,
    legacy_identities: HashMap<String, SubjectId>,
    cache: Option<Mutex<HashMap<String, ResolvedDatasets>>>,
}

impl DatasetResolver {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            legacy_identities: HashMap::new(),
            cache: None,
        }
    }

    /// Enable the resolution cache. Cached entries are never invalidated,
    /// so this suits deployments where ledgers are immutable once dropped.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(Mutex::new(HashMap::new()));
        self
    }

    /// Attach a legacy identity table (e.g. e-mail to identifier) consulted
    /// once when identifier-based resolution comes up empty.
    pub fn with_legacy_identities(mut self, map: HashMap<String, SubjectId>) -> Self {
        self.legacy_identities = map;
        self
    }

    pub fn resolve(&self, subject: &SubjectId) -> ResolvedDatasets {
        if let Some(cache) = &self.cache {
            let guard = cache.lock().expect("resolver cache mutex poisoned");
            if let Some(hit) = guard.get(subject.as_str()) {
                return hit.clone();
            }
        }

        let mut resolved = self.scan(subject);

        if resolved.is_empty() {
            if let Some(mapped) = self.legacy_identities.get(subject.as_str()) {
                info!(identity = %subject, identifier = %mapped, "retrying with legacy identifier");
                resolved = self.scan(mapped);
            }
        }

        if let Some(cache) = &self.cache {
            let mut guard = cache.lock().expect("resolver cache mutex poisoned");
            guard
                .entry(subject.as_str().to_string())
                .or_insert_with(|| resolved.clone());
        }

        resolved
    }

    /// One pass over the candidate files, short-circuiting as soon as one
    /// ledger of each kind has been found. Files are visited in sorted
    /// order so resolution is deterministic across platforms.
    fn scan(&self, subject: &SubjectId) -> ResolvedDatasets {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(dir = %self.data_dir.display(), %err, "data directory unreadable");
                return ResolvedDatasets::default();
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .collect();
        candidates.sort();

        let mut resolved = ResolvedDatasets::default();
        for path in candidates {
            match classify_file(&path, subject) {
                DatasetKind::TransactionLedger if resolved.transaction_ledger.is_none() => {
                    resolved.transaction_ledger = Some(path);
                }
                DatasetKind::IncomeLedger if resolved.income_ledger.is_none() => {
                    resolved.income_ledger = Some(path);
                }
                _ => {}
            }
            if resolved.is_complete() {
                break;
            }
        }

        resolved
    }
}

/// Identity-to-identifier table for backward-compatible subjects that
/// predate identifier-based discovery.
pub fn default_legacy_identities() -> HashMap<String, SubjectId> {
    [
        ("rk09@gmail.com", "ZXCVB9876R"),
        ("amit@gmail.com", "PQRSX6789L"),
        ("rahul@gmail.com", "ABCDE1234F"),
    ]
    .into_iter()
    .map(|(identity, identifier)| (identity.to_string(), SubjectId(identifier.to_string())))
    .collect()
}

/// Classify one file. An unreadable candidate is skipped, not fatal.
pub fn classify_file(path: &Path, subject: &SubjectId) -> DatasetKind {
    match fs::File::open(path) {
        Ok(file) => classify_reader(file, subject),
        Err(err) => {
            debug!(path = %path.display(), %err, "skipping unreadable candidate");
            DatasetKind::Unclassified
        }
    }
}

/// Inspect the header row and the first data row only.
///
/// A transaction ledger carries a `transaction_type` column and opens with
/// a row whose `linked_pan` equals the subject identifier; an income
/// ledger carries a `work_date` column and opens with a matching
/// `pan_number`.
pub fn classify_reader<R: Read>(reader: R, subject: &SubjectId) -> DatasetKind {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = match csv_reader.headers() {
        Ok(headers) => headers.clone(),
        Err(_) => return DatasetKind::Unclassified,
    };

    let mut first = csv::StringRecord::new();
    match csv_reader.read_record(&mut first) {
        Ok(true) => {}
        _ => return DatasetKind::Unclassified,
    }

    let field = |name: &str| {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|index| first.get(index))
    };
    let has_column = |name: &str| headers.iter().any(|header| header.eq_ignore_ascii_case(name));

    if field("linked_pan") == Some(subject.as_str()) && has_column("transaction_type") {
        DatasetKind::TransactionLedger
    } else if field("pan_number") == Some(subject.as_str()) && has_column("work_date") {
        DatasetKind::IncomeLedger
    } else {
        DatasetKind::Unclassified
    }
}

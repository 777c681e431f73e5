//! Trust score pipeline: resolve the subject's ledgers, load records,
//! extract monthly features, apply the weighted index/risk model, and
//! render the narrative. Data flows strictly forward; no stage revisits
//! an earlier stage's output, so a scoring request is a pure function of
//! the resolved records and the subject's loan book.

pub mod domain;
pub mod engine;
pub mod features;
pub mod loader;
pub mod narrative;
pub(crate) mod numeric;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod service;

pub use domain::{IncomeRecord, ScoreResult, SubjectId, TransactionKind, TransactionRecord};
pub use engine::{RiskRatios, ScoreBreakdown, ScoreWeights, ScoringEngine, TrustIndices};
pub use features::FeatureSet;
pub use repository::{LoanAccount, LoanRepository, LoanStatus, StaticLoanRepository, SubjectLoanBook};
pub use resolver::{DatasetKind, DatasetResolver, ResolvedDatasets};
pub use router::scoring_router;
pub use service::{ScoreReport, ScoreServiceError, SubjectProfile, TrustScoreService};

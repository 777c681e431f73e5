//! End-to-end pipeline tests over real CSV fixtures: resolution rules,
//! the full resolve-load-extract-score path, and the resolution cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crediflow::scoring::{
    DatasetResolver, LoanAccount, LoanStatus, ScoreServiceError, StaticLoanRepository, SubjectId,
    SubjectLoanBook, TrustScoreService,
};

const SUBJECT: &str = "TESTPN1234";

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("crediflow-{}-{name}", std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).expect("stale fixture dir removed");
    }
    fs::create_dir_all(&dir).expect("fixture dir created");
    dir
}

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture file written");
    path
}

fn bank_csv(subject: &str) -> String {
    format!(
        "transaction_date,transaction_type,amount,category,linked_pan\n\
2025-01-03,CREDIT,5000,Salary,{subject}\n\
2025-01-10,DEBIT,1000,Loan EMI,{subject}\n\
2025-01-12,DEBIT,500,Gambling,{subject}\n\
2025-02-03,CREDIT,5000,Salary,{subject}\n\
2025-02-10,DEBIT,1000,Loan EMI,{subject}\n\
2025-02-20,DEBIT,2000,Savings Transfer,{subject}\n"
    )
}

fn income_csv(subject: &str) -> String {
    format!(
        "work_date,net_daily_income,fuel_expense,pan_number,bank_name,account_last4,full_name\n\
2025-01-05,1000,100,{subject},HDFC Bank,1234,Test Person\n\
2025-01-15,1000,100,{subject},,,\n\
2025-02-05,1000,100,{subject},,,\n\
2025-02-15,1000,100,{subject},,,\n"
    )
}

fn single_loan_repository(subject: &str) -> StaticLoanRepository {
    let mut repository = StaticLoanRepository::empty();
    repository.insert(
        SubjectId(subject.to_string()),
        SubjectLoanBook {
            holder_name: "Test Person".to_string(),
            loans: vec![LoanAccount {
                loan_type: "Personal Loan".to_string(),
                lender: "Test Bank Ltd.".to_string(),
                status: LoanStatus::Active,
                amount: 100_000,
                monthly_emi: 1_000,
                tenure_months: 24,
            }],
        },
    );
    repository
}

#[test]
fn scores_a_complete_subject_dataset() {
    let dir = fixture_dir("full-pipeline");
    write_csv(&dir, "bank.csv", &bank_csv(SUBJECT));
    write_csv(&dir, "income.csv", &income_csv(SUBJECT));

    let service = TrustScoreService::new(
        DatasetResolver::new(&dir),
        Arc::new(single_loan_repository(SUBJECT)),
    );

    let report = service
        .score_subject(&SubjectId(SUBJECT.to_string()))
        .expect("subject scores");

    // Hand-computed: ISI, SSI, SBI, RRI clamp to 1, TCI = 2/6, so base is
    // 14000/15; RF = 31/180 from DR 0.5, SR 1/9, TR 1/6; adjusted 772.59.
    assert_eq!(report.result.final_score, 773);
    assert!(report.result.narrative.starts_with("Crediflow Score: 773."));
    assert_eq!(report.breakdown.indices.repayment_reliability, 1.0);
    assert!((report.breakdown.risks.debt_ratio - 0.5).abs() < 1e-12);

    assert_eq!(report.profile.full_name.as_deref(), Some("Test Person"));
    assert_eq!(report.profile.bank_name.as_deref(), Some("HDFC Bank"));
    assert_eq!(report.profile.account_last4.as_deref(), Some("1234"));
    assert_eq!(report.loans.len(), 1);
}

#[test]
fn scoring_is_deterministic_across_requests() {
    let dir = fixture_dir("deterministic");
    write_csv(&dir, "bank.csv", &bank_csv(SUBJECT));
    write_csv(&dir, "income.csv", &income_csv(SUBJECT));

    let service = TrustScoreService::new(
        DatasetResolver::new(&dir),
        Arc::new(single_loan_repository(SUBJECT)),
    );
    let subject = SubjectId(SUBJECT.to_string());

    let first = service.score_subject(&subject).expect("first run");
    let second = service.score_subject(&subject).expect("second run");
    assert_eq!(first.result, second.result);
}

#[test]
fn income_only_subject_still_scores() {
    let dir = fixture_dir("income-only");
    write_csv(&dir, "income.csv", &income_csv(SUBJECT));

    let service = TrustScoreService::new(
        DatasetResolver::new(&dir),
        Arc::new(StaticLoanRepository::empty()),
    );

    let report = service
        .score_subject(&SubjectId(SUBJECT.to_string()))
        .expect("income ledger alone is enough");
    assert!(report.result.final_score >= 300);
    assert!(report.result.final_score <= 1000);
    // No bank activity: credibility and savings carry no evidence.
    assert_eq!(report.breakdown.indices.transaction_credibility, 0.0);
    assert_eq!(report.breakdown.indices.saving_strength, 0.0);
}

#[test]
fn resolution_fails_only_when_nothing_matches() {
    let dir = fixture_dir("no-match");
    write_csv(&dir, "bank.csv", &bank_csv("OTHERP0000X"));

    let service = TrustScoreService::new(
        DatasetResolver::new(&dir),
        Arc::new(StaticLoanRepository::empty()),
    );

    let error = service
        .score_subject(&SubjectId(SUBJECT.to_string()))
        .expect_err("no dataset for this subject");
    assert!(matches!(error, ScoreServiceError::NoDataset { .. }));
}

#[test]
fn resolver_keeps_first_match_of_each_kind() {
    let dir = fixture_dir("short-circuit");
    write_csv(&dir, "a_bank.csv", &bank_csv(SUBJECT));
    write_csv(&dir, "b_bank.csv", &bank_csv(SUBJECT));
    write_csv(&dir, "c_income.csv", &income_csv(SUBJECT));
    write_csv(&dir, "d_income.csv", &income_csv(SUBJECT));

    let resolved = DatasetResolver::new(&dir).resolve(&SubjectId(SUBJECT.to_string()));
    assert_eq!(resolved.transaction_ledger, Some(dir.join("a_bank.csv")));
    assert_eq!(resolved.income_ledger, Some(dir.join("c_income.csv")));
}

#[test]
fn first_row_owner_decides_dataset_membership() {
    // Documented limitation: the subject's rows are present, but the file
    // opens with another subject's row, so it is never selected.
    let dir = fixture_dir("first-row");
    let csv = format!(
        "transaction_date,transaction_type,amount,category,linked_pan\n\
2025-01-03,CREDIT,5000,Salary,OTHERP0000X\n\
2025-01-10,DEBIT,1000,Loan EMI,{SUBJECT}\n\
2025-01-12,DEBIT,500,Gambling,{SUBJECT}\n"
    );
    write_csv(&dir, "shared.csv", &csv);

    let resolved = DatasetResolver::new(&dir).resolve(&SubjectId(SUBJECT.to_string()));
    assert!(resolved.is_empty());
}

#[test]
fn unreadable_candidates_are_skipped() {
    let dir = fixture_dir("unreadable");
    // A directory with a .csv name cannot be parsed; the scan moves on.
    fs::create_dir_all(dir.join("0trap.csv")).expect("trap dir created");
    write_csv(&dir, "bank.csv", &bank_csv(SUBJECT));

    let resolved = DatasetResolver::new(&dir).resolve(&SubjectId(SUBJECT.to_string()));
    assert_eq!(resolved.transaction_ledger, Some(dir.join("bank.csv")));
}

#[test]
fn legacy_identity_retries_resolution_once() {
    let dir = fixture_dir("legacy");
    write_csv(&dir, "bank.csv", &bank_csv(SUBJECT));
    write_csv(&dir, "income.csv", &income_csv(SUBJECT));

    let legacy = [(
        "test.person@example.com".to_string(),
        SubjectId(SUBJECT.to_string()),
    )]
    .into_iter()
    .collect();
    let resolver = DatasetResolver::new(&dir).with_legacy_identities(legacy);

    let resolved = resolver.resolve(&SubjectId("test.person@example.com".to_string()));
    assert_eq!(resolved.transaction_ledger, Some(dir.join("bank.csv")));
    assert_eq!(resolved.income_ledger, Some(dir.join("income.csv")));

    // Unknown identity gets no retry and resolves to nothing.
    assert!(resolver
        .resolve(&SubjectId("stranger@example.com".to_string()))
        .is_empty());
}

#[test]
fn cached_resolution_survives_file_removal() {
    let dir = fixture_dir("cache");
    let bank_path = write_csv(&dir, "bank.csv", &bank_csv(SUBJECT));

    let cached = DatasetResolver::new(&dir).with_cache();
    let subject = SubjectId(SUBJECT.to_string());

    let first = cached.resolve(&subject);
    assert_eq!(first.transaction_ledger, Some(bank_path.clone()));

    fs::remove_file(&bank_path).expect("fixture removed");

    // Cached entry is returned as-is; a fresh resolver sees the removal.
    let second = cached.resolve(&subject);
    assert_eq!(second, first);
    assert!(DatasetResolver::new(&dir).resolve(&subject).is_empty());
}

use super::domain::SubjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One loan held by a subject, as recorded in the metadata store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAccount {
    pub loan_type: String,
    pub lender: String,
    pub status: LoanStatus,
    pub amount: u32,
    pub monthly_emi: u32,
    pub tenure_months: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Paid,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Paid => "paid",
        }
    }
}

/// Everything the metadata store knows about one subject's borrowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectLoanBook {
    pub holder_name: String,
    pub loans: Vec<LoanAccount>,
}

/// Read-only view of the subject-to-loan metadata store, injected at
/// startup so tests can swap in their own loan books.
pub trait LoanRepository: Send + Sync {
    fn loan_book(&self, subject: &SubjectId) -> Option<SubjectLoanBook>;

    /// Count of currently active loans; only these feed the expected-EMI
    /// figure in repayment reliability.
    fn active_loan_count(&self, subject: &SubjectId) -> usize {
        self.loan_book(subject)
            .map(|book| {
                book.loans
                    .iter()
                    .filter(|loan| loan.status == LoanStatus::Active)
                    .count()
            })
            .unwrap_or(0)
    }
}

/// In-memory repository populated once at startup. The default install
/// ships the known subject loan books; an unknown subject simply has no
/// loan history.
#[derive(Debug, Default, Clone)]
pub struct StaticLoanRepository {
    books: HashMap<String, SubjectLoanBook>,
}

impl StaticLoanRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: SubjectId, book: SubjectLoanBook) {
        self.books.insert(subject.0, book);
    }

    /// The built-in loan books for the seeded subjects.
    pub fn seeded() -> Self {
        let mut repository = Self::default();

        repository.insert(
            SubjectId("ZXCVB9876R".to_string()),
            SubjectLoanBook {
                holder_name: "Rohit Kulkarni".to_string(),
                loans: vec![
                    LoanAccount {
                        loan_type: "Business Loan".to_string(),
                        lender: "HDFC Bank Ltd.".to_string(),
                        status: LoanStatus::Active,
                        amount: 500_000,
                        monthly_emi: 14_200,
                        tenure_months: 48,
                    },
                    LoanAccount {
                        loan_type: "Consumer Durable Loan".to_string(),
                        lender: "Bajaj Finance Ltd.".to_string(),
                        status: LoanStatus::Paid,
                        amount: 45_000,
                        monthly_emi: 3_900,
                        tenure_months: 12,
                    },
                ],
            },
        );

        repository.insert(
            SubjectId("PQRSX6789L".to_string()),
            SubjectLoanBook {
                holder_name: "Amit Verma".to_string(),
                loans: vec![
                    LoanAccount {
                        loan_type: "Personal Loan".to_string(),
                        lender: "ICICI Bank Ltd.".to_string(),
                        status: LoanStatus::Active,
                        amount: 200_000,
                        monthly_emi: 7_500,
                        tenure_months: 30,
                    },
                    LoanAccount {
                        loan_type: "Credit Card EMI".to_string(),
                        lender: "HDFC Diners Club".to_string(),
                        status: LoanStatus::Active,
                        amount: 35_000,
                        monthly_emi: 2_900,
                        tenure_months: 12,
                    },
                ],
            },
        );

        repository.insert(
            SubjectId("ABCDE1234F".to_string()),
            SubjectLoanBook {
                holder_name: "Rahul Sharma".to_string(),
                loans: vec![
                    LoanAccount {
                        loan_type: "Two Wheeler Loan".to_string(),
                        lender: "Hero FinCorp Ltd.".to_string(),
                        status: LoanStatus::Active,
                        amount: 85_000,
                        monthly_emi: 2_800,
                        tenure_months: 36,
                    },
                    LoanAccount {
                        loan_type: "Kisan Credit Card".to_string(),
                        lender: "State Bank of India".to_string(),
                        status: LoanStatus::Paid,
                        amount: 60_000,
                        monthly_emi: 5_200,
                        tenure_months: 12,
                    },
                ],
            },
        );

        repository.insert(
            SubjectId("MNOPQ5678K".to_string()),
            SubjectLoanBook {
                holder_name: "Priya Mehta".to_string(),
                loans: vec![LoanAccount {
                    loan_type: "Personal Loan".to_string(),
                    lender: "Axis Bank Ltd.".to_string(),
                    status: LoanStatus::Active,
                    amount: 150_000,
                    monthly_emi: 3_500,
                    tenure_months: 48,
                }],
            },
        );

        repository
    }
}

impl LoanRepository for StaticLoanRepository {
    fn loan_book(&self, subject: &SubjectId) -> Option<SubjectLoanBook> {
        self.books.get(subject.as_str()).cloned()
    }
}

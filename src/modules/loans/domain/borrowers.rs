/// Borrower suggestions derived from loan history
use super::entities::Loan;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerSuggestion {
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
    pub cultural_group: String,
}

impl BorrowerSuggestion {
    fn matches(&self, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.name.to_lowercase().contains(&lowered)
            || self.document.contains(term)
            || self.email.to_lowercase().contains(&lowered)
    }
}

/// One profile per document number, in the order documents were first seen.
///
/// The first loan encountered for a document wins; later loans with the same
/// document never overwrite it, even if their contact details differ.
#[derive(Debug, Default)]
pub struct BorrowerDirectory {
    entries: Vec<BorrowerSuggestion>,
}

impl BorrowerDirectory {
    pub fn from_loans<'a, I>(loans: I) -> Self
    where
        I: IntoIterator<Item = &'a Loan>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for loan in loans {
            if !seen.insert(loan.borrower.document.clone()) {
                continue;
            }
            entries.push(BorrowerSuggestion {
                name: loan.borrower.name.clone(),
                document: loan.borrower.document.clone(),
                phone: loan.borrower.phone.clone(),
                email: loan.borrower.email.clone(),
                cultural_group: loan.cultural_group.clone(),
            });
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `limit` profiles matching `term`; an empty term matches everyone
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<BorrowerSuggestion> {
        let term = term.trim();
        self.entries
            .iter()
            .filter(|entry| term.is_empty() || entry.matches(term))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::loans::domain::{Borrower, LoanStatus, LoanedItem};
    use chrono::Utc;
    use uuid::Uuid;

    fn loan(name: &str, document: &str, email: &str, group: &str) -> Loan {
        Loan {
            id: Uuid::new_v4(),
            borrower: Borrower::new(name.into(), document.into(), "555".into(), email.into()),
            cultural_group: group.into(),
            item: LoanedItem {
                item_id: Uuid::new_v4(),
                item_name: "Guitarra".into(),
                item_serial_number: "GTA-001".into(),
            },
            loan_date: Utc::now(),
            return_date: None,
            status: LoanStatus::Active,
        }
    }

    #[test]
    fn test_first_seen_profile_wins() {
        let loans = vec![
            loan("Ana", "123", "ana@old.edu", "Tuna"),
            loan("Ana María", "123", "ana@new.edu", "Danzas"),
            loan("Luis", "456", "luis@uni.edu", "Teatro"),
        ];

        let directory = BorrowerDirectory::from_loans(&loans);
        assert_eq!(directory.len(), 2);

        let all = directory.suggest("", 5);
        assert_eq!(all[0].name, "Ana");
        assert_eq!(all[0].email, "ana@old.edu");
        assert_eq!(all[0].cultural_group, "Tuna");
        assert_eq!(all[1].document, "456");
    }

    #[test]
    fn test_empty_term_returns_first_entries_up_to_limit() {
        let loans: Vec<Loan> = (0..8)
            .map(|i| loan(&format!("P{}", i), &format!("{}", 1000 + i), "p@uni.edu", "Tuna"))
            .collect();

        let directory = BorrowerDirectory::from_loans(&loans);
        let suggestions = directory.suggest("", 5);

        assert_eq!(suggestions.len(), 5);
        let documents: Vec<&str> = suggestions.iter().map(|s| s.document.as_str()).collect();
        assert_eq!(documents, vec!["1000", "1001", "1002", "1003", "1004"]);
    }

    #[test]
    fn test_term_matching_rules() {
        let loans = vec![
            loan("Ana Pérez", "123456", "ana@uni.edu", "Tuna"),
            loan("Luis", "987", "LUIS@UNI.EDU", "Teatro"),
        ];
        let directory = BorrowerDirectory::from_loans(&loans);

        assert_eq!(directory.suggest("ana", 5).len(), 1);
        assert_eq!(directory.suggest("345", 5)[0].name, "Ana Pérez");
        assert_eq!(directory.suggest("luis@uni", 5)[0].document, "987");
        assert_eq!(directory.suggest("uni.edu", 5).len(), 2);
        assert!(directory.suggest("nadie", 5).is_empty());
    }
}

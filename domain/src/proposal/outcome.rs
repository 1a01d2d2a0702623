//! Winner selection and the final resolution result

use super::record::ProposalRecord;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The highest-scoring choice of a proposal
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub index: usize,
    pub choice: String,
    pub score: f64,
}

/// Pick the choice with the maximum score.
///
/// Ties go to the lowest index. The hub is not trusted to sort choices by
/// score, so the maximum is always computed here.
pub fn select_winner(choices: &[String], scores: &[f64]) -> Result<Winner, DomainError> {
    if scores.is_empty() {
        return Err(DomainError::MalformedRecord(
            "proposal has no scores".to_string(),
        ));
    }
    if choices.len() != scores.len() {
        return Err(DomainError::MalformedRecord(format!(
            "{} choices but {} scores",
            choices.len(),
            scores.len()
        )));
    }

    let mut index = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[index] {
            index = i;
        }
    }

    Ok(Winner {
        index,
        choice: choices[index].clone(),
        score: scores[index],
    })
}

/// What the caller gets back: the winner merged with the upstream record
///
/// # Example
///
/// ```
/// use resolver_domain::{ProposalRecord, ResolutionResult};
///
/// let record = ProposalRecord {
///     choices: Some(vec!["A".into(), "B".into(), "C".into()]),
///     scores: Some(vec![10.0, 10.0, 5.0]),
///     ..Default::default()
/// };
/// let result = ResolutionResult::from_record(record).unwrap();
/// assert_eq!(result.winning_choice, "A");
/// assert_eq!(result.winning_score, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub winning_choice: String,
    pub winning_score: f64,
    #[serde(flatten)]
    pub record: ProposalRecord,
}

impl ResolutionResult {
    pub fn from_record(record: ProposalRecord) -> Result<Self, DomainError> {
        let scores = record
            .scores
            .as_deref()
            .ok_or_else(|| DomainError::MalformedRecord("proposal has no scores".to_string()))?;
        let choices = record
            .choices
            .as_deref()
            .ok_or_else(|| DomainError::MalformedRecord("proposal has no choices".to_string()))?;

        let winner = select_winner(choices, scores)?;

        Ok(Self {
            winning_choice: winner.choice,
            winning_score: winner.score,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn choices(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let winner = select_winner(&choices(&["A", "B", "C"]), &[10.0, 10.0, 5.0]).unwrap();
        assert_eq!(winner.index, 0);
        assert_eq!(winner.choice, "A");
        assert_eq!(winner.score, 10.0);
    }

    #[test]
    fn test_unsorted_scores() {
        let winner = select_winner(&choices(&["A", "B", "C"]), &[1.0, 7.5, 7.4]).unwrap();
        assert_eq!(winner.choice, "B");
        assert_eq!(winner.score, 7.5);
    }

    #[test]
    fn test_single_choice() {
        let winner = select_winner(&choices(&["Only"]), &[0.0]).unwrap();
        assert_eq!(winner.choice, "Only");
        assert_eq!(winner.score, 0.0);
    }

    #[test]
    fn test_empty_scores_is_malformed() {
        let err = select_winner(&[], &[]).unwrap_err();
        assert!(matches!(err, DomainError::MalformedRecord(_)));
    }

    #[test]
    fn test_length_mismatch_is_malformed() {
        let err = select_winner(&choices(&["A", "B"]), &[1.0]).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedRecord("2 choices but 1 scores".to_string())
        );
    }

    #[test]
    fn test_from_empty_record_is_malformed() {
        let err = ResolutionResult::from_record(ProposalRecord::default()).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedRecord("proposal has no scores".to_string())
        );
    }

    #[test]
    fn test_serialized_shape_merges_record_fields() {
        let record = ProposalRecord {
            id: Some("0x01".to_string()),
            choices: Some(choices(&["Yes", "No"])),
            state: Some("closed".to_string()),
            scores: Some(vec![3.0, 9.0]),
            scores_state: Some("final".to_string()),
            votes: Some(12),
            quorum: Some(0.0),
        };
        let result = ResolutionResult::from_record(record).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            json!({
                "winningChoice": "No",
                "winningScore": 9.0,
                "id": "0x01",
                "choices": ["Yes", "No"],
                "state": "closed",
                "scores": [3.0, 9.0],
                "scoresState": "final",
                "votes": 12,
                "quorum": 0.0,
            })
        );
    }
}

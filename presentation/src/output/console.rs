//! Console output formatter for resolution results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use resolver_application::ResolveProposalError;
use resolver_domain::ResolutionResult;

/// Formats resolution results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the winner, state and per-choice tally
    pub fn format_summary(result: &ResolutionResult) -> String {
        let record = &result.record;
        let mut output = String::new();

        output.push_str(&Self::header("Snapshot Proposal"));
        output.push('\n');

        if let Some(id) = &record.id {
            output.push_str(&format!("{} {}\n", "Proposal:".cyan().bold(), id));
        }
        output.push_str(&format!(
            "{} {}\n",
            "State:".cyan().bold(),
            record.state_pair()
        ));
        if let Some(votes) = record.votes {
            output.push_str(&format!("{} {}\n", "Votes:".cyan().bold(), votes));
        }
        if let Some(quorum) = record.quorum {
            output.push_str(&format!("{} {}\n", "Quorum:".cyan().bold(), quorum));
        }

        output.push_str(&format!(
            "\n{} {} ({})\n",
            "Winner:".green().bold(),
            result.winning_choice.bold(),
            result.winning_score
        ));

        if let (Some(choices), Some(scores)) = (&record.choices, &record.scores) {
            output.push_str(&format!("\n{}\n", "Scores:".cyan().bold()));
            for (choice, score) in choices.iter().zip(scores) {
                let marker = if *choice == result.winning_choice && *score == result.winning_score
                {
                    "*"
                } else {
                    " "
                };
                output.push_str(&format!("  {} {:<30} {}\n", marker, choice, score));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format an error as `Error [kind]: message`
    pub fn format_failure(error: &ResolveProposalError) -> String {
        format!(
            "{} {}",
            format!("Error [{}]:", error.kind()).red().bold(),
            error
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &ResolutionResult) -> String {
        Self::format_summary(result)
    }

    fn format_error(&self, error: &ResolveProposalError) -> String {
        Self::format_failure(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolver_domain::ProposalRecord;

    #[test]
    fn test_summary_mentions_winner_and_state() {
        colored::control::set_override(false);

        let result = ResolutionResult::from_record(ProposalRecord {
            id: Some("0x01".to_string()),
            choices: Some(vec!["Yes".to_string(), "No".to_string()]),
            state: Some("closed".to_string()),
            scores: Some(vec![7.0, 3.0]),
            scores_state: Some("final".to_string()),
            votes: Some(10),
            quorum: Some(0.0),
        })
        .unwrap();

        let summary = ConsoleFormatter::format_summary(&result);
        assert!(summary.contains("Winner: Yes (7)"));
        assert!(summary.contains("(closed, final)"));
        assert!(summary.contains("Votes: 10"));
        assert!(summary.contains("* Yes"));
    }
}

//! Turns a [`Verdict`] into the reply shown to the learner.

use super::validator::{IssueKind, Verdict};

const AGREEMENT_REMINDER: &str = "📚 Remember: Use 'am' with 'I', 'is' with he/she/it, 'are' with you/we/they (present). Use 'was' with I/he/she/it, 'were' with you/we/they (past).";

const NEXT_STEP: &str = "Type another sentence, or 'chat' to switch to conversation mode.";

/// Render feedback for `sentence`.
///
/// The corrected version is only shown when it differs from what was typed.
pub fn render_feedback(sentence: &str, verdict: &Verdict) -> String {
    let mut out = match verdict {
        Verdict::Correct(kind) => format!("✅ Correct sentence in {kind}!"),
        Verdict::Incorrect(assessment) => {
            let mut out = String::from("❌ Invalid sentence.\n\n📝 Issues found:");
            for (i, error) in assessment.errors.iter().enumerate() {
                out.push_str(&format!("\n{}. {error}", i + 1));
            }
            if !assessment.corrected.is_empty() && assessment.corrected != sentence.trim() {
                out.push_str(&format!(
                    "\n\n✏️ Corrected version: \"{}\"",
                    assessment.corrected
                ));
            }
            if assessment.kind == IssueKind::Grammar {
                out.push_str("\n\n");
                out.push_str(AGREEMENT_REMINDER);
            }
            out
        }
    };

    out.push_str("\n\n");
    out.push_str(NEXT_STEP);
    out
}

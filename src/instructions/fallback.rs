//! Instruction lookup with level-based fallback
//!
//! A session never ends up without instructions: an unknown or missing ID
//! falls back to level-appropriate entries and finally to
//! `DEFAULT_INSTRUCTION`.

use serde::Serialize;

use crate::core::SessionId;
use crate::instructions::{PreSessionInstruction, DEFAULT_INSTRUCTION, PRE_SESSION_INSTRUCTIONS};
use crate::sessions::MeditationSession;

/// Fallback candidates per session level, tried in order
///
/// Some IDs name instructions that are not in the table yet; they are
/// skipped.
fn level_fallbacks(level: u8) -> &'static [&'static str] {
    match level {
        2 => &["level2_breath_counting", "level1_breath"],
        3 => &["level3_mindfulness", "level3_loving_kindness"],
        4 => &["level4_open_awareness", "level4_vipassana_scan"],
        5 => &["level5_vipassana", "level4_open_awareness"],
        _ => &["level1_breath", "morning_energy"],
    }
}

fn lookup(id: &str) -> Option<&'static PreSessionInstruction> {
    PRE_SESSION_INSTRUCTIONS.iter().copied().find(|i| i.id == id)
}

pub fn get_instruction_by_id(id: Option<&str>) -> Option<&'static PreSessionInstruction> {
    let Some(id) = id.filter(|id| !id.is_empty()) else {
        tracing::warn!("No instruction id provided");
        return None;
    };
    let found = lookup(id);
    if found.is_none() {
        tracing::warn!("Missing instruction: {}", id);
    }
    found
}

pub fn get_instruction_with_fallback(id: Option<&str>, session_level: u8) -> &'static PreSessionInstruction {
    if let Some(instruction) = get_instruction_by_id(id) {
        return instruction;
    }

    for fallback_id in level_fallbacks(session_level) {
        if let Some(instruction) = lookup(fallback_id) {
            tracing::debug!(
                "Using fallback instruction {} for level {}",
                fallback_id,
                session_level
            );
            return instruction;
        }
    }

    DEFAULT_INSTRUCTION
}

pub fn get_instruction_for_session(session: &MeditationSession) -> &'static PreSessionInstruction {
    get_instruction_with_fallback(session.instruction_id.as_deref(), session.level)
}

pub fn get_available_instruction_ids() -> Vec<&'static str> {
    PRE_SESSION_INSTRUCTIONS.iter().map(|i| i.id).collect()
}

pub fn instruction_exists(id: &str) -> bool {
    lookup(id).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "instructionId", rename_all = "snake_case")]
pub enum IssueKind {
    MissingId,
    UnknownId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionIssue {
    pub session_id: SessionId,
    pub session_title: String,
    pub issue: IssueKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstructionReport {
    pub valid: u32,
    pub invalid: u32,
    pub missing: u32,
    pub issues: Vec<InstructionIssue>,
}

/// Check every catalog session's instruction reference
pub fn validate_session_instructions(sessions: &[MeditationSession]) -> InstructionReport {
    let mut report = InstructionReport::default();

    for session in sessions {
        let issue = match session.instruction_id.as_deref() {
            None | Some("") => {
                report.missing += 1;
                IssueKind::MissingId
            }
            Some(id) if !instruction_exists(id) => {
                report.invalid += 1;
                IssueKind::UnknownId(id.to_string())
            }
            Some(_) => {
                report.valid += 1;
                continue;
            }
        };
        report.issues.push(InstructionIssue {
            session_id: session.id,
            session_title: session.title.clone(),
            issue,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::catalog_session;

    #[test]
    fn test_known_id_wins() {
        let instruction = get_instruction_with_fallback(Some("zen_meditation"), 1);
        assert_eq!(instruction.id, "zen_meditation");
    }

    #[test]
    fn test_fallback_chain_per_level() {
        assert_eq!(get_instruction_with_fallback(None, 1).id, "level1_breath");
        assert_eq!(get_instruction_with_fallback(Some("nope"), 2).id, "level2_breath_counting");
        // level3_mindfulness is not in the table
        assert_eq!(get_instruction_with_fallback(None, 3).id, "level3_loving_kindness");
        assert_eq!(get_instruction_with_fallback(None, 4).id, "level4_open_awareness");
        assert_eq!(get_instruction_with_fallback(None, 5).id, "level5_vipassana");
        assert_eq!(get_instruction_with_fallback(None, 9).id, "level1_breath");
    }

    #[test]
    fn test_validation_report() {
        let mut with_known = catalog_session(1, 1, None, None, 600);
        with_known.instruction_id = Some("level1_body_scan".into());
        let mut with_unknown = catalog_session(2, 1, None, None, 600);
        with_unknown.instruction_id = Some("level9_levitation".into());
        let without = catalog_session(3, 1, None, None, 600);

        let report = validate_session_instructions(&[with_known, with_unknown, without]);
        assert_eq!((report.valid, report.invalid, report.missing), (1, 1, 1));
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues[0].issue, IssueKind::UnknownId("level9_levitation".into()));
        assert_eq!(report.issues[1].issue, IssueKind::MissingId);
    }

    #[test]
    fn test_exists() {
        assert!(instruction_exists("level5_vipassana"));
        assert!(!instruction_exists("morning_energy"));
        assert_eq!(get_available_instruction_ids().len(), 7);
    }
}

//! Built-in pre-session instruction table

use crate::instructions::{
    BreathingPrep, MentalPreparation, PracticeTime, PreSessionInstruction, ReminderKind,
    SessionReminder, SetupStep, Technique,
};
use crate::progress::BreathingPatternId;

/// Last-resort instruction when no lookup or fallback matches
pub static DEFAULT_INSTRUCTION: &PreSessionInstruction = &LEVEL1_BREATH;

pub static PRE_SESSION_INSTRUCTIONS: &[&PreSessionInstruction] = &[
    &LEVEL1_BREATH,
    &LEVEL1_BODY_SCAN,
    &LEVEL2_BREATH_COUNTING,
    &LEVEL3_LOVING_KINDNESS,
    &LEVEL4_OPEN_AWARENESS,
    &LEVEL5_VIPASSANA,
    &ZEN_MEDITATION,
];

static LEVEL1_BREATH: PreSessionInstruction = PreSessionInstruction {
    id: "level1_breath",
    session_level: 1,
    technique: Technique::BreathAwareness,
    time_of_day: PracticeTime::Any,
    title_key: "instructions.level1_breath.title",
    subtitle_key: "instructions.level1_breath.subtitle",
    physical_setup: &[
        SetupStep {
            order: 1,
            icon: "🪑",
            key: "instructions.level1_breath.setup.1",
            optional: false,
        },
        SetupStep {
            order: 2,
            icon: "🧘",
            key: "instructions.level1_breath.setup.2",
            optional: false,
        },
        SetupStep {
            order: 3,
            icon: "🙏",
            key: "instructions.level1_breath.setup.3",
            optional: true,
        },
        SetupStep {
            order: 4,
            icon: "👀",
            key: "instructions.level1_breath.setup.4",
            optional: true,
        },
    ],
    mental_preparation: Some(MentalPreparation {
        intention_key: "instructions.level1_breath.intention",
        focus_point_key: "instructions.level1_breath.focusPoint",
        challenge_keys: &[
            "instructions.level1_breath.challenges.1",
            "instructions.level1_breath.challenges.2",
            "instructions.level1_breath.challenges.3",
        ],
    }),
    session_tips: &[
        "instructions.level1_breath.tips.1",
        "instructions.level1_breath.tips.2",
        "instructions.level1_breath.tips.3",
        "instructions.level1_breath.tips.4",
    ],
    breathing_prep: Some(BreathingPrep {
        duration_seconds: 60,
        pattern: BreathingPatternId::Equal,
        instruction_key: "instructions.level1_breath.breathing",
    }),
    reminders: &[
        SessionReminder {
            time_seconds: 120,
            message_key: "instructions.level1_breath.reminders.1",
            kind: ReminderKind::Gentle,
        },
        SessionReminder {
            time_seconds: 300,
            message_key: "instructions.level1_breath.reminders.2",
            kind: ReminderKind::Encouragement,
        },
    ],
};

static LEVEL1_BODY_SCAN: PreSessionInstruction = PreSessionInstruction {
    id: "level1_body_scan",
    session_level: 1,
    technique: Technique::BodyScan,
    time_of_day: PracticeTime::Evening,
    title_key: "instructions.level1_body_scan.title",
    subtitle_key: "instructions.level1_body_scan.subtitle",
    physical_setup: &[
        SetupStep {
            order: 1,
            icon: "🛏️",
            key: "instructions.level1_body_scan.setup.1",
            optional: false,
        },
        SetupStep {
            order: 2,
            icon: "🦶",
            key: "instructions.level1_body_scan.setup.2",
            optional: false,
        },
        SetupStep {
            order: 3,
            icon: "🌡️",
            key: "instructions.level1_body_scan.setup.3",
            optional: true,
        },
    ],
    mental_preparation: Some(MentalPreparation {
        intention_key: "instructions.level1_body_scan.intention",
        focus_point_key: "instructions.level1_body_scan.focusPoint",
        challenge_keys: &[
            "instructions.level1_body_scan.challenges.1",
            "instructions.level1_body_scan.challenges.2",
            "instructions.level1_body_scan.challenges.3",
        ],
    }),
    session_tips: &[
        "instructions.level1_body_scan.tips.1",
        "instructions.level1_body_scan.tips.2",
        "instructions.level1_body_scan.tips.3",
        "instructions.level1_body_scan.tips.4",
    ],
    breathing_prep: Some(BreathingPrep {
        duration_seconds: 45,
        pattern: BreathingPatternId::Calm,
        instruction_key: "instructions.level1_body_scan.breathing",
    }),
    reminders: &[
        SessionReminder {
            time_seconds: 180,
            message_key: "instructions.level1_body_scan.reminders.1",
            kind: ReminderKind::Gentle,
        },
    ],
};

static LEVEL2_BREATH_COUNTING: PreSessionInstruction = PreSessionInstruction {
    id: "level2_breath_counting",
    session_level: 2,
    technique: Technique::BreathAwareness,
    time_of_day: PracticeTime::Morning,
    title_key: "instructions.level2_breath_counting.title",
    subtitle_key: "instructions.level2_breath_counting.subtitle",
    physical_setup: &[
        SetupStep {
            order: 1,
            icon: "🧘",
            key: "instructions.level2_breath_counting.setup.1",
            optional: false,
        },
        SetupStep {
            order: 2,
            icon: "⚓",
            key: "instructions.level2_breath_counting.setup.2",
            optional: false,
        },
    ],
    mental_preparation: Some(MentalPreparation {
        intention_key: "instructions.level2_breath_counting.intention",
        focus_point_key: "instructions.level2_breath_counting.focusPoint",
        challenge_keys: &[
            "instructions.level2_breath_counting.challenges.1",
            "instructions.level2_breath_counting.challenges.2",
            "instructions.level2_breath_counting.challenges.3",
        ],
    }),
    session_tips: &[
        "instructions.level2_breath_counting.tips.1",
        "instructions.level2_breath_counting.tips.2",
        "instructions.level2_breath_counting.tips.3",
        "instructions.level2_breath_counting.tips.4",
    ],
    breathing_prep: Some(BreathingPrep {
        duration_seconds: 90,
        pattern: BreathingPatternId::Box,
        instruction_key: "instructions.level2_breath_counting.breathing",
    }),
    reminders: &[
        SessionReminder {
            time_seconds: 150,
            message_key: "instructions.level2_breath_counting.reminders.1",
            kind: ReminderKind::Technique,
        },
        SessionReminder {
            time_seconds: 420,
            message_key: "instructions.level2_breath_counting.reminders.2",
            kind: ReminderKind::Encouragement,
        },
    ],
};

static LEVEL3_LOVING_KINDNESS: PreSessionInstruction = PreSessionInstruction {
    id: "level3_loving_kindness",
    session_level: 3,
    technique: Technique::LovingKindness,
    time_of_day: PracticeTime::Afternoon,
    title_key: "instructions.level3_loving_kindness.title",
    subtitle_key: "instructions.level3_loving_kindness.subtitle",
    physical_setup: &[
        SetupStep {
            order: 1,
            icon: "❤️",
            key: "instructions.level3_loving_kindness.setup.1",
            optional: false,
        },
        SetupStep {
            order: 2,
            icon: "😊",
            key: "instructions.level3_loving_kindness.setup.2",
            optional: true,
        },
    ],
    mental_preparation: Some(MentalPreparation {
        intention_key: "instructions.level3_loving_kindness.intention",
        focus_point_key: "instructions.level3_loving_kindness.focusPoint",
        challenge_keys: &[
            "instructions.level3_loving_kindness.challenges.1",
            "instructions.level3_loving_kindness.challenges.2",
            "instructions.level3_loving_kindness.challenges.3",
        ],
    }),
    session_tips: &[
        "instructions.level3_loving_kindness.tips.1",
        "instructions.level3_loving_kindness.tips.2",
        "instructions.level3_loving_kindness.tips.3",
        "instructions.level3_loving_kindness.tips.4",
    ],
    breathing_prep: Some(BreathingPrep {
        duration_seconds: 60,
        pattern: BreathingPatternId::Calm,
        instruction_key: "instructions.level3_loving_kindness.breathing",
    }),
    reminders: &[
        SessionReminder {
            time_seconds: 200,
            message_key: "instructions.level3_loving_kindness.reminders.1",
            kind: ReminderKind::Encouragement,
        },
        SessionReminder {
            time_seconds: 450,
            message_key: "instructions.level3_loving_kindness.reminders.2",
            kind: ReminderKind::Gentle,
        },
    ],
};

static LEVEL4_OPEN_AWARENESS: PreSessionInstruction = PreSessionInstruction {
    id: "level4_open_awareness",
    session_level: 4,
    technique: Technique::OpenAwareness,
    time_of_day: PracticeTime::Any,
    title_key: "instructions.level4_open_awareness.title",
    subtitle_key: "instructions.level4_open_awareness.subtitle",
    physical_setup: &[
        SetupStep {
            order: 1,
            icon: "🌊",
            key: "instructions.level4_open_awareness.setup.1",
            optional: false,
        },
        SetupStep {
            order: 2,
            icon: "👁️",
            key: "instructions.level4_open_awareness.setup.2",
            optional: true,
        },
    ],
    mental_preparation: Some(MentalPreparation {
        intention_key: "instructions.level4_open_awareness.intention",
        focus_point_key: "instructions.level4_open_awareness.focusPoint",
        challenge_keys: &[
            "instructions.level4_open_awareness.challenges.1",
            "instructions.level4_open_awareness.challenges.2",
            "instructions.level4_open_awareness.challenges.3",
        ],
    }),
    session_tips: &[
        "instructions.level4_open_awareness.tips.1",
        "instructions.level4_open_awareness.tips.2",
        "instructions.level4_open_awareness.tips.3",
        "instructions.level4_open_awareness.tips.4",
    ],
    breathing_prep: Some(BreathingPrep {
        duration_seconds: 120,
        pattern: BreathingPatternId::FourSevenEight,
        instruction_key: "instructions.level4_open_awareness.breathing",
    }),
    reminders: &[
        SessionReminder {
            time_seconds: 240,
            message_key: "instructions.level4_open_awareness.reminders.1",
            kind: ReminderKind::Technique,
        },
        SessionReminder {
            time_seconds: 540,
            message_key: "instructions.level4_open_awareness.reminders.2",
            kind: ReminderKind::Gentle,
        },
    ],
};

static LEVEL5_VIPASSANA: PreSessionInstruction = PreSessionInstruction {
    id: "level5_vipassana",
    session_level: 5,
    technique: Technique::Vipassana,
    time_of_day: PracticeTime::Morning,
    title_key: "instructions.level5_vipassana.title",
    subtitle_key: "instructions.level5_vipassana.subtitle",
    physical_setup: &[
        SetupStep {
            order: 1,
            icon: "🪷",
            key: "instructions.level5_vipassana.setup.1",
            optional: false,
        },
        SetupStep {
            order: 2,
            icon: "⛰️",
            key: "instructions.level5_vipassana.setup.2",
            optional: false,
        },
    ],
    mental_preparation: Some(MentalPreparation {
        intention_key: "instructions.level5_vipassana.intention",
        focus_point_key: "instructions.level5_vipassana.focusPoint",
        challenge_keys: &[
            "instructions.level5_vipassana.challenges.1",
            "instructions.level5_vipassana.challenges.2",
            "instructions.level5_vipassana.challenges.3",
        ],
    }),
    session_tips: &[
        "instructions.level5_vipassana.tips.1",
        "instructions.level5_vipassana.tips.2",
        "instructions.level5_vipassana.tips.3",
        "instructions.level5_vipassana.tips.4",
    ],
    breathing_prep: Some(BreathingPrep {
        duration_seconds: 180,
        pattern: BreathingPatternId::Equal,
        instruction_key: "instructions.level5_vipassana.breathing",
    }),
    reminders: &[
        SessionReminder {
            time_seconds: 300,
            message_key: "instructions.level5_vipassana.reminders.1",
            kind: ReminderKind::Technique,
        },
        SessionReminder {
            time_seconds: 600,
            message_key: "instructions.level5_vipassana.reminders.2",
            kind: ReminderKind::Technique,
        },
        SessionReminder {
            time_seconds: 900,
            message_key: "instructions.level5_vipassana.reminders.3",
            kind: ReminderKind::Gentle,
        },
    ],
};

static ZEN_MEDITATION: PreSessionInstruction = PreSessionInstruction {
    id: "zen_meditation",
    session_level: 3,
    technique: Technique::Zen,
    time_of_day: PracticeTime::Any,
    title_key: "instructions.zen_meditation.title",
    subtitle_key: "instructions.zen_meditation.subtitle",
    physical_setup: &[
        SetupStep {
            order: 1,
            icon: "🧘‍♂️",
            key: "instructions.zen_meditation.setup.1",
            optional: false,
        },
        SetupStep {
            order: 2,
            icon: "👁️",
            key: "instructions.zen_meditation.setup.2",
            optional: false,
        },
        SetupStep {
            order: 3,
            icon: "🎯",
            key: "instructions.zen_meditation.setup.3",
            optional: false,
        },
    ],
    mental_preparation: Some(MentalPreparation {
        intention_key: "instructions.zen_meditation.intention",
        focus_point_key: "instructions.zen_meditation.focusPoint",
        challenge_keys: &[
            "instructions.zen_meditation.challenges.1",
            "instructions.zen_meditation.challenges.2",
            "instructions.zen_meditation.challenges.3",
        ],
    }),
    session_tips: &[
        "instructions.zen_meditation.tips.1",
        "instructions.zen_meditation.tips.2",
        "instructions.zen_meditation.tips.3",
        "instructions.zen_meditation.tips.4",
    ],
    breathing_prep: None,
    reminders: &[
        SessionReminder {
            time_seconds: 360,
            message_key: "instructions.zen_meditation.reminders.1",
            kind: ReminderKind::Gentle,
        },
        SessionReminder {
            time_seconds: 720,
            message_key: "instructions.zen_meditation.reminders.2",
            kind: ReminderKind::Technique,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique_and_default_listed() {
        let mut ids: Vec<_> = PRE_SESSION_INSTRUCTIONS.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PRE_SESSION_INSTRUCTIONS.len());
        assert!(PRE_SESSION_INSTRUCTIONS.iter().any(|i| i.id == DEFAULT_INSTRUCTION.id));
    }

    #[test]
    fn test_setup_steps_are_ordered() {
        for instruction in PRE_SESSION_INSTRUCTIONS {
            for (i, step) in instruction.physical_setup.iter().enumerate() {
                assert_eq!(step.order as usize, i + 1, "{}", instruction.id);
            }
            assert!(instruction.reminders.windows(2).all(|w| w[0].time_seconds < w[1].time_seconds));
        }
    }
}

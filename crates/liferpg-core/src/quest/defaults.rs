//! Built-in daily quest table.

use super::{Bonus, QuestDefinition, QuestRewards, QuestTable};

pub(super) fn daily() -> QuestTable {
    QuestTable::new(vec![
        QuestDefinition::new("roadwork", 16, 30, 45)
            .with_title("Roadwork")
            .with_label("Run 4mi")
            .with_rewards(QuestRewards {
                tier: 1,
                required: true,
                skill: Some("Roadwork".into()),
                base_xp: 50,
                penalty: 15,
                baseline_minutes: 20,
                per_minute_bonus: 1,
                streak_key: Some("roadwork_daily".into()),
                ..QuestRewards::default()
            }),
        QuestDefinition::new("jumprope", 18, 10, 12)
            .with_title("Jump Rope")
            .with_label("Rope 10'")
            .with_rewards(QuestRewards {
                tier: 1,
                required: true,
                skill: Some("Jump Rope".into()),
                base_xp: 40,
                penalty: 10,
                baseline_minutes: 10,
                bonuses: vec![Bonus {
                    code: "combo".into(),
                    xp: 10,
                    description: "Southpaw plus one new skill".into(),
                }],
                streak_key: Some("jumprope_daily".into()),
                ..QuestRewards::default()
            }),
        QuestDefinition::new("study", 20, 0, 30)
            .with_title("Study")
            .with_label("Study 30'")
            .with_rewards(QuestRewards {
                tier: 2,
                required: true,
                skill: Some("Studying / Schoolwork".into()),
                base_xp: 50,
                penalty: 10,
                baseline_minutes: 30,
                bonuses: vec![Bonus {
                    code: "inbox_zero".into(),
                    xp: 20,
                    description: "Assignment inbox cleared".into(),
                }],
                streak_key: Some("study_daily".into()),
                ..QuestRewards::default()
            }),
    ])
}

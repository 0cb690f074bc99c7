//! Static quest templates and the body-part exercise catalog.
//!
//! T052: Define the body-part catalog and exercise lookup
//! T053: Define the built-in quest templates

use serde::{Deserialize, Serialize};

use crate::quests::types::{Difficulty, ObjectiveKind, ObjectiveTemplate, QuestTemplate};

/// A catalog exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRef {
    /// Stable catalog id
    pub id: String,
    /// Display name
    pub name: String,
}

/// A body part and the exercises that train it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyPart {
    /// Stable catalog id
    pub id: String,
    /// Display name
    pub name: String,
    /// Exercises that train this body part
    pub exercises: Vec<ExerciseRef>,
}

/// Read-only lookup from exercises to body parts.
#[derive(Debug, Clone)]
pub struct Catalog {
    body_parts: Vec<BodyPart>,
}

impl Catalog {
    /// The built-in exercise catalog.
    pub fn builtin() -> Self {
        let body_parts = vec![
            body_part(
                "chest",
                "Chest",
                &[("bench-press", "Bench Press"), ("push-up", "Push-Up"), ("chest-fly", "Chest Fly")],
            ),
            body_part(
                "back",
                "Back",
                &[("pull-up", "Pull-Up"), ("bent-over-row", "Bent-Over Row"), ("lat-pulldown", "Lat Pulldown")],
            ),
            body_part(
                "legs",
                "Legs",
                &[("squat", "Squat"), ("deadlift", "Deadlift"), ("lunge", "Lunge"), ("leg-press", "Leg Press")],
            ),
            body_part(
                "shoulders",
                "Shoulders",
                &[("overhead-press", "Overhead Press"), ("lateral-raise", "Lateral Raise")],
            ),
            body_part(
                "arms",
                "Arms",
                &[("bicep-curl", "Bicep Curl"), ("tricep-dip", "Tricep Dip"), ("hammer-curl", "Hammer Curl")],
            ),
            body_part(
                "core",
                "Core",
                &[("plank", "Plank"), ("crunch", "Crunch"), ("russian-twist", "Russian Twist")],
            ),
        ];

        Self { body_parts }
    }

    /// All body parts in the catalog.
    pub fn body_parts(&self) -> &[BodyPart] {
        &self.body_parts
    }

    /// Distinct body-part ids trained by the given exercise names or ids.
    ///
    /// Matching is case-insensitive against both the catalog id and the
    /// display name.
    pub fn body_parts_for_exercises(&self, exercises: &[String]) -> Vec<String> {
        let mut matched = Vec::new();

        for part in &self.body_parts {
            let trains = part.exercises.iter().any(|ex| {
                exercises.iter().any(|name| {
                    name.eq_ignore_ascii_case(&ex.id) || name.eq_ignore_ascii_case(&ex.name)
                })
            });
            if trains && !matched.contains(&part.id) {
                matched.push(part.id.clone());
            }
        }

        matched
    }
}

fn body_part(id: &str, name: &str, exercises: &[(&str, &str)]) -> BodyPart {
    BodyPart {
        id: id.to_string(),
        name: name.to_string(),
        exercises: exercises
            .iter()
            .map(|(ex_id, ex_name)| ExerciseRef {
                id: (*ex_id).to_string(),
                name: (*ex_name).to_string(),
            })
            .collect(),
    }
}

/// The built-in quest template catalog.
pub fn builtin_templates() -> Vec<QuestTemplate> {
    vec![
        QuestTemplate {
            id: "chest-week".to_string(),
            body_part_id: "chest".to_string(),
            title: "Chest Opener".to_string(),
            description: "A week of consistent chest work".to_string(),
            difficulty: Difficulty::Easy,
            xp_reward: 150,
            duration_days: 7,
            objectives: vec![
                workout_objective("Complete 3 chest workouts", 3, 50),
                ObjectiveTemplate {
                    kind: ObjectiveKind::Hydration,
                    title: "Hit your water target 5 days".to_string(),
                    target: 5,
                    unit: "days".to_string(),
                    xp_reward: 25,
                    linked_exercise_ids: None,
                },
            ],
        },
        QuestTemplate {
            id: "back-builder".to_string(),
            body_part_id: "back".to_string(),
            title: "Back Builder".to_string(),
            description: "Two weeks of pulling strength".to_string(),
            difficulty: Difficulty::Medium,
            xp_reward: 250,
            duration_days: 14,
            objectives: vec![
                workout_objective("Complete 5 back workouts", 5, 75),
                ObjectiveTemplate {
                    kind: ObjectiveKind::Streak,
                    title: "Hold a 5-day streak".to_string(),
                    target: 5,
                    unit: "days".to_string(),
                    xp_reward: 50,
                    linked_exercise_ids: None,
                },
            ],
        },
        QuestTemplate {
            id: "leg-day-legend".to_string(),
            body_part_id: "legs".to_string(),
            title: "Leg Day Legend".to_string(),
            description: "Never skip leg day for two weeks".to_string(),
            difficulty: Difficulty::Hard,
            xp_reward: 350,
            duration_days: 14,
            objectives: vec![
                ObjectiveTemplate {
                    kind: ObjectiveKind::Workout,
                    title: "Complete 6 leg workouts".to_string(),
                    target: 6,
                    unit: "workouts".to_string(),
                    xp_reward: 100,
                    linked_exercise_ids: Some(vec!["squat".to_string(), "deadlift".to_string()]),
                },
                ObjectiveTemplate {
                    kind: ObjectiveKind::Recovery,
                    title: "Sleep 7+ hours on 10 nights".to_string(),
                    target: 10,
                    unit: "nights".to_string(),
                    xp_reward: 50,
                    linked_exercise_ids: None,
                },
            ],
        },
        QuestTemplate {
            id: "shoulder-season".to_string(),
            body_part_id: "shoulders".to_string(),
            title: "Shoulder Season".to_string(),
            description: "Build pressing consistency".to_string(),
            difficulty: Difficulty::Medium,
            xp_reward: 200,
            duration_days: 10,
            objectives: vec![
                workout_objective("Complete 4 shoulder workouts", 4, 60),
                ObjectiveTemplate {
                    kind: ObjectiveKind::Nutrition,
                    title: "Meet your protein target 7 days".to_string(),
                    target: 7,
                    unit: "days".to_string(),
                    xp_reward: 40,
                    linked_exercise_ids: None,
                },
            ],
        },
        QuestTemplate {
            id: "core-commitment".to_string(),
            body_part_id: "core".to_string(),
            title: "Core Commitment".to_string(),
            description: "A week of daily core work".to_string(),
            difficulty: Difficulty::Easy,
            xp_reward: 150,
            duration_days: 7,
            objectives: vec![
                workout_objective("Complete 5 core workouts", 5, 60),
                ObjectiveTemplate {
                    kind: ObjectiveKind::Streak,
                    title: "Hold a 7-day streak".to_string(),
                    target: 7,
                    unit: "days".to_string(),
                    xp_reward: 60,
                    linked_exercise_ids: None,
                },
            ],
        },
        QuestTemplate {
            id: "arm-annex".to_string(),
            body_part_id: "arms".to_string(),
            title: "Arm Annex".to_string(),
            description: "Ten days of arm focus and recovery habits".to_string(),
            difficulty: Difficulty::Medium,
            xp_reward: 220,
            duration_days: 10,
            objectives: vec![
                workout_objective("Complete 4 arm workouts", 4, 60),
                ObjectiveTemplate {
                    kind: ObjectiveKind::Hydration,
                    title: "Hit your water target 7 days".to_string(),
                    target: 7,
                    unit: "days".to_string(),
                    xp_reward: 35,
                    linked_exercise_ids: None,
                },
                ObjectiveTemplate {
                    kind: ObjectiveKind::Recovery,
                    title: "Sleep 7+ hours on 6 nights".to_string(),
                    target: 6,
                    unit: "nights".to_string(),
                    xp_reward: 35,
                    linked_exercise_ids: None,
                },
            ],
        },
    ]
}

fn workout_objective(title: &str, target: u32, xp: i64) -> ObjectiveTemplate {
    ObjectiveTemplate {
        kind: ObjectiveKind::Workout,
        title: title.to_string(),
        target,
        unit: "workouts".to_string(),
        xp_reward: xp,
        linked_exercise_ids: None,
    }
}

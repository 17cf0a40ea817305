//! Completion percentages derived from a topic set and a `ProgressRecord`.
//!
//! Everything here is a pure function of its inputs; callers recompute after
//! every mutation instead of caching.

use serde::{Deserialize, Serialize};

use crate::model::{ProgressRecord, Topic, UnitId};
use crate::syllabus::Syllabus;

/// `round(100 * completed / total)` with halves rounded up, `0` for an empty set.
#[must_use]
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u128;
    let total = total as u128;
    // floor(100c/t + 1/2) == floor((200c + t) / 2t)
    let rounded = (200 * completed + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Completed/total counts for a subset of topics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub completed: usize,
    pub percentage: u8,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            total,
            completed,
            percentage: percentage(completed, total),
        }
    }

    #[must_use]
    pub fn of<'a>(topics: impl IntoIterator<Item = &'a Topic>, record: &ProgressRecord) -> Self {
        let (completed, total) = topics.into_iter().fold((0, 0), |(done, all), topic| {
            let done = if record.is_completed(&topic.key()) {
                done + 1
            } else {
                done
            };
            (done, all + 1)
        });
        Self::new(completed, total)
    }
}

#[must_use]
pub fn overall_percentage<'a>(
    topics: impl IntoIterator<Item = &'a Topic>,
    record: &ProgressRecord,
) -> u8 {
    ProgressSnapshot::of(topics, record).percentage
}

/// Same as [`overall_percentage`], restricted to topics of `unit_id`.
#[must_use]
pub fn unit_percentage<'a>(
    topics: impl IntoIterator<Item = &'a Topic>,
    record: &ProgressRecord,
    unit_id: &UnitId,
) -> u8 {
    let in_unit = topics
        .into_iter()
        .filter(|topic| topic.unit_id() == unit_id);
    ProgressSnapshot::of(in_unit, record).percentage
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitProgress {
    pub unit_id: UnitId,
    pub snapshot: ProgressSnapshot,
}

/// Every number the checklist displays, recomputed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub overall: ProgressSnapshot,
    pub units: Vec<UnitProgress>,
}

impl ProgressReport {
    #[must_use]
    pub fn compute(syllabus: &Syllabus, record: &ProgressRecord) -> Self {
        let units = syllabus
            .units()
            .iter()
            .map(|unit| UnitProgress {
                unit_id: unit.id().clone(),
                snapshot: ProgressSnapshot::of(unit.topics(), record),
            })
            .collect();
        Self {
            overall: ProgressSnapshot::of(syllabus.topics(), record),
            units,
        }
    }

    /// Snapshot for one unit; unknown units read as empty.
    #[must_use]
    pub fn unit(&self, unit_id: &UnitId) -> ProgressSnapshot {
        self.units
            .iter()
            .find(|unit| &unit.unit_id == unit_id)
            .map(|unit| unit.snapshot)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        motivational_message(self.overall.percentage)
    }
}

#[must_use]
pub fn motivational_message(percentage: u8) -> &'static str {
    match percentage {
        0 => "Let's start your Data Mining journey!",
        1..=24 => "Great start! Keep going!",
        25..=49 => "You're making excellent progress!",
        50..=74 => "More than halfway there! You're doing amazing!",
        75..=99 => "Almost there! Final push!",
        _ => "Congratulations! You've completed everything!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TopicId, TopicKey, Unit};

    /// 5 units x 4 topics, ids `unit{n}` / `topic{m}`.
    fn five_by_four() -> Syllabus {
        let units = (1..=5)
            .map(|u| {
                let unit_id = UnitId::new(format!("unit{u}")).unwrap();
                let topics = (1..=4)
                    .map(|t| {
                        Topic::new(
                            unit_id.clone(),
                            TopicId::new(format!("topic{t}")).unwrap(),
                            format!("Topic {u}.{t}"),
                            None,
                        )
                    })
                    .collect();
                Unit::new(unit_id, format!("Unit {u}"), None, topics)
            })
            .collect();
        Syllabus::new("Five by four", units).unwrap()
    }

    fn key(unit: u32, topic: u32) -> TopicKey {
        TopicKey::new(
            &UnitId::new(format!("unit{unit}")).unwrap(),
            &TopicId::new(format!("topic{topic}")).unwrap(),
        )
    }

    fn uid(unit: u32) -> UnitId {
        UnitId::new(format!("unit{unit}")).unwrap()
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 200), 1); // 0.5
        assert_eq!(percentage(1, 201), 0);
        assert_eq!(percentage(7, 7), 100);
    }

    #[test]
    fn percentage_matches_float_formula() {
        for total in 1..=60_usize {
            for completed in 0..=total {
                let expected = (100.0 * completed as f64 / total as f64 + 0.5).floor() as u8;
                assert_eq!(percentage(completed, total), expected, "{completed}/{total}");
            }
        }
    }

    #[test]
    fn empty_topic_set_is_zero() {
        let record = ProgressRecord::new().with_topic(&key(1, 1), true);
        assert_eq!(overall_percentage(std::iter::empty(), &record), 0);
    }

    #[test]
    fn five_by_four_scenario() {
        let syllabus = five_by_four();
        let record = [key(1, 1), key(1, 2), key(2, 1), key(2, 2), key(2, 3)]
            .into_iter()
            .map(|k| (k, true))
            .collect::<ProgressRecord>();

        assert_eq!(overall_percentage(syllabus.topics(), &record), 25);
        assert_eq!(unit_percentage(syllabus.topics(), &record, &uid(1)), 50);
        assert_eq!(unit_percentage(syllabus.topics(), &record, &uid(2)), 75);
        assert_eq!(unit_percentage(syllabus.topics(), &record, &uid(3)), 0);

        let report = ProgressReport::compute(&syllabus, &record);
        assert_eq!(report.overall, ProgressSnapshot::new(5, 20));
        assert_eq!(report.unit(&uid(1)).percentage, 50);
        assert_eq!(report.units.len(), 5);
    }

    #[test]
    fn unknown_unit_and_stale_keys_do_not_count() {
        let syllabus = five_by_four();
        let record = ProgressRecord::from_json_bytes(br#"{"unit9-topic1": true, "old": true}"#)
            .unwrap()
            .with_topic(&key(1, 1), false);
        assert_eq!(overall_percentage(syllabus.topics(), &record), 0);
        assert_eq!(unit_percentage(syllabus.topics(), &record, &uid(9)), 0);
        let report = ProgressReport::compute(&syllabus, &record);
        assert_eq!(report.unit(&uid(9)), ProgressSnapshot::default());
    }

    #[test]
    fn messages_follow_bands() {
        assert_eq!(motivational_message(0), "Let's start your Data Mining journey!");
        assert_eq!(motivational_message(24), "Great start! Keep going!");
        assert_eq!(motivational_message(25), "You're making excellent progress!");
        assert_eq!(motivational_message(74), "More than halfway there! You're doing amazing!");
        assert_eq!(motivational_message(99), "Almost there! Final push!");
        assert_eq!(motivational_message(100), "Congratulations! You've completed everything!");
    }
}

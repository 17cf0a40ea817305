use std::path::Path;

use tracker_core::model::{ProgressRecord, TopicId, UnitId};
use tracker_core::progress::ProgressReport;
use tracker_core::syllabus::Syllabus;
use url::Url;

/// Header numbers: bar width, counters and the encouragement line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverallVm {
    pub percentage: u8,
    pub completed: usize,
    pub total: usize,
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicVm {
    pub unit_id: UnitId,
    pub topic_id: TopicId,
    pub label: String,
    pub checked: bool,
    pub video_href: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitVm {
    pub id: UnitId,
    pub title: String,
    pub percentage: u8,
    pub notes_href: Option<String>,
    pub topics: Vec<TopicVm>,
}

/// Everything the checklist page renders, derived from syllabus + record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistVm {
    pub title: String,
    pub overall: OverallVm,
    pub units: Vec<UnitVm>,
}

/// `file://` link to a unit's notes, if the file exists under `notes_dir`.
fn notes_href(notes_dir: &Path, relative: &str) -> Option<String> {
    let path = notes_dir.join(relative);
    if !path.is_file() {
        return None;
    }
    Url::from_file_path(&path).ok().map(String::from)
}

#[must_use]
pub fn map_checklist(
    syllabus: &Syllabus,
    record: &ProgressRecord,
    notes_dir: &Path,
) -> ChecklistVm {
    let report = ProgressReport::compute(syllabus, record);

    let units = syllabus
        .units()
        .iter()
        .map(|unit| {
            let topics = unit
                .topics()
                .iter()
                .map(|topic| TopicVm {
                    unit_id: topic.unit_id().clone(),
                    topic_id: topic.topic_id().clone(),
                    label: topic.label().to_owned(),
                    checked: record.is_completed(&topic.key()),
                    video_href: topic.video_url(),
                })
                .collect();
            UnitVm {
                id: unit.id().clone(),
                title: unit.title().to_owned(),
                percentage: report.unit(unit.id()).percentage,
                notes_href: unit
                    .notes_pdf()
                    .and_then(|relative| notes_href(notes_dir, relative)),
                topics,
            }
        })
        .collect();

    ChecklistVm {
        title: syllabus.title().to_owned(),
        overall: OverallVm {
            percentage: report.overall.percentage,
            completed: report.overall.completed,
            total: report.overall.total,
            message: report.message(),
        },
        units,
    }
}

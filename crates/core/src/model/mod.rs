mod ids;
mod record;
mod session;
mod theme;
mod topic;

pub use ids::{IdError, TopicId, TopicKey, UnitId};
pub use record::{ProgressRecord, RecordCodecError};
pub use session::StudySession;
pub use theme::{Theme, ThemeParseError};
pub use topic::{Topic, Unit, video_search_url};

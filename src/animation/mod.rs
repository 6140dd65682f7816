pub mod ease;
pub mod pose;
pub mod timeline;

pub use ease::Ease;
pub use pose::PoseBlend;
pub use timeline::{PlayMode, PlayState, Step, Timeline, TimelineBuilder};

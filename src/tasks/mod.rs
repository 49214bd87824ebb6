/// Task as submitted by a client. Only its title is checked here.
#[derive(Debug, Clone, Default)]
pub struct Task {
    pub title: String, // 1-10 chars
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

use super::{FieldCheck, ValidationErrors};
use crate::tasks::Task;

pub const TITLE_MAX_LEN: usize = 10;

pub trait TaskValidator: Send + Sync {
    fn validate_task(&self, task: &Task) -> Result<(), ValidationErrors>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTaskValidator;

impl StandardTaskValidator {
    pub fn new() -> Self {
        Self
    }
}

impl TaskValidator for StandardTaskValidator {
    fn validate_task(&self, task: &Task) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        FieldCheck::new(&task.title)
            .required("title is required")
            .rune_length(1, TITLE_MAX_LEN, "title must be at most 10 characters")
            .record("title", &mut errors);
        errors.into_result()
    }
}

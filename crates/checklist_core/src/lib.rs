pub mod config;
pub mod error;
pub mod list;
pub mod model;
pub mod session;
pub mod storage;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Filter, Task};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: 1,
            text: "buy milk".to_string(),
            completed: false,
            created_at: "2026-08-01T09:30:00Z".to_string(),
        };

        assert_eq!(task.id, 1);
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.created_at, "2026-08-01T09:30:00Z");
    }

    #[test]
    fn filter_defaults_to_all() {
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("text is required");
        assert_eq!(err.code(), "invalid_input");
        assert!(!err.is_storage());
        assert!(AppError::io("disk full").is_storage());
    }
}

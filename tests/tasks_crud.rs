#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todoai::db::db::Db;
    use todoai::db::tasks::Tasks;
    use todoai::db::users::Users;
    use todoai::libs::error::TaskError;
    use todoai::libs::task::{Task, TaskDraft, TaskFilter};

    struct TaskTestContext {
        temp_dir: TempDir,
        user_id: i32,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("todoai.db")).unwrap();
            let user = Users::from_db(db).create("Ana", "ana@example.com", "secret").unwrap();
            TaskTestContext {
                temp_dir,
                user_id: user.id,
            }
        }
    }

    impl TaskTestContext {
        fn tasks(&self) -> Tasks {
            Tasks::from_db(Db::open(self.temp_dir.path().join("todoai.db")).unwrap())
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 22).unwrap()
    }

    fn task(id: &str, start_time: &str, duration: i64) -> Task {
        let mut draft = TaskDraft::new(&format!("task {}", id), "2025-03-22", start_time, duration);
        draft.id = Some(id.to_string());
        draft.into_task(day()).unwrap()
    }

    fn task_error(err: &anyhow::Error) -> &TaskError {
        err.downcast_ref::<TaskError>().expect("expected a TaskError")
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_add_and_fetch(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("2", "11:00", 30)).unwrap();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        let all = tasks.fetch(ctx.user_id, TaskFilter::All).unwrap();
        let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let other_day = NaiveDate::from_ymd_opt(2025, 3, 23).unwrap();
        assert!(tasks.fetch(ctx.user_id, TaskFilter::Date(other_day)).unwrap().is_empty());
        assert_eq!(tasks.fetch(ctx.user_id, TaskFilter::Date(day())).unwrap().len(), 2);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_add_reports_overlap_without_rejecting(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        let added = tasks.add(ctx.user_id, &task("2", "09:30", 30)).unwrap();
        assert_eq!(added.overlaps.map(|t| t.id), Some("1".to_string()));
        assert_eq!(tasks.fetch(ctx.user_id, TaskFilter::All).unwrap().len(), 2);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_strict_add_rejects_overlap(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks().strict_add(true);
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        let err = tasks.add(ctx.user_id, &task("2", "09:30", 30)).unwrap_err();
        assert_eq!(task_error(&err).code(), "TASK_OVERLAP");
        assert_eq!(tasks.fetch(ctx.user_id, TaskFilter::All).unwrap().len(), 1);

        // touching the end of task 1 is fine
        tasks.add(ctx.user_id, &task("3", "10:00", 30)).unwrap();
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_add_many_is_all_or_nothing(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks().strict_add(true);
        let batch = vec![task("1", "09:00", 60), task("2", "10:00", 60), task("3", "10:30", 30)];

        let err = tasks.add_many(ctx.user_id, &batch).unwrap_err();
        assert_eq!(task_error(&err).code(), "TASK_OVERLAP");
        assert!(tasks.fetch(ctx.user_id, TaskFilter::All).unwrap().is_empty());

        let added = tasks.add_many(ctx.user_id, &batch[..2]).unwrap();
        assert_eq!(added.len(), 2);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_duplicate_id_is_rejected(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        let err = tasks.add(ctx.user_id, &task("1", "14:00", 60)).unwrap_err();
        assert_eq!(task_error(&err), &TaskError::TaskExists("1".to_string()));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_set_completed(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        let done = tasks.set_completed(ctx.user_id, "1", true).unwrap();
        assert!(done.completed);
        assert_eq!(done.start_time, "09:00");

        let reopened = tasks.set_completed(ctx.user_id, "1", false).unwrap();
        assert!(!reopened.completed);

        let err = tasks.set_completed(ctx.user_id, "missing", true).unwrap_err();
        assert_eq!(task_error(&err).code(), "NOT_FOUND");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_fully_moves_task(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();
        tasks.add(ctx.user_id, &task("2", "11:00", 60)).unwrap();

        let mut moved = task("1", "09:15", 60);
        moved.text = "Deep work".to_string();
        moved.completed = true;
        let saved = tasks.update_fully(ctx.user_id, "1", &moved).unwrap();
        assert_eq!(saved, moved);

        let stored = tasks.get(ctx.user_id, "1").unwrap().unwrap();
        assert_eq!(stored.start_time, "09:15");
        assert_eq!(stored.text, "Deep work");
        assert!(stored.completed);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_fully_conflict_leaves_state_unchanged(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();
        tasks.add(ctx.user_id, &task("2", "11:00", 60)).unwrap();

        let err = tasks.update_fully(ctx.user_id, "2", &task("2", "09:30", 60)).unwrap_err();
        match task_error(&err) {
            TaskError::TaskOverlap { conflicting_id, .. } => assert_eq!(conflicting_id, "1"),
            other => panic!("unexpected error {:?}", other),
        }

        let stored = tasks.get(ctx.user_id, "2").unwrap().unwrap();
        assert_eq!(stored.start_time, "11:00");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_fully_to_another_day(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();
        tasks.add(ctx.user_id, &task("2", "11:00", 60)).unwrap();

        let mut next_day = task("2", "09:00", 60);
        next_day.date = NaiveDate::from_ymd_opt(2025, 3, 23).unwrap();
        tasks.update_fully(ctx.user_id, "2", &next_day).unwrap();

        assert_eq!(tasks.fetch(ctx.user_id, TaskFilter::Date(day())).unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_fully_missing_task_is_not_found(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        // overlaps task 1, but the missing id is reported first
        let err = tasks.update_fully(ctx.user_id, "nope", &task("nope", "09:00", 60)).unwrap_err();
        assert_eq!(task_error(&err), &TaskError::task_not_found("nope"));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_fully_rejects_malformed_time(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        let mut bad = task("1", "09:00", 60);
        bad.start_time = "9:xx".to_string();
        let err = tasks.update_fully(ctx.user_id, "1", &bad).unwrap_err();
        assert_eq!(task_error(&err).code(), "INVALID_TIME_FORMAT");
        assert_eq!(tasks.get(ctx.user_id, "1").unwrap().unwrap().start_time, "09:00");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_start_times_are_stored_zero_padded(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("a", "10:00", 30)).unwrap();

        let mut unpadded = task("b", "09:00", 30);
        unpadded.start_time = "9:00".to_string();
        let added = tasks.add(ctx.user_id, &unpadded).unwrap();
        assert_eq!(added.task.start_time, "09:00");

        let order: Vec<(String, String)> = tasks
            .fetch(ctx.user_id, TaskFilter::Date(day()))
            .unwrap()
            .into_iter()
            .map(|t| (t.id, t.start_time))
            .collect();
        assert_eq!(
            order,
            vec![("b".to_string(), "09:00".to_string()), ("a".to_string(), "10:00".to_string())]
        );

        let mut moved = task("a", "07:00", 30);
        moved.start_time = "7:00".to_string();
        let saved = tasks.update_fully(ctx.user_id, "a", &moved).unwrap();
        assert_eq!(saved.start_time, "07:00");
        assert_eq!(tasks.get(ctx.user_id, "a").unwrap().unwrap().start_time, "07:00");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();

        let deleted = tasks.delete(ctx.user_id, "1").unwrap();
        assert_eq!(deleted.id, "1");
        assert!(tasks.fetch(ctx.user_id, TaskFilter::All).unwrap().is_empty());

        let err = tasks.delete(ctx.user_id, "1").unwrap_err();
        assert_eq!(task_error(&err).code(), "NOT_FOUND");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_unknown_user_is_not_found(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.tasks();
        let err = tasks.fetch(ctx.user_id + 100, TaskFilter::All).unwrap_err();
        assert_eq!(task_error(&err), &TaskError::user_not_found(ctx.user_id + 100));

        let err = tasks.update_fully(ctx.user_id + 100, "1", &task("1", "09:00", 60)).unwrap_err();
        assert_eq!(task_error(&err).code(), "NOT_FOUND");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_tasks_are_scoped_per_user(ctx: &mut TaskTestContext) {
        let db = Db::open(ctx.temp_dir.path().join("todoai.db")).unwrap();
        let other = Users::from_db(db).create("Ben", "ben@example.com", "secret").unwrap();

        let mut tasks = ctx.tasks().strict_add(true);
        tasks.add(ctx.user_id, &task("1", "09:00", 60)).unwrap();
        // same id and slot for another user is neither a duplicate nor a conflict
        tasks.add(other.id, &task("1", "09:00", 60)).unwrap();

        assert_eq!(tasks.fetch(other.id, TaskFilter::All).unwrap().len(), 1);
        assert_eq!(tasks.fetch(ctx.user_id, TaskFilter::All).unwrap().len(), 1);
    }
}

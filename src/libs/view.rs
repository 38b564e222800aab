use super::task::Task;
use super::time::format_minutes;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints tasks as a table ordered the way they were given.
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "START", "END", "MIN", "DONE", "TASK"]);
        for task in tasks {
            let end = task
                .interval()
                .map(|(_, end)| format_minutes(end))
                .unwrap_or_else(|_| "--:--".to_string());
            table.add_row(row![
                short_id(&task.id),
                task.date_string(),
                task.start_time,
                end,
                task.duration,
                if task.completed { "✔" } else { "" },
                task.text
            ]);
        }
        table.printstd();

        Ok(())
    }
}

/// Generated ids are UUIDs; the first block is enough to tell tasks apart
/// on screen and is accepted as a prefix by the task commands.
fn short_id(id: &str) -> &str {
    match id.split_once('-') {
        Some((head, _)) if head.len() >= 8 => head,
        _ => id,
    }
}

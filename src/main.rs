mod telemetry;

use chrono::Duration;
use telemetry::{get_subscriber, init_subscriber};
use today_api::ReminderListDataSource;
use today_domain::{FilterPolicy, Reminder};
use today_infra::setup_context;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let subscriber = get_subscriber("today".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();
    let now = context.sys.now();

    let list = ReminderListDataSource::new(context);
    let (_, mut events) = list.subscribe();
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!("List event: {:?}", event);
        }
    });
    if !list.sync().await {
        warn!("Access to reminders was not granted, nothing to show");
        return;
    }

    let mut editor = list.new_reminder_editor();
    editor.set_title("Submit reimbursement report");
    editor.set_notes("Don't forget about taxi receipts");
    let drafts = vec![
        editor.into_reminder(),
        Reminder::new("Code review", now + Duration::hours(2)),
        Reminder::new("Pick up new contacts", now + Duration::days(1)),
        Reminder::new("Add notes to retrospective", now + Duration::days(3))
            .with_notes("Collaborate with project manager"),
    ];
    for draft in drafts {
        match list.add(draft).await {
            Ok(row) => info!("Added reminder at row {:?}", row),
            Err(e) => warn!("Could not add reminder: {}", e),
        }
    }

    list.set_filter(FilterPolicy::All);
    if let Err(e) = list.toggle_complete(0).await {
        warn!("Could not complete reminder: {}", e);
    }

    for policy in FilterPolicy::ALL_CASES.iter() {
        list.set_filter(*policy);
        info!(
            "{:?}: {} reminders, {:.0}% complete",
            policy,
            list.count(),
            list.percent_complete() * 100.0
        );
        for (row, reminder) in list.filtered_reminders().iter().enumerate() {
            info!(
                "  {} | {}",
                reminder.title,
                list.display_text(row).unwrap_or_default()
            );
        }
    }

    if let Some(detail) = list.detail(0) {
        for row in 0..detail.row_count() {
            if let Some(text) = detail.display_text(row) {
                info!("Detail: {}", text);
            }
        }
    }

    list.set_filter(FilterPolicy::All);
    match list.delete(list.count().saturating_sub(1)).await {
        Ok(()) => info!("Deleted last reminder, {} left", list.count()),
        Err(e) => warn!("Could not delete reminder: {}", e),
    }

    list.close();
}

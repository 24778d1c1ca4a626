use std::time::Duration;
use today_api::ListEvent;
use today_domain::Reminder;
use tokio::sync::mpsc::UnboundedReceiver;

/// Waits for the next list event, failing the test if none arrives
pub async fn next_event(rx: &mut UnboundedReceiver<ListEvent>) -> ListEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("Expected a list event in time")
        .expect("Event bus to be open")
}

pub fn drain(rx: &mut UnboundedReceiver<ListEvent>) -> Vec<ListEvent> {
    let mut events = Vec::new();
    while let Ok(e) = rx.try_recv() {
        events.push(e);
    }
    events
}

pub fn titles(reminders: &[Reminder]) -> Vec<String> {
    reminders.iter().map(|r| r.title.clone()).collect()
}

pub fn sorted_by_id(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders.sort_by_key(|r| r.id.clone());
    reminders
}

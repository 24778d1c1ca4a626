mod helpers;

use helpers::setup::{at, setup_gated};
use helpers::utils::{next_event, sorted_by_id, titles};
use today_api::{ListError, ListEvent, ReminderListDataSource};
use today_domain::{Reminder, ID};
use today_infra::InMemoryNativeStore;

fn rename_externally(native: &InMemoryNativeStore, id: &ID, title: &str) {
    let mut record = native
        .snapshot()
        .into_iter()
        .find(|r| r.identifier == *id)
        .expect("Record in store");
    record.title = title.into();
    native.commit_external(record);
}

#[tokio::test]
async fn test_reload_during_update_is_not_overwritten_by_stale_write_back() {
    let (native, gated, ctx) = setup_gated();
    ctx.store
        .save(&Reminder::new("Original", at(19, 9)))
        .await
        .expect("To seed reminder");
    let list = ReminderListDataSource::start(ctx).await;
    list.close();
    let target = list.reminder_at(0).unwrap();

    gated.hold_next_write();
    let mut edited = target.clone();
    edited.title = "Local edit".into();
    let update = {
        let list = list.clone();
        tokio::spawn(async move { list.update(edited, 0).await })
    };
    gated.wait_until_write_pending().await;

    rename_externally(&native, &target.id, "Changed elsewhere");
    assert!(list.sync().await);
    assert_eq!(list.reminder_at(0).unwrap().title, "Changed elsewhere");

    gated.release();
    update.await.unwrap().expect("Save to succeed");

    // The reload replaced the collection while the save was in flight, so
    // the write back is dropped
    assert_eq!(list.reminder_at(0).unwrap().title, "Changed elsewhere");
    assert_eq!(list.all_reminders().len(), 1);

    // Last write wins in the store, the next reload shows it
    assert!(list.sync().await);
    assert_eq!(list.reminder_at(0).unwrap().title, "Local edit");
}

#[tokio::test]
async fn test_list_converges_with_store_after_racing_update() {
    let (native, gated, ctx) = setup_gated();
    let store = ctx.store.clone();
    for (title, hour) in vec![("First", 9), ("Second", 10)] {
        store
            .save(&Reminder::new(title, at(19, hour)))
            .await
            .expect("To seed reminder");
    }
    let list = ReminderListDataSource::start(ctx).await;
    let (_, mut rx) = list.subscribe();
    let target = list.reminder_at(1).unwrap();

    gated.hold_next_write();
    let mut edited = target.clone();
    edited.title = "Second, edited here".into();
    let update = {
        let list = list.clone();
        tokio::spawn(async move { list.update(edited, 1).await })
    };
    gated.wait_until_write_pending().await;

    rename_externally(&native, &target.id, "Second, edited elsewhere");
    assert_eq!(next_event(&mut rx).await, ListEvent::CollectionReloaded);
    assert_eq!(
        list.reminder_at(1).unwrap().title,
        "Second, edited elsewhere"
    );

    gated.release();
    update.await.unwrap().expect("Save to succeed");
    // Our own commit is signalled like any other change
    assert_eq!(next_event(&mut rx).await, ListEvent::CollectionReloaded);

    assert_eq!(list.reminder_at(1).unwrap().title, "Second, edited here");
    assert_eq!(
        sorted_by_id(list.all_reminders()),
        sorted_by_id(store.fetch_all().await)
    );
}

#[tokio::test]
async fn test_update_does_not_resurrect_reminder_deleted_meanwhile() {
    let (native, gated, ctx) = setup_gated();
    let store = ctx.store.clone();
    for (title, hour) in vec![("Keep", 9), ("Doomed", 10)] {
        store
            .save(&Reminder::new(title, at(19, hour)))
            .await
            .expect("To seed reminder");
    }
    let list = ReminderListDataSource::start(ctx).await;
    list.close();
    let doomed = list.reminder_at(1).unwrap();

    gated.hold_next_write();
    let update = {
        let list = list.clone();
        tokio::spawn(async move { list.toggle_complete(1).await })
    };
    gated.wait_until_write_pending().await;

    list.delete(1).await.expect("Delete to succeed");
    gated.release();
    assert_eq!(update.await.unwrap(), Err(ListError::StoreFailure));

    let records = native.snapshot();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Keep");

    // Nothing comes back with the next reload either
    assert!(list.sync().await);
    let all = list.all_reminders();
    assert_eq!(all.len(), 1);
    assert!(all.iter().all(|r| r.id != doomed.id));
    assert_eq!(list.reminder_at(0).unwrap().title, "Keep");
    assert!(!list.reminder_at(0).unwrap().is_complete);
}

#[tokio::test]
async fn test_update_of_reminder_deleted_by_another_app_fails() {
    let (native, _, ctx) = setup_gated();
    ctx.store
        .save(&Reminder::new("Gone elsewhere", at(19, 9)))
        .await
        .expect("To seed reminder");
    let list = ReminderListDataSource::start(ctx).await;
    list.close();
    let gone = list.reminder_at(0).unwrap();

    native.remove_external(&gone.id);
    assert_eq!(list.toggle_complete(0).await, Err(ListError::StoreFailure));
    assert!(native.snapshot().is_empty());

    assert!(list.sync().await);
    assert!(list.all_reminders().is_empty());
}

#[tokio::test]
async fn test_add_during_reload_keeps_newest_first() {
    let (_, _, ctx) = setup_gated();
    ctx.store
        .save(&Reminder::new("Already there", at(19, 10)))
        .await
        .expect("To seed reminder");
    let list = ReminderListDataSource::start(ctx).await;
    let (_, mut rx) = list.subscribe();

    let row = list
        .add(Reminder::new("Only once", at(19, 14)))
        .await
        .unwrap();
    assert_eq!(row, Some(1));
    // The commit of the add triggers a reload that already carries it
    assert_eq!(next_event(&mut rx).await, ListEvent::CollectionReloaded);
    assert_eq!(
        titles(&list.all_reminders()),
        vec!["Only once", "Already there"]
    );
}

#[tokio::test]
async fn test_concurrent_toggles_on_different_rows() {
    let (_, _, ctx) = setup_gated();
    let store = ctx.store.clone();
    for (title, hour) in vec![("A", 9), ("B", 10), ("C", 11)] {
        store
            .save(&Reminder::new(title, at(19, hour)))
            .await
            .expect("To seed reminder");
    }
    let list = ReminderListDataSource::start(ctx).await;
    list.close();

    let (a, c) = futures::join!(list.toggle_complete(0), list.toggle_complete(2));
    a.unwrap();
    c.unwrap();

    let completed = list
        .filtered_reminders()
        .into_iter()
        .map(|r| r.is_complete)
        .collect::<Vec<_>>();
    assert_eq!(completed, vec![true, false, true]);
}

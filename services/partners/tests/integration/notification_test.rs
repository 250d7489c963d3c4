use chrono::{Duration, Utc};
use uuid::Uuid;

use troth_domain::pagination::PageRequest;
use troth_partners::error::PartnersServiceError;
use troth_partners::usecase::notification::{GetNotificationsUseCase, MarkNotificationReadUseCase};

use crate::helpers::{MockStore, notification_for};

#[tokio::test]
async fn should_list_notifications_newest_first() {
    let store = MockStore::new();
    let user = Uuid::new_v4();
    let now = Utc::now();
    store.notifications.lock().unwrap().extend([
        notification_for(user, "invitation_accepted", now - Duration::hours(2)),
        notification_for(user, "partner_disconnected", now),
        notification_for(user, "invitation_declined", now - Duration::hours(1)),
        notification_for(Uuid::new_v4(), "invitation_accepted", now),
    ]);

    let items = GetNotificationsUseCase {
        notifications: store.clone(),
    }
    .execute(user, false, PageRequest::default())
    .await
    .expect("list should succeed");

    let kinds: Vec<&str> = items.iter().map(|n| n.kind.as_str()).collect();
    assert_eq!(
        kinds,
        ["partner_disconnected", "invitation_declined", "invitation_accepted"]
    );
}

#[tokio::test]
async fn should_filter_unread_notifications() {
    let store = MockStore::new();
    let user = Uuid::new_v4();
    let now = Utc::now();
    let mut read = notification_for(user, "invitation_accepted", now - Duration::hours(1));
    read.is_read = true;
    store.notifications.lock().unwrap().extend([
        read,
        notification_for(user, "invitation_declined", now),
    ]);

    let items = GetNotificationsUseCase {
        notifications: store.clone(),
    }
    .execute(user, true, PageRequest::default())
    .await
    .expect("list should succeed");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, "invitation_declined");
}

#[tokio::test]
async fn should_page_notifications() {
    let store = MockStore::new();
    let user = Uuid::new_v4();
    let now = Utc::now();
    for i in 0..5 {
        store
            .notifications
            .lock()
            .unwrap()
            .push(notification_for(user, "invitation_accepted", now - Duration::minutes(i)));
    }

    let usecase = GetNotificationsUseCase {
        notifications: store.clone(),
    };
    let page1 = usecase
        .execute(
            user,
            false,
            PageRequest {
                per_page: 2,
                page: 1,
            },
        )
        .await
        .expect("page 1 should succeed");
    let page3 = usecase
        .execute(
            user,
            false,
            PageRequest {
                per_page: 2,
                page: 3,
            },
        )
        .await
        .expect("page 3 should succeed");

    assert_eq!(page1.len(), 2);
    assert_eq!(page3.len(), 1);
}

#[tokio::test]
async fn should_mark_own_notification_read() {
    let store = MockStore::new();
    let user = Uuid::new_v4();
    let notification = notification_for(user, "invitation_accepted", Utc::now());
    store.notifications.lock().unwrap().push(notification.clone());

    MarkNotificationReadUseCase {
        notifications: store.clone(),
    }
    .execute(user, notification.id)
    .await
    .expect("mark read should succeed");

    assert!(store.notifications_for(user)[0].is_read);
}

#[tokio::test]
async fn should_hide_other_users_notification_from_mark_read() {
    let store = MockStore::new();
    let owner = Uuid::new_v4();
    let notification = notification_for(owner, "invitation_accepted", Utc::now());
    store.notifications.lock().unwrap().push(notification.clone());

    let err = MarkNotificationReadUseCase {
        notifications: store.clone(),
    }
    .execute(Uuid::new_v4(), notification.id)
    .await
    .expect_err("foreign notification must not be markable");

    assert!(matches!(err, PartnersServiceError::NotFound), "got {err:?}");
    assert!(!store.notifications_for(owner)[0].is_read);
}

// tests/subscription_registry.rs
use newsroom::application::{
    commands::{
        newsletters::CreateNewsletterCommand,
        subscriptions::{SubscribeCommand, SubscriptionTargetRef, UnsubscribeCommand},
    },
    error::ApplicationError,
};
use newsroom::domain::user::Role;

mod support;

use support::TestApp;

#[tokio::test]
async fn subscribing_twice_keeps_one_edge() {
    let app = TestApp::new();
    let owner = app.user("tide", Role::Publisher, None).await;
    let daily = app.publisher(&owner, "Daily Tide").await;
    let reader = app.reader("rita").await;
    let commands = &app.services.subscription_commands;
    let target = SubscriptionTargetRef::Publisher(daily.id);

    let first = commands
        .subscribe(&reader.user, SubscribeCommand { target })
        .await
        .unwrap();
    let second = commands
        .subscribe(&reader.user, SubscribeCommand { target })
        .await
        .unwrap();
    assert!(first.changed && first.subscribed);
    assert!(!second.changed && second.subscribed);

    let listed = app
        .services
        .subscription_queries
        .list_subscriptions(&reader.user)
        .await
        .unwrap();
    assert_eq!(listed.publishers.len(), 1);
    assert_eq!(listed.publishers[0].name, "Daily Tide");
    assert!(listed.journalists.is_empty());
}

#[tokio::test]
async fn unsubscribing_is_idempotent_too() {
    let app = TestApp::new();
    let june = app.journalist("june").await;
    let reader = app.reader("rita").await;
    let commands = &app.services.subscription_commands;
    let target = SubscriptionTargetRef::Journalist(june.id());

    let never_followed = commands
        .unsubscribe(&reader.user, UnsubscribeCommand { target })
        .await
        .unwrap();
    assert!(!never_followed.changed && !never_followed.subscribed);

    commands
        .subscribe(&reader.user, SubscribeCommand { target })
        .await
        .unwrap();
    let removed = commands
        .unsubscribe(&reader.user, UnsubscribeCommand { target })
        .await
        .unwrap();
    assert!(removed.changed);

    let listed = app
        .services
        .subscription_queries
        .list_subscriptions(&reader.user)
        .await
        .unwrap();
    assert!(listed.journalists.is_empty());
}

#[tokio::test]
async fn targets_must_exist_and_journalists_must_be_journalists() {
    let app = TestApp::new();
    let reader = app.reader("rita").await;
    let editor = app.editor("ed").await;
    let commands = &app.services.subscription_commands;

    for target in [
        SubscriptionTargetRef::Publisher(404),
        SubscriptionTargetRef::Journalist(404),
        SubscriptionTargetRef::Newsletter(404),
        SubscriptionTargetRef::Journalist(editor.id()),
    ] {
        let err = commands
            .subscribe(&reader.user, SubscribeCommand { target })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)), "{target:?}: {err:?}");
    }
}

#[tokio::test]
async fn only_readers_hold_subscriptions() {
    let app = TestApp::new();
    let june = app.journalist("june").await;
    let otto = app.journalist("otto").await;
    let editor = app.editor("ed").await;
    let target = SubscriptionTargetRef::Journalist(june.id());

    for actor in [&otto, &editor] {
        let err = app
            .services
            .subscription_commands
            .subscribe(&actor.user, SubscribeCommand { target })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)), "{err:?}");
    }

    let err = app
        .services
        .subscription_queries
        .list_subscriptions(&editor.user)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn listings_cover_both_kinds_in_stable_order() {
    let app = TestApp::new();
    let owner = app.user("tide", Role::Publisher, None).await;
    let other_owner = app.user("gazette", Role::Publisher, None).await;
    let tide = app.publisher(&owner, "Tide").await;
    let gazette = app.publisher(&other_owner, "Gazette").await;
    let june = app.journalist("june").await;
    let abe = app.journalist("abe").await;
    let reader = app.reader("rita").await;

    for target in [
        SubscriptionTargetRef::Publisher(tide.id),
        SubscriptionTargetRef::Journalist(june.id()),
        SubscriptionTargetRef::Publisher(gazette.id),
        SubscriptionTargetRef::Journalist(abe.id()),
    ] {
        app.services
            .subscription_commands
            .subscribe(&reader.user, SubscribeCommand { target })
            .await
            .unwrap();
    }

    let listed = app
        .services
        .subscription_queries
        .list_subscriptions(&reader.user)
        .await
        .unwrap();
    let publishers: Vec<_> = listed.publishers.iter().map(|p| p.name.as_str()).collect();
    let journalists: Vec<_> = listed.journalists.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(publishers, vec!["Gazette", "Tide"]);
    assert_eq!(journalists, vec!["june", "abe"]);
}

#[tokio::test]
async fn readers_follow_newsletters() {
    let app = TestApp::new();
    let june = app.journalist("june").await;
    let reader = app.reader("rita").await;
    let weekly = app
        .services
        .newsletter_commands
        .create_newsletter(
            &june.user,
            CreateNewsletterCommand {
                title: "Weekly".into(),
                content: "Tides and times".into(),
                publisher_id: None,
            },
        )
        .await
        .unwrap();
    let commands = &app.services.subscription_commands;
    let target = SubscriptionTargetRef::Newsletter(weekly.id);

    let first = commands
        .subscribe(&reader.user, SubscribeCommand { target })
        .await
        .unwrap();
    let again = commands
        .subscribe(&reader.user, SubscribeCommand { target })
        .await
        .unwrap();
    assert!(first.changed && !again.changed);

    let listed = app
        .services
        .subscription_queries
        .list_subscriptions(&reader.user)
        .await
        .unwrap();
    assert_eq!(listed.newsletters.len(), 1);
    assert_eq!(listed.newsletters[0].title, "Weekly");
    assert!(listed.publishers.is_empty() && listed.journalists.is_empty());

    let err = commands
        .subscribe(&june.user, SubscribeCommand { target })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let removed = commands
        .unsubscribe(&reader.user, UnsubscribeCommand { target })
        .await
        .unwrap();
    assert!(removed.changed && !removed.subscribed);
    let listed = app
        .services
        .subscription_queries
        .list_subscriptions(&reader.user)
        .await
        .unwrap();
    assert!(listed.newsletters.is_empty());
}

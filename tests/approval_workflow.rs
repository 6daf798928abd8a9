// tests/approval_workflow.rs
use std::sync::Arc;

use newsroom::application::{
    commands::articles::{
        ApproveArticleCommand, RejectArticleCommand, ResubmitArticleCommand, UpdateArticleCommand,
    },
    error::ApplicationError,
    services::ApplicationServices,
};
use newsroom::domain::{
    article::{ArticleId, ArticleStatus},
    errors::DomainError,
};

mod support;

use support::TestApp;

fn is_invalid_state(err: &ApplicationError) -> bool {
    matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidState(_)) | ApplicationError::InvalidState(_)
    )
}

#[tokio::test]
async fn approving_publishes_and_emits_one_event() {
    let app = TestApp::new();
    let author = app.journalist("june").await;
    let editor = app.editor("ed").await;
    let article = app.submit(&author, "Harbour reopens", None).await;
    assert_eq!(article.status, ArticleStatus::Pending);
    assert!(article.published_at.is_none());

    let approved = app.approve(&editor, article.id).await;

    assert_eq!(approved.status, ArticleStatus::Approved);
    assert_eq!(approved.approved_by, Some(editor.id()));
    assert!(approved.published_at.is_some());
    let stored = app.store.article(ArticleId(article.id)).unwrap();
    assert!(stored.is_approved());
}

#[tokio::test]
async fn approving_twice_reports_invalid_state() {
    let app = TestApp::new();
    let author = app.journalist("june").await;
    let editor = app.editor("ed").await;
    let article = app.submit(&author, "Harbour reopens", None).await;
    app.approve(&editor, article.id).await;

    let err = app
        .services
        .article_commands
        .approve_article(&editor.user, ApproveArticleCommand { id: article.id })
        .await
        .unwrap_err();
    assert!(is_invalid_state(&err), "unexpected error: {err:?}");
}

#[tokio::test]
async fn concurrent_approvals_let_exactly_one_editor_win() {
    let app = TestApp::new();
    let author = app.journalist("june").await;
    let article = app.submit(&author, "Harbour reopens", None).await;

    let mut editors = Vec::new();
    for i in 0..8 {
        editors.push(app.editor(&format!("editor{i}")).await);
    }

    let mut handles = Vec::new();
    for editor in editors {
        let services: Arc<ApplicationServices> = Arc::clone(&app.services);
        let id = article.id;
        handles.push(tokio::spawn(async move {
            services
                .article_commands
                .approve_article(&editor.user, ApproveArticleCommand { id })
                .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(dto) => {
                wins += 1;
                assert_eq!(dto.status, ArticleStatus::Approved);
            }
            Err(err) => assert!(is_invalid_state(&err), "unexpected error: {err:?}"),
        }
    }
    assert_eq!(wins, 1);
}

#[tokio::test]
async fn rejection_keeps_the_reason_and_resubmission_requeues() {
    let app = TestApp::new();
    let author = app.journalist("june").await;
    let editor = app.editor("ed").await;
    let article = app.submit(&author, "Harbour reopens", None).await;

    let rejected = app
        .services
        .article_commands
        .reject_article(
            &editor.user,
            RejectArticleCommand {
                id: article.id,
                reason: Some("  needs a second source ".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, ArticleStatus::Rejected);
    let rejection = rejected.rejection.expect("rejection details");
    assert_eq!(rejection.rejected_by, editor.id());
    assert_eq!(rejection.reason.as_deref(), Some("needs a second source"));

    let err = app
        .services
        .article_commands
        .approve_article(&editor.user, ApproveArticleCommand { id: article.id })
        .await
        .unwrap_err();
    assert!(is_invalid_state(&err));

    let pending = app
        .services
        .article_commands
        .resubmit_article(&author.user, ResubmitArticleCommand { id: article.id })
        .await
        .unwrap();
    assert_eq!(pending.status, ArticleStatus::Pending);
    assert!(pending.rejection.is_none());

    let approved = app.approve(&editor, article.id).await;
    assert_eq!(approved.status, ArticleStatus::Approved);
}

#[tokio::test]
async fn only_editors_review_and_only_authors_resubmit() {
    let app = TestApp::new();
    let author = app.journalist("june").await;
    let other = app.journalist("otto").await;
    let reader = app.reader("rita").await;
    let article = app.submit(&author, "Harbour reopens", None).await;

    for actor in [&author, &other, &reader] {
        let err = app
            .services
            .article_commands
            .approve_article(&actor.user, ApproveArticleCommand { id: article.id })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)), "{err:?}");
    }

    let err = app
        .services
        .article_commands
        .resubmit_article(&other.user, ResubmitArticleCommand { id: article.id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    // The author owns it, but it is pending, not rejected.
    let err = app
        .services
        .article_commands
        .resubmit_article(&author.user, ResubmitArticleCommand { id: article.id })
        .await
        .unwrap_err();
    assert!(is_invalid_state(&err));
}

#[tokio::test]
async fn reviewing_a_missing_article_is_not_found() {
    let app = TestApp::new();
    let editor = app.editor("ed").await;

    let err = app
        .services
        .article_commands
        .approve_article(&editor.user, ApproveArticleCommand { id: 4242 })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn authors_lose_edit_rights_once_approved() {
    let app = TestApp::new();
    let author = app.journalist("june").await;
    let editor = app.editor("ed").await;
    let article = app.submit(&author, "Harbour reopens", None).await;

    let edited = app
        .services
        .article_commands
        .update_article(
            &author.user,
            UpdateArticleCommand {
                id: article.id,
                title: Some("Harbour reopens at dawn".into()),
                content: None,
                summary: None,
                publisher_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "Harbour reopens at dawn");
    assert_eq!(edited.status, ArticleStatus::Pending);

    app.approve(&editor, article.id).await;

    let err = app
        .services
        .article_commands
        .update_article(
            &author.user,
            UpdateArticleCommand {
                id: article.id,
                title: Some("Too late".into()),
                content: None,
                summary: None,
                publisher_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

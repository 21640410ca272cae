// SPDX-License-Identifier: MPL-2.0
//! Action handler flows against an in-memory UI and a scripted server.

use forum_desk::forum::api::{ApiError, Endpoint, Form, ForumApi, Submission};
use forum_desk::forum::handlers;
use forum_desk::forum::page::{ItemKind, ItemRef, PagePatch, SearchResult, VoteKind, VoteTarget};
use forum_desk::forum::roles::Role;
use forum_desk::forum::validation::{LoginForm, PostDraft};
use forum_desk::forum::{Action, Session, Ui};
use forum_desk::i18n::Label;
use forum_desk::ui::modal::{
    self, ConfirmOptions, Dialog, Field, Pending, PromptOptions, SelectOption,
};
use forum_desk::ui::notifications::Severity;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

/// How the fake user answers the next dialog.
#[derive(Debug, Clone)]
enum Answer {
    Accept,
    Cancel,
    /// Types (or selects) a value, then confirms.
    Input(String),
    /// The dialog is force-closed before the user answers.
    Superseded,
}

#[derive(Default)]
struct FakeUi {
    answers: Mutex<VecDeque<Answer>>,
    toasts: Mutex<Vec<(Severity, Label)>>,
    dialogs: Mutex<Vec<Label>>,
    patches: Mutex<Vec<PagePatch>>,
}

impl FakeUi {
    fn answering(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    fn toasts(&self) -> Vec<(Severity, Label)> {
        self.toasts.lock().unwrap().clone()
    }

    fn dialogs(&self) -> Vec<Label> {
        self.dialogs.lock().unwrap().clone()
    }

    fn patches(&self) -> Vec<PagePatch> {
        self.patches.lock().unwrap().clone()
    }

    /// Shows the dialog in a real manager and plays the scripted answer.
    fn play<T>(&self, dialog: Dialog, pending: Pending<T>) -> Pending<T> {
        self.dialogs.lock().unwrap().push(dialog.message().clone());
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Answer::Superseded);

        let now = Instant::now();
        let mut manager = modal::Manager::new();
        manager.show(dialog, now);
        match answer {
            Answer::Accept => {
                manager.press_button(1, now);
            }
            Answer::Cancel => {
                manager.press_button(0, now);
            }
            Answer::Input(value) => {
                let field = manager.active().and_then(Dialog::field).map(Field::id);
                if let Some(field) = field {
                    manager.set_field_value(field, value);
                }
                manager.press_button(1, now);
            }
            Answer::Superseded => {
                let (replacement, _) = Dialog::alert("newer", None, Severity::Info);
                manager.show(replacement, now);
            }
        }
        pending
    }
}

impl Ui for FakeUi {
    fn notify(&self, severity: Severity, message: Label) {
        self.toasts.lock().unwrap().push((severity, message));
    }

    fn confirm(
        &self,
        message: Label,
        title: Option<Label>,
        options: ConfirmOptions,
    ) -> Pending<bool> {
        let (dialog, pending) = Dialog::confirm(message, title, options);
        self.play(dialog, pending)
    }

    fn alert(&self, message: Label, title: Option<Label>, severity: Severity) -> Pending<()> {
        let (dialog, pending) = Dialog::alert(message, title, severity);
        self.play(dialog, pending)
    }

    fn prompt(
        &self,
        message: Label,
        title: Option<Label>,
        default_value: String,
        options: PromptOptions,
    ) -> Pending<Option<String>> {
        let (dialog, pending) = Dialog::prompt(message, title, default_value, options);
        self.play(dialog, pending)
    }

    fn choose(
        &self,
        message: Label,
        title: Option<Label>,
        options: Vec<SelectOption>,
    ) -> Pending<Option<String>> {
        let (dialog, pending) = Dialog::choose(message, title, options);
        self.play(dialog, pending)
    }

    fn patch(&self, patch: PagePatch) {
        self.patches.lock().unwrap().push(patch);
    }
}

struct FakeApi {
    failure: Option<ApiError>,
    results: Vec<SearchResult>,
    submission: Submission,
    requests: Mutex<Vec<(Endpoint, Form)>>,
}

impl FakeApi {
    fn ok() -> Self {
        Self {
            failure: None,
            results: Vec::new(),
            submission: Submission::Accepted,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::ok()
        }
    }

    fn requests(&self) -> Vec<(Endpoint, Form)> {
        self.requests.lock().unwrap().clone()
    }

    fn outcome<T>(&self, value: T) -> Result<T, ApiError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(value),
        }
    }
}

impl ForumApi for FakeApi {
    async fn post_form(&self, endpoint: Endpoint, form: Form) -> Result<(), ApiError> {
        self.requests.lock().unwrap().push((endpoint, form));
        self.outcome(())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((Endpoint::Search, vec![("q", query.to_string())]));
        self.outcome(self.results.clone())
    }

    async fn login(&self, form: &LoginForm) -> Result<Submission, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((Endpoint::Login, vec![("username", form.username.clone())]));
        self.outcome(self.submission.clone())
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Submission, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((Endpoint::CreatePost, vec![("title", draft.title.clone())]));
        self.outcome(self.submission.clone())
    }
}

const LOGGED_IN: Session = Session { logged_in: true };

fn key_of(label: &Label) -> Option<&'static str> {
    label.key_name()
}

fn toast_keys(ui: &FakeUi) -> Vec<(Severity, Option<&'static str>)> {
    ui.toasts()
        .iter()
        .map(|(severity, label)| (*severity, key_of(label)))
        .collect()
}

fn vote_like_post(id: u64) -> Action {
    Action::Vote {
        vote: VoteKind::Like,
        target: VoteTarget::Post,
        id,
    }
}

#[tokio::test]
async fn vote_success_patches_page_and_confirms() {
    let ui = FakeUi::default();
    let api = FakeApi::ok();

    handlers::dispatch(vote_like_post(12), LOGGED_IN, &ui, &api).await;

    assert_eq!(
        api.requests(),
        vec![(
            Endpoint::Vote,
            vec![
                ("type", "like".to_string()),
                ("target", "post".to_string()),
                ("target_id", "12".to_string()),
            ]
        )]
    );
    assert_eq!(
        ui.patches(),
        vec![PagePatch::SetVote {
            target: VoteTarget::Post,
            id: 12,
            vote: VoteKind::Like,
        }]
    );
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Success, Some("notification-vote-recorded"))]
    );
}

#[tokio::test]
async fn vote_rejected_by_server_leaves_page_untouched() {
    let ui = FakeUi::default();
    let api = FakeApi::failing(ApiError::Status { status: 500 });

    handlers::dispatch(vote_like_post(3), LOGGED_IN, &ui, &api).await;

    assert!(ui.patches().is_empty());
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Error, Some("notification-vote-error"))]
    );
}

#[tokio::test]
async fn vote_requires_login() {
    let ui = FakeUi::default();
    let api = FakeApi::ok();

    handlers::dispatch(vote_like_post(3), Session::default(), &ui, &api).await;

    assert!(api.requests().is_empty());
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Warning, Some("notification-login-to-vote"))]
    );
}

#[tokio::test]
async fn transport_failure_reports_connection_error() {
    let ui = FakeUi::default();
    let api = FakeApi::failing(ApiError::Transport("connection refused".into()));

    handlers::dispatch(vote_like_post(3), LOGGED_IN, &ui, &api).await;

    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Error, Some("notification-connection-error"))]
    );
}

#[tokio::test]
async fn ban_sends_reason_and_reloads() {
    let ui = FakeUi::answering([Answer::Accept, Answer::Input("spam".into())]);
    let api = FakeApi::ok();
    let action = Action::Ban {
        user_id: 8,
        username: "mallory".into(),
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert_eq!(
        api.requests(),
        vec![(
            Endpoint::Ban,
            vec![("user_id", "8".to_string()), ("reason", "spam".to_string())]
        )]
    );
    assert_eq!(ui.patches(), vec![PagePatch::Reload]);
    assert_eq!(
        ui.dialogs()[0],
        Label::key("dialog-ban-confirm").with_arg("username", "mallory")
    );
}

#[tokio::test]
async fn cancelled_ban_sends_nothing() {
    let ui = FakeUi::answering([Answer::Cancel]);
    let api = FakeApi::ok();
    let action = Action::Ban {
        user_id: 8,
        username: "mallory".into(),
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert!(api.requests().is_empty());
    assert!(ui.toasts().is_empty());
    assert_eq!(ui.dialogs().len(), 1);
}

#[tokio::test]
async fn ban_with_empty_reason_is_abandoned() {
    let ui = FakeUi::answering([Answer::Accept, Answer::Input(String::new())]);
    let api = FakeApi::ok();
    let action = Action::Ban {
        user_id: 8,
        username: "mallory".into(),
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert!(api.requests().is_empty());
    assert!(ui.toasts().is_empty());
}

#[tokio::test]
async fn superseded_confirmation_aborts_silently() {
    let ui = FakeUi::answering([Answer::Superseded]);
    let api = FakeApi::ok();
    let action = Action::Delete {
        item: ItemRef::new(ItemKind::Comment, 4),
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert!(api.requests().is_empty());
    assert!(ui.toasts().is_empty());
}

#[tokio::test]
async fn delete_removes_item() {
    let ui = FakeUi::answering([Answer::Accept]);
    let api = FakeApi::ok();
    let item = ItemRef::new(ItemKind::Comment, 4);

    handlers::dispatch(Action::Delete { item }, LOGGED_IN, &ui, &api).await;

    assert_eq!(
        api.requests(),
        vec![(
            Endpoint::Delete,
            vec![("type", "comment".to_string()), ("id", "4".to_string())]
        )]
    );
    assert_eq!(ui.patches(), vec![PagePatch::RemoveItem(item)]);
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Success, Some("notification-delete-success"))]
    );
}

#[tokio::test]
async fn promote_posts_selected_role() {
    let ui = FakeUi::answering([Answer::Input("3".into())]);
    let api = FakeApi::ok();
    let action = Action::Promote {
        user_id: 5,
        username: "carol".into(),
        current_role: Role::User,
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert_eq!(
        api.requests(),
        vec![(
            Endpoint::Promote,
            vec![("user_id", "5".to_string()), ("role_id", "3".to_string())]
        )]
    );
    assert_eq!(ui.patches(), vec![PagePatch::Reload]);
}

#[tokio::test]
async fn promote_without_selection_warns() {
    let ui = FakeUi::answering([Answer::Accept]);
    let api = FakeApi::ok();
    let action = Action::Promote {
        user_id: 5,
        username: "carol".into(),
        current_role: Role::User,
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert!(api.requests().is_empty());
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Warning, Some("notification-select-role"))]
    );
}

#[tokio::test]
async fn promote_cannot_pick_current_role() {
    let ui = FakeUi::answering([Answer::Input("1".into())]);
    let api = FakeApi::ok();
    let action = Action::Promote {
        user_id: 5,
        username: "carol".into(),
        current_role: Role::User,
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    // "1" is not offered, so the selection stays empty.
    assert!(api.requests().is_empty());
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Warning, Some("notification-select-role"))]
    );
}

#[tokio::test]
async fn solution_failure_reports_error() {
    let ui = FakeUi::answering([Answer::Accept]);
    let api = FakeApi::failing(ApiError::Status { status: 403 });
    let action = Action::MarkSolution {
        comment_id: 10,
        post_id: 2,
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert_eq!(
        api.requests(),
        vec![(
            Endpoint::Solution,
            vec![("comment_id", "10".to_string()), ("post_id", "2".to_string())]
        )]
    );
    assert!(ui.patches().is_empty());
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Error, Some("notification-solution-error"))]
    );
}

#[tokio::test]
async fn report_with_reason_skips_prompt() {
    let ui = FakeUi::default();
    let api = FakeApi::ok();
    let action = Action::Report {
        item: ItemRef::new(ItemKind::Post, 6),
        reason: Some("off topic".into()),
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert!(ui.dialogs().is_empty());
    assert_eq!(
        api.requests(),
        vec![(
            Endpoint::Report,
            vec![
                ("type", "post".to_string()),
                ("id", "6".to_string()),
                ("reason", "off topic".to_string()),
            ]
        )]
    );
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Success, Some("notification-report-sent"))]
    );
}

#[tokio::test]
async fn report_asks_for_reason() {
    let ui = FakeUi::answering([Answer::Input("abuse".into())]);
    let api = FakeApi::ok();
    let action = Action::Report {
        item: ItemRef::new(ItemKind::User, 9),
        reason: None,
    };

    handlers::dispatch(action, LOGGED_IN, &ui, &api).await;

    assert_eq!(ui.dialogs(), vec![Label::key("dialog-report-reason")]);
    assert_eq!(api.requests()[0].1[2], ("reason", "abuse".to_string()));
}

#[tokio::test]
async fn search_results_replace_region() {
    let ui = FakeUi::default();
    let mut api = FakeApi::ok();
    api.results = vec![SearchResult {
        id: 1,
        title: "Borrow checker".into(),
        excerpt: String::new(),
        category: "rust".into(),
    }];

    let action = Action::Search {
        query: "borrow".into(),
    };
    handlers::dispatch(action, Session::default(), &ui, &api).await;

    assert_eq!(ui.patches(), vec![PagePatch::SearchResults(api.results.clone())]);
    assert!(ui.toasts().is_empty());
}

#[tokio::test]
async fn search_failure_is_silent() {
    let ui = FakeUi::default();
    let api = FakeApi::failing(ApiError::Decode("not json".into()));

    let action = Action::Search {
        query: "borrow".into(),
    };
    handlers::dispatch(action, Session::default(), &ui, &api).await;

    assert!(ui.patches().is_empty());
    assert!(ui.toasts().is_empty());
}

#[tokio::test]
async fn invalid_login_never_reaches_server() {
    let ui = FakeUi::default();
    let api = FakeApi::ok();
    let form = LoginForm {
        username: "al".into(),
        password: "secret123".into(),
    };

    handlers::dispatch(Action::Login(form), Session::default(), &ui, &api).await;

    assert!(api.requests().is_empty());
    assert_eq!(
        toast_keys(&ui),
        vec![(Severity::Error, Some("validation-username-too-short"))]
    );
}

#[tokio::test]
async fn accepted_login_marks_session() {
    let ui = FakeUi::default();
    let api = FakeApi::ok();
    let form = LoginForm {
        username: "alice".into(),
        password: "secret123".into(),
    };

    handlers::dispatch(Action::Login(form), Session::default(), &ui, &api).await;

    assert_eq!(ui.patches(), vec![PagePatch::LoggedIn(true)]);
}

#[tokio::test]
async fn rejected_post_shows_server_reason() {
    let ui = FakeUi::default();
    let mut api = FakeApi::ok();
    api.submission = Submission::Rejected {
        reason: "duplicate".into(),
    };
    let draft = PostDraft {
        title: "A real title".into(),
        content: "Long enough content for the check.".into(),
        category: "2".into(),
        tags: String::new(),
    };

    handlers::dispatch(Action::CreatePost(draft), LOGGED_IN, &ui, &api).await;

    assert!(ui.patches().is_empty());
    assert_eq!(
        ui.toasts(),
        vec![(
            Severity::Error,
            Label::key("notification-post-rejected").with_arg("reason", "duplicate")
        )]
    );
}

#[tokio::test]
async fn post_bounced_to_login_is_an_error() {
    let ui = FakeUi::default();
    let mut api = FakeApi::ok();
    let landed = reqwest::Url::parse("http://localhost:8080/login").expect("valid url");
    api.submission = Submission::from_redirect(Endpoint::CreatePost, &landed);
    let draft = PostDraft {
        title: "A real title".into(),
        content: "Long enough content for the check.".into(),
        category: "2".into(),
        tags: String::new(),
    };

    handlers::dispatch(Action::CreatePost(draft), LOGGED_IN, &ui, &api).await;

    assert_eq!(api.requests().len(), 1);
    assert!(!ui.patches().contains(&PagePatch::Reload));
    assert_eq!(
        ui.toasts(),
        vec![(
            Severity::Error,
            Label::key("notification-post-rejected").with_arg("reason", "auth")
        )]
    );
}

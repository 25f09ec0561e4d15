use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockito::{Matcher, Server};
use serde_json::json;

use super::*;
use crate::api::RestClient;
use crate::screen::DialogMode;
use crate::ui::components::form::FieldKind;

const LIST_BODY: &str = r#"{"code":0,"data":[
    {"app_id":"a1","name":"svc","desc":"","secret":"s3cr3t","expired":1893456000,"status":true},
    {"app_id":"b2","name":"jobs","desc":"batch","secret":"","expired":"undefined","status":false}
]}"#;

fn app_for(server: &Server) -> App {
    let base = format!("{}/api/v4", server.url());
    let client = RestClient::new(&base, "admin", "public", Duration::from_secs(5)).unwrap();
    let config = AppConfig { api_url: base, ..AppConfig::default() };
    App::new(config, Arc::new(client))
}

fn mock_list(server: &mut Server) -> mockito::Mock {
    server
        .mock("GET", "/api/v4/apps")
        .with_status(200)
        .with_body(LIST_BODY)
        .expect_at_least(1)
        .create()
}

fn settle(app: &mut App) {
    app.screen.settle();
    app.update(Instant::now());
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn loaded(server: &mut Server) -> App {
    mock_list(server);
    let mut app = app_for(server);
    press(&mut app, KeyCode::Char('r'));
    settle(&mut app);
    app
}

fn history_texts(app: &App) -> Vec<String> {
    app.notifier.history().into_iter().map(|n| n.text).collect()
}

#[test]
fn test_refresh_fills_table() {
    let mut server = Server::new();
    let app = loaded(&mut server);

    assert_eq!(app.screen.records.len(), 2);
    assert_eq!(app.list_state.selected(), Some(0));
    assert_eq!(app.selected_record().map(|r| r.app_id.as_str()), Some("a1"));
    assert!(!app.screen.is_loading());
}

#[test]
fn test_create_via_dialog() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);
    let create = server
        .mock("POST", "/api/v4/apps")
        .match_body(Matcher::PartialJson(json!({"name": "billing", "status": true})))
        .with_status(200)
        .with_body(r#"{"code":0,"data":{"secret":"xyz"}}"#)
        .create();

    press(&mut app, KeyCode::Char('n'));
    app.update(Instant::now());
    assert_eq!(app.input_mode(), InputMode::Dialog);
    assert_eq!(app.screen.mode, DialogMode::New);
    assert_eq!(app.form.active_field(DialogMode::New), FieldKind::AppId);
    assert_eq!(app.screen.draft.app_id.len(), 16);

    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "billing");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    create.assert();
    assert!(!app.screen.dialog_visible);
    assert_eq!(app.input_mode(), InputMode::Normal);
    assert!(history_texts(&app).contains(&"Create Success".to_string()));
}

#[test]
fn test_create_requires_name() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);

    press(&mut app, KeyCode::Char('n'));
    app.update(Instant::now());
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen.in_flight(), 0);
    assert!(app.screen.dialog_visible);
    assert_eq!(app.screen.field_errors.name.as_deref(), Some("Required"));
}

#[test]
fn test_save_ignored_while_loading() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);

    press(&mut app, KeyCode::Char('n'));
    app.update(Instant::now());
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "billing");

    app.loading.set(true);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen.in_flight(), 0);
    assert!(app.screen.dialog_visible);
}

#[test]
fn test_edit_keeps_identity_and_sends_put() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);
    let update = server
        .mock("PUT", "/api/v4/apps/a1")
        .match_body(Matcher::PartialJson(json!({
            "app_id": "a1",
            "name": "svc",
            "desc": "hi",
            "expired": 1893456000
        })))
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .create();

    press(&mut app, KeyCode::Char('e'));
    app.update(Instant::now());
    assert_eq!(app.screen.mode, DialogMode::Edit);
    assert_eq!(app.form.active_field(DialogMode::Edit), FieldKind::Status);

    // status field takes no text; identity fields are skipped
    type_text(&mut app, "zz");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.form.active_field(DialogMode::Edit), FieldKind::Desc);
    type_text(&mut app, "hi");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    update.assert();
    assert!(!app.screen.dialog_visible);
    assert!(history_texts(&app).contains(&"Edit Success".to_string()));
}

#[test]
fn test_space_toggles_selected_row() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);
    let update = server
        .mock("PUT", "/api/v4/apps/b2")
        .match_body(Matcher::PartialJson(json!({"app_id": "b2", "status": true})))
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .create();

    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char(' '));
    settle(&mut app);

    update.assert();
    assert!(history_texts(&app).contains(&"Edit Success".to_string()));
}

#[test]
fn test_view_dialog_shows_fetched_record() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);
    let fetch = server
        .mock("GET", "/api/v4/apps/a1")
        .with_status(200)
        .with_body(r#"{"code":0,"data":{"app_id":"a1","name":"svc","secret":"fresh","status":true}}"#)
        .create();

    press(&mut app, KeyCode::Enter);
    assert!(!app.screen.dialog_visible);
    settle(&mut app);

    fetch.assert();
    assert_eq!(app.input_mode(), InputMode::Dialog);
    assert_eq!(app.screen.mode, DialogMode::View);
    assert_eq!(app.screen.draft.secret, "fresh");
    assert!(!app.form.show_secret);

    press(&mut app, KeyCode::Char('s'));
    assert!(app.form.show_secret);

    // read-only
    type_text(&mut app, "abc");
    assert_eq!(app.screen.draft.name, "svc");

    press(&mut app, KeyCode::Esc);
    assert!(!app.screen.dialog_visible);
}

#[test]
fn test_view_failure_keeps_dialog_closed() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);
    let _fetch = server
        .mock("GET", "/api/v4/apps/a1")
        .with_status(404)
        .with_body(r#"{"message":"not found"}"#)
        .create();

    press(&mut app, KeyCode::Char('v'));
    settle(&mut app);

    assert!(!app.screen.dialog_visible);
    assert_eq!(history_texts(&app).last().map(String::as_str), Some("not found"));
}

#[test]
fn test_delete_confirmation_flow() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);
    let delete = server
        .mock("DELETE", "/api/v4/apps/a1")
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .create();

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.input_mode(), InputMode::Confirm);
    assert_eq!(app.screen.delete_target.as_deref(), Some("a1"));

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.input_mode(), InputMode::Normal);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));
    settle(&mut app);

    delete.assert();
    assert!(!app.screen.delete_confirm_visible);
    assert_eq!(app.input_mode(), InputMode::Normal);
}

#[test]
fn test_actions_without_selection_warn() {
    let server = Server::new();
    let mut app = app_for(&server);

    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::Char(' '));

    assert!(!app.screen.dialog_visible);
    assert_eq!(app.screen.in_flight(), 0);
    assert_eq!(history_texts(&app), vec!["No application selected"; 2]);
}

#[test]
fn test_command_mode() {
    let server = Server::new();
    let mut app = app_for(&server);

    press(&mut app, KeyCode::Char(':'));
    assert_eq!(app.input_mode(), InputMode::Command);
    type_text(&mut app, "bogus");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode(), InputMode::Normal);
    assert_eq!(history_texts(&app), vec!["Unknown command: bogus"]);

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "new");
    press(&mut app, KeyCode::Enter);
    assert!(app.screen.dialog_visible);
    press(&mut app, KeyCode::Esc);

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "q");
    assert!(press(&mut app, KeyCode::Enter));
    assert!(app.should_quit);
}

#[test]
fn test_help_and_history_popups() {
    let server = Server::new();
    let mut app = app_for(&server);
    app.terminal_size = Rect::new(0, 0, 80, 24);

    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.input_mode(), InputMode::Help);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.help_state.scroll, 1);

    press(&mut app, KeyCode::Char('i'));
    assert_eq!(app.input_mode(), InputMode::History);
    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.input_mode(), InputMode::Normal);
}

#[test]
fn test_render_smoke() {
    let mut server = Server::new();
    let mut app = loaded(&mut server);

    let backend = ratatui::backend::TestBackend::new(100, 30);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("Applications"));
    assert!(text.contains("jobs"));
    assert!(text.contains("Never Expire"));
}

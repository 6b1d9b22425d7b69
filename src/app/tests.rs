use super::*;
use crate::board::EntryId;
use crate::config::{SearchOrder, Settings};
use crate::present::{ActionKind, BoardView};
use crate::remote::{GatewayError, RemoteCmd, RemoteEvent, RemoteRecord};
use reqwest::StatusCode;
use std::time::{Duration, Instant};

fn rec(id: u64, name: &str, artist: &str, votes: u64) -> RemoteRecord {
    RemoteRecord {
        id: Some(EntryId::Num(id)),
        name: Some(name.into()),
        artist: Some(artist.into()),
        initial_votes: Some(votes),
        album: None,
    }
}

fn status_err(method: &'static str) -> GatewayError {
    GatewayError::Status {
        method,
        url: "http://store/songs".into(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn loaded(records: Vec<RemoteRecord>) -> App {
    let mut app = App::new(&Settings::default());
    app.apply_remote_event(RemoteEvent::Fetched(Ok(records)));
    app
}

fn select(app: &mut App, id: u64) {
    app.selected = app
        .view
        .fragments()
        .iter()
        .position(|f| f.id == EntryId::Num(id))
        .expect("id is rendered");
}

fn names(app: &App) -> Vec<String> {
    app.view.fragments().iter().map(|f| f.name.clone()).collect()
}

#[test]
fn starts_loading_with_loading_text() {
    let app = App::new(&Settings::default());
    assert_eq!(app.load, LoadState::Loading);
    assert!(matches!(app.view, BoardView::Empty { ref text } if text == "Loading songs..."));
}

#[test]
fn initial_fetch_hydrates_and_ranks() {
    let app = loaded(vec![rec(1, "X", "a", 0), rec(2, "Y", "b", 5), rec(3, "Z", "c", 7)]);
    assert_eq!(app.load, LoadState::Loaded);
    assert_eq!(names(&app), ["Z", "Y", "X"]);
}

#[test]
fn empty_fetch_shows_empty_text_and_still_allows_adding() {
    let mut app = loaded(vec![]);
    assert!(matches!(app.view, BoardView::Empty { ref text } if text == "No Songs found"));

    app.open_add_form();
    app.add_form.set("Band", "Tune");
    assert!(app.submit_new_song().is_some());
    assert_eq!(names(&app), ["Tune"]);
}

#[test]
fn add_during_initial_load_survives_the_fetch() {
    let mut app = App::new(&Settings::default());
    app.open_add_form();
    app.add_form.set("Band", "S");
    let Some(RemoteCmd::Create { local_id, .. }) = app.submit_new_song() else {
        panic!("expected create");
    };
    assert_eq!(names(&app), ["S"]);

    // the fetch was queued first, so it completes before the create
    app.apply_remote_event(RemoteEvent::Fetched(Ok(vec![rec(1, "X", "a", 3)])));
    assert!(app.board.get(&local_id).is_some());
    assert_eq!(names(&app), ["X", "S"]);

    app.apply_remote_event(RemoteEvent::Created {
        local_id,
        result: Ok(rec(42, "S", "Band", 0)),
    });
    assert!(app.board.get(&EntryId::Num(42)).is_some());
    assert_eq!(app.board.len(), 2);
}

#[test]
fn reload_keeps_session_votes() {
    let mut app = loaded(vec![rec(1, "A", "a", 0), rec(2, "B", "b", 1)]);
    select(&mut app, 1);
    app.vote_selected();
    app.vote_selected();

    assert!(matches!(app.reload(), RemoteCmd::FetchAll));
    app.apply_remote_event(RemoteEvent::Fetched(Ok(vec![
        rec(1, "A", "a", 0),
        rec(2, "B", "b", 1),
    ])));

    assert_eq!(app.board.get(&EntryId::Num(1)).map(|e| e.votes()), Some(2));
    assert_eq!(names(&app), ["A", "B"]);
}

#[test]
fn add_after_failed_initial_load_is_visible() {
    let mut app = App::new(&Settings::default());
    app.apply_remote_event(RemoteEvent::Fetched(Err(status_err("GET"))));
    assert!(matches!(app.view, BoardView::Empty { ref text } if text == "Loading songs..."));

    app.open_add_form();
    app.add_form.set("Band", "S");
    assert!(app.submit_new_song().is_some());

    assert_eq!(app.load, LoadState::Loading);
    assert_eq!(names(&app), ["S"]);
}

#[test]
fn failed_fetch_keeps_last_good_state() {
    let mut app = loaded(vec![rec(1, "X", "a", 0)]);
    app.apply_remote_event(RemoteEvent::Fetched(Err(status_err("GET"))));
    assert_eq!(names(&app), ["X"]);
    assert_eq!(app.load, LoadState::Loaded);
}

#[test]
fn vote_is_local_and_reorders() {
    let mut app = loaded(vec![rec(1, "A", "a", 1), rec(2, "B", "b", 2)]);
    assert_eq!(names(&app), ["B", "A"]);

    select(&mut app, 1);
    app.vote_selected();
    app.vote_selected();

    assert_eq!(app.board.get(&EntryId::Num(1)).map(|e| e.votes()), Some(3));
    assert_eq!(names(&app), ["A", "B"]);
    // selection follows the voted entry
    assert_eq!(app.view.fragments()[app.selected].id, EntryId::Num(1));
}

#[test]
fn vote_on_empty_view_is_a_no_op() {
    let mut app = loaded(vec![]);
    app.vote_selected();
    assert!(app.board.is_empty());
}

#[test]
fn submit_new_song_appends_optimistically() {
    let mut app = loaded(vec![rec(1, "Old", "o", 3)]);
    app.open_add_form();
    app.add_form.set("Band", "Fresh");

    let cmd = app.submit_new_song();
    let Some(RemoteCmd::Create { local_id, record }) = cmd else {
        panic!("expected create");
    };

    assert_eq!(record.name.as_deref(), Some("Fresh"));
    assert_eq!(record.artist.as_deref(), Some("Band"));
    assert_eq!(record.initial_votes, Some(0));
    assert_eq!(record.id.as_ref(), Some(&local_id));

    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.add_form.value(0), "");
    assert_eq!(app.pending_creates, 1);
    assert!(app.board.get(&local_id).is_some());
    assert_eq!(names(&app), ["Old", "Fresh"]);
}

#[test]
fn submit_new_song_requires_a_name() {
    let mut app = loaded(vec![]);
    app.open_add_form();
    app.add_form.set("Band", "   ");
    assert!(app.submit_new_song().is_none());
    assert_eq!(app.mode, Mode::Add);
    assert!(app.board.is_empty());
}

#[test]
fn created_ok_sets_notice_and_adopts_canonical_id() {
    let mut app = loaded(vec![]);
    app.open_add_form();
    app.add_form.set("Band", "Fresh");
    let Some(RemoteCmd::Create { local_id, .. }) = app.submit_new_song() else {
        panic!("expected create");
    };

    app.apply_remote_event(RemoteEvent::Created {
        local_id: local_id.clone(),
        result: Ok(rec(99, "Fresh", "Band", 0)),
    });

    assert_eq!(app.pending_creates, 0);
    let notice = app.notice.as_ref().map(|n| n.text.as_str());
    assert_eq!(notice, Some("Fresh by Band added to db."));
    assert!(app.board.get(&local_id).is_none());
    assert!(app.board.get(&EntryId::Num(99)).is_some());
    assert_eq!(app.view.fragments()[0].id, EntryId::Num(99));
}

#[test]
fn created_err_keeps_entry_and_shows_nothing() {
    let mut app = loaded(vec![]);
    app.open_add_form();
    app.add_form.set("Band", "Fresh");
    let Some(RemoteCmd::Create { local_id, .. }) = app.submit_new_song() else {
        panic!("expected create");
    };

    app.apply_remote_event(RemoteEvent::Created {
        local_id: local_id.clone(),
        result: Err(status_err("POST")),
    });

    assert!(app.board.get(&local_id).is_some());
    assert!(app.notice.is_none());
}

#[test]
fn delete_failure_leaves_entry_in_place() {
    let mut app = loaded(vec![rec(7, "Seven", "s", 0), rec(8, "Eight", "e", 0)]);
    select(&mut app, 7);

    let cmd = app.request_delete_selected();
    assert!(matches!(cmd, Some(RemoteCmd::Remove { ref id }) if *id == EntryId::Num(7)));
    // no duplicate while in flight
    assert!(app.request_delete_selected().is_none());

    app.apply_remote_event(RemoteEvent::Removed {
        id: EntryId::Num(7),
        result: Err(status_err("DELETE")),
    });

    assert!(app.board.get(&EntryId::Num(7)).is_some());
    assert!(app.pending_deletes.is_empty());
    assert_eq!(app.board.len(), 2);
}

#[test]
fn delete_success_removes_and_clamps_selection() {
    let mut app = loaded(vec![rec(1, "A", "a", 2), rec(2, "B", "b", 1)]);
    select(&mut app, 2);
    assert_eq!(app.selected, 1);

    let Some(RemoteCmd::Remove { id }) = app.request_delete_selected() else {
        panic!("expected remove");
    };
    app.apply_remote_event(RemoteEvent::Removed { id, result: Ok(()) });

    assert!(app.board.get(&EntryId::Num(2)).is_none());
    assert_eq!(app.selected, 0);
    assert_eq!(names(&app), ["A"]);
}

#[test]
fn edit_success_replaces_entry_wholesale() {
    let mut app = loaded(vec![rec(3, "Old", "Band", 5)]);
    select(&mut app, 3);

    app.begin_edit_selected();
    assert_eq!(app.mode, Mode::Edit);
    assert_eq!(app.editing, Some(EntryId::Num(3)));
    assert_eq!(app.edit_form.value(0), "Old");
    assert_eq!(app.edit_form.value(1), "Band");

    app.edit_form.set("Foo", "Bar");
    let cmd = app.apply_edit();
    let Some(RemoteCmd::Update { id, patch }) = cmd else {
        panic!("expected update");
    };
    assert_eq!(id, EntryId::Num(3));
    assert_eq!((patch.name.as_str(), patch.artist.as_str()), ("Foo", "Bar"));
    assert!(app.pending_edit);
    assert!(app.apply_edit().is_none());

    // the store answers with its own record; votes come from it
    app.apply_remote_event(RemoteEvent::Updated {
        id: EntryId::Num(3),
        result: Ok(rec(3, "Foo", "Bar", 1)),
    });

    let entry = app.board.get(&EntryId::Num(3)).expect("entry kept");
    assert_eq!(entry.name, "Foo");
    assert_eq!(entry.artist, "Bar");
    assert_eq!(entry.votes(), 1);
    assert_eq!(app.board.len(), 1);
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.editing.is_none());
    assert_eq!(app.edit_form.value(0), "");
    assert!(!app.pending_edit);
}

#[test]
fn edit_failure_keeps_form_values() {
    let mut app = loaded(vec![rec(3, "Old", "Band", 5)]);
    app.begin_edit_selected();
    app.edit_form.set("Foo", "Bar");
    assert!(app.apply_edit().is_some());

    app.apply_remote_event(RemoteEvent::Updated {
        id: EntryId::Num(3),
        result: Err(status_err("PATCH")),
    });

    assert_eq!(app.mode, Mode::Edit);
    assert_eq!(app.edit_form.value(0), "Foo");
    assert_eq!(app.board.get(&EntryId::Num(3)).map(|e| e.name.as_str()), Some("Old"));
    assert!(!app.pending_edit);
}

#[test]
fn update_without_id_in_response_keeps_target_id() {
    let mut app = loaded(vec![rec(3, "Old", "Band", 5)]);
    app.begin_edit_selected();
    app.apply_edit();

    let mut record = rec(0, "Foo", "Bar", 0);
    record.id = None;
    app.apply_remote_event(RemoteEvent::Updated {
        id: EntryId::Num(3),
        result: Ok(record),
    });

    assert_eq!(app.board.get(&EntryId::Num(3)).map(|e| e.name.as_str()), Some("Foo"));
}

#[test]
fn cancel_closes_form_without_side_effects() {
    let mut app = loaded(vec![rec(3, "Old", "Band", 5)]);
    app.begin_edit_selected();
    app.cancel();
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.editing.is_none());
    assert_eq!(app.board.get(&EntryId::Num(3)).map(|e| e.name.as_str()), Some("Old"));
}

#[test]
fn search_results_replace_list_ranked_by_default() {
    let mut app = loaded(vec![rec(1, "A", "a", 0), rec(2, "B", "b", 9)]);
    app.open_search_form();
    app.search_form.set("b", "");

    let cmd = app.submit_search();
    let Some(RemoteCmd::Search(filter)) = cmd else {
        panic!("expected search");
    };
    assert_eq!(filter.artist_like.as_deref(), Some("b"));
    assert!(filter.name_like.is_none());
    assert_eq!(app.mode, Mode::Browse);

    app.apply_remote_event(RemoteEvent::Searched(Ok(vec![
        rec(3, "Low", "b", 1),
        rec(2, "B", "b", 9),
    ])));
    assert!(app.is_searching());
    assert_eq!(names(&app), ["B", "Low"]);

    app.clear_search();
    assert!(!app.is_searching());
    assert_eq!(names(&app), ["B", "A"]);
}

#[test]
fn server_search_order_keeps_response_order() {
    let mut settings = Settings::default();
    settings.board.search_order = SearchOrder::Server;
    let mut app = App::new(&settings);
    app.apply_remote_event(RemoteEvent::Fetched(Ok(vec![])));

    app.apply_remote_event(RemoteEvent::Searched(Ok(vec![
        rec(3, "Low", "b", 1),
        rec(2, "High", "b", 9),
    ])));
    assert_eq!(names(&app), ["Low", "High"]);
}

#[test]
fn top_n_limits_visible_rows() {
    let mut settings = Settings::default();
    settings.board.top_n = 2;
    let mut app = App::new(&settings);
    app.apply_remote_event(RemoteEvent::Fetched(Ok(vec![
        rec(1, "A", "a", 1),
        rec(2, "B", "b", 2),
        rec(3, "C", "c", 3),
    ])));
    assert_eq!(names(&app), ["C", "B"]);
    assert_eq!(app.board.len(), 3);
}

#[test]
fn actions_resolve_to_rendered_targets() {
    let mut app = loaded(vec![rec(1, "A", "a", 5), rec(2, "B", "b", 0)]);
    app.next();
    assert_eq!(app.selected_target(ActionKind::Delete), Some(EntryId::Num(2)));
    app.next();
    assert_eq!(app.selected, 1);
    app.select_first();
    assert_eq!(app.selected_target(ActionKind::Edit), Some(EntryId::Num(1)));
}

#[test]
fn notice_expires_after_ttl() {
    let mut settings = Settings::default();
    settings.ui.notice_ms = 100;
    let mut app = App::new(&settings);
    let now = Instant::now();
    app.set_notice("hi".into(), now);

    app.tick(now + Duration::from_millis(50));
    assert!(app.notice.is_some());
    app.tick(now + Duration::from_millis(100));
    assert!(app.notice.is_none());
}

#[test]
fn form_editing_moves_between_fields() {
    let mut form = Form::new(["Artist", "Song"]);
    form.push_char('a');
    form.next_field();
    form.push_char('s');
    form.push_char('x');
    form.pop_char();
    assert_eq!(form.value(0), "a");
    assert_eq!(form.value(1), "s");
    form.next_field();
    assert_eq!(form.focus, 0);
}

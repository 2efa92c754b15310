use std::cell::RefCell;
use std::rc::Rc;

use simple_lyric::{resolve, App, Lyric, LyricLine, LyricStore, RouteError, StoreEvent, View};

fn lyric(id: &str) -> Lyric {
    Lyric {
        id: id.to_string(),
        title: format!("Song {id}"),
        artist: String::new(),
        lines: vec![LyricLine::new(0.0, "la"), LyricLine::new(1.0, "la la")],
    }
}

#[test]
fn detail_route_parameter_resolves_against_the_store() {
    let mut store = LyricStore::seeded();
    store.add_lyric(lyric("42"));

    let View::LyricDetail { id } = resolve("/lyric/42").unwrap() else {
        panic!("expected the detail view");
    };
    assert_eq!(store.get_lyric_by_id(&id).map(|l| l.title.as_str()), Some("Song 42"));

    assert_eq!(resolve("/"), Ok(View::Home));
    assert_eq!(resolve("/import"), Ok(View::ImportLyric));
    assert!(matches!(resolve("/lyrics"), Err(RouteError::NotFound { .. })));
}

#[test]
fn navigating_never_mutates_the_store() {
    let seed = LyricStore::seeded().lyrics().to_vec();
    let mut app = App::new(LyricStore::seeded(), "/");

    app.navigate("/lyric/1");
    assert_eq!(app.current_path(), "/lyric/1");
    app.navigate("/import");
    assert_eq!(app.current_path(), "/import");
    app.navigate("/lyric/99");
    assert_eq!(app.current_path(), "/lyric/99");
    app.navigate("/bogus");
    assert_eq!(app.current_path(), "/");

    assert_eq!(app.store().lyrics(), seed.as_slice());
    let store = app.into_store();
    assert_eq!(store.lyrics(), seed.as_slice());
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn session_lifecycle_notifies_subscribers() {
    let mut store = LyricStore::seeded();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    store.subscribe(move |event: &StoreEvent| sink.borrow_mut().push(event.lyric_id().to_string()));

    let id = store.next_id();
    store.add_lyric(lyric(&id));
    store.remove_lyric(&id);
    store.remove_lyric(&id);

    assert_eq!(*log.borrow(), vec!["2".to_string(), "2".to_string()]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.lyrics()[0].id, "1");
}

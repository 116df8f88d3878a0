use smartshopper::config::Config;
use smartshopper::session::Session;
use smartshopper::storage::LocalStorage;
use std::fs;

#[test]
fn first_launch_uses_starter_data() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStorage::at(dir.path().join("data.json"));

    let session = Session::restore(&store, &Config::default());
    assert_eq!(session.shopping_lists, vec!["Groceries", "Electronics"]);
    assert_eq!(session.categories, vec!["Food", "Electronics", "Clothing"]);
    assert!(session.items.is_empty());
}

#[test]
fn edits_survive_a_relaunch_but_tax_rate_resets() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStorage::at(dir.path().join("data.json"));
    let config = Config::default();

    let mut session = Session::restore(&store, &config);
    session.add_list();
    let id = session.add_item();
    session.set_item_name(&id, "Milk");
    session.set_item_price(&id, "3.50");
    session.cycle_item_category(&id);
    session.set_tax_rate("15");
    session.persist(&store);

    let relaunched = Session::restore(&store, &config);
    assert_eq!(relaunched.shopping_lists, session.shopping_lists);
    assert_eq!(relaunched.categories, session.categories);
    assert_eq!(relaunched.items, session.items);
    assert_eq!(relaunched.item(&id).unwrap().category, "Electronics");
    assert_eq!(relaunched.tax_rate, "10");
    assert_eq!(relaunched.total_label(), "Total with Tax: $3.85");
}

#[test]
fn configured_tax_rate_is_the_session_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStorage::at(dir.path().join("data.json"));
    let config = Config::parse("default_tax_rate = \"0\"\n").unwrap();

    let mut session = Session::restore(&store, &config);
    let id = session.add_item();
    session.set_item_price(&id, "2.25");
    assert_eq!(session.total_label(), "Total with Tax: $2.25");
}

#[test]
fn corrupt_file_falls_back_to_starter_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "\u{0}\u{1}garbage").unwrap();
    let store = LocalStorage::at(&path);

    let session = Session::restore(&store, &Config::default());
    assert_eq!(session, Session::new(&Config::default()));
}

#[test]
fn emptied_state_is_kept_rather_than_replaced_by_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStorage::at(dir.path().join("data.json"));
    let config = Config::default();

    let mut session = Session::restore(&store, &config);
    while session.remove_list(0) {}
    session.persist(&store);

    let relaunched = Session::restore(&store, &config);
    assert!(relaunched.shopping_lists.is_empty());
    assert_eq!(relaunched.categories.len(), 3);
}

#[test]
fn shared_store_is_a_single_instance() {
    let a = LocalStorage::shared() as *const LocalStorage;
    let b = LocalStorage::shared() as *const LocalStorage;
    assert_eq!(a, b);
}

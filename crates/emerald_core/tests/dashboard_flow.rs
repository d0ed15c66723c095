use emerald_core::{
    render_dashboard, ClientRoster, ClientValidationError, DashboardState,
    MemoryKeyValueRepository, NavTab, PersistOutcome, SubmitOutcome,
};

#[test]
fn initial_render_shows_seed_rows_and_count() {
    let store = MemoryKeyValueRepository::new();
    let roster = ClientRoster::load(&store);
    let state = DashboardState::new();

    let view = render_dashboard(&state, roster.clients());
    assert_eq!(view.header.brand, "EMERALD COVE");
    assert_eq!(view.header.tagline, "WHERE EVERY HOME IS A TREASURE");
    assert_eq!(view.title, "Dashboard");
    assert_eq!(view.total_clients, 4);
    assert_eq!(view.rows.len(), 4);
    assert_eq!(view.rows[0].name, "John Doe");
    assert!(view.add_client_dialog.is_none());
}

#[test]
fn exactly_one_nav_item_is_active() {
    let mut state = DashboardState::new();
    state.select_tab(NavTab::Projects);

    let view = render_dashboard(&state, &[]);
    let labels = view.nav.iter().map(|item| item.label).collect::<Vec<_>>();
    assert_eq!(labels, vec!["Dashboard", "Clients", "Projects", "Settings"]);
    let active = view
        .nav
        .iter()
        .filter(|item| item.active)
        .map(|item| item.tab)
        .collect::<Vec<_>>();
    assert_eq!(active, vec![NavTab::Projects]);
    assert_eq!(view.title, "Projects");
    assert_eq!(view.total_clients, 0);
}

#[test]
fn successful_submit_closes_dialog_and_rerenders_count() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);
    let mut state = DashboardState::new();

    state.open_add_client();
    state.set_name_input(" Ann Lee ");
    state.set_email_input("ann@lee.io");
    let outcome = state.submit_add_client(&mut roster);

    assert_eq!(outcome, SubmitOutcome::Added(PersistOutcome::Saved));
    assert!(!state.add_client_form().is_open());

    let view = render_dashboard(&state, roster.clients());
    assert_eq!(view.total_clients, 5);
    assert_eq!(view.rows[4].name, "Ann Lee");
}

#[test]
fn rejected_submit_shows_both_field_errors() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);
    let mut state = DashboardState::new();

    state.open_add_client();
    state.set_email_input("nope");
    let outcome = state.submit_add_client(&mut roster);

    match outcome {
        SubmitOutcome::Rejected(errors) => {
            assert_eq!(errors.name, Some(ClientValidationError::MissingName));
            assert_eq!(errors.email, Some(ClientValidationError::InvalidEmailFormat));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(roster.count(), 4);

    let view = render_dashboard(&state, roster.clients());
    let dialog = view.add_client_dialog.expect("dialog stays open");
    assert_eq!(dialog.email_input, "nope");
    assert!(dialog.name_error.is_some());
    assert!(dialog.email_error.is_some());
}

#[test]
fn closing_dialog_discards_input_without_touching_roster() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);
    let mut state = DashboardState::new();

    state.open_add_client();
    state.set_name_input("Ann Lee");
    state.set_email_input("ann@lee.io");
    state.close_add_client();

    assert_eq!(state.submit_add_client(&mut roster), SubmitOutcome::NotOpen);
    assert_eq!(roster.count(), 4);
    assert!(store.is_empty());
    assert!(render_dashboard(&state, roster.clients())
        .add_client_dialog
        .is_none());
}

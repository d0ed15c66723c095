use emerald_core::{
    load_clients, seed_clients, ClientRecord, ClientRoster, ClientValidationError,
    DefaultReason, KeyValueRepository, LoadSource, MemoryKeyValueRepository, PersistOutcome,
    CLIENTS_STORE_KEY,
};

fn seed_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("John Doe", "john.doe@example.com"),
        ("Jane Smith", "jane.smith@example.com"),
        ("Joe Bloggs", "joe.bloggs@example.com"),
        ("Sarah Johnson", "sarah.johnson@example.com"),
    ]
}

fn pairs(clients: &[ClientRecord]) -> Vec<(&str, &str)> {
    clients.iter().map(|c| (c.name(), c.email())).collect()
}

#[test]
fn empty_store_loads_seed_set_tagged_missing() {
    let store = MemoryKeyValueRepository::new();
    let roster = ClientRoster::load(&store);

    assert_eq!(pairs(roster.clients()), seed_pairs());
    assert_eq!(roster.count(), 4);
    assert_eq!(
        roster.load_source(),
        &LoadSource::Defaulted(DefaultReason::Missing)
    );
    assert!(store.is_empty(), "loading must not write");
}

#[test]
fn corrupted_store_loads_seed_set_tagged_malformed() {
    for raw in ["{not json", "null", "{\"name\":\"A\"}", "[{\"name\":\"A\"}]", "42"] {
        let store = MemoryKeyValueRepository::new();
        store.insert_raw(CLIENTS_STORE_KEY, raw);

        let outcome = load_clients(&store);
        assert_eq!(pairs(&outcome.clients), seed_pairs(), "raw value `{raw}`");
        assert!(
            matches!(
                outcome.source,
                LoadSource::Defaulted(DefaultReason::Malformed { .. })
            ),
            "raw value `{raw}` gave {:?}",
            outcome.source
        );
    }
}

#[test]
fn unavailable_store_loads_seed_set_tagged_unavailable() {
    let store = MemoryKeyValueRepository::unavailable();
    let roster = ClientRoster::load(&store);
    assert_eq!(roster.count(), 4);
    assert!(matches!(
        roster.load_source(),
        LoadSource::Defaulted(DefaultReason::StoreUnavailable(_))
    ));
}

#[test]
fn stored_empty_list_is_loaded_as_is() {
    let store = MemoryKeyValueRepository::new();
    store.insert_raw(CLIENTS_STORE_KEY, "[]");
    let roster = ClientRoster::load(&store);
    assert_eq!(roster.count(), 0);
    assert_eq!(roster.load_source(), &LoadSource::Loaded);
}

#[test]
fn append_increments_count_and_preserves_order() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);
    let before = pairs(roster.clients())
        .into_iter()
        .map(|(n, e)| (n.to_string(), e.to_string()))
        .collect::<Vec<_>>();

    let outcome = roster.append(ClientRecord::new("Ann Lee", "ann@lee.io").unwrap());
    assert_eq!(outcome, PersistOutcome::Saved);
    assert_eq!(roster.count(), before.len() + 1);
    for (index, (name, email)) in before.iter().enumerate() {
        assert_eq!(roster.clients()[index].name(), name);
        assert_eq!(roster.clients()[index].email(), email);
    }
    assert_eq!(roster.clients()[4].name(), "Ann Lee");
}

#[test]
fn persist_then_fresh_load_round_trips() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);
    roster.add_client("Ann Lee", "ann@lee.io").unwrap();
    roster.add_client("Bo Chen", "bo@chen.dev").unwrap();
    let expected = roster.clients().to_vec();

    let reloaded = ClientRoster::load(&store);
    assert_eq!(reloaded.load_source(), &LoadSource::Loaded);
    assert_eq!(reloaded.clients(), expected.as_slice());
}

#[test]
fn persisting_the_seed_set_round_trips() {
    let store = MemoryKeyValueRepository::new();
    let roster = ClientRoster::load(&store);
    assert_eq!(roster.persist(), PersistOutcome::Saved);

    let reloaded = load_clients(&store);
    assert_eq!(reloaded.source, LoadSource::Loaded);
    assert_eq!(reloaded.clients, seed_clients());
}

#[test]
fn invalid_email_is_rejected_and_roster_unchanged() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);

    let err = roster.add_client("Ann Lee", "plainaddress").unwrap_err();
    assert_eq!(err.email, Some(ClientValidationError::InvalidEmailFormat));
    assert_eq!(err.name, None);
    assert_eq!(roster.count(), 4);
    assert!(store.get(CLIENTS_STORE_KEY).unwrap().is_none());
}

#[test]
fn duplicates_are_accepted() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);
    roster.add_client("Ann Lee", "ann@lee.io").unwrap();
    roster.add_client("Ann Lee", "ann@lee.io").unwrap();

    assert_eq!(roster.count(), 6);
    assert_eq!(roster.clients()[4], roster.clients()[5]);
    assert_eq!(load_clients(&store).clients.len(), 6);
}

#[test]
fn persist_failure_keeps_memory_but_not_storage() {
    let store = MemoryKeyValueRepository::with_quota(64);
    let mut roster = ClientRoster::load(&store);

    let outcome = roster.add_client("Ann Lee", "ann@lee.io").unwrap();
    assert!(matches!(outcome, PersistOutcome::Failed(ref reason) if reason.contains("quota")));
    assert_eq!(roster.count(), 5);

    let cold = ClientRoster::load(&store);
    assert_eq!(cold.count(), 4);
    assert!(cold.load_source().is_defaulted());
}

#[test]
fn store_outage_mid_session_is_swallowed() {
    let store = MemoryKeyValueRepository::new();
    let mut roster = ClientRoster::load(&store);
    roster.add_client("Ann Lee", "ann@lee.io").unwrap();

    store.set_available(false);
    let outcome = roster.add_client("Bo Chen", "bo@chen.dev").unwrap();
    assert!(!outcome.is_saved());
    assert_eq!(roster.count(), 6);

    store.set_available(true);
    assert_eq!(load_clients(&store).clients.len(), 5);
}

#[test]
fn stored_records_are_not_revalidated_on_load() {
    let store = MemoryKeyValueRepository::new();
    store.insert_raw(
        CLIENTS_STORE_KEY,
        r#"[{"name":"","email":"legacy"},{"name":"Ann","email":"ann@lee.io"}]"#,
    );
    let roster = ClientRoster::load(&store);
    assert_eq!(roster.load_source(), &LoadSource::Loaded);
    assert_eq!(roster.count(), 2);
    assert_eq!(roster.clients()[0].email(), "legacy");
}

use pretty_assertions::assert_eq;
use studyconnect_client::state::FetchState;
use studyconnect_core::errors::StudyError;

#[test]
fn test_starts_idle() {
    let state: FetchState<Vec<u32>> = FetchState::default();
    assert_eq!(state, FetchState::Idle);
    assert!(!state.is_loading());
    assert_eq!(state.loaded(), None);
}

#[test]
fn test_successful_fetch() {
    let mut state = FetchState::default();
    state.begin();
    assert!(state.is_loading());

    assert!(state.finish(Ok(vec![1, 2, 3])));
    assert_eq!(state.loaded(), Some(&vec![1, 2, 3]));
    assert_eq!(state.error(), None);
}

#[test]
fn test_empty_result_is_loaded_not_failed() {
    let mut state: FetchState<Vec<u32>> = FetchState::default();
    state.begin();
    state.finish(Ok(Vec::new()));

    assert_eq!(state, FetchState::Loaded(Vec::new()));
}

#[test]
fn test_failed_fetch_keeps_message() {
    let mut state: FetchState<u32> = FetchState::default();
    state.begin();
    state.finish(Err(StudyError::Store(eyre::eyre!("connection refused"))));

    assert_eq!(state.error(), Some("Store error: connection refused"));
    assert_eq!(state.loaded(), None);
}

#[test]
fn test_late_result_after_reset_is_ignored() {
    let mut state = FetchState::default();
    state.begin();
    state.reset();

    assert!(!state.finish(Ok(7)));
    assert_eq!(state, FetchState::Idle);
}

#[test]
fn test_refetch_discards_previous_value() {
    let mut state = FetchState::default();
    state.begin();
    state.finish(Ok("first"));

    state.begin();
    assert_eq!(state.loaded(), None);
    assert!(!FetchState::Loaded("x").is_loading());

    state.finish(Ok("second"));
    assert_eq!(state.loaded(), Some(&"second"));
}

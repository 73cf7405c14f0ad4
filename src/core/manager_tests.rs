// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::Action;
use crate::core::config::MissingRecordPolicy;
use crate::core::error::{ConfigError, Error};
use crate::core::events::Event;
use crate::core::manager::Manager;
use crate::core::state::State;

const MIN: u64 = 60_000;

fn started(interval_ms: u64, now_ms: u64) -> (Manager, State) {
    let mut mgr = Manager::default();
    let mut state = State::new(now_ms);
    mgr.handle_event(&mut state, Event::Start { interval_ms, now_ms })
        .unwrap();
    (mgr, state)
}

fn armed_epoch(actions: &[Action]) -> u64 {
    actions
        .iter()
        .find_map(|a| match a {
            Action::ArmTimers { epoch, .. } => Some(*epoch),
            _ => None,
        })
        .expect("expected ArmTimers")
}

#[test]
fn start_arms_full_interval() {
    let mut mgr = Manager::default();
    let mut state = State::new(0);

    let actions = mgr
        .handle_event(&mut state, Event::Start { interval_ms: MIN, now_ms: 1_000 })
        .unwrap();

    assert_eq!(
        actions,
        vec![Action::ArmTimers { epoch: 1, deadline_in_ms: MIN }]
    );
    assert!(state.is_active());
    assert_eq!(state.last_action_ms(), 1_000);
    assert_eq!(state.interval_ms(), MIN);
}

#[test]
fn start_rejects_zero_interval() {
    let mut mgr = Manager::default();
    let mut state = State::new(0);

    let err = mgr
        .handle_event(&mut state, Event::Start { interval_ms: 0, now_ms: 0 })
        .unwrap_err();

    assert_eq!(err, Error::InvalidConfig(ConfigError::NonPositiveInterval));
    assert!(!state.is_active());
    assert!(state.armed().is_none());
}

#[test]
fn restart_while_active_replaces_timers() {
    let (mut mgr, mut state) = started(MIN, 0);

    let actions = mgr
        .handle_event(&mut state, Event::Start { interval_ms: 2 * MIN, now_ms: 5_000 })
        .unwrap();

    assert_eq!(actions[0], Action::CancelTimers);
    assert!(matches!(
        actions[1],
        Action::ArmTimers { deadline_in_ms, .. } if deadline_in_ms == 2 * MIN
    ));
    assert_eq!(actions.len(), 2);
    assert_eq!(state.interval_ms(), 2 * MIN);
}

#[test]
fn deadline_fires_one_timeout_and_deactivates() {
    let (mut mgr, mut state) = started(MIN, 0);
    let epoch = state.epoch();

    let actions = mgr
        .handle_event(&mut state, Event::DeadlineElapsed { epoch, now_ms: MIN })
        .unwrap();
    assert_eq!(actions, vec![Action::CancelTimers, Action::NotifyTimeout]);
    assert!(!state.is_active());

    // A duplicate fire of the same pair is ignored.
    let actions = mgr
        .handle_event(&mut state, Event::DeadlineElapsed { epoch, now_ms: MIN + 1 })
        .unwrap();
    assert!(actions.is_empty());

    // And so is a late tick.
    let actions = mgr
        .handle_event(&mut state, Event::TickElapsed { epoch, now_ms: MIN + 2 })
        .unwrap();
    assert!(actions.is_empty());
}

#[test]
fn user_action_restarts_countdown_from_scratch() {
    let (mut mgr, mut state) = started(MIN, 0);
    let first_epoch = state.epoch();

    let actions = mgr
        .handle_event(&mut state, Event::UserAction { now_ms: 40_000 })
        .unwrap();

    assert_eq!(actions[0], Action::CancelTimers);
    let second_epoch = armed_epoch(&actions);
    assert_ne!(first_epoch, second_epoch);
    assert_eq!(state.last_action_ms(), 40_000);
    assert_eq!(state.armed().unwrap().deadline_ms, 40_000 + MIN);

    // The original deadline no longer counts.
    let actions = mgr
        .handle_event(&mut state, Event::DeadlineElapsed { epoch: first_epoch, now_ms: MIN })
        .unwrap();
    assert!(actions.is_empty());
    assert!(state.is_active());

    let actions = mgr
        .handle_event(
            &mut state,
            Event::DeadlineElapsed { epoch: second_epoch, now_ms: 40_000 + MIN },
        )
        .unwrap();
    assert!(actions.contains(&Action::NotifyTimeout));
}

#[test]
fn user_action_while_inactive_is_ignored() {
    let mut mgr = Manager::default();
    let mut state = State::new(0);

    let actions = mgr
        .handle_event(&mut state, Event::UserAction { now_ms: 10 })
        .unwrap();

    assert!(actions.is_empty());
    assert!(!state.is_active());
    assert_eq!(state.last_action_ms(), 0);
}

#[test]
fn reentrant_action_after_timeout_does_not_rearm() {
    let (mut mgr, mut state) = started(MIN, 0);
    let epoch = state.epoch();
    mgr.handle_event(&mut state, Event::DeadlineElapsed { epoch, now_ms: MIN })
        .unwrap();

    let actions = mgr
        .handle_event(&mut state, Event::UserAction { now_ms: MIN })
        .unwrap();
    assert!(actions.is_empty());
    assert!(state.armed().is_none());
}

#[test]
fn stop_disarms_without_notifying() {
    let (mut mgr, mut state) = started(MIN, 0);
    let epoch = state.epoch();

    let actions = mgr.handle_event(&mut state, Event::Stop { now_ms: 1 }).unwrap();
    assert_eq!(actions, vec![Action::CancelTimers]);
    assert!(!state.is_active());

    let actions = mgr
        .handle_event(&mut state, Event::DeadlineElapsed { epoch, now_ms: MIN })
        .unwrap();
    assert!(actions.is_empty());

    // Second stop is a no-op.
    let actions = mgr.handle_event(&mut state, Event::Stop { now_ms: 2 }).unwrap();
    assert!(actions.is_empty());
}

#[test]
fn ticks_count_from_zero_and_restart_on_action() {
    let (mut mgr, mut state) = started(MIN, 0);
    let epoch = state.epoch();

    for (i, now) in [1_000, 2_000, 3_000].into_iter().enumerate() {
        let actions = mgr
            .handle_event(&mut state, Event::TickElapsed { epoch, now_ms: now })
            .unwrap();
        assert_eq!(actions, vec![Action::NotifyTick { elapsed_secs: i as u64 }]);
    }

    let actions = mgr
        .handle_event(&mut state, Event::UserAction { now_ms: 3_500 })
        .unwrap();
    let epoch = armed_epoch(&actions);

    let actions = mgr
        .handle_event(&mut state, Event::TickElapsed { epoch, now_ms: 4_500 })
        .unwrap();
    assert_eq!(actions, vec![Action::NotifyTick { elapsed_secs: 0 }]);
}

#[test]
fn suspend_persists_last_action_not_suspend_time() {
    let (mut mgr, mut state) = started(MIN, 0);

    let actions = mgr
        .handle_event(&mut state, Event::Suspend { now_ms: 10_000 })
        .unwrap();

    assert_eq!(
        actions,
        vec![Action::CancelTimers, Action::PersistLastAction { at_ms: 0 }]
    );
    assert!(state.is_active());
    assert!(state.is_suspended());
    assert!(state.armed().is_none());
}

#[test]
fn suspend_while_inactive_persists_nothing() {
    let mut mgr = Manager::default();
    let mut state = State::new(0);

    let actions = mgr
        .handle_event(&mut state, Event::Suspend { now_ms: 10 })
        .unwrap();
    assert!(actions.is_empty());

    let (mut mgr, mut state) = started(MIN, 0);
    mgr.handle_event(&mut state, Event::Stop { now_ms: 5 }).unwrap();
    let actions = mgr
        .handle_event(&mut state, Event::Suspend { now_ms: 10 })
        .unwrap();
    assert!(actions.is_empty());
}

#[test]
fn double_suspend_persists_the_same_instant() {
    let (mut mgr, mut state) = started(MIN, 2_000);

    let first = mgr
        .handle_event(&mut state, Event::Suspend { now_ms: 10_000 })
        .unwrap();
    let second = mgr
        .handle_event(&mut state, Event::Suspend { now_ms: 11_000 })
        .unwrap();

    assert!(first.contains(&Action::PersistLastAction { at_ms: 2_000 }));
    assert_eq!(second, vec![Action::PersistLastAction { at_ms: 2_000 }]);
}

#[test]
fn resume_after_interval_times_out_without_tick() {
    // interval 1 min, start T0, suspend T0+10s, resume T0+70s
    let (mut mgr, mut state) = started(MIN, 0);
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 10_000 })
        .unwrap();

    let actions = mgr
        .handle_event(
            &mut state,
            Event::Resume { persisted_ms: Some(0), now_ms: 70_000 },
        )
        .unwrap();

    assert_eq!(actions, vec![Action::NotifyTimeout]);
    assert!(!state.is_active());
    assert!(!state.is_suspended());
    assert!(state.armed().is_none());
}

#[test]
fn resume_within_interval_arms_remaining_time() {
    // interval 2 min, start T0, suspend T0+5s, resume T0+65s
    let (mut mgr, mut state) = started(2 * MIN, 0);
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 5_000 })
        .unwrap();

    let actions = mgr
        .handle_event(
            &mut state,
            Event::Resume { persisted_ms: Some(0), now_ms: 65_000 },
        )
        .unwrap();

    assert_eq!(actions.len(), 1);
    assert!(matches!(
        actions[0],
        Action::ArmTimers { deadline_in_ms: 55_000, .. }
    ));
    assert_eq!(state.tick_count(), 0);

    let epoch = state.epoch();
    let actions = mgr
        .handle_event(&mut state, Event::TickElapsed { epoch, now_ms: 66_000 })
        .unwrap();
    assert_eq!(actions, vec![Action::NotifyTick { elapsed_secs: 0 }]);
}

#[test]
fn resume_restarts_tick_counter_mid_interval() {
    let (mut mgr, mut state) = started(2 * MIN, 0);
    let epoch = state.epoch();
    for now in [1_000, 2_000, 3_000, 4_000] {
        mgr.handle_event(&mut state, Event::TickElapsed { epoch, now_ms: now })
            .unwrap();
    }
    assert_eq!(state.tick_count(), 4);

    mgr.handle_event(&mut state, Event::Suspend { now_ms: 4_500 })
        .unwrap();
    mgr.handle_event(
        &mut state,
        Event::Resume { persisted_ms: Some(0), now_ms: 30_000 },
    )
    .unwrap();

    assert_eq!(state.tick_count(), 0);
}

#[test]
fn resume_while_inactive_is_ignored() {
    let mut mgr = Manager::default();
    let mut state = State::new(0);

    let actions = mgr
        .handle_event(&mut state, Event::Resume { persisted_ms: Some(0), now_ms: 10 })
        .unwrap();
    assert!(actions.is_empty());
    assert!(!state.is_active());
}

#[test]
fn resume_without_suspend_keeps_running_timers() {
    let (mut mgr, mut state) = started(MIN, 0);
    let epoch = state.epoch();

    let actions = mgr
        .handle_event(&mut state, Event::Resume { persisted_ms: Some(0), now_ms: 10_000 })
        .unwrap();

    assert!(actions.is_empty());
    assert_eq!(state.epoch(), epoch);
}

#[test]
fn missing_record_times_out_by_default() {
    let (mut mgr, mut state) = started(MIN, 0);
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 1_000 })
        .unwrap();

    let actions = mgr
        .handle_event(&mut state, Event::Resume { persisted_ms: None, now_ms: 2_000 })
        .unwrap();

    assert_eq!(actions, vec![Action::NotifyTimeout]);
    assert!(!state.is_active());
}

#[test]
fn missing_record_can_assume_no_elapsed_time() {
    let mut mgr = Manager::new(MissingRecordPolicy::AssumeNoElapsed);
    let mut state = State::new(0);
    mgr.handle_event(&mut state, Event::Start { interval_ms: MIN, now_ms: 0 })
        .unwrap();
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 1_000 })
        .unwrap();

    let actions = mgr
        .handle_event(&mut state, Event::Resume { persisted_ms: None, now_ms: 500_000 })
        .unwrap();

    assert_eq!(
        actions,
        vec![Action::ArmTimers { epoch: state.epoch(), deadline_in_ms: MIN }]
    );
    assert_eq!(state.last_action_ms(), 500_000);
}

#[test]
fn clock_moved_backward_rearms_full_interval() {
    let (mut mgr, mut state) = started(MIN, 100_000);
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 101_000 })
        .unwrap();

    let actions = mgr
        .handle_event(
            &mut state,
            Event::Resume { persisted_ms: Some(100_000), now_ms: 40_000 },
        )
        .unwrap();

    assert!(matches!(
        actions[0],
        Action::ArmTimers { deadline_in_ms, .. } if deadline_in_ms == MIN
    ));
}

#[test]
fn action_while_suspended_updates_persisted_instant_only() {
    let (mut mgr, mut state) = started(MIN, 0);
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 1_000 })
        .unwrap();

    let actions = mgr
        .handle_event(&mut state, Event::UserAction { now_ms: 30_000 })
        .unwrap();

    assert_eq!(actions, vec![Action::PersistLastAction { at_ms: 30_000 }]);
    assert!(state.armed().is_none());
    assert!(state.is_suspended());
}

#[test]
fn timer_events_are_ignored_while_suspended() {
    let (mut mgr, mut state) = started(MIN, 0);
    let epoch = state.epoch();
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 1_000 })
        .unwrap();

    let actions = mgr
        .handle_event(&mut state, Event::DeadlineElapsed { epoch, now_ms: MIN })
        .unwrap();
    assert!(actions.is_empty());
    assert!(state.is_active());
}

#[test]
fn snapshot_reports_remaining_time() {
    let (mgr, state) = started(MIN, 0);

    let snap = mgr.snapshot(&state, 15_000);
    assert!(snap.active);
    assert_eq!(snap.remaining_ms, Some(45_000));
    assert_eq!(snap.status_word(), "active");

    let stopped = mgr.snapshot(&State::new(0), 15_000);
    assert_eq!(stopped.remaining_ms, None);
    assert_eq!(stopped.status_word(), "stopped");
}

#[test]
fn snapshot_while_suspended_derives_from_last_action() {
    let (mut mgr, mut state) = started(MIN, 0);
    mgr.handle_event(&mut state, Event::Suspend { now_ms: 5_000 })
        .unwrap();

    let snap = mgr.snapshot(&state, 20_000);
    assert!(snap.suspended);
    assert_eq!(snap.remaining_ms, Some(40_000));

    let snap = mgr.snapshot(&state, 90_000);
    assert_eq!(snap.remaining_ms, Some(0));
}

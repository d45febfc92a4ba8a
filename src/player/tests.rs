use super::*;
use crate::catalog::{Catalog, default_tracks};
use crate::error::MediaError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(String, Generation),
    Play,
    Pause,
    Seek(Duration),
    Release,
}

/// Records every command; `play` can be told to fail.
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    reject_play: Rc<Cell<bool>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

struct MockBinding(Recorder);

impl MediaBinding for MockBinding {
    fn load(&mut self, audio_url: &str, generation: Generation) -> Result<(), MediaError> {
        self.0
            .calls
            .borrow_mut()
            .push(Call::Load(audio_url.to_string(), generation));
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.0.calls.borrow_mut().push(Call::Play);
        if self.0.reject_play.get() {
            Err(MediaError::NoSource)
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.0.calls.borrow_mut().push(Call::Pause);
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
        self.0.calls.borrow_mut().push(Call::Seek(position));
        Ok(())
    }

    fn release(&mut self) {
        self.0.calls.borrow_mut().push(Call::Release);
    }
}

fn player() -> (PlayerController<MockBinding>, Recorder) {
    let rec = Recorder::default();
    let catalog = Catalog::new(default_tracks()).unwrap();
    (PlayerController::new(catalog, MockBinding(rec.clone())), rec)
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn starts_paused_on_first_track_with_source_bound() {
    let (p, rec) = player();
    assert_eq!(p.snapshot(), PlayerState::default());
    assert_eq!(
        rec.calls(),
        vec![Call::Load("/music/berubah.mp3".into(), p.generation())]
    );
}

#[test]
fn next_cycles_through_catalog_and_wraps() {
    let (mut p, _rec) = player();
    p.next();
    assert_eq!(p.snapshot().current_index, 1);
    assert_eq!(p.current_track().title, "Bintang 5");
    p.next();
    assert_eq!(p.snapshot().current_index, 2);
    p.next();
    assert_eq!(p.snapshot().current_index, 0);
    assert_eq!(p.current_track().title, "Berubah");
}

#[test]
fn next_len_times_returns_to_start_from_any_index() {
    let (mut p, _rec) = player();
    let len = p.catalog().len();
    for start in 0..len {
        p.select_track(start);
        for _ in 0..len {
            p.next();
        }
        assert_eq!(p.snapshot().current_index, start);
    }
}

#[test]
fn previous_wraps_backwards_from_first_track() {
    let (mut p, _rec) = player();
    p.previous();
    assert_eq!(p.snapshot().current_index, 2);
    assert_eq!(p.current_track().title, "SO ASU");
    p.previous();
    assert_eq!(p.snapshot().current_index, 1);
}

#[test]
fn select_track_resets_time_and_pauses() {
    let (mut p, rec) = player();
    p.on_duration_known(secs(200));
    p.toggle_play_pause();
    p.on_position_update(secs(42));
    assert!(p.snapshot().is_playing);

    rec.clear();
    p.select_track(2);

    let s = p.snapshot();
    assert_eq!(s.current_index, 2);
    assert_eq!(s.current_time, Duration::ZERO);
    assert!(!s.is_playing);
    assert_eq!(
        rec.calls(),
        vec![Call::Load("/music/soasu.mp3".into(), p.generation())]
    );
}

#[test]
fn out_of_range_selection_is_ignored() {
    let (mut p, rec) = player();
    p.select_track(1);
    rec.clear();
    let before = p.snapshot();
    let generation = p.generation();

    p.select_track(3);
    p.select_track(usize::MAX);

    assert_eq!(p.snapshot(), before);
    assert_eq!(p.generation(), generation);
    assert!(rec.calls().is_empty());
}

#[test]
fn toggle_play_pause_issues_matching_commands() {
    let (mut p, rec) = player();
    rec.clear();

    p.toggle_play_pause();
    assert!(p.snapshot().is_playing);
    p.toggle_play_pause();
    assert!(!p.snapshot().is_playing);

    assert_eq!(rec.calls(), vec![Call::Play, Call::Pause]);
}

#[test]
fn rejected_play_leaves_player_paused() {
    let (mut p, rec) = player();
    rec.reject_play.set(true);

    p.toggle_play_pause();

    assert!(!p.snapshot().is_playing);
    assert_eq!(rec.count(|c| *c == Call::Play), 1);
}

#[test]
fn late_play_rejection_reverts_to_paused() {
    let (mut p, _rec) = player();
    p.toggle_play_pause();
    assert!(p.snapshot().is_playing);

    p.apply(Notification::new(
        p.generation(),
        MediaEvent::PlayRejected("device busy".into()),
    ));
    assert!(!p.snapshot().is_playing);
}

#[test]
fn load_failure_keeps_duration_unknown_and_paused() {
    let (mut p, _rec) = player();
    p.toggle_play_pause();
    p.apply(Notification::new(
        p.generation(),
        MediaEvent::LoadFailed("no such file".into()),
    ));

    let s = p.snapshot();
    assert!(!s.is_playing);
    assert_eq!(s.duration, Duration::ZERO);
}

#[test]
fn position_updates_are_ignored_while_scrubbing() {
    let (mut p, _rec) = player();
    p.on_duration_known(secs(180));
    p.on_position_update(secs(10));

    p.begin_scrub();
    p.on_position_update(secs(11));
    assert_eq!(p.snapshot().current_time, secs(10));

    p.scrub_to(secs(90));
    p.on_position_update(secs(12));
    assert_eq!(p.snapshot().current_time, secs(90));
}

#[test]
fn scrub_to_outside_a_scrub_does_nothing() {
    let (mut p, _rec) = player();
    p.on_duration_known(secs(180));
    p.scrub_to(secs(50));
    assert_eq!(p.snapshot().current_time, Duration::ZERO);
}

#[test]
fn end_scrub_sets_time_and_seeks_exactly_once() {
    let (mut p, rec) = player();
    p.on_duration_known(secs(180));
    rec.clear();

    p.begin_scrub();
    p.scrub_to(secs(30));
    p.scrub_to(secs(60));
    p.end_scrub(secs(75));

    let s = p.snapshot();
    assert_eq!(s.current_time, secs(75));
    assert!(!s.is_scrubbing);
    assert_eq!(rec.calls(), vec![Call::Seek(secs(75))]);

    p.on_position_update(secs(76));
    assert_eq!(p.snapshot().current_time, secs(76));
}

#[test]
fn scrub_positions_are_clamped_to_duration() {
    let (mut p, rec) = player();
    p.on_duration_known(secs(100));
    rec.clear();

    p.begin_scrub();
    p.scrub_to(secs(500));
    assert_eq!(p.snapshot().current_time, secs(100));
    p.end_scrub(secs(500));

    assert_eq!(p.snapshot().current_time, secs(100));
    assert_eq!(rec.calls(), vec![Call::Seek(secs(100))]);
}

#[test]
fn seek_by_moves_relative_and_saturates_at_zero() {
    let (mut p, rec) = player();
    p.on_duration_known(secs(100));
    p.on_position_update(secs(20));
    rec.clear();

    p.seek_by(5);
    assert_eq!(p.snapshot().current_time, secs(25));
    p.seek_by(-60);
    assert_eq!(p.snapshot().current_time, Duration::ZERO);
    assert!(!p.snapshot().is_scrubbing);
    assert_eq!(
        rec.calls(),
        vec![Call::Seek(secs(25)), Call::Seek(Duration::ZERO)]
    );
}

#[test]
fn playback_end_stops_and_rewinds_without_advancing() {
    let (mut p, _rec) = player();
    p.select_track(1);
    p.on_duration_known(secs(246));
    p.toggle_play_pause();
    p.on_position_update(secs(246));

    p.apply(Notification::new(p.generation(), MediaEvent::Ended));

    let s = p.snapshot();
    assert!(!s.is_playing);
    assert_eq!(s.current_time, Duration::ZERO);
    assert_eq!(s.current_index, 1);
}

#[test]
fn playback_end_advances_when_enabled() {
    let rec = Recorder::default();
    let catalog = Catalog::new(default_tracks()).unwrap();
    let mut p = PlayerController::new(catalog, MockBinding(rec.clone())).with_auto_advance(true);
    p.toggle_play_pause();
    rec.clear();

    p.on_playback_ended();

    let s = p.snapshot();
    assert_eq!(s.current_index, 1);
    assert!(s.is_playing);
    assert_eq!(
        rec.calls(),
        vec![
            Call::Load("/music/bintang5.mp3".into(), p.generation()),
            Call::Play
        ]
    );
}

#[test]
fn stale_duration_from_previous_track_is_dropped() {
    let (mut p, _rec) = player();
    p.toggle_play_pause();
    p.on_position_update(secs(30));
    let track0 = p.generation();

    p.select_track(1);
    p.apply(Notification::new(track0, MediaEvent::DurationKnown(secs(201))));
    assert_eq!(p.snapshot().duration, Duration::ZERO);

    p.apply(Notification::new(
        p.generation(),
        MediaEvent::DurationKnown(secs(246)),
    ));
    assert_eq!(p.snapshot().duration, secs(246));
}

#[test]
fn stale_end_and_position_do_not_touch_new_track() {
    let (mut p, _rec) = player();
    let track0 = p.generation();
    p.next();
    p.on_duration_known(secs(246));
    p.toggle_play_pause();
    p.on_position_update(secs(12));

    p.apply(Notification::new(track0, MediaEvent::Position(secs(99))));
    p.apply(Notification::new(track0, MediaEvent::Ended));

    let s = p.snapshot();
    assert!(s.is_playing);
    assert_eq!(s.current_time, secs(12));
}

#[test]
fn play_state_listener_fires_once_per_transition() {
    let (mut p, rec) = player();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    p.on_play_state_change(move |playing| sink.borrow_mut().push(playing));

    p.toggle_play_pause();
    p.on_position_update(secs(1));
    p.toggle_play_pause();
    // Already paused: none of these is a transition.
    p.select_track(2);
    p.on_playback_ended();
    rec.reject_play.set(true);
    p.toggle_play_pause();

    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn selecting_a_track_while_playing_reports_the_pause() {
    let (mut p, _rec) = player();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    p.on_play_state_change(move |playing| sink.borrow_mut().push(playing));

    p.toggle_play_pause();
    p.next();

    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn release_detaches_binding_once_and_ignores_later_intents() {
    let (mut p, rec) = player();
    p.toggle_play_pause();
    rec.clear();

    p.release();
    p.release();
    p.toggle_play_pause();
    p.next();

    assert!(!p.snapshot().is_playing);
    assert_eq!(rec.calls(), vec![Call::Release]);
}

#[test]
fn dropping_the_controller_releases_the_binding() {
    let (mut p, rec) = player();
    p.toggle_play_pause();
    drop(p);
    assert_eq!(rec.count(|c| *c == Call::Release), 1);
}

#[test]
fn progress_is_zero_until_duration_known() {
    let mut s = PlayerState {
        current_time: secs(30),
        ..PlayerState::default()
    };
    assert_eq!(s.progress(), 0.0);
    s.duration = secs(120);
    assert!((s.progress() - 0.25).abs() < f64::EPSILON);
}

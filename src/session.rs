use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{Configuration, Settings};
use crate::coords::Point;
use crate::error::{AimError, Result};
use crate::intercept::{self, Interception};
use crate::report::Report;
use crate::target::{Target, TargetGenerator};

/// A click resolved to screen pixels, tagged with the canvas epoch of the
/// surface it was taken on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoTarget,
    TargetActive,
}

/// Lifecycle state of one training session. The target and the cursor it
/// was spawned for are set and cleared together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    active: Option<(Target, Point)>,
    canvas_epoch: u64,
}

impl SessionState {
    pub fn has_target(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<&Target> {
        self.active.as_ref().map(|(target, _)| target)
    }

    pub fn last_cursor(&self) -> Option<Point> {
        self.active.map(|(_, cursor)| cursor)
    }

    pub fn canvas_epoch(&self) -> u64 {
        self.canvas_epoch
    }

    pub fn phase(&self) -> Phase {
        if self.has_target() {
            Phase::TargetActive
        } else {
            Phase::NoTarget
        }
    }

    /// Drop the target and move the surface to a fresh epoch
    fn invalidated(&self) -> Self {
        Self {
            active: None,
            canvas_epoch: self.canvas_epoch + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Pointer(PointerSample),
    NewTarget,
    ResetSettings,
}

/// Instructions for the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Discard the click history and start over at `epoch`
    RebuildSurface { epoch: u64 },
    /// The session is over; collect settings again
    ReturnToSetup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: &SessionState) -> Self {
        Self {
            state: state.clone(),
            effects: vec![],
        }
    }

    fn rebuild(state: SessionState) -> Self {
        let epoch = state.canvas_epoch;
        Self {
            state,
            effects: vec![Effect::RebuildSurface { epoch }],
        }
    }
}

/// Advance `state` by one event. Samples from an older canvas epoch are
/// rejected and leave the caller's state untouched.
pub fn transition<R: Rng>(
    state: &SessionState,
    event: SessionEvent,
    generator: &mut TargetGenerator<R>,
) -> Result<Transition> {
    match event {
        SessionEvent::Pointer(sample) => {
            if sample.epoch != state.canvas_epoch {
                return Err(AimError::StaleSample {
                    sample_epoch: sample.epoch,
                    current_epoch: state.canvas_epoch,
                });
            }

            match state.active {
                None => {
                    let target = generator.generate();
                    log::debug!(
                        "epoch {}: target spawned for cursor ({:.1}, {:.1})",
                        state.canvas_epoch,
                        sample.position.x,
                        sample.position.y
                    );
                    Ok(Transition {
                        state: SessionState {
                            active: Some((target, sample.position)),
                            canvas_epoch: state.canvas_epoch,
                        },
                        effects: vec![],
                    })
                }
                Some((_, last)) if last == sample.position => Ok(Transition::stay(state)),
                Some(_) => {
                    let next = state.invalidated();
                    log::debug!("new click, starting canvas epoch {}", next.canvas_epoch);
                    Ok(Transition::rebuild(next))
                }
            }
        }
        SessionEvent::NewTarget => {
            if state.has_target() {
                let next = state.invalidated();
                log::debug!("new target requested, canvas epoch {}", next.canvas_epoch);
                Ok(Transition::rebuild(next))
            } else {
                Ok(Transition::stay(state))
            }
        }
        SessionEvent::ResetSettings => Ok(Transition {
            state: SessionState::default(),
            effects: vec![Effect::ReturnToSetup],
        }),
    }
}

/// One configured training session: the validated configuration, the
/// current lifecycle state and the target source.
#[derive(Debug)]
pub struct Session<R: Rng> {
    config: Configuration,
    state: SessionState,
    generator: TargetGenerator<R>,
    terminated: bool,
}

impl Session<StdRng> {
    /// Start a session with a seeded generator when `seed` is given
    pub fn start(settings: &Settings, seed: Option<u64>) -> Result<Self> {
        let generator = match seed {
            Some(seed) => TargetGenerator::seeded(seed),
            None => TargetGenerator::from_entropy(),
        };
        Self::new(settings, generator)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(settings: &Settings, generator: TargetGenerator<R>) -> Result<Self> {
        let config = settings.validate().inspect_err(|e| {
            log::warn!("refusing to start session: {e}");
        })?;
        log::info!(
            "session started: dpi {}, reaction {:.0} ms, screen {}x{}",
            config.dpi,
            config.reaction_ms(),
            config.screen_width,
            config.screen_height
        );
        Ok(Self {
            config,
            state: SessionState::default(),
            generator,
            terminated: false,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<Effect>> {
        if self.terminated {
            log::warn!("ignoring {event:?} on a terminated session");
            return Ok(vec![]);
        }

        let Transition { state, effects } = transition(&self.state, event, &mut self.generator)?;
        if effects.contains(&Effect::ReturnToSetup) {
            log::info!("settings reset, session terminated");
            self.terminated = true;
        }
        self.state = state;
        Ok(effects)
    }

    /// Fresh interception for the active target, if any
    pub fn interception(&self) -> Result<Option<Interception>> {
        match self.state.active {
            Some((target, cursor)) => Ok(Some(intercept::compute(
                cursor,
                &target,
                self.config.reaction_secs,
                self.config.dpi,
            )?)),
            None => Ok(None),
        }
    }

    pub fn report(&self) -> Result<Option<Report>> {
        let Some((target, cursor)) = self.state.active else {
            return Ok(None);
        };
        let interception =
            intercept::compute(cursor, &target, self.config.reaction_secs, self.config.dpi)?;
        Ok(Some(Report::new(&self.config, cursor, &target, &interception)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intercept::Direction;
    use assert_matches::assert_matches;

    fn sample(x: f64, y: f64, epoch: u64) -> SessionEvent {
        SessionEvent::Pointer(PointerSample {
            position: Point::new(x, y),
            epoch,
        })
    }

    fn gen() -> TargetGenerator<StdRng> {
        TargetGenerator::seeded(3)
    }

    #[test]
    fn starts_without_target() {
        let state = SessionState::default();
        assert_eq!(state.phase(), Phase::NoTarget);
        assert!(!state.has_target());
        assert_eq!(state.target(), None);
        assert_eq!(state.last_cursor(), None);
        assert_eq!(state.canvas_epoch(), 0);
    }

    #[test]
    fn first_sample_spawns_target() {
        let mut g = gen();
        let t = transition(&SessionState::default(), sample(10.0, 20.0, 0), &mut g).unwrap();
        assert!(t.effects.is_empty());
        assert_eq!(t.state.phase(), Phase::TargetActive);
        assert!(t.state.has_target());
        assert!(t.state.target().is_some());
        assert_eq!(t.state.last_cursor(), Some(Point::new(10.0, 20.0)));
        assert_eq!(t.state.canvas_epoch(), 0);
    }

    #[test]
    fn repeated_sample_is_a_noop() {
        let mut g = gen();
        let active = transition(&SessionState::default(), sample(10.0, 20.0, 0), &mut g)
            .unwrap()
            .state;
        let t = transition(&active, sample(10.0, 20.0, 0), &mut g).unwrap();
        assert_eq!(t.state, active);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn distinct_sample_invalidates_and_bumps_epoch() {
        let mut g = gen();
        let active = transition(&SessionState::default(), sample(10.0, 20.0, 0), &mut g)
            .unwrap()
            .state;
        let t = transition(&active, sample(11.0, 20.0, 0), &mut g).unwrap();
        assert_eq!(t.state.phase(), Phase::NoTarget);
        assert_eq!(t.state.canvas_epoch(), 1);
        assert_eq!(t.state.last_cursor(), None);
        assert_eq!(t.effects, vec![Effect::RebuildSurface { epoch: 1 }]);
    }

    #[test]
    fn new_target_request_invalidates_active_target() {
        let mut g = gen();
        let active = transition(&SessionState::default(), sample(1.0, 2.0, 0), &mut g)
            .unwrap()
            .state;
        let t = transition(&active, SessionEvent::NewTarget, &mut g).unwrap();
        assert_eq!(t.state.phase(), Phase::NoTarget);
        assert_eq!(t.state.canvas_epoch(), 1);
        assert_eq!(t.effects, vec![Effect::RebuildSurface { epoch: 1 }]);
    }

    #[test]
    fn new_target_without_target_changes_nothing() {
        let mut g = gen();
        let t = transition(&SessionState::default(), SessionEvent::NewTarget, &mut g).unwrap();
        assert_eq!(t.state, SessionState::default());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn stale_sample_is_rejected() {
        let mut g = gen();
        let active = transition(&SessionState::default(), sample(1.0, 2.0, 0), &mut g)
            .unwrap()
            .state;
        let fresh = transition(&active, SessionEvent::NewTarget, &mut g)
            .unwrap()
            .state;
        assert_matches!(
            transition(&fresh, sample(5.0, 5.0, 0), &mut g),
            Err(AimError::StaleSample {
                sample_epoch: 0,
                current_epoch: 1
            })
        );
    }

    #[test]
    fn reset_settings_returns_to_setup_from_any_phase() {
        let mut g = gen();
        let idle = SessionState::default();
        let active = transition(&idle, sample(1.0, 2.0, 0), &mut g).unwrap().state;
        for state in [idle, active] {
            let t = transition(&state, SessionEvent::ResetSettings, &mut g).unwrap();
            assert_eq!(t.effects, vec![Effect::ReturnToSetup]);
            assert_eq!(t.state, SessionState::default());
        }
    }

    #[test]
    fn session_refuses_invalid_settings() {
        let settings = Settings {
            dpi: 0,
            ..Settings::default()
        };
        assert_matches!(
            Session::start(&settings, Some(1)),
            Err(AimError::InvalidConfig(_))
        );
    }

    #[test]
    fn session_click_cycle() {
        let mut session = Session::start(&Settings::default(), Some(11)).unwrap();
        assert_eq!(session.interception().unwrap(), None);

        assert!(session.handle(sample(400.0, 500.0, 0)).unwrap().is_empty());
        let first = session.state().target().copied().unwrap();
        assert!(session.interception().unwrap().is_some());

        // re-rendering with the same click keeps the same target
        session.handle(sample(400.0, 500.0, 0)).unwrap();
        assert_eq!(session.state().target(), Some(&first));

        let effects = session.handle(sample(410.0, 500.0, 0)).unwrap();
        assert_eq!(effects, vec![Effect::RebuildSurface { epoch: 1 }]);
        assert!(!session.state().has_target());

        session.handle(sample(410.0, 500.0, 1)).unwrap();
        assert!(session.state().has_target());
    }

    #[test]
    fn session_stale_sample_keeps_state() {
        let mut session = Session::start(&Settings::default(), Some(2)).unwrap();
        session.handle(sample(1.0, 1.0, 0)).unwrap();
        session.handle(SessionEvent::NewTarget).unwrap();
        let before = session.state().clone();
        assert!(session.handle(sample(3.0, 3.0, 0)).is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn session_terminates_on_reset() {
        let mut session = Session::start(&Settings::default(), Some(2)).unwrap();
        session.handle(sample(1.0, 1.0, 0)).unwrap();
        let effects = session.handle(SessionEvent::ResetSettings).unwrap();
        assert_eq!(effects, vec![Effect::ReturnToSetup]);
        assert!(session.is_terminated());
        assert!(session.handle(sample(1.0, 1.0, 0)).unwrap().is_empty());
        assert!(!session.state().has_target());
    }

    #[test]
    fn interception_uses_session_configuration() {
        let mut session = Session::start(&Settings::default(), Some(8)).unwrap();
        session.handle(sample(400.0, 500.0, 0)).unwrap();
        let target = *session.state().target().unwrap();
        let r = session.interception().unwrap().unwrap();
        let expected = intercept::compute(Point::new(400.0, 500.0), &target, 0.25, 800).unwrap();
        assert_eq!(r, expected);
        assert_eq!(r.direction, Direction::from_angle(r.angle_deg));
    }

    #[test]
    fn report_is_built_for_active_target() {
        let mut session = Session::start(&Settings::default(), Some(8)).unwrap();
        assert!(session.report().unwrap().is_none());
        session.handle(sample(400.0, 500.0, 0)).unwrap();
        let report = session.report().unwrap().unwrap();
        assert_eq!(report.dpi, 800);
        assert_eq!(report.reaction_ms, 250);
    }
}

use crate::geometry::AnchorId;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Where a step's tooltip sits relative to its anchor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[strum(to_string = "top", serialize = "above")]
    Top,
    #[strum(to_string = "bottom", serialize = "below")]
    Bottom,
    Left,
    Right,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TourStep {
    #[serde(default)]
    pub anchor: Option<AnchorId>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub side: Side,
}

impl TourStep {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            anchor: None,
            title: title.into(),
            body: body.into(),
            side: Side::None,
        }
    }

    pub fn anchored(mut self, anchor: impl Into<AnchorId>, side: Side) -> Self {
        self.anchor = Some(anchor.into());
        self.side = side;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TourError {
    #[error("A tour needs at least one step")]
    Empty,
}

/// Ordered, non-empty sequence of steps. Immutable once built.
#[derive(Debug, Clone)]
pub struct Tour {
    steps: Vec<TourStep>,
}

impl Tour {
    pub fn new(steps: Vec<TourStep>) -> Result<Self, TourError> {
        if steps.is_empty() {
            return Err(TourError::Empty);
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TourStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourState {
    Active { step_index: usize },
    Finished,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved(usize),
    Finished,
    Ignored,
}

pub struct TourEngine {
    tour: Tour,
    index: usize,
    finished: bool,
    on_finish: Option<Box<dyn FnOnce()>>,
}

impl TourEngine {
    pub fn new(tour: Tour) -> Self {
        Self {
            tour,
            index: 0,
            finished: false,
            on_finish: None,
        }
    }

    /// Registers the finish notification. It runs at most once.
    pub fn on_finish(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_finish = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> TourState {
        if self.finished {
            TourState::Finished
        } else {
            TourState::Active {
                step_index: self.index,
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.tour.len()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.tour.len()
    }

    /// The step on screen, or `None` once the tour has finished.
    pub fn current_step(&self) -> Option<&TourStep> {
        if self.finished {
            None
        } else {
            self.tour.get(self.index)
        }
    }

    pub fn next(&mut self) -> Transition {
        if self.finished {
            return Transition::Ignored;
        }
        if self.is_last() {
            return self.finish();
        }
        self.index += 1;
        log::debug!("Tour step {}/{}", self.index + 1, self.tour.len());
        Transition::Moved(self.index)
    }

    pub fn prev(&mut self) -> Transition {
        if self.finished || self.is_first() {
            return Transition::Ignored;
        }
        self.index -= 1;
        log::debug!("Tour step {}/{}", self.index + 1, self.tour.len());
        Transition::Moved(self.index)
    }

    /// Ends the tour from any step through the regular finish path.
    pub fn skip(&mut self) -> Transition {
        if self.finished {
            return Transition::Ignored;
        }
        log::debug!("Tour skipped at step {}", self.index + 1);
        self.finish()
    }

    fn finish(&mut self) -> Transition {
        self.finished = true;
        log::debug!("Tour finished");
        if let Some(callback) = self.on_finish.take() {
            callback();
        }
        Transition::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn tour(n: usize) -> Tour {
        let steps = (0..n)
            .map(|i| TourStep::new(format!("Step {i}"), "body"))
            .collect();
        Tour::new(steps).unwrap()
    }

    fn counted_engine(n: usize) -> (TourEngine, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let engine = TourEngine::new(tour(n)).on_finish(move || counter.set(counter.get() + 1));
        (engine, fired)
    }

    #[test]
    fn test_empty_tour_rejected() {
        assert_eq!(Tour::new(Vec::new()).unwrap_err(), TourError::Empty);
    }

    #[test]
    fn test_next_reaches_last_then_finishes_once() {
        let (mut engine, fired) = counted_engine(5);
        assert_eq!(engine.state(), TourState::Active { step_index: 0 });

        for expected in 1..5 {
            assert_eq!(engine.next(), Transition::Moved(expected));
        }
        assert!(engine.is_last());
        assert_eq!(fired.get(), 0);

        assert_eq!(engine.next(), Transition::Finished);
        assert_eq!(engine.state(), TourState::Finished);
        assert_eq!(fired.get(), 1);

        assert_eq!(engine.next(), Transition::Ignored);
        assert_eq!(engine.skip(), Transition::Ignored);
        assert_eq!(fired.get(), 1);
        assert!(engine.current_step().is_none());
    }

    #[test]
    fn test_prev_at_first_is_noop() {
        let (mut engine, _) = counted_engine(3);
        assert_eq!(engine.prev(), Transition::Ignored);
        assert_eq!(engine.step_index(), 0);

        engine.next();
        assert_eq!(engine.prev(), Transition::Moved(0));
        assert!(engine.is_first());
    }

    #[test]
    fn test_single_step_tour_finishes_on_first_next() {
        let (mut engine, fired) = counted_engine(1);
        assert!(engine.is_first() && engine.is_last());
        assert_eq!(engine.next(), Transition::Finished);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_skip_uses_finish_path() {
        let (mut engine, fired) = counted_engine(4);
        engine.next();
        assert_eq!(engine.skip(), Transition::Finished);
        assert_eq!(fired.get(), 1);
        assert_eq!(engine.prev(), Transition::Ignored);
    }

    #[test]
    fn test_current_step_follows_index() {
        let (mut engine, _) = counted_engine(3);
        engine.next();
        assert_eq!(engine.current_step().map(|s| s.title.as_str()), Some("Step 1"));
    }

    #[test]
    fn test_side_deserialization() {
        let cases = vec![
            ("\"right\"", Side::Right),
            ("\"Right\"", Side::Right),
            ("\"TOP\"", Side::Top),
            ("\"above\"", Side::Top),
            ("\"below\"", Side::Bottom),
            ("\"none\"", Side::None),
        ];

        for (json, expected) in cases {
            let deserialized: Side = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_step_deserialization_defaults() {
        let step: TourStep =
            serde_json::from_str(r#"{"title": "Welcome", "body": "Hello"}"#).unwrap();
        assert_eq!(step.anchor, None);
        assert_eq!(step.side, Side::None);

        let step: TourStep = serde_json::from_str(
            r#"{"anchor": "dial", "title": "Dial", "body": "Drag me", "side": "left"}"#,
        )
        .unwrap();
        assert_eq!(step.anchor, Some(AnchorId::from("dial")));
        assert_eq!(step.side, Side::Left);
    }
}

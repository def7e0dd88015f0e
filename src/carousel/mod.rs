//! Carousel Engine
//!
//! Presents an ordered list of slides, one fully visible at a time, and
//! turns pointer samples into a track offset. Navigation wraps around at both
//! ends.
//!
//! # Drag Flow
//!
//! ```text
//! Idle --pointer_down--> Dragging --pointer_up/leave--> Settling --frames--> Idle
//! ```
//!
//! - While dragging the tracked offset follows the pointer 1:1 from the
//!   committed offset. The rendered offset only changes on animation frames,
//!   so redraws are paced by frames and not by move events.
//! - On release a drag longer than the threshold commits one slide in the
//!   drag direction; anything shorter snaps back to the current slide.
//! - Offsets are recomputed from a freshly measured slide width every time.
//! - Time only enters through `on_animation_frame`; a snap animation starts
//!   at the first frame delivered after it.
//!
//! # Invariants
//!
//! - `0 <= active_index < len` whenever the carousel has slides
//! - No frame request is outstanding after the drag ends and the snap
//!   animation is over

mod frame;

pub use frame::{FrameLoop, FrameToken};

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};

use crate::types::Direction;

/// Drag distance, in pixels, beyond which a release changes slide
pub const DEFAULT_DRAG_THRESHOLD_PX: f32 = 100.0;

/// Duration of the snap animation after a release or navigation
pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(300);

/// Measures the width of one slide at the moment of the call
pub trait SlideMeasure {
    fn slide_width(&self) -> f32;
}

impl<F> SlideMeasure for F
where
    F: Fn() -> f32,
{
    fn slide_width(&self) -> f32 {
        self()
    }
}

/// Slide width that never changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidth(pub f32);

impl SlideMeasure for FixedWidth {
    fn slide_width(&self) -> f32 {
        self.0
    }
}

/// Slide width owned by the host and updated as the viewport changes
#[derive(Debug, Clone, Default)]
pub struct SharedWidth(Rc<Cell<f32>>);

impl SharedWidth {
    pub fn new(width: f32) -> Self {
        Self(Rc::new(Cell::new(width)))
    }

    pub fn set(&self, width: f32) {
        self.0.set(width);
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }
}

impl SlideMeasure for SharedWidth {
    fn slide_width(&self) -> f32 {
        self.0.get()
    }
}

/// Tunable gesture constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    pub drag_threshold_px: f32,
    pub snap_duration: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            snap_duration: DEFAULT_SNAP_DURATION,
        }
    }
}

/// Gesture phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

/// Animation applied when the rendered offset moves toward the committed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackTransition {
    /// Immediate positional tracking
    None,
    /// Eased snap over the given duration
    Snap(Duration),
}

/// What a pointer release did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Committed one slide in the given direction
    Moved(Direction),
    /// Returned to the slide active before the drag
    SnappedBack,
    /// No drag was in progress
    NotDragging,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    start_x: f32,
    baseline: f32,
}

#[derive(Debug, Clone, Copy)]
struct SettleState {
    from: f32,
    /// Time of the first delivered frame; the animation clock starts there
    started: Option<Instant>,
}

/// Immutable view of the carousel for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub len: usize,
    pub active_index: usize,
    pub active_indicator: Option<usize>,
    pub indicator_count: usize,
    pub phase: DragPhase,
    /// Latest offset derived from pointer input
    pub tracked_offset: f32,
    /// Offset to paint this frame
    pub rendered_offset: f32,
    /// Resting offset of the active slide
    pub committed_offset: f32,
    pub transition: TrackTransition,
    pub frame_pending: bool,
}

/// Carousel over slides of type `T`
pub struct Carousel<T> {
    items: Vec<T>,
    active: usize,
    indicator_count: usize,
    phase: DragPhase,
    drag: Option<DragState>,
    settle: Option<SettleState>,
    tracked_offset: f32,
    rendered_offset: f32,
    committed_offset: f32,
    transition: TrackTransition,
    frames: FrameLoop,
    measure: Box<dyn SlideMeasure>,
    config: CarouselConfig,
}

impl<T> std::fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.items.len())
            .field("active", &self.active)
            .field("phase", &self.phase)
            .field("committed_offset", &self.committed_offset)
            .finish_non_exhaustive()
    }
}

impl<T> Carousel<T> {
    /// Build a carousel resting on the first slide.
    pub fn new(items: Vec<T>, measure: impl SlideMeasure + 'static, config: CarouselConfig) -> Self {
        info!(slides = items.len(), "Carousel initialised");
        Self {
            indicator_count: items.len(),
            items,
            active: 0,
            phase: DragPhase::Idle,
            drag: None,
            settle: None,
            tracked_offset: 0.0,
            rendered_offset: 0.0,
            committed_offset: 0.0,
            transition: TrackTransition::None,
            frames: FrameLoop::new(),
            measure: Box::new(measure),
            config,
        }
    }

    /// Override the number of indicators (defaults to the slide count)
    pub fn with_indicator_count(mut self, count: usize) -> Self {
        self.indicator_count = count;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> Option<&T> {
        self.items.get(self.active)
    }

    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Indicator to highlight
    pub fn active_indicator(&self) -> Option<usize> {
        (self.indicator_count > 0).then(|| self.active % self.indicator_count)
    }

    /// Whether the host should deliver another animation frame
    pub fn wants_frame(&self) -> bool {
        self.frames.is_pending()
    }

    /// Frames delivered over the carousel's lifetime
    pub fn frames_delivered(&self) -> u64 {
        self.frames.delivered()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            len: self.items.len(),
            active_index: self.active,
            active_indicator: self.active_indicator(),
            indicator_count: self.indicator_count,
            phase: self.phase,
            tracked_offset: self.tracked_offset,
            rendered_offset: self.rendered_offset,
            committed_offset: self.committed_offset,
            transition: self.transition,
            frame_pending: self.frames.is_pending(),
        }
    }

    /// Settle progress in `[0, 1]` at `now`; 1 when not settling, 0 before
    /// the first settle frame
    pub fn settle_progress(&self, now: Instant) -> f32 {
        match self.settle {
            Some(SettleState {
                started: Some(started),
                ..
            }) => self.progress_since(started, now),
            Some(_) => 0.0,
            None => 1.0,
        }
    }

    /// Start a drag at pointer position `x`.
    pub fn pointer_down(&mut self, x: f32) {
        if self.items.is_empty() {
            return;
        }
        self.settle = None;
        self.drag = Some(DragState {
            start_x: x,
            baseline: self.committed_offset,
        });
        self.tracked_offset = self.committed_offset;
        self.transition = TrackTransition::None;
        self.phase = DragPhase::Dragging;
        self.frames.request();
        debug!(x, baseline = self.committed_offset, "Drag started");
    }

    /// Track the pointer while dragging.
    pub fn pointer_move(&mut self, x: f32) {
        if let Some(drag) = self.drag {
            self.tracked_offset = drag.baseline + (x - drag.start_x);
        }
    }

    /// Finish a drag, committing or snapping back.
    pub fn pointer_up(&mut self) -> ReleaseOutcome {
        let Some(drag) = self.drag.take() else {
            return ReleaseOutcome::NotDragging;
        };
        self.frames.cancel();
        self.transition = TrackTransition::Snap(self.config.snap_duration);

        let delta = self.tracked_offset - drag.baseline;
        let outcome = if delta.abs() > self.config.drag_threshold_px {
            let direction = if delta < 0.0 {
                Direction::Next
            } else {
                Direction::Prev
            };
            self.step(direction);
            ReleaseOutcome::Moved(direction)
        } else {
            ReleaseOutcome::SnappedBack
        };

        debug!(delta, ?outcome, active = self.active, "Drag released");
        self.update_offsets();
        outcome
    }

    /// Pointer left the carousel surface; ends the drag like a release.
    pub fn pointer_leave(&mut self) -> ReleaseOutcome {
        self.pointer_up()
    }

    /// Move one slide with wrap-around.
    pub fn navigate(&mut self, direction: Direction) {
        if self.items.is_empty() {
            return;
        }
        if self.phase == DragPhase::Dragging {
            debug!(%direction, "Navigation ignored while dragging");
            return;
        }
        self.step(direction);
        self.transition = TrackTransition::Snap(self.config.snap_duration);
        self.update_offsets();
    }

    /// Jump straight to `index`. Out-of-range indices are ignored.
    pub fn go_to_slide(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            warn!(index, len = self.items.len(), "Ignoring slide index out of range");
            return false;
        }
        if self.phase == DragPhase::Dragging {
            debug!(index, "Slide jump ignored while dragging");
            return false;
        }
        self.active = index;
        self.transition = TrackTransition::Snap(self.config.snap_duration);
        self.update_offsets();
        true
    }

    /// Re-measure after a layout change and jump to the resting offset.
    pub fn relayout(&mut self) {
        if self.phase == DragPhase::Dragging {
            return;
        }
        self.committed_offset = self.resting_offset();
        self.tracked_offset = self.committed_offset;
        self.rendered_offset = self.committed_offset;
        self.finish_settle();
    }

    /// Deliver one animation frame. Returns whether another frame was requested.
    pub fn on_animation_frame(&mut self, now: Instant) -> bool {
        if self.frames.take().is_none() {
            return false;
        }

        match self.phase {
            DragPhase::Dragging => {
                self.rendered_offset = self.tracked_offset;
                self.frames.request();
                true
            }
            DragPhase::Settling => {
                let Some(settle) = self.settle.as_mut() else {
                    self.finish_settle();
                    return false;
                };
                let started = *settle.started.get_or_insert(now);
                let from = settle.from;
                let progress = self.progress_since(started, now);
                if progress >= 1.0 {
                    self.finish_settle();
                    return false;
                }
                let eased = ease_out_cubic(progress);
                self.rendered_offset = from + (self.committed_offset - from) * eased;
                self.frames.request();
                true
            }
            DragPhase::Idle => false,
        }
    }

    fn step(&mut self, direction: Direction) {
        let last = self.items.len() - 1;
        self.active = match direction {
            Direction::Prev if self.active == 0 => last,
            Direction::Prev => self.active - 1,
            Direction::Next if self.active == last => 0,
            Direction::Next => self.active + 1,
        };
        debug!(%direction, active = self.active, "Carousel moved");
    }

    fn resting_offset(&self) -> f32 {
        -(self.active as f32) * self.measure.slide_width()
    }

    /// Recompute the committed offset and animate the rendered one toward it.
    fn update_offsets(&mut self) {
        self.committed_offset = self.resting_offset();
        self.tracked_offset = self.committed_offset;

        let animate = matches!(self.transition, TrackTransition::Snap(d) if !d.is_zero());
        if !animate || self.rendered_offset == self.committed_offset {
            self.rendered_offset = self.committed_offset;
            self.finish_settle();
            return;
        }

        self.settle = Some(SettleState {
            from: self.rendered_offset,
            started: None,
        });
        self.phase = DragPhase::Settling;
        self.frames.request();
    }

    fn finish_settle(&mut self) {
        self.settle = None;
        self.rendered_offset = self.committed_offset;
        self.phase = DragPhase::Idle;
        self.frames.cancel();
    }

    fn progress_since(&self, started: Instant, now: Instant) -> f32 {
        let duration = self.config.snap_duration;
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

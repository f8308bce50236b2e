//! The interaction state machine.
//!
//! A [`GestureController`] owns at most one [`Gesture`]: one complete
//! pointer interaction (down, any number of moves, up) on one task bar.
//!
//! ```text
//!            down on body/handle            |Δ| > threshold
//!   Idle ─────────────────────────▶ Armed ─────────────────▶ Dragging
//!    ▲                                │                      ResizingTop
//!    │          up (click)            │                      ResizingBottom
//!    └────────────────────────────────┘                          │
//!    └───────────────────── up (move / resize outcome) ──────────┘
//! ```
//!
//! During a gesture only visual commands are issued through the
//! [`Renderer`]. The domain is touched when the caller hands the
//! [`GestureOutcome`] returned by [`GestureController::pointer_up`] to the
//! [`mutator`](crate::mutator).

use sitegrid_protocol::{TaskId, Zone};
use tracing::{debug, trace};

use crate::collab::{LaneLayout, Renderer};
use crate::geometry::GridGeometry;
use crate::lanes::lane_at;

/// What a pointer press landed on, resolved by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Empty space.
    None,
    /// The body of a task bar.
    Body(TaskId),
    /// The top resize handle of a task bar.
    TopHandle(TaskId),
    /// The bottom resize handle of a task bar.
    BottomHandle(TaskId),
}

impl Hit {
    /// Returns the task that was hit, if any.
    #[must_use]
    pub const fn task(&self) -> Option<TaskId> {
        match self {
            Self::None => None,
            Self::Body(id) | Self::TopHandle(id) | Self::BottomHandle(id) => Some(*id),
        }
    }

    const fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::None => None,
            Self::Body(_) => Some(GestureKind::Move),
            Self::TopHandle(_) => Some(GestureKind::ResizeTop),
            Self::BottomHandle(_) => Some(GestureKind::ResizeBottom),
        }
    }
}

/// The kind of manipulation a gesture performs once past the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Move the bar vertically and across lanes.
    Move,
    /// Drag the upper edge.
    ResizeTop,
    /// Drag the lower edge.
    ResizeBottom,
}

/// Observable state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// No gesture.
    Idle,
    /// Pointer is down but has not moved past the threshold.
    Armed(GestureKind),
    /// Moving a bar.
    Dragging,
    /// Resizing from the top edge.
    ResizingTop,
    /// Resizing from the bottom edge.
    ResizingBottom,
}

/// A pointer position in grid pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Vertical geometry and lane of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    /// Pixel offset from the origin.
    pub top: i32,
    /// Pixel length.
    pub height: i32,
    /// Lane index.
    pub lane: usize,
}

/// One in-flight pointer interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
    /// What the gesture does once active.
    pub kind: GestureKind,
    /// The task being manipulated.
    pub subject: TaskId,
    /// Pointer position at press.
    pub origin_pointer: Point,
    /// Geometry of the bar at press.
    pub origin: BarGeometry,
    /// Last accepted geometry; `lane` is the candidate lane.
    pub current: BarGeometry,
    /// Whether the pointer has moved past the threshold.
    pub crossed_threshold: bool,
}

impl Gesture {
    fn state(&self) -> InteractionState {
        if !self.crossed_threshold {
            return InteractionState::Armed(self.kind);
        }
        match self.kind {
            GestureKind::Move => InteractionState::Dragging,
            GestureKind::ResizeTop => InteractionState::ResizingTop,
            GestureKind::ResizeBottom => InteractionState::ResizingBottom,
        }
    }
}

/// The finished result of a gesture, to be committed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing to commit.
    None,
    /// The pointer never left the threshold: open the label editor.
    Click {
        /// The clicked task.
        task: TaskId,
    },
    /// The bar was moved.
    Moved {
        /// The moved task.
        task: TaskId,
        /// Final top.
        top: i32,
        /// Final lane.
        lane: usize,
    },
    /// The bar was resized from either edge.
    Resized {
        /// The resized task.
        task: TaskId,
        /// Final top.
        top: i32,
        /// Final height.
        height: i32,
    },
}

/// Owns the single active gesture and the highlighted lane.
///
/// # Examples
///
/// ```
/// use sitegrid_engine::gesture::{GestureController, GestureOutcome, Hit, Point};
/// use sitegrid_engine::GridGeometry;
/// use sitegrid_protocol::{Task, Zone, ZoneId};
///
/// let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter"]);
/// let id = zone.add_task(Task::new(0, 320, 160, "Forms")).unwrap();
///
/// let mut controller = GestureController::new(GridGeometry::default());
/// assert!(controller.pointer_down(Hit::Body(id), Point::new(10, 330), &zone));
///
/// # struct Silent;
/// # impl sitegrid_engine::Renderer for Silent {
/// #     fn set_position(&mut self, _: sitegrid_protocol::TaskId, _: i32, _: i32) {}
/// #     fn move_to_lane(&mut self, _: sitegrid_protocol::TaskId, _: usize) {}
/// #     fn highlight_lane(&mut self, _: Option<usize>) {}
/// # }
/// // Released without moving: a click
/// assert_eq!(controller.pointer_up(&mut Silent), GestureOutcome::Click { task: id });
/// ```
#[derive(Debug, Clone)]
pub struct GestureController {
    geometry: GridGeometry,
    active: Option<Gesture>,
    highlighted: Option<usize>,
}

impl GestureController {
    /// Creates an idle controller for a grid.
    #[must_use]
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            active: None,
            highlighted: None,
        }
    }

    /// Returns the grid this controller snaps to.
    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Returns `true` while a gesture is armed or active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.active
            .as_ref()
            .map_or(InteractionState::Idle, Gesture::state)
    }

    /// Returns the in-flight gesture, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }

    /// Returns the lane currently highlighted as the drop target.
    #[must_use]
    pub fn highlighted_lane(&self) -> Option<usize> {
        self.highlighted
    }

    /// Handles a pointer press. Returns `true` if a gesture was armed.
    ///
    /// A press is ignored while another gesture is in flight, on empty
    /// space, and on a task that is not part of `zone`.
    pub fn pointer_down(&mut self, hit: Hit, at: Point, zone: &Zone) -> bool {
        if self.active.is_some() {
            debug!(?hit, "pointer down ignored: gesture already active");
            return false;
        }
        let (Some(subject), Some(kind)) = (hit.task(), hit.kind()) else {
            return false;
        };
        let Some(task) = zone.get_task(subject) else {
            debug!(%subject, "pointer down on unknown task");
            return false;
        };

        let origin = BarGeometry {
            top: task.top,
            height: task.height,
            lane: task.lane_index,
        };
        trace!(%subject, ?kind, "gesture armed");
        self.active = Some(Gesture {
            kind,
            subject,
            origin_pointer: at,
            origin,
            current: origin,
            crossed_threshold: false,
        });
        true
    }

    /// Handles pointer movement while the button is held.
    pub fn pointer_move(
        &mut self,
        at: Point,
        layout: &dyn LaneLayout,
        renderer: &mut dyn Renderer,
    ) {
        let geometry = self.geometry;
        let Some(gesture) = self.active.as_mut() else {
            return;
        };

        let dx = at.x.saturating_sub(gesture.origin_pointer.x);
        let dy = at.y.saturating_sub(gesture.origin_pointer.y);
        if !gesture.crossed_threshold {
            if !geometry.exceeds_threshold(dx, dy) {
                return;
            }
            gesture.crossed_threshold = true;
            trace!(subject = %gesture.subject, state = ?gesture.state(), "threshold crossed");
        }

        let origin = gesture.origin;
        let candidate = match gesture.kind {
            GestureKind::Move => {
                let top = geometry.snap(origin.top.saturating_add(dy));
                Some((geometry.clamp_moved_top(top, origin.height), origin.height))
            }
            GestureKind::ResizeTop => {
                let top = geometry.snap(origin.top.saturating_add(dy));
                let height = origin.height.saturating_sub(top.saturating_sub(origin.top));
                (height >= geometry.unit && top >= 0).then_some((top, height))
            }
            GestureKind::ResizeBottom => {
                let height = geometry.snap(origin.height.saturating_add(dy));
                (height >= geometry.unit).then_some((origin.top, height))
            }
        };

        match candidate {
            Some((top, height)) => {
                let current = &mut gesture.current;
                if (current.top, current.height) != (top, height) {
                    current.top = top;
                    current.height = height;
                    renderer.set_position(gesture.subject, top, height);
                }
            }
            None => trace!(subject = %gesture.subject, dy, "resize rejected"),
        }

        if gesture.kind == GestureKind::Move {
            // Outside every column (or no layout) keeps the previous candidate.
            if let Some(lane) = lane_at(at.x, layout.lane_bounds()) {
                gesture.current.lane = lane;
                if self.highlighted != Some(lane) {
                    self.highlighted = Some(lane);
                    renderer.highlight_lane(Some(lane));
                }
            }
        }
    }

    /// Handles the pointer release, ending any gesture.
    pub fn pointer_up(&mut self, renderer: &mut dyn Renderer) -> GestureOutcome {
        if self.highlighted.take().is_some() {
            renderer.highlight_lane(None);
        }
        let Some(gesture) = self.active.take() else {
            return GestureOutcome::None;
        };

        let task = gesture.subject;
        let outcome = match (gesture.crossed_threshold, gesture.kind) {
            (false, _) => GestureOutcome::Click { task },
            (true, GestureKind::Move) => GestureOutcome::Moved {
                task,
                top: gesture.current.top,
                lane: gesture.current.lane,
            },
            (true, GestureKind::ResizeTop | GestureKind::ResizeBottom) => GestureOutcome::Resized {
                task,
                top: gesture.current.top,
                height: gesture.current.height,
            },
        };
        debug!(?outcome, "gesture finished");
        outcome
    }

    /// Abandons the gesture and puts the bar back where it started.
    ///
    /// Returns `true` if a gesture was in flight.
    pub fn cancel(&mut self, renderer: &mut dyn Renderer) -> bool {
        if self.highlighted.take().is_some() {
            renderer.highlight_lane(None);
        }
        let Some(gesture) = self.active.take() else {
            return false;
        };
        renderer.set_position(gesture.subject, gesture.origin.top, gesture.origin.height);
        debug!(subject = %gesture.subject, "gesture cancelled");
        true
    }

    /// Drops the gesture if its subject is no longer part of `zone`.
    ///
    /// Returns `true` if a stale gesture was dropped.
    pub fn discard_if_stale(&mut self, zone: &Zone, renderer: &mut dyn Renderer) -> bool {
        match &self.active {
            Some(gesture) if !zone.contains_task(gesture.subject) => {
                debug!(subject = %gesture.subject, "dropping gesture on removed task");
                self.active = None;
                if self.highlighted.take().is_some() {
                    renderer.highlight_lane(None);
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::LaneBounds;
    use crate::testing::RecordingRenderer;
    use sitegrid_protocol::{Task, ZoneId};

    fn zone_with(task: Task) -> (Zone, TaskId) {
        let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter", "Rebar", "Concrete", "Electrical"]);
        let id = zone.add_task(task).expect("lane exists");
        (zone, id)
    }

    fn lanes() -> Vec<LaneBounds> {
        crate::lanes::uniform_lanes(0, 100, 4)
    }

    #[test]
    fn press_on_empty_space_stays_idle() {
        let (zone, _) = zone_with(Task::new(0, 0, 40, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        assert!(!controller.pointer_down(Hit::None, Point::new(0, 0), &zone));
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn press_on_unknown_task_is_ignored() {
        let (zone, _) = zone_with(Task::new(0, 0, 40, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        assert!(!controller.pointer_down(Hit::Body(TaskId::new_v4()), Point::new(0, 0), &zone));
        assert!(!controller.is_active());
    }

    #[test]
    fn second_press_is_rejected() {
        let (zone, id) = zone_with(Task::new(0, 0, 80, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        assert!(controller.pointer_down(Hit::TopHandle(id), Point::new(5, 5), &zone));
        assert!(!controller.pointer_down(Hit::Body(id), Point::new(50, 50), &zone));
        assert_eq!(controller.state(), InteractionState::Armed(GestureKind::ResizeTop));
        assert_eq!(controller.gesture().map(|g| g.origin_pointer), Some(Point::new(5, 5)));
    }

    #[test]
    fn movement_within_threshold_is_not_rendered() {
        let (zone, id) = zone_with(Task::new(0, 320, 160, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::Body(id), Point::new(50, 400), &zone);
        controller.pointer_move(Point::new(55, 395), &lanes(), &mut renderer);

        assert_eq!(controller.state(), InteractionState::Armed(GestureKind::Move));
        assert!(renderer.is_empty());
    }

    #[test]
    fn crossing_move_is_applied() {
        let (zone, id) = zone_with(Task::new(0, 320, 160, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::Body(id), Point::new(50, 400), &zone);
        controller.pointer_move(Point::new(50, 440), &lanes(), &mut renderer);

        assert_eq!(controller.state(), InteractionState::Dragging);
        assert_eq!(renderer.positions, vec![(id, 360, 160)]);
        assert_eq!(renderer.highlights, vec![Some(0)]);
    }

    #[test]
    fn move_is_clamped_to_end_of_day() {
        let (zone, id) = zone_with(Task::new(0, 1200, 160, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::Body(id), Point::new(50, 0), &zone);
        controller.pointer_move(Point::new(50, 400), &lanes(), &mut renderer);

        assert_eq!(
            controller.pointer_up(&mut renderer),
            GestureOutcome::Moved { task: id, top: 1280, lane: 0 }
        );
    }

    #[test]
    fn top_resize_rejects_collapse_and_keeps_last_valid() {
        let (zone, id) = zone_with(Task::new(0, 320, 160, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::TopHandle(id), Point::new(50, 320), &zone);
        controller.pointer_move(Point::new(50, 400), &lanes(), &mut renderer);
        // Would leave zero height
        controller.pointer_move(Point::new(50, 480), &lanes(), &mut renderer);

        assert_eq!(controller.state(), InteractionState::ResizingTop);
        assert_eq!(renderer.positions, vec![(id, 400, 80)]);
        assert_eq!(
            controller.pointer_up(&mut renderer),
            GestureOutcome::Resized { task: id, top: 400, height: 80 }
        );
    }

    #[test]
    fn top_resize_rejects_negative_top() {
        let (zone, id) = zone_with(Task::new(0, 40, 80, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::TopHandle(id), Point::new(50, 40), &zone);
        controller.pointer_move(Point::new(50, -40), &lanes(), &mut renderer);

        assert!(renderer.positions.is_empty());
        assert_eq!(
            controller.pointer_up(&mut renderer),
            GestureOutcome::Resized { task: id, top: 40, height: 80 }
        );
    }

    #[test]
    fn top_resize_tie_snaps_up_to_origin() {
        let (zone, id) = zone_with(Task::new(0, 40, 80, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        // 40 - 60 = -20 sits halfway between -40 and 0 and rounds up to 0
        controller.pointer_down(Hit::TopHandle(id), Point::new(50, 40), &zone);
        controller.pointer_move(Point::new(50, -20), &lanes(), &mut renderer);

        assert_eq!(
            controller.pointer_up(&mut renderer),
            GestureOutcome::Resized { task: id, top: 0, height: 120 }
        );
    }

    #[test]
    fn resize_does_not_change_lane_or_highlight() {
        let (zone, id) = zone_with(Task::new(1, 0, 80, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::BottomHandle(id), Point::new(150, 80), &zone);
        controller.pointer_move(Point::new(350, 160), &lanes(), &mut renderer);

        assert!(renderer.highlights.is_empty());
        assert_eq!(controller.highlighted_lane(), None);
    }

    #[test]
    fn highlight_only_changes_on_new_lane() {
        let (zone, id) = zone_with(Task::new(0, 0, 80, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::Body(id), Point::new(50, 0), &zone);
        for x in [60, 70, 150, 160, 900, 250] {
            controller.pointer_move(Point::new(x, 0), &lanes(), &mut renderer);
        }
        controller.pointer_up(&mut renderer);

        assert_eq!(renderer.highlights, vec![Some(0), Some(1), Some(2), None]);
    }

    #[test]
    fn missing_layout_keeps_origin_lane() {
        let (zone, id) = zone_with(Task::new(2, 0, 80, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::Body(id), Point::new(250, 0), &zone);
        controller.pointer_move(Point::new(50, 80), &Vec::new(), &mut renderer);

        assert_eq!(
            controller.pointer_up(&mut renderer),
            GestureOutcome::Moved { task: id, top: 80, lane: 2 }
        );
    }

    #[test]
    fn up_without_gesture_is_noop() {
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();
        assert_eq!(controller.pointer_up(&mut renderer), GestureOutcome::None);
        assert!(renderer.is_empty());
    }

    #[test]
    fn cancel_restores_origin() {
        let (zone, id) = zone_with(Task::new(0, 320, 160, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::Body(id), Point::new(50, 320), &zone);
        controller.pointer_move(Point::new(150, 480), &lanes(), &mut renderer);
        assert!(controller.cancel(&mut renderer));

        assert_eq!(renderer.positions.last(), Some(&(id, 320, 160)));
        assert_eq!(renderer.highlights.last(), Some(&None));
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn stale_gesture_is_discarded() {
        let (mut zone, id) = zone_with(Task::new(0, 0, 40, "x"));
        let mut controller = GestureController::new(GridGeometry::default());
        let mut renderer = RecordingRenderer::default();

        controller.pointer_down(Hit::Body(id), Point::new(0, 0), &zone);
        assert!(!controller.discard_if_stale(&zone, &mut renderer));

        zone.remove_task(id);
        assert!(controller.discard_if_stale(&zone, &mut renderer));
        assert!(!controller.is_active());
    }
}

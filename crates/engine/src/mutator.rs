//! Commits finished gestures to the task model.
//!
//! Every function here tolerates a subject that has disappeared from the
//! zone since the gesture started: it logs and returns `false` without
//! touching anything. Every successful commit hands the zone's task set to
//! the [`Persistence`] collaborator.

use sitegrid_protocol::{TaskId, Zone};
use tracing::{debug, instrument};

use crate::collab::{EditPrompt, Persistence, Renderer};
use crate::gesture::GestureOutcome;

/// Sets a task's top and, if different, reassigns its lane.
///
/// A lane change moves the task to the end of the target lane's
/// collection and tells the renderer to move the bar. An unknown target
/// lane keeps the task where it is.
#[instrument(level = "debug", skip(zone, renderer, persistence), fields(zone = %zone.id))]
pub fn commit_move(
    zone: &mut Zone,
    task: TaskId,
    top: i32,
    lane: usize,
    renderer: &mut dyn Renderer,
    persistence: &mut dyn Persistence,
) -> bool {
    let Some(entry) = zone.get_task_mut(task) else {
        debug!("move target no longer exists");
        return false;
    };
    let height = entry.height;
    let from = entry.lane_index;
    entry.set_geometry(top, height);

    if lane != from {
        if zone.move_task_to_lane(task, lane) {
            renderer.move_to_lane(task, lane);
        } else {
            debug!(from, "target lane does not exist, lane unchanged");
        }
    }

    persistence.save(&zone.id, &zone.tasks);
    true
}

/// Sets a task's top and height.
#[instrument(level = "debug", skip(zone, persistence), fields(zone = %zone.id))]
pub fn commit_resize(
    zone: &mut Zone,
    task: TaskId,
    top: i32,
    height: i32,
    persistence: &mut dyn Persistence,
) -> bool {
    let Some(entry) = zone.get_task_mut(task) else {
        debug!("resize target no longer exists");
        return false;
    };
    entry.set_geometry(top, height);
    persistence.save(&zone.id, &zone.tasks);
    true
}

/// Asks for a new label and applies an immediate answer.
///
/// Returns `true` if the label changed.
#[instrument(level = "debug", skip(zone, prompt, persistence), fields(zone = %zone.id))]
pub fn commit_click(
    zone: &mut Zone,
    task: TaskId,
    prompt: &mut dyn EditPrompt,
    persistence: &mut dyn Persistence,
) -> bool {
    let Some(current) = zone.get_task(task).map(|t| t.text.clone()) else {
        debug!("clicked task no longer exists");
        return false;
    };
    match prompt.prompt_edit(task, &current) {
        Some(answer) => apply_label(zone, task, &answer, persistence),
        None => false,
    }
}

/// Replaces a task's label if `text` is non-empty and differs from it.
///
/// Surrounding whitespace is trimmed. Returns `true` if the label changed.
///
/// # Examples
///
/// ```
/// use sitegrid_engine::mutator::apply_label;
/// use sitegrid_protocol::{Task, Zone, ZoneId};
/// # struct Discard;
/// # impl sitegrid_engine::Persistence for Discard {
/// #     fn save(&mut self, _: &ZoneId, _: &[Task]) {}
/// # }
///
/// let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter"]);
/// let id = zone.add_task(Task::new(0, 0, 40, "Forms")).unwrap();
///
/// assert!(!apply_label(&mut zone, id, "   ", &mut Discard));
/// assert!(!apply_label(&mut zone, id, "Forms", &mut Discard));
/// assert!(apply_label(&mut zone, id, " Strip forms ", &mut Discard));
/// assert_eq!(zone.get_task(id).unwrap().text, "Strip forms");
/// ```
pub fn apply_label(
    zone: &mut Zone,
    task: TaskId,
    text: &str,
    persistence: &mut dyn Persistence,
) -> bool {
    let text = text.trim();
    let Some(entry) = zone.get_task_mut(task) else {
        debug!(%task, "label target no longer exists");
        return false;
    };
    if text.is_empty() || entry.text == text {
        return false;
    }
    entry.set_text(text);
    persistence.save(&zone.id, &zone.tasks);
    true
}

/// Commits any gesture outcome. Returns `true` if the model changed.
pub fn apply(
    outcome: GestureOutcome,
    zone: &mut Zone,
    renderer: &mut dyn Renderer,
    prompt: &mut dyn EditPrompt,
    persistence: &mut dyn Persistence,
) -> bool {
    match outcome {
        GestureOutcome::None => false,
        GestureOutcome::Click { task } => commit_click(zone, task, prompt, persistence),
        GestureOutcome::Moved { task, top, lane } => {
            commit_move(zone, task, top, lane, renderer, persistence)
        }
        GestureOutcome::Resized { task, top, height } => {
            commit_resize(zone, task, top, height, persistence)
        }
    }
}

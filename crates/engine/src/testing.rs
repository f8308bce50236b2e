//! Recording collaborators for tests.

use sitegrid_protocol::{Task, TaskId, ZoneId};

use crate::collab::{EditPrompt, Persistence, Renderer};

/// Records every visual command.
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub positions: Vec<(TaskId, i32, i32)>,
    pub moves: Vec<(TaskId, usize)>,
    pub highlights: Vec<Option<usize>>,
}

impl RecordingRenderer {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.moves.is_empty() && self.highlights.is_empty()
    }
}

impl Renderer for RecordingRenderer {
    fn set_position(&mut self, task: TaskId, top: i32, height: i32) {
        self.positions.push((task, top, height));
    }

    fn move_to_lane(&mut self, task: TaskId, lane_index: usize) {
        self.moves.push((task, lane_index));
    }

    fn highlight_lane(&mut self, lane_index: Option<usize>) {
        self.highlights.push(lane_index);
    }
}

/// Keeps a copy of every saved task set.
#[derive(Debug, Default)]
pub(crate) struct RecordingPersistence {
    pub saves: Vec<(ZoneId, Vec<Task>)>,
}

impl Persistence for RecordingPersistence {
    fn save(&mut self, zone: &ZoneId, tasks: &[Task]) {
        self.saves.push((zone.clone(), tasks.to_vec()));
    }
}

/// Answers every prompt with a fixed reply.
#[derive(Debug)]
pub(crate) struct ScriptedPrompt {
    reply: Option<String>,
    pub asked: Vec<(TaskId, String)>,
}

impl ScriptedPrompt {
    pub fn answering(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            asked: Vec::new(),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            reply: None,
            asked: Vec::new(),
        }
    }
}

impl EditPrompt for ScriptedPrompt {
    fn prompt_edit(&mut self, task: TaskId, current: &str) -> Option<String> {
        self.asked.push((task, current.to_string()));
        self.reply.clone()
    }
}

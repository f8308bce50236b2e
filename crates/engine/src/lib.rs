//! The schedule grid engine.
//!
//! This crate turns raw pointer input over a time grid into task changes:
//!
//! - [`geometry`]: pixel/time conversion, snapping and clamping
//! - [`lanes`]: which lane column a horizontal position falls in
//! - [`gesture`]: the click/drag/resize state machine
//! - [`mutator`]: committing finished gestures to a [`Zone`](sitegrid_protocol::Zone)
//! - [`collab`]: the traits the front end and store implement
//!
//! The engine never fails. Rejected geometry keeps the last valid state,
//! commits against removed tasks are ignored, and missing lane layout
//! means "stay in the current lane".
//!
//! # Examples
//!
//! ```
//! use sitegrid_engine::{GridGeometry, gesture::{GestureController, Hit, Point}};
//! use sitegrid_engine::lanes::uniform_lanes;
//! use sitegrid_protocol::{Task, TaskId, Zone, ZoneId};
//! # #[derive(Default)]
//! # struct Silent;
//! # impl sitegrid_engine::Renderer for Silent {
//! #     fn set_position(&mut self, _: TaskId, _: i32, _: i32) {}
//! #     fn move_to_lane(&mut self, _: TaskId, _: usize) {}
//! #     fn highlight_lane(&mut self, _: Option<usize>) {}
//! # }
//! # impl sitegrid_engine::Persistence for Silent {
//! #     fn save(&mut self, _: &ZoneId, _: &[Task]) {}
//! # }
//! # impl sitegrid_engine::EditPrompt for Silent {
//! #     fn prompt_edit(&mut self, _: TaskId, _: &str) -> Option<String> { None }
//! # }
//!
//! let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter", "Rebar"]);
//! let id = zone.add_task(Task::new(0, 0, 320, "Formwork")).unwrap();
//! let layout = uniform_lanes(0, 100, zone.lane_count());
//!
//! let mut controller = GestureController::new(GridGeometry::default());
//! let (mut renderer, mut prompt, mut store) = (Silent, Silent, Silent);
//!
//! // Grab the bottom edge and pull it down by just over one unit
//! controller.pointer_down(Hit::BottomHandle(id), Point::new(50, 320), &zone);
//! controller.pointer_move(Point::new(50, 361), &layout, &mut renderer);
//! let outcome = controller.pointer_up(&mut renderer);
//!
//! sitegrid_engine::mutator::apply(outcome, &mut zone, &mut renderer, &mut prompt, &mut store);
//! assert_eq!(zone.get_task(id).unwrap().height, 360);
//! ```

pub mod collab;
pub mod geometry;
pub mod gesture;
pub mod lanes;
pub mod mutator;

#[cfg(test)]
pub(crate) mod testing;


pub use collab::{EditPrompt, LaneLayout, Persistence, Renderer};
pub use geometry::GridGeometry;
pub use gesture::{GestureController, GestureOutcome, Hit, InteractionState, Point};
pub use lanes::LaneBounds;

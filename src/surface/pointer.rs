use crate::draw::Shape;
use crate::input::{Mode, PointerEvent};
use crate::util::Point;
use log::debug;

use super::{DrawingSurface, GestureState};

impl DrawingSurface {
    /// Dispatches a pointer event to the matching handler.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(position) => self.on_pointer_down(position),
            PointerEvent::Move(position) => self.on_pointer_move(position),
            PointerEvent::Up(position) => self.on_pointer_up(position),
        }
    }

    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Starts a gesture at `position`; in freeform mode the point sequence
    ///   starts with `position`
    /// - A press during a gesture discards that gesture and starts over
    pub fn on_pointer_down(&mut self, position: Point) {
        if self.is_drawing() {
            debug!(
                "Pointer down at ({}, {}) during a gesture; restarting",
                position.x, position.y
            );
        }

        let points = (self.tool.mode == Mode::Freeform).then(|| vec![position]);
        self.gesture = GestureState::Drawing {
            start: position,
            end: position,
            points,
        };
        self.needs_redraw = true;
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - While drawing: moves the gesture end and, in freeform mode, records
    ///   the position
    /// - While idle: nothing
    pub fn on_pointer_move(&mut self, position: Point) {
        let freeform = self.tool.mode == Mode::Freeform;
        if let GestureState::Drawing { start, end, points } = &mut self.gesture {
            *end = position;
            if freeform {
                points.get_or_insert_with(|| vec![*start]).push(position);
            }
            self.needs_redraw = true;
        }
    }

    /// Processes a pointer release.
    ///
    /// # Behavior
    /// Commits a shape of the mode active right now, built from the gesture
    /// start and `position` (or the recorded sequence in freeform mode), with
    /// the current color and width. Returns to idle. A release without a
    /// gesture is ignored.
    pub fn on_pointer_up(&mut self, position: Point) {
        let GestureState::Drawing { start, points, .. } = std::mem::take(&mut self.gesture) else {
            debug!(
                "Pointer up at ({}, {}) without a gesture; ignoring",
                position.x, position.y
            );
            return;
        };

        let shape = Shape::from_gesture(
            self.tool.mode,
            start,
            position,
            points.unwrap_or_default(),
            self.tool.color,
            self.tool.stroke_width,
        );
        debug!(
            "Committed {} shape; scene now holds {}",
            shape.kind(),
            self.scene.len() + 1
        );

        self.scene.push(shape);
        self.needs_redraw = true;
    }
}

use nalgebra::Point2;

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually left button
    Primary,
    /// Usually right button
    Secondary,
    Middle,
}

/// Discrete input event delivered to a view
///
/// Positions are in widget pixel coordinates, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed {
        position: Point2<f32>,
        button: PointerButton,
    },
    PointerMoved {
        position: Point2<f32>,
        /// Is primary button held during the move
        primary_held: bool,
    },
    PointerReleased {
        position: Point2<f32>,
        button: PointerButton,
    },
    /// Vertical wheel delta, positive when scrolling away from user
    Wheel { delta_y: f32 },
    /// Rotation dial moved to an angle in degrees <0;359>
    Dial { degrees: i32 },
    /// Flip checkbox state
    FlipHorizontal(bool),
    FlipVertical(bool),
}

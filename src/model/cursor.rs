use crate::utils::Rect;

/// Pointer capture state.
///
/// `locked` mirrors whether the OS pointer is currently hidden and
/// dissociated. `tracking_region` is the last viewport bounds handed to the
/// capture controller; mouse deltas are measured from its center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub locked: bool,
    pub tracking_region: Rect,
}

use crate::gesture_constants::{
    FEEDBACK_PEAK_SCALE, FEEDBACK_STAGE_DURATION_MS, LONG_PRESS_DELAY_MS, MOVE_SLOP,
    TAP_SETTLE_DELAY_MS,
};
use crate::identity::DraggableId;

/// Construction-time settings of a draggable.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggableConfig {
    /// Spring the visual offset back to the origin on release.
    pub bounce_back: bool,
    /// Peak scale of the first armed feedback stage.
    pub scale: f32,
    /// Symmetric per-axis displacement threshold separating a tap from a drag.
    pub move_slop: f32,
    /// Delay before the tap-completion scale animation, in milliseconds.
    pub delay_millis: u64,
    /// Hold time before movement is reported as a drag, in milliseconds.
    pub long_press_delay_millis: u64,
    /// Duration of each feedback stage, in milliseconds.
    pub stage_duration_millis: u64,
    /// Overrides the generated identity.
    pub custom_id: Option<DraggableId>,
}

impl DraggableConfig {
    pub fn with_bounce_back(mut self, bounce_back: bool) -> Self {
        self.bounce_back = bounce_back;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_move_slop(mut self, move_slop: f32) -> Self {
        self.move_slop = move_slop;
        self
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    pub fn with_long_press_delay(mut self, delay_millis: u64) -> Self {
        self.long_press_delay_millis = delay_millis;
        self
    }

    pub fn with_stage_duration(mut self, duration_millis: u64) -> Self {
        self.stage_duration_millis = duration_millis;
        self
    }

    pub fn with_custom_id(mut self, id: DraggableId) -> Self {
        self.custom_id = Some(id);
        self
    }
}

impl Default for DraggableConfig {
    fn default() -> Self {
        Self {
            bounce_back: true,
            scale: FEEDBACK_PEAK_SCALE,
            move_slop: MOVE_SLOP,
            delay_millis: TAP_SETTLE_DELAY_MS,
            long_press_delay_millis: LONG_PRESS_DELAY_MS,
            stage_duration_millis: FEEDBACK_STAGE_DURATION_MS,
            custom_id: None,
        }
    }
}

/// Terrain rise (beyond the current offset) that triggers a fresh capture
const RECAPTURE_RISE: f32 = 0.5;

/// Bookkeeping for the automatic lift over rising terrain.
///
/// When terrain under the screen centre rises above the dampening floor the
/// rise is captured as a pending offset and consumed over the following frames
/// by backing the camera away along its view axis. When compensation is turned
/// off or the terrain drops below the floor, the accumulated offset is undone
/// the same way in the opposite direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeightCompensation {
    /// Offset still to be applied
    pub last_offset: f32,
    /// Total offset captured since compensation became active
    pub accumulated_offset: f32,
    pub is_adding_offset: bool,
}

impl HeightCompensation {
    /// Update from this frame's terrain sample and return the signed distance
    /// to move along the camera's forward vector.
    ///
    /// `terrain_height` is `None` when the centre ray missed; capture and
    /// release are skipped for the frame but pending offset keeps draining.
    pub fn step(
        &mut self,
        terrain_height: Option<f32>,
        auto_height: bool,
        dampening: f32,
        zoom_speed: f32,
        dt: f32,
    ) -> f32 {
        if let Some(height) = terrain_height {
            if auto_height && height >= dampening {
                let rise = height - dampening - self.accumulated_offset;
                if !self.is_adding_offset || (self.last_offset <= 0.0 && rise > RECAPTURE_RISE) {
                    self.last_offset = rise;
                    self.accumulated_offset += rise;
                    self.is_adding_offset = true;
                    log::trace!("Height offset captured: {:.3} (total {:.3})", rise, self.accumulated_offset);
                }
            } else if self.is_adding_offset {
                self.last_offset = self.accumulated_offset - self.last_offset;
                self.accumulated_offset = 0.0;
                self.is_adding_offset = false;
                log::trace!("Height offset released: {:.3} to undo", self.last_offset);
            }
        }

        if self.last_offset > 0.0 {
            let change = dt * zoom_speed;
            self.last_offset -= change;
            let sign = if self.is_adding_offset { -1.0 } else { 1.0 };
            sign * change
        } else {
            0.0
        }
    }
}

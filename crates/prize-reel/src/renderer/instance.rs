use bytemuck::{Pod, Zeroable};

/// Per-instance draw record read by the page renderer.
/// 16 floats = 64 bytes stride; must match the page's `protocol.ts`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Centre X in surface space.
    pub x: f32,
    /// Centre Y in surface space.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Atlas column (sprites only).
    pub sprite_col: f32,
    /// Atlas row (sprites only).
    pub atlas_row: f32,
    /// UV cell span (1.0 = single cell).
    pub cell_span: f32,
    pub alpha: f32,
    /// Horizontal blur strength.
    pub blur: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// One of the `KIND_*` constants.
    pub kind: f32,
    /// Outline thickness, or fade direction (0 = opaque left, 1 = opaque right).
    pub param: f32,
    pub layer: f32,
    pub atlas: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_SPRITE: f32 = 0.0;
    pub const KIND_FILL: f32 = 1.0;
    pub const KIND_OUTLINE: f32 = 2.0;
    pub const KIND_FADE: f32 = 3.0;
}

/// All instances for one frame, ordered back-to-front by layer.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 16);
    }

    #[test]
    fn float_view_matches_fields() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance { x: 3.0, y: 4.0, kind: RenderInstance::KIND_FILL, ..Default::default() });
        let floats = buf.as_floats();
        assert_eq!(floats.len(), 16);
        assert_eq!(floats[0], 3.0);
        assert_eq!(floats[1], 4.0);
        assert_eq!(floats[12], RenderInstance::KIND_FILL);
    }
}

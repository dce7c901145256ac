/// Shared frame buffer layout read by the page's renderer.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Instances: max_instances × 16 floats]
/// ```
///
/// Capacity is written into the header at init so the reader can compute
/// offsets without hardcoding them.

use crate::renderer::instance::RenderInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_SURFACE_WIDTH: usize = 4;
pub const HEADER_SURFACE_HEIGHT: usize = 5;
pub const HEADER_REEL_COUNT: usize = 6;
/// 0 = animated, 1 = bulk.
pub const HEADER_MODE: usize = 7;
pub const HEADER_IS_SPINNING: usize = 8;
pub const HEADER_HAS_RESULTS: usize = 9;
pub const HEADER_IS_READY: usize = 10;
pub const HEADER_RESERVED: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Per-frame values mirrored into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame: u32,
    pub instance_count: usize,
    pub surface_width: f32,
    pub surface_height: f32,
    pub reel_count: usize,
    pub bulk_mode: bool,
    pub spinning: bool,
    pub has_results: bool,
    pub ready: bool,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * RenderInstance::FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;
        Self {
            max_instances,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Worst case for a surface: every symbol in view on every reel plus the
    /// background, indicators, and fades.
    pub fn for_reels(max_reels: usize, viewport_width: f32, symbol_stride: f32) -> Self {
        let per_row = if symbol_stride > 0.0 {
            (viewport_width / symbol_stride).ceil() as usize + 2
        } else {
            0
        };
        Self::new(max_reels * (per_row + 1) + 3)
    }

    /// Write header and instances into `out`. Instances beyond capacity are
    /// dropped. Returns the number of instances written.
    pub fn write_frame(&self, out: &mut [f32], header: &FrameHeader, instances: &[f32]) -> usize {
        if out.len() < self.buffer_total_floats {
            return 0;
        }
        let count = (instances.len() / RenderInstance::FLOATS).min(self.max_instances);
        let floats = count * RenderInstance::FLOATS;
        out[self.instance_data_offset..self.instance_data_offset + floats].copy_from_slice(&instances[..floats]);

        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_FRAME_COUNTER] = header.frame as f32;
        out[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        out[HEADER_INSTANCE_COUNT] = count as f32;
        out[HEADER_SURFACE_WIDTH] = header.surface_width;
        out[HEADER_SURFACE_HEIGHT] = header.surface_height;
        out[HEADER_REEL_COUNT] = header.reel_count as f32;
        out[HEADER_MODE] = flag(header.bulk_mode);
        out[HEADER_IS_SPINNING] = flag(header.spinning);
        out[HEADER_HAS_RESULTS] = flag(header.has_results);
        out[HEADER_IS_READY] = flag(header.ready);
        out[HEADER_RESERVED] = 0.0;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.instance_data_floats, 100 * 16);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 1600);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn reel_capacity_covers_visible_symbols() {
        // 560 / 110 -> 6 cells, plus partial cells at both edges
        let layout = ProtocolLayout::for_reels(5, 560.0, 110.0);
        assert_eq!(layout.max_instances, 5 * 9 + 3);
    }

    #[test]
    fn write_frame_fills_header_and_clamps() {
        let layout = ProtocolLayout::new(2);
        let mut out = vec![0.0; layout.buffer_total_floats];
        let instances: Vec<f32> = (0..3 * 16).map(|i| i as f32).collect();
        let header = FrameHeader {
            frame: 7,
            surface_width: 560.0,
            surface_height: 130.0,
            reel_count: 1,
            spinning: true,
            ready: true,
            ..Default::default()
        };

        let written = layout.write_frame(&mut out, &header, &instances);
        assert_eq!(written, 2);
        assert_eq!(out[HEADER_INSTANCE_COUNT], 2.0);
        assert_eq!(out[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(out[HEADER_IS_SPINNING], 1.0);
        assert_eq!(out[HEADER_HAS_RESULTS], 0.0);
        assert_eq!(out[HEADER_SURFACE_WIDTH], 560.0);
        assert_eq!(out[HEADER_FLOATS + 31], 31.0);
    }

    #[test]
    fn short_buffer_is_left_alone() {
        let layout = ProtocolLayout::new(4);
        let mut out = vec![0.0; 8];
        assert_eq!(layout.write_frame(&mut out, &FrameHeader::default(), &[]), 0);
        assert!(out.iter().all(|v| *v == 0.0));
    }
}

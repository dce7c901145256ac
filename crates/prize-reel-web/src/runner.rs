use prize_reel::{FrameHeader, PlayMode, PrizeWheel, ProtocolLayout, RevealEvent, WheelHandle};

/// Drives one `PrizeWheel` from the page's animation frame loop.
///
/// The exported free functions in `lib.rs` keep a `thread_local!` runner,
/// because wasm-bindgen cannot export a struct that owns trait objects.
pub struct WheelRunner {
    wheel: PrizeWheel,
    handle: WheelHandle,
    layout: ProtocolLayout,
    /// Header followed by render instances, read by the page's renderer.
    frame_buffer: Vec<f32>,
    frame: u32,
    /// Events serialized for the page, oldest first.
    pending_events: Vec<String>,
}

impl WheelRunner {
    pub fn new(wheel: PrizeWheel) -> Self {
        let config = wheel.config();
        let layout = ProtocolLayout::for_reels(config.max_reels, config.viewport_width, config.symbol_stride());
        let frame_buffer = vec![0.0; layout.buffer_total_floats];
        let handle = wheel.handle();
        Self {
            wheel,
            handle,
            layout,
            frame_buffer,
            frame: 0,
            pending_events: Vec::new(),
        }
    }

    /// Run one frame: advance the wheel, serialize its events, and publish
    /// the frame buffer.
    pub fn tick(&mut self, now_ms: f64) {
        self.wheel.tick(now_ms);
        self.frame = self.frame.wrapping_add(1);

        let events: Vec<RevealEvent> = self.wheel.drain_events().collect();
        for event in events {
            match serde_json::to_string(&event) {
                Ok(json) => self.pending_events.push(json),
                Err(err) => log::warn!("dropping unserializable event {:?}: {}", event, err),
            }
        }

        self.publish();
    }

    fn publish(&mut self) {
        let size = self.wheel.surface_size().unwrap_or_default();
        let header = FrameHeader {
            frame: self.frame,
            instance_count: self.wheel.render_buffer().instance_count() as usize,
            surface_width: size.x,
            surface_height: size.y,
            reel_count: self.wheel.reel_count(),
            bulk_mode: self.wheel.mode() == PlayMode::Bulk,
            spinning: self.wheel.is_spinning(),
            has_results: self.wheel.has_results(),
            ready: self.wheel.is_ready(),
        };

        // Viewport changes can outgrow the initial layout.
        let needed = self.wheel.render_buffer().instance_count() as usize;
        if needed > self.layout.max_instances {
            self.layout = ProtocolLayout::new(needed);
            self.frame_buffer = vec![0.0; self.layout.buffer_total_floats];
            log::debug!("frame buffer grown to {} instances", needed);
        }

        let floats = self.wheel.render_buffer().as_floats();
        self.layout.write_frame(&mut self.frame_buffer, &header, floats);
    }

    pub fn drain_events(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn spin(&self) {
        self.handle.spin();
    }

    pub fn reset(&self) {
        self.handle.reset();
    }

    pub fn wheel(&self) -> &PrizeWheel {
        &self.wheel
    }

    pub fn wheel_mut(&mut self) -> &mut PrizeWheel {
        &mut self.wheel
    }

    /// Release audio and the surface, and flush the final events.
    pub fn unmount(&mut self) {
        self.wheel.unmount();
        self.publish();
    }

    /// Grouped bulk results as JSON.
    pub fn bulk_summary_json(&self) -> String {
        serde_json::to_string(&self.wheel.bulk_summary()).unwrap_or_else(|err| {
            log::warn!("bulk summary not serializable: {}", err);
            "[]".to_string()
        })
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.wheel.render_buffer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.wheel.render_buffer().instance_count()
    }

    pub fn surface_width(&self) -> f32 {
        self.wheel.surface_size().map_or(0.0, |s| s.x)
    }

    pub fn surface_height(&self) -> f32 {
        self.wheel.surface_size().map_or(0.0, |s| s.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prize_reel::bridge::protocol::{HEADER_FLOATS, HEADER_HAS_RESULTS, HEADER_INSTANCE_COUNT, HEADER_IS_READY};
    use prize_reel::{EngineConfig, FixedSource, Prize, PrizeTable, Rarity};

    fn runner() -> WheelRunner {
        let prizes = PrizeTable::new(vec![
            Prize::new("A", Rarity::Common, 60.0),
            Prize::new("B", Rarity::Legendary, 40.0),
        ])
        .unwrap();
        let wheel = PrizeWheel::new(EngineConfig::default(), prizes).with_random(Box::new(FixedSource(0.1)));
        WheelRunner::new(wheel)
    }

    #[test]
    fn tick_publishes_header_and_instances() {
        let mut runner = runner();
        runner.tick(0.0);
        let frame = unsafe { std::slice::from_raw_parts(runner.frame_ptr(), runner.buffer_total_floats() as usize) };
        assert_eq!(frame[HEADER_IS_READY], 1.0);
        assert!(frame[HEADER_INSTANCE_COUNT] > 0.0);
        assert!(runner.buffer_total_floats() as usize > HEADER_FLOATS);
    }

    #[test]
    fn events_arrive_as_json() {
        let mut runner = runner();
        runner.spin();
        let mut now = 0.0;
        runner.tick(now);
        while runner.wheel().is_spinning() {
            now += 16.0;
            runner.tick(now);
        }
        let events = runner.drain_events();
        assert_eq!(events[0], r#"{"type":"spin_started"}"#);
        assert!(events.iter().any(|e| e.contains("spin_completed") && e.contains("\"A\"")));
        assert_eq!(events.last().map(String::as_str), Some(r#"{"type":"results_changed","has_results":true}"#));
        assert!(runner.drain_events().is_empty());

        let frame = unsafe { std::slice::from_raw_parts(runner.frame_ptr(), runner.buffer_total_floats() as usize) };
        assert_eq!(frame[HEADER_HAS_RESULTS], 1.0);
    }

    #[test]
    fn bulk_summary_groups_results() {
        let mut runner = runner();
        runner.wheel_mut().set_ticket_count(12);
        runner.spin();
        runner.tick(0.0);
        runner.tick(400.0);
        let summary = runner.bulk_summary_json();
        assert!(summary.contains("\"count\":12"), "{}", summary);
    }
}

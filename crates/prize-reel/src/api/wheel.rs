// api/wheel.rs
//
// Host container. Owns one play at a time: picks animated or bulk mode from
// the ticket count, mounts the reel surface when the viewport allows it,
// routes spin/reset commands, and turns controller output into the events
// the page consumes.
//
// Usage:
//   let mut wheel = PrizeWheel::new(config, prizes).with_audio(backend);
//   wheel.set_ticket_count(3);
//   let handle = wheel.handle();         // give to the page
//   handle.spin();
//   wheel.tick(now_ms);                  // every animation frame
//   for event in wheel.drain_events() { ... }

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::api::types::{PlayMode, RevealEvent};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::SpriteRegistry;
use crate::audio::{AudioBackend, AudioFeedback, SilentBackend};
use crate::error::SurfaceError;
use crate::input::queue::{CommandQueue, WheelCommand, WheelHandle};
use crate::prize::bulk::BulkDraw;
use crate::prize::selector::{RandomSource, SeededSource};
use crate::prize::summary::{summarize, PrizeGroup};
use crate::prize::{BulkPrize, Prize, PrizeTable};
use crate::reel::spin::SpinController;
use crate::reel::surface::RenderSurface;
use crate::renderer::instance::RenderBuffer;

/// Seed used until the host supplies its own random source.
const DEFAULT_SEED: u64 = 0x5eed_ba11;

pub struct PrizeWheel {
    config: EngineConfig,
    prizes: PrizeTable,
    sprites: SpriteRegistry,
    audio: Rc<dyn AudioBackend>,
    rng: Box<dyn RandomSource>,
    ticket_count: usize,
    controller: Option<SpinController>,
    needs_mount: bool,
    /// Last mount failure, so retries only log when the reason changes.
    mount_error: Option<SurfaceError>,
    bulk: BulkDraw,
    results: Vec<Prize>,
    bulk_results: Vec<BulkPrize>,
    commands: Rc<RefCell<CommandQueue>>,
    events: Vec<RevealEvent>,
    render_buffer: RenderBuffer,
    unmounted: bool,
}

impl PrizeWheel {
    /// A single-ticket wheel. The surface is mounted on the first frame.
    pub fn new(config: EngineConfig, prizes: PrizeTable) -> Self {
        Self {
            config,
            prizes,
            sprites: SpriteRegistry::new(),
            audio: Rc::new(SilentBackend),
            rng: Box::new(SeededSource::new(DEFAULT_SEED)),
            ticket_count: 1,
            controller: None,
            needs_mount: true,
            mount_error: None,
            bulk: BulkDraw::new(),
            results: Vec::new(),
            bulk_results: Vec::new(),
            commands: Rc::new(RefCell::new(CommandQueue::new())),
            events: Vec::new(),
            render_buffer: RenderBuffer::new(),
            unmounted: false,
        }
    }

    // -- Builder methods --

    pub fn with_audio(mut self, backend: Rc<dyn AudioBackend>) -> Self {
        self.audio = backend;
        self
    }

    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_sprites(mut self, sprites: SpriteRegistry) -> Self {
        self.sprites = sprites;
        self
    }

    pub fn with_ticket_count(mut self, count: usize) -> Self {
        self.ticket_count = count.max(1);
        self
    }

    /// Command handle for the hosting page. Commands run on the next frame.
    pub fn handle(&self) -> WheelHandle {
        WheelHandle::new(Rc::clone(&self.commands))
    }

    pub fn mode(&self) -> PlayMode {
        if self.ticket_count > self.config.max_reels {
            PlayMode::Bulk
        } else {
            PlayMode::Animated
        }
    }

    /// Whether a spin request would be honoured right now.
    pub fn is_ready(&self) -> bool {
        !self.unmounted && (self.mode() == PlayMode::Bulk || self.controller.is_some())
    }

    /// Change the number of tickets played at once. Any result or pending
    /// play belongs to the old count and is dropped.
    pub fn set_ticket_count(&mut self, count: usize) {
        let count = count.max(1);
        if count == self.ticket_count {
            return;
        }
        log::debug!("ticket count {} -> {}", self.ticket_count, count);
        self.ticket_count = count;
        self.bulk.cancel();
        self.clear_results();
        self.remount();
    }

    /// Switch to another competition's prize table.
    pub fn set_prizes(&mut self, prizes: PrizeTable) {
        self.prizes = prizes;
        self.bulk.cancel();
        self.clear_results();
        self.remount();
    }

    /// Resize the drawing surface. The reels are rebuilt at rest.
    pub fn set_viewport_width(&mut self, width: f32) {
        if width == self.config.viewport_width {
            return;
        }
        self.config.viewport_width = width;
        self.remount();
    }

    /// Load prize images. Symbols without a loaded image keep their fallback.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let manifest = AssetManifest::from_json(json)?;
        self.sprites = SpriteRegistry::from_manifest(&manifest);
        log::info!("loaded {} prize sprites", self.sprites.len());
        self.remount();
        Ok(())
    }

    fn remount(&mut self) {
        if let Some(controller) = self.controller.take() {
            if controller.is_spinning() {
                log::debug!("remount abandons the running spin");
            }
            controller.unmount();
        }
        self.render_buffer.clear();
        self.needs_mount = true;
        self.mount_error = None;
        self.ensure_mounted();
    }

    /// Mount the reel surface if animated mode needs one. A failed mount is
    /// retried on later frames; until then the wheel is not ready.
    fn ensure_mounted(&mut self) {
        if self.unmounted || !self.needs_mount || self.mode() != PlayMode::Animated {
            return;
        }
        match RenderSurface::mount(&self.config, &self.prizes, self.ticket_count, &self.sprites) {
            Ok(surface) => {
                let audio = AudioFeedback::new(Rc::clone(&self.audio), self.config.tick_interval_ms);
                self.controller = Some(SpinController::new(&self.config, self.prizes.clone(), surface, audio));
                self.needs_mount = false;
                self.mount_error = None;
                log::info!("wheel ready with {} reels", self.ticket_count);
            }
            Err(err) => {
                if self.mount_error.as_ref() != Some(&err) {
                    log::warn!("surface not mounted, will retry: {}", err);
                }
                self.mount_error = Some(err);
            }
        }
    }

    /// Start a play. Ignored while a play is running or before the wheel
    /// is ready.
    pub fn spin(&mut self, now_ms: f64) {
        if self.unmounted {
            return;
        }
        if self.is_spinning() {
            log::debug!("spin ignored: play in progress");
            return;
        }

        match self.mode() {
            PlayMode::Bulk => {
                self.clear_results();
                self.bulk.start(
                    &self.prizes,
                    self.ticket_count,
                    &mut *self.rng,
                    self.config.bulk_delay_ms,
                    now_ms,
                );
                self.poll_bulk(now_ms);
            }
            PlayMode::Animated => {
                self.ensure_mounted();
                if self.controller.is_none() {
                    log::debug!("spin ignored: surface not ready");
                    return;
                }
                self.clear_results();
                if let Some(controller) = self.controller.as_mut() {
                    controller.spin(now_ms, &mut *self.rng);
                }
                self.collect_controller_events();
            }
        }
    }

    /// Abandon the current play and return the reels to rest.
    pub fn reset(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.reset();
        }
        self.bulk.cancel();
        self.clear_results();
    }

    /// Advance one animation frame.
    pub fn tick(&mut self, now_ms: f64) {
        if self.unmounted {
            return;
        }

        let commands = self.commands.borrow_mut().drain();
        for command in commands {
            match command {
                WheelCommand::Spin => self.spin(now_ms),
                WheelCommand::Reset => self.reset(),
            }
        }

        self.ensure_mounted();
        if let Some(controller) = self.controller.as_mut() {
            controller.tick(now_ms);
        }
        self.collect_controller_events();
        self.poll_bulk(now_ms);

        match &self.controller {
            Some(controller) => controller.surface().build_render_buffer(&mut self.render_buffer),
            None => self.render_buffer.clear(),
        }
    }

    fn collect_controller_events(&mut self) {
        let Some(controller) = self.controller.as_mut() else { return };
        let drained: Vec<RevealEvent> = controller.drain_events().collect();
        for event in drained {
            let completed = match &event {
                RevealEvent::SpinCompleted { results } => {
                    self.results = results.clone();
                    true
                }
                _ => false,
            };
            self.events.push(event);
            if completed {
                self.events.push(RevealEvent::ResultsChanged { has_results: true });
            }
        }
    }

    fn poll_bulk(&mut self, now_ms: f64) {
        let Some(results) = self.bulk.poll(now_ms) else { return };
        log::info!("bulk play delivered {} prizes", results.len());
        self.bulk_results = results.clone();
        self.events.push(RevealEvent::BulkPrizesGenerated { results });
        self.events.push(RevealEvent::ResultsChanged { has_results: true });
    }

    fn clear_results(&mut self) {
        let had = self.has_results();
        self.results.clear();
        self.bulk_results.clear();
        if had {
            self.events.push(RevealEvent::ResultsChanged { has_results: false });
        }
    }

    /// Tear down: stop ticking, close audio, release the surface. The wheel
    /// ignores everything afterwards.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        if let Some(controller) = self.controller.take() {
            controller.unmount();
        }
        self.bulk.cancel();
        self.commands.borrow_mut().clear();
        self.render_buffer.clear();
        self.unmounted = true;
        log::info!("wheel unmounted");
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain(..)
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty() || !self.bulk_results.is_empty()
    }

    pub fn is_spinning(&self) -> bool {
        self.bulk.is_pending() || self.controller.as_ref().is_some_and(|c| c.is_spinning())
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Prizes of the last animated spin, one per reel.
    pub fn results(&self) -> &[Prize] {
        &self.results
    }

    /// Prizes of the last bulk play, one per ticket.
    pub fn bulk_results(&self) -> &[BulkPrize] {
        &self.bulk_results
    }

    /// Bulk results grouped for display.
    pub fn bulk_summary(&self) -> Vec<PrizeGroup> {
        summarize(&self.bulk_results)
    }

    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    pub fn reel_count(&self) -> usize {
        self.controller.as_ref().map_or(0, |c| c.surface().reel_count())
    }

    pub fn surface_size(&self) -> Option<Vec2> {
        self.controller.as_ref().map(|c| c.surface().size())
    }

    pub fn controller(&self) -> Option<&SpinController> {
        self.controller.as_ref()
    }

    /// Instances drawn by the last `tick`.
    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }
}

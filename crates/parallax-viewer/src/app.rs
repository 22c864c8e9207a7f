use parallax_engine::assets::ImagePair;
use parallax_engine::coords::Viewport;
use parallax_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use parallax_engine::input::{InputEvent, Key, KeyState, PointerListeners};
use parallax_engine::pointer::PointerTracker;
use parallax_engine::render::ParallaxRenderer;
use parallax_engine::scene::ParallaxScene;

/// The viewer: one parallax scene driven by the pointer.
///
/// Frames are only drawn when the pointer state changed or the runtime asks
/// for one (first frame, resize, expose).
pub struct ParallaxApp {
    listeners: PointerListeners,
    tracker: PointerTracker,
    scene: ParallaxScene,
    renderer: ParallaxRenderer,
    first_frame: bool,
}

impl ParallaxApp {
    pub fn new(images: ImagePair) -> Self {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);

        Self {
            listeners,
            tracker,
            scene: ParallaxScene::new(images),
            renderer: ParallaxRenderer::new(),
            first_frame: true,
        }
    }

    fn handle_input(&mut self, event: &InputEvent, viewport: Viewport) -> AppControl {
        match event {
            InputEvent::PointerMoved(ev) => {
                self.listeners.dispatch(ev, viewport);
                AppControl::Continue
            }
            InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Pressed,
                repeat: false,
            } => {
                log::info!("escape pressed, exiting");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }
}

impl App for ParallaxApp {
    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        self.handle_input(event, window.viewport())
    }

    fn wants_redraw(&self) -> bool {
        self.first_frame || self.tracker.is_dirty()
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.first_frame = false;
        self.tracker.take_dirty();

        let viewport = ctx.window.viewport();
        if self.scene.sync(self.tracker.state(), viewport) {
            log::trace!(
                "uniforms updated: x={:.3} y={:.3}",
                self.scene.uniforms().x_angle,
                self.scene.uniforms().y_angle
            );
        }

        let (renderer, scene) = (&mut self.renderer, &self.scene);
        ctx.render(wgpu::Color::BLACK, |rctx, target| {
            renderer.render(rctx, target, scene);
        })
    }
}

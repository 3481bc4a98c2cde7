use std::rc::Rc;
use std::time::Duration;

use trellis_core::RuntimeHandle;
use trellis_runtime_std::StdRuntime;
use trellis_ui::debug::{format_widget_tree, log_render_scene, log_widget_tree};
use trellis_ui::{
    HeadlessRenderer, RecordedRenderScene, Size, Style, Surface, UiContext, Widget,
    DEFAULT_LAYOUT_DELAY_MS,
};

/// Drives one widget tree from a host event loop.
///
/// The shell owns the runtime that deferred layout passes are scheduled on.
/// Hosts call [`AppShell::update`] whenever [`AppShell::should_render`]
/// reports work, or after sleeping for [`AppShell::time_until_next_timer`].
pub struct AppShell {
    runtime: StdRuntime,
    root: Widget,
    renderer: HeadlessRenderer,
    viewport: Size,
    last_scene: Option<RecordedRenderScene>,
}

impl AppShell {
    pub fn new(style: Style, surface: Rc<dyn Surface>, viewport: Size) -> Self {
        Self::with_layout_delay(style, surface, viewport, DEFAULT_LAYOUT_DELAY_MS)
    }

    pub fn with_layout_delay(
        style: Style,
        surface: Rc<dyn Surface>,
        viewport: Size,
        delay_ms: u64,
    ) -> Self {
        let runtime = StdRuntime::new();
        let context = UiContext::new(style)
            .with_runtime(runtime.runtime_handle())
            .with_layout_delay(delay_ms);
        let root = Widget::new_root(&context, surface);
        root.resize(viewport);
        log::debug!("app shell created with viewport {viewport:?}");
        Self {
            runtime,
            root,
            renderer: HeadlessRenderer::new(),
            viewport,
            last_scene: None,
        }
    }

    pub fn root(&self) -> &Widget {
        &self.root
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.runtime_handle()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the root, which lays its children out again straight away.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        self.root.resize(self.viewport);
    }

    /// Asks for a deferred layout pass of the whole tree.
    pub fn request_layout(&self) {
        if let Err(err) = self.root.layout_items(true) {
            log::error!("layout request failed: {err}");
        }
    }

    pub fn should_render(&self) -> bool {
        self.runtime.take_tick_request() || self.root.requires_update()
    }

    /// How long the host may sleep before a deferred layout pass is due.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.runtime.time_until_next_timer()
    }

    /// Runs due layout passes and repaints the tree if anything changed.
    ///
    /// Returns whether a frame was rendered.
    pub fn update(&mut self) -> bool {
        let ran = self.runtime.pump();
        if ran > 0 {
            log::trace!("pumped {ran} timers and tasks");
        }
        if !self.root.requires_update() {
            return false;
        }
        let scene = self.renderer.render(&self.root);
        if scene.is_empty() {
            log::debug!("render produced an empty scene");
        }
        self.last_scene = Some(scene);
        true
    }

    pub fn last_scene(&self) -> Option<&RecordedRenderScene> {
        self.last_scene.as_ref()
    }

    pub fn log_debug_info(&self) {
        log::info!("current widget tree:");
        log_widget_tree(&self.root);
        match &self.last_scene {
            Some(scene) => log_render_scene(scene),
            None => log::info!("no frame rendered yet"),
        }
    }

    /// The widget tree as [`log_debug_info`](Self::log_debug_info) writes it.
    pub fn debug_tree(&self) -> String {
        format_widget_tree(&self.root)
    }
}

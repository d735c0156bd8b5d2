use std::time::Duration;

use crate::command::Command;
use crate::config::AppConfig;
use crate::element::ElementId;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::raster::Rasterizer;
use crate::renderer::Renderer;
use crate::solve::SolveClient;
use crate::state::{EditorContext, Preferences};

pub struct CanvasApp {
    context: EditorContext,
    renderer: Renderer,
    input: InputHandler,
    rasterizer: Rasterizer,
    /// Missing when the HTTP client could not be built; solving is then a no-op.
    client: Option<SolveClient>,
    canvas_rect: egui::Rect,
    /// The text element whose editor has already been given focus.
    focused_text: Option<ElementId>,
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::from_env().unwrap_or_else(|err| {
            log::warn!("{err}, using default configuration");
            AppConfig::default()
        });
        let mut app = Self::with_config(&config);
        Preferences::load(cc.storage).restore(&mut app.context);
        app
    }

    pub fn with_config(config: &AppConfig) -> Self {
        let client = match SolveClient::new(config) {
            Ok(client) => {
                log::info!("solve endpoint {}", client.endpoint());
                Some(client)
            }
            Err(err) => {
                log::error!("{err}");
                None
            }
        };

        Self {
            context: EditorContext::new(),
            renderer: Renderer::new(),
            input: InputHandler::new(),
            rasterizer: Rasterizer::new(),
            client,
            canvas_rect: egui::Rect::NOTHING,
            focused_text: None,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EditorContext {
        &mut self.context
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn canvas_rect(&self) -> egui::Rect {
        self.canvas_rect
    }

    pub fn set_canvas_rect(&mut self, rect: egui::Rect) {
        self.canvas_rect = rect;
    }

    pub fn execute(&mut self, command: Command) {
        self.context.execute(command);
    }

    /// True the first time it is asked about a given text element.
    pub fn take_focus_request(&mut self, id: ElementId) -> bool {
        if self.focused_text == Some(id) {
            return false;
        }
        self.focused_text = Some(id);
        true
    }

    /// Rasterise the canvas and post it, unless a request is already out.
    pub fn submit_solve(&mut self) {
        if self.context.solve().is_busy() {
            return;
        }
        let Some(client) = &self.client else {
            log::error!("no solve client available");
            return;
        };

        let size = self.canvas_rect.size();
        if !size.x.is_finite() || !size.y.is_finite() || size.x < 1.0 || size.y < 1.0 {
            return;
        }

        match self.context.prepare_solve(&self.rasterizer, size.x as u32, size.y as u32) {
            Ok(prepared) => {
                let receiver = client.dispatch(prepared.request);
                self.context.solve_mut().begin(receiver, prepared.center);
            }
            Err(err) => log::error!("cannot prepare solve request: {err}"),
        }
    }
}

impl eframe::App for CanvasApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        Preferences::capture(&self.context).save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.context.poll_solve();
        if self.context.solve().is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        if !self.context.state().is_writing() {
            self.focused_text = None;
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

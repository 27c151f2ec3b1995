mod api;
mod components;

use components::header::render_header;
use components::results::render_results;
use components::upload::render_upload_section;
use components::utils::{render_error_message, validate_file_type};
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Interval;
use shared::{ChattelReport, FloorPlanResult};
use web_sys::DragEvent;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    FloorPlan,
    Chattels,
}

impl Tool {
    pub fn endpoint(self) -> &'static str {
        match self {
            Tool::FloorPlan => "/api/analyze-floor-plan",
            Tool::Chattels => "/api/analyze-chattels",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::FloorPlan => "Floor Plan",
            Tool::Chattels => "Chattels",
        }
    }
}

// Yew msg components
pub enum Msg {
    // Tool & file selection
    SwitchTool(Tool),
    FileSelected(web_sys::File),

    // Analysis operations
    Analyze,
    ProgressTick,
    FloorPlanReady(FloorPlanResult),
    ChattelsReady(ChattelReport),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
}

// Main component
pub struct Model {
    pub tool: Tool,
    pub file: Option<GlooFile>,
    pub preview_url: Option<ObjectUrl>,
    pub analyzing: bool,
    pub progress: u32,
    progress_timer: Option<Interval>,
    pub floor_plan: Option<FloorPlanResult>,
    pub chattel_report: Option<ChattelReport>,
    pub error: Option<String>,
    pub is_dragging: bool,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            tool: Tool::FloorPlan,
            file: None,
            preview_url: None,
            analyzing: false,
            progress: 0,
            progress_timer: None,
            floor_plan: None,
            chattel_report: None,
            error: None,
            is_dragging: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SwitchTool(tool) => self.handle_switch_tool(tool),
            Msg::FileSelected(file) => self.handle_file_selected(file),

            Msg::Analyze => self.handle_analyze(ctx),
            Msg::ProgressTick => self.handle_progress_tick(),
            Msg::FloorPlanReady(result) => self.handle_floor_plan_ready(result),
            Msg::ChattelsReady(report) => self.handle_chattels_ready(report),

            Msg::SetError(error) => self.handle_set_error(error),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::HandleDrop(event) => self.handle_drop(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header(self, ctx) }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_error_message(self) }
                    { render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Property Survey Analyser | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

// Handler methods
impl Model {
    fn handle_switch_tool(&mut self, tool: Tool) -> bool {
        if self.tool == tool {
            return false;
        }
        self.tool = tool;
        self.reset_selection();
        true
    }

    fn reset_selection(&mut self) {
        self.file = None;
        self.preview_url = None;
        self.analyzing = false;
        self.progress = 0;
        self.progress_timer = None;
        self.floor_plan = None;
        self.chattel_report = None;
        self.error = None;
    }

    fn handle_file_selected(&mut self, file: web_sys::File) -> bool {
        self.error = None;

        if let Err(message) = validate_file_type(self.tool, &file.type_()) {
            self.error = Some(message);
            return true;
        }

        // A new selection discards earlier results.
        self.floor_plan = None;
        self.chattel_report = None;
        self.progress = 0;

        let file = GlooFile::from(file);
        self.preview_url = Some(ObjectUrl::from(file.clone()));
        self.file = Some(file);
        true
    }

    fn handle_analyze(&mut self, ctx: &Context<Self>) -> bool {
        let file = match &self.file {
            Some(file) => file.clone(),
            None => {
                self.error = Some("No file selected for analysis.".into());
                return true;
            }
        };

        self.analyzing = true;
        self.error = None;
        self.progress = 0;
        self.floor_plan = None;
        self.chattel_report = None;

        // Cosmetic progress: creeps to 90 on a timer, jumps to 100 when the
        // response lands. No real upstream progress exists.
        let link = ctx.link().clone();
        self.progress_timer = Some(Interval::new(500, move || {
            link.send_message(Msg::ProgressTick);
        }));

        api::send_analysis_request(ctx, self.tool, file);
        true
    }

    fn handle_progress_tick(&mut self) -> bool {
        if self.progress < 90 {
            self.progress = (self.progress + 10).min(90);
            true
        } else {
            false
        }
    }

    fn finish_request(&mut self) {
        self.progress_timer = None;
        self.analyzing = false;
        self.progress = 100;
    }

    fn handle_floor_plan_ready(&mut self, result: FloorPlanResult) -> bool {
        self.finish_request();

        // The analyser reports "not a floor plan" through an error field.
        match result.error.clone() {
            Some(error) => self.error = Some(error),
            None => self.floor_plan = Some(result),
        }
        true
    }

    fn handle_chattels_ready(&mut self, report: ChattelReport) -> bool {
        self.finish_request();
        self.chattel_report = Some(report);
        true
    }

    fn handle_set_error(&mut self, error: Option<String>) -> bool {
        self.progress_timer = None;
        self.analyzing = false;
        self.error = error;
        true
    }

    fn handle_drop(&mut self, ctx: &Context<Self>, event: DragEvent) -> bool {
        event.prevent_default();
        self.is_dragging = false;

        if let Some(data_transfer) = event.data_transfer() {
            if let Some(file_list) = data_transfer.files() {
                if let Some(file) = file_list.item(0) {
                    ctx.link().send_message(Msg::FileSelected(file));
                }
            }
        }

        true
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}

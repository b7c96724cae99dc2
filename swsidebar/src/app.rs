use crate::consts::DB_FILE;
use crate::db::SqliteStore;
use crate::errors::{error_toast, SidebarError};
use crate::options::SidebarOptions;
use crate::page::{Page, PageHandle};
use crate::{PageEvent, SidebarController};
use eframe::{egui, NativeOptions};
use egui_toast::Toasts;
use tracing::error;

pub struct SwSidebar {
    pub page: PageHandle,
    pub sidebar: SidebarController<SqliteStore>,
    pub events: Vec<PageEvent>,
    toasts: Toasts,
}

impl SwSidebar {
    pub fn new(options: SidebarOptions, store: SqliteStore) -> Result<Self, SidebarError> {
        let page = host_page(&[
            SidebarOptions::DEFAULT_MAIN_CONTAINER,
            SidebarOptions::DEFAULT_CONTENT_CONTAINER,
            SidebarOptions::DEFAULT_SIDE_CONTAINER,
            SidebarOptions::DEFAULT_TOGGLE_CONTAINER,
        ])
        .into_handle();

        // init() runs here either way so a bad container id ends up on screen
        let mut sidebar = SidebarController::new(
            SidebarOptions {
                auto_create: false,
                ..options
            },
            page.clone(),
            store,
        )?;
        let init = sidebar.init();

        let mut app = Self {
            page,
            sidebar,
            events: vec![],
            toasts: Toasts::new()
                .anchor(egui::Align2::CENTER_CENTER, (10.0, 10.0))
                .direction(egui::Direction::TopDown),
        };
        app.report(init);
        Ok(app)
    }

    pub fn start(options: NativeOptions, sidebar_options: SidebarOptions) -> eframe::Result<()> {
        eframe::run_native(
            "swsidebar",
            options,
            Box::new(|cc| {
                cc.egui_ctx
                    .options_mut(|opt| opt.zoom_with_keyboard = false);
                let store = SqliteStore::open(DB_FILE)?;
                Ok(Box::new(SwSidebar::new(sidebar_options, store)?))
            }),
        )
    }

    pub fn report<T>(&mut self, result: Result<T, SidebarError>) {
        if let Err(err) = result {
            error!("sidebar error: {err}");
            self.toasts.add(error_toast(err.to_string()));
        }
    }

    fn pointer_events(&mut self, ctx: &egui::Context) {
        let (pos, moving, released) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.is_moving(),
                i.pointer.primary_released(),
            )
        });
        if let (Some(pos), true) = (pos, moving) {
            self.events.push(PageEvent::mouse_move(pos.x));
        }
        if released {
            self.events
                .push(PageEvent::mouse_up(pos.map_or(0.0, |pos| pos.x)));
        }
    }

    fn flush_events(&mut self, ctx: &egui::Context) {
        for event in std::mem::take(&mut self.events) {
            match self.sidebar.dispatch(event) {
                Ok(dispatch) if dispatch.handled > 0 => ctx.request_repaint(),
                Ok(_) => {}
                Err(err) => {
                    error!("sidebar event {:?} failed: {err}", event.kind);
                    self.toasts.add(error_toast(err.to_string()));
                }
            }
        }
    }
}

impl SwSidebar {
    fn content_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("swsidebar");
        ui.separator();
        if self.sidebar.sidebar_elements().is_none() {
            ui.label("Sidebar: not attached");
            return;
        }
        ui.label(format!(
            "Sidebar: {}",
            if self.sidebar.is_open() { "open" } else { "closed" }
        ));
        ui.label(format!(
            "Switch: {}",
            if self.sidebar.is_toggle() { "on" } else { "off" }
        ));
        ui.label(format!("Width: {}px", self.sidebar.current_width()));
        if self.sidebar.is_resizing() {
            ui.label("Resizing...");
        }
    }
}

impl eframe::App for SwSidebar {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("main_top_panel").show(ctx, |ui| {
            self.menubar(ui);
        });

        if let Some(elements) = self.sidebar.sidebar_elements().copied() {
            self.side_panel(ctx, &elements);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.content_panel(ui);
        });

        self.pointer_events(ctx);
        self.flush_events(ctx);

        self.toasts.show(ctx);
    }
}

/// Page with one empty container per id.
pub fn host_page(container_ids: &[&str]) -> Page {
    let mut page = Page::new();
    for id in container_ids {
        page.add_container(id);
    }
    page
}

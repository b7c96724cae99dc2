use crate::app::SwSidebar;
use crate::consts::{class, CONTENT_WIDTH_VAR, RESIZER_ID};
use crate::page::{parse_px, Page};
use crate::ui::{fragment_blocks, Block};
use crate::{ElementId, PageEvent, SidebarElements};
use egui::{Align, Color32, CursorIcon, Id, Layout, Rect, RichText, ScrollArea, Sense, Ui};

/// What the side container shows in one frame, read from the page.
#[derive(Debug, Clone)]
pub struct SidePanel {
    pub open: bool,
    pub width: f32,
    pub show_resizer: bool,
    pub resizing: bool,
    pub content_html: String,
    pub content_width: Option<f32>,
    pub toggle_text: String,
}

impl SidePanel {
    /// Width of the strip holding the toggle button while closed.
    pub const CLOSE_WIDTH: f32 = 36.0;
    pub const RESIZER_WIDTH: f32 = 6.0;
}

impl SidePanel {
    pub fn from_page(page: &Page, elements: &SidebarElements, fallback_width: f32) -> Self {
        let sidebar = page.element(elements.sidebar);
        let resizer = page.element(elements.resizer);
        let content = elements.content.map(|id| page.element(id));
        Self {
            open: sidebar.has_class(class::OPEN),
            width: page
                .property(CONTENT_WIDTH_VAR)
                .and_then(parse_px)
                .unwrap_or(fallback_width),
            show_resizer: resizer.style("display") != Some("none"),
            resizing: resizer.has_class(class::RESIZING),
            content_html: content
                .map(|el| el.inner_html().to_owned())
                .unwrap_or_default(),
            content_width: content.and_then(|el| el.style("width")).and_then(parse_px),
            toggle_text: page.element(elements.toggle_btn).text().to_owned(),
        }
    }
}

impl SwSidebar {
    pub fn side_panel(&mut self, ctx: &egui::Context, elements: &SidebarElements) {
        let panel = SidePanel::from_page(
            &self.page.borrow(),
            elements,
            self.sidebar.options().default_width,
        );
        let width = if panel.open {
            panel.width
        } else {
            SidePanel::CLOSE_WIDTH
        };

        let response = egui::SidePanel::right("main_right_panel")
            .resizable(false)
            .exact_width(width)
            .show(ctx, |ui| {
                if panel.show_resizer {
                    self.resizer(ui, elements.resizer, panel.resizing);
                }
                ui.with_layout(Layout::top_down(Align::Max), |ui| {
                    if ui.button(&panel.toggle_text).clicked() {
                        self.events.push(PageEvent::click(elements.toggle_btn));
                    }
                });
                if panel.open {
                    ui.separator();
                    content_slot(ui, &panel);
                }
            });

        if panel.open {
            self.page
                .borrow_mut()
                .set_rendered_width(elements.sidebar, response.response.rect.width());
        }
    }

    fn resizer(&mut self, ui: &mut Ui, resizer: ElementId, resizing: bool) {
        let area = ui.max_rect();
        let rect = Rect::from_min_max(
            area.left_top(),
            egui::pos2(area.left() + SidePanel::RESIZER_WIDTH, area.bottom()),
        );
        let response = ui.interact(rect, Id::new(RESIZER_ID), Sense::drag());

        let color = if resizing || response.hovered() {
            ui.visuals().selection.bg_fill
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };
        ui.painter().rect_filled(rect, 0.0, color);

        if resizing || response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
        }
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.events.push(PageEvent::mouse_down(resizer, pos.x));
            }
        }
    }
}

fn content_slot(ui: &mut Ui, panel: &SidePanel) {
    ScrollArea::vertical().show(ui, |ui| {
        if let Some(width) = panel.content_width {
            ui.set_max_width(width.max(0.0));
        }
        for block in fragment_blocks(&panel.content_html) {
            match block {
                Block::Heading(text) => {
                    ui.heading(text);
                }
                Block::Text(text) => {
                    ui.label(RichText::new(text).color(Color32::GRAY));
                }
            }
        }
    });
}

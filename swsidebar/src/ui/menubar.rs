use crate::app::SwSidebar;
use crate::ui::toggle_switch;
use crate::PageEvent;
use egui::{Align, Button, Layout, MenuBar, ViewportCommand};

const BTN_WIDTH: f32 = 200.0;

const SAMPLE_CONTENT: &str = "<h3>Notes</h3>\
    <p>Drag the left edge of this panel to resize it.</p>\
    <p>The switch in the top bar is remembered across restarts.</p>";

impl SwSidebar {
    pub fn menubar(&mut self, ui: &mut egui::Ui) {
        MenuBar::new().ui(ui, |ui| {
            // View
            self.view_menu(ui);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                self.toggle_container(ui);
            });
        });
    }

    fn view_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("View", |ui| {
            let open_btn = Button::new("Open Sidebar").min_size((BTN_WIDTH, 0.).into());
            if ui.add(open_btn).clicked() {
                let result = self.sidebar.open();
                self.report(result);
                ui.close();
            }
            let close_btn = Button::new("Close Sidebar").min_size((BTN_WIDTH, 0.).into());
            if ui.add(close_btn).clicked() {
                let result = self.sidebar.close();
                self.report(result);
                ui.close();
            }
            let toggle_btn = Button::new("Toggle Sidebar").min_size((BTN_WIDTH, 0.).into());
            if ui.add(toggle_btn).clicked() {
                let result = self.sidebar.toggle_sidebar();
                self.report(result);
                ui.close();
            }
            ui.separator();
            let sample_btn = Button::new("Load Sample Content").min_size((BTN_WIDTH, 0.).into());
            if ui.add(sample_btn).clicked() {
                let result = self.sidebar.set_content(SAMPLE_CONTENT);
                self.report(result);
                ui.close();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(ViewportCommand::Close);
            }
        });
    }

    /// Renders the toggle switch injected into the toggle container.
    fn toggle_container(&mut self, ui: &mut egui::Ui) {
        let Some(toggle) = self.sidebar.sidebar_elements().map(|els| els.toggle) else {
            return;
        };
        let mut checked = self.page.borrow().element(toggle).checked();
        // right to left: the label ends up after the switch
        ui.label("Sidebar");
        if toggle_switch(ui, &mut checked).changed() {
            self.page
                .borrow_mut()
                .element_mut(toggle)
                .set_checked(checked);
            self.events.push(PageEvent::change(toggle));
        }
    }
}

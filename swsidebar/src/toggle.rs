use crate::consts::class;
use crate::controller::{SidebarController, SidebarElements};
use crate::errors::SidebarError;
use crate::page::Page;
use crate::storage::KeyValueStore;
use tracing::debug;

impl<S: KeyValueStore> SidebarController<S> {
    /// Handler of the toggle button.
    ///
    /// With the switch on, flips the panel open/closed. With the switch off
    /// the panel can only be closed.
    pub fn toggle_sidebar(&mut self) -> Result<(), SidebarError> {
        self.elements()?;
        if !self.is_toggle() {
            return self.close();
        }
        if self.open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Handler of the toggle switch: closes the panel and persists the switch.
    ///
    /// Turning the switch on does not reveal the panel, that takes a click on
    /// the toggle button or an explicit [`open`](Self::open).
    pub fn handle_toggle_save(&mut self) -> Result<(), SidebarError> {
        let elements = self.elements()?;
        self.open = false;
        self.render(&mut self.page.borrow_mut(), &elements);

        let checked = self.is_toggle();
        let key = &self.options.storage_key;
        self.store.remove(key)?;
        self.store.set(key, if checked { "true" } else { "false" })?;
        debug!("sidebar switch saved: {checked}");
        Ok(())
    }

    pub fn open(&mut self) -> Result<(), SidebarError> {
        let elements = self.elements()?;
        self.open = true;
        self.render(&mut self.page.borrow_mut(), &elements);
        debug!("sidebar opened");
        Ok(())
    }

    /// Closes the panel and drops any inline sizing left on it.
    pub fn close(&mut self) -> Result<(), SidebarError> {
        let elements = self.elements()?;
        self.open = false;
        let mut page = self.page.borrow_mut();
        page.element_mut(elements.sidebar).remove_style_attribute();
        self.render(&mut page, &elements);
        debug!("sidebar closed");
        Ok(())
    }

    /// Replaces the markup shown inside the panel.
    pub fn set_content(&mut self, html: &str) -> Result<(), SidebarError> {
        let elements = self.elements()?;
        if let Some(content) = elements.content {
            self.page
                .borrow_mut()
                .element_mut(content)
                .set_inner_html(html);
        }
        Ok(())
    }
}

impl<S> SidebarController<S> {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the toggle switch is on, independent of the panel.
    pub fn is_toggle(&self) -> bool {
        match self.elements {
            Some(elements) => self.page.borrow().element(elements.toggle).checked(),
            None => false,
        }
    }

    /// Projects the open state onto the page.
    pub(crate) fn render(&self, page: &mut Page, elements: &SidebarElements) {
        // the resizer is shown iff the panel is open
        if self.open {
            page.element_mut(elements.sidebar).add_class(class::OPEN);
            page.element_mut(elements.content_container)
                .add_class(class::SIDEBAR_OPEN);
            page.element_mut(elements.resizer)
                .set_style("display", "block");
        } else {
            page.element_mut(elements.sidebar).remove_class(class::OPEN);
            page.element_mut(elements.content_container)
                .remove_class(class::SIDEBAR_OPEN);
            page.element_mut(elements.resizer)
                .set_style("display", "none");
        }
    }
}

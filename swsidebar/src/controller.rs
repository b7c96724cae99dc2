use crate::consts::{
    class, CONTENT_ID, CONTENT_WIDTH_VAR, PLACEHOLDER_CONTENT, RESIZER_ID, SIDEBAR_ID,
    TOGGLE_BTN_ID, TOGGLE_BTN_TEXT, TOGGLE_ID, TOGGLE_KNOB_ID,
};
use crate::errors::SidebarError;
use crate::listeners::{Action, EventKind, ListenerId, Target};
use crate::options::SidebarOptions;
use crate::page::{parse_px, px, ElementId, Node, Page, PageHandle};
use crate::resize::{DragOrigin, ResizeState};
use crate::storage::KeyValueStore;
use garde::Validate;
use tracing::{debug, error, warn};

/// Input delivered by the host page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageEvent {
    pub kind: EventKind,
    pub target: Option<ElementId>,
    pub client_x: f32,
}

impl PageEvent {
    pub fn change(target: ElementId) -> Self {
        Self {
            kind: EventKind::Change,
            target: Some(target),
            client_x: 0.0,
        }
    }

    pub fn click(target: ElementId) -> Self {
        Self {
            kind: EventKind::Click,
            target: Some(target),
            client_x: 0.0,
        }
    }

    pub fn mouse_down(target: ElementId, client_x: f32) -> Self {
        Self {
            kind: EventKind::MouseDown,
            target: Some(target),
            client_x,
        }
    }

    pub fn mouse_move(client_x: f32) -> Self {
        Self {
            kind: EventKind::MouseMove,
            target: None,
            client_x,
        }
    }

    pub fn mouse_up(client_x: f32) -> Self {
        Self {
            kind: EventKind::MouseUp,
            target: None,
            client_x,
        }
    }
}

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Number of listeners that ran.
    pub handled: usize,
    /// The host should skip its default handling (text selection, dragging).
    pub default_prevented: bool,
}

/// Elements located or created by `init()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarElements {
    pub container: ElementId,
    pub main_container: ElementId,
    pub content_container: ElementId,
    pub toggle_container: ElementId,
    pub sidebar: ElementId,
    pub toggle: ElementId,
    pub toggle_btn: ElementId,
    pub resizer: ElementId,
    pub content: Option<ElementId>,
}

/// Collapsible, resizable sidebar attached to a [`Page`].
///
/// Every operation other than the queries requires a successful
/// [`init`](Self::init); calling one earlier returns
/// [`SidebarError::NotInitialized`].
pub struct SidebarController<S> {
    pub(crate) options: SidebarOptions,
    pub(crate) page: PageHandle,
    pub(crate) store: S,
    pub(crate) elements: Option<SidebarElements>,
    pub(crate) open: bool,
    pub(crate) resize: ResizeState,
    bindings: Vec<ListenerId>,
}

impl<S: KeyValueStore> SidebarController<S> {
    /// Creates the controller and, when `auto_create` is set, runs `init()`.
    ///
    /// Options that fail validation are rejected before the page is touched.
    pub fn new(options: SidebarOptions, page: PageHandle, store: S) -> Result<Self, SidebarError> {
        options.validate()?;
        let mut controller = Self {
            options,
            page,
            store,
            elements: None,
            open: false,
            resize: ResizeState::Idle,
            bindings: vec![],
        };
        if controller.options.auto_create {
            controller.init()?;
        }
        Ok(controller)
    }

    pub fn init(&mut self) -> Result<(), SidebarError> {
        // the old markup goes away, end its drag the normal way first
        if self.resize.is_resizing() {
            self.stop_resize()?;
        }
        let elements = self.create_html()?;
        self.elements = Some(elements);
        self.bind_events(&elements);
        self.load_stored_state(&elements);
        self.open = false;
        self.resize = ResizeState::Idle;
        {
            let mut page = self.page.borrow_mut();
            page.set_property(CONTENT_WIDTH_VAR, px(self.options.default_width));
            self.render(&mut page, &elements);
        }
        debug!(
            "sidebar attached to #{}, toggle in #{}",
            self.options.side_container_id, self.options.toggle_container_id
        );
        Ok(())
    }

    fn create_html(&self) -> Result<SidebarElements, SidebarError> {
        let mut page = self.page.borrow_mut();

        let container = find_container(&page, &self.options.side_container_id)?;
        let main_container = find_container(&page, &self.options.main_container_id)?;
        let content_container = find_container(&page, &self.options.content_container_id)?;
        let toggle_container = find_container(&page, &self.options.toggle_container_id)?;

        page.element_mut(main_container)
            .add_class(class::MAIN_CONTAINER);
        page.element_mut(content_container)
            .add_class(class::CONTENT_CONTAINER);
        page.element_mut(container).add_class(class::SIDE_CONTAINER);

        page.set_children(container, vec![sidebar_markup()]);
        page.set_children(toggle_container, vec![toggle_markup()]);

        let created = |page: &Page, id: &str| {
            page.get_element_by_id(id)
                .ok_or_else(|| SidebarError::Plain(format!("markup element '{id}' missing")))
        };
        Ok(SidebarElements {
            container,
            main_container,
            content_container,
            toggle_container,
            sidebar: created(&*page, SIDEBAR_ID)?,
            toggle: created(&*page, TOGGLE_ID)?,
            toggle_btn: created(&*page, TOGGLE_BTN_ID)?,
            resizer: created(&*page, RESIZER_ID)?,
            content: page.get_element_by_id(CONTENT_ID),
        })
    }

    fn bind_events(&mut self, elements: &SidebarElements) {
        let page = self.page.borrow();
        let mut listeners = page.listeners().borrow_mut();
        // a repeated init() replaces the markup, drop what the old one bound
        for id in self.bindings.drain(..) {
            listeners.remove(id);
        }
        self.bindings = vec![
            listeners.add(
                Target::Element(elements.toggle),
                EventKind::Change,
                Action::SaveToggle,
            ),
            listeners.add(
                Target::Element(elements.toggle_btn),
                EventKind::Click,
                Action::ToggleSidebar,
            ),
            listeners.add(
                Target::Element(elements.resizer),
                EventKind::MouseDown,
                Action::StartResize,
            ),
        ];
    }

    fn load_stored_state(&self, elements: &SidebarElements) {
        let stored = match self.store.get(&self.options.storage_key) {
            Ok(stored) => stored,
            Err(err) => {
                warn!("failed to read '{}': {err}", self.options.storage_key);
                None
            }
        };
        // only the exact string "true" counts
        if stored.as_deref() == Some("true") {
            self.page
                .borrow_mut()
                .element_mut(elements.toggle)
                .set_checked(true);
        }
    }

    /// Routes `event` to the listeners bound on its target and on the document.
    pub fn dispatch(&mut self, event: PageEvent) -> Result<Dispatch, SidebarError> {
        let actions = {
            let page = self.page.borrow();
            let listeners = page.listeners().borrow();
            let mut actions = vec![];
            if let Some(target) = event.target {
                actions.extend(listeners.matching(Target::Element(target), event.kind));
            }
            actions.extend(listeners.matching(Target::Document, event.kind));
            actions
        };

        let mut dispatch = Dispatch::default();
        for action in actions {
            dispatch.handled += 1;
            match action {
                Action::SaveToggle => self.handle_toggle_save()?,
                Action::ToggleSidebar => self.toggle_sidebar()?,
                Action::StartResize => {
                    if self.init_resize(event.client_x)? {
                        dispatch.default_prevented = true;
                    }
                }
                Action::DoResize => {
                    if self.do_resize(event.client_x)? {
                        dispatch.default_prevented = true;
                    }
                }
                Action::StopResize => self.stop_resize()?,
            }
        }
        Ok(dispatch)
    }

    pub(crate) fn elements(&self) -> Result<SidebarElements, SidebarError> {
        self.elements.ok_or(SidebarError::NotInitialized)
    }
}

impl<S> SidebarController<S> {
    pub fn options(&self) -> &SidebarOptions {
        &self.options
    }

    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `None` until `init()` succeeded.
    pub fn sidebar_elements(&self) -> Option<&SidebarElements> {
        self.elements.as_ref()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    pub fn drag_origin(&self) -> Option<DragOrigin> {
        self.resize.origin()
    }

    /// Width currently held by the layout variable.
    pub fn current_width(&self) -> f32 {
        self.page
            .borrow()
            .property(CONTENT_WIDTH_VAR)
            .and_then(parse_px)
            .unwrap_or(self.options.default_width)
    }
}

fn find_container(page: &Page, id: &str) -> Result<ElementId, SidebarError> {
    page.get_element_by_id(id).ok_or_else(|| {
        error!("Container element with id '{id}' not found");
        SidebarError::ContainerNotFound(id.to_owned())
    })
}

fn sidebar_markup() -> Node {
    Node::new("div")
        .id(SIDEBAR_ID)
        .class(class::SIDEBAR_MODULE)
        .child(Node::new("div").id(RESIZER_ID).class(class::RESIZER))
        .child(
            Node::new("div").style("text-align", "right").child(
                Node::new("button")
                    .id(TOGGLE_BTN_ID)
                    .class(class::TOGGLE_BTN)
                    .text(TOGGLE_BTN_TEXT),
            ),
        )
        .child(
            Node::new("div")
                .id(CONTENT_ID)
                .class(class::CONTENT)
                .html(PLACEHOLDER_CONTENT),
        )
}

fn toggle_markup() -> Node {
    Node::new("div")
        .class(class::TOGGLE_WRAPPER)
        .child(
            Node::new("input")
                .id(TOGGLE_ID)
                .class(class::TOGGLE_INPUT)
                .attr("type", "checkbox"),
        )
        .child(
            Node::new("label")
                .class(class::TOGGLE_SWITCH)
                .attr("for", TOGGLE_ID)
                .child(
                    Node::new("span")
                        .id(TOGGLE_KNOB_ID)
                        .class(class::TOGGLE_KNOB),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn page_with(ids: &[&str]) -> PageHandle {
        let mut page = Page::new();
        for id in ids {
            page.add_container(id);
        }
        page.into_handle()
    }

    fn full_page() -> PageHandle {
        page_with(&[
            SidebarOptions::DEFAULT_MAIN_CONTAINER,
            SidebarOptions::DEFAULT_CONTENT_CONTAINER,
            SidebarOptions::DEFAULT_SIDE_CONTAINER,
            SidebarOptions::DEFAULT_TOGGLE_CONTAINER,
        ])
    }

    #[test]
    fn test_init_injects_markup() {
        let page = full_page();
        let sidebar =
            SidebarController::new(SidebarOptions::default(), page.clone(), MemoryStore::new())
                .unwrap();
        let els = *sidebar.sidebar_elements().unwrap();
        let page = page.borrow();

        assert!(page
            .element(els.container)
            .has_class(class::SIDE_CONTAINER));
        assert!(page
            .element(els.main_container)
            .has_class(class::MAIN_CONTAINER));
        assert!(page
            .element(els.content_container)
            .has_class(class::CONTENT_CONTAINER));
        assert_eq!(page.element(els.container).children(), &[els.sidebar]);
        assert_eq!(page.element(els.toggle_btn).text(), TOGGLE_BTN_TEXT);
        assert_eq!(page.element(els.toggle).attr("type"), Some("checkbox"));
        let content = els.content.unwrap();
        assert_eq!(page.element(content).inner_html(), PLACEHOLDER_CONTENT);
        assert_eq!(page.property(CONTENT_WIDTH_VAR), Some("300px"));
        assert!(page.get_element_by_id(TOGGLE_KNOB_ID).is_some());
    }

    #[test]
    fn test_missing_side_container() {
        let page = page_with(&["mainContainer", "contentContainer", "toggleContainer"]);
        let mut sidebar = SidebarController::new(
            SidebarOptions {
                auto_create: false,
                ..Default::default()
            },
            page.clone(),
            MemoryStore::new(),
        )
        .unwrap();

        let err = sidebar.init().unwrap_err();
        assert!(matches!(err, SidebarError::ContainerNotFound(ref id) if id == "sideContainer"));
        assert!(sidebar.sidebar_elements().is_none());
        assert!(page.borrow().listeners().borrow().is_empty());
        assert!(page.borrow().get_element_by_id(SIDEBAR_ID).is_none());
        assert!(page.borrow().property(CONTENT_WIDTH_VAR).is_none());
    }

    #[test]
    fn test_auto_create_propagates_init_error() {
        let page = page_with(&["mainContainer"]);
        let result = SidebarController::new(SidebarOptions::default(), page, MemoryStore::new());
        assert!(matches!(result, Err(SidebarError::ContainerNotFound(_))));
    }

    #[test]
    fn test_operations_before_init() {
        let mut sidebar = SidebarController::new(
            SidebarOptions {
                auto_create: false,
                ..Default::default()
            },
            full_page(),
            MemoryStore::new(),
        )
        .unwrap();

        assert!(matches!(sidebar.open(), Err(SidebarError::NotInitialized)));
        assert!(matches!(sidebar.close(), Err(SidebarError::NotInitialized)));
        assert!(matches!(
            sidebar.toggle_sidebar(),
            Err(SidebarError::NotInitialized)
        ));
        assert!(matches!(
            sidebar.set_content("<p>x</p>"),
            Err(SidebarError::NotInitialized)
        ));
        assert!(!sidebar.is_open());
        assert!(!sidebar.is_toggle());
    }

    #[test]
    fn test_repeated_init_does_not_duplicate_listeners() {
        let page = full_page();
        let mut sidebar =
            SidebarController::new(SidebarOptions::default(), page.clone(), MemoryStore::new())
                .unwrap();
        sidebar.init().unwrap();
        assert_eq!(page.borrow().listeners().borrow().len(), 3);

        let toggle_btn = sidebar.sidebar_elements().unwrap().toggle_btn;
        let dispatch = sidebar.dispatch(PageEvent::click(toggle_btn)).unwrap();
        assert_eq!(dispatch.handled, 1);
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let out_of_range = SidebarOptions {
            default_width: 900.0,
            ..Default::default()
        };
        let result = SidebarController::new(out_of_range, full_page(), MemoryStore::new());
        assert!(matches!(result, Err(SidebarError::Validation(_))));

        let inverted = SidebarOptions {
            min_width: 500.0,
            max_width: 400.0,
            default_width: 450.0,
            auto_create: false,
            ..Default::default()
        };
        let page = full_page();
        let result = SidebarController::new(inverted, page.clone(), MemoryStore::new());
        assert!(matches!(result, Err(SidebarError::Validation(_))));
        assert!(page.borrow().property(CONTENT_WIDTH_VAR).is_none());
    }

    #[test]
    fn test_reinit_during_drag_restores_selection() {
        let page = full_page();
        let mut sidebar =
            SidebarController::new(SidebarOptions::default(), page.clone(), MemoryStore::new())
                .unwrap();
        sidebar.open().unwrap();
        let resizer = sidebar.sidebar_elements().unwrap().resizer;
        sidebar
            .dispatch(PageEvent::mouse_down(resizer, 800.0))
            .unwrap();
        assert!(sidebar.is_resizing());

        sidebar.init().unwrap();
        assert!(!sidebar.is_resizing());
        let page = page.borrow();
        assert!(!page.element(page.body()).has_class(class::NO_SELECT));
        assert_eq!(page.listener_count(Target::Document, EventKind::MouseMove), 0);
        assert_eq!(page.listener_count(Target::Document, EventKind::MouseUp), 0);
    }

    #[test]
    fn test_unbound_event_is_ignored() {
        let page = full_page();
        let mut sidebar =
            SidebarController::new(SidebarOptions::default(), page.clone(), MemoryStore::new())
                .unwrap();
        let container = sidebar.sidebar_elements().unwrap().container;
        let dispatch = sidebar.dispatch(PageEvent::click(container)).unwrap();
        assert_eq!(dispatch, Dispatch::default());
    }
}

use crate::{
    chrome::NavbarStyle,
    error::{require, ControllerError},
    hover::{
        lift_badge, pulse_icon, PULSE_KEYFRAMES, PULSE_STYLE_ID, SKILL_CARD_SELECTOR,
        SKILL_ICON_SELECTOR, TECH_BADGE_SELECTOR,
    },
    motion::{start_typing, OrbAnimation, ORB_SELECTOR, SUBTITLE_SELECTOR},
    navigation::{active_section, fragment_selector, highlight, NavLink, SectionBounds},
    preview::{
        reset_scale, PreviewFrame, PreviewResizer, LEAVE_RESET, PREVIEW_CARD_SELECTOR,
        PREVIEW_OBSERVER, PREVIEW_SELECTOR,
    },
    reveal::{
        ObserverOptions, RevealCard, RevealSection, CARD_OBSERVER, CARD_SELECTOR,
        SECTION_OBSERVER, SECTION_SELECTOR,
    },
    schedule::{BrowserFrames, BrowserScheduler},
    signal::{Signal, Subscription},
    theme::{LocalThemeStore, ThemeState, ThemeView},
};
use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Array;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

const THEME_TOGGLE_SELECTOR: &str = "#themeToggle";
const THEME_ICON_SELECTOR: &str = ".theme-icon";
const NAVBAR_SELECTOR: &str = ".navbar";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const TRACKED_SECTION_SELECTOR: &str = "section[id]";

const CONSOLE_BANNER: [(&str, &str); 4] = [
    (
        "%c🔐 Security Portfolio",
        "color: #0a84ff; font-size: 24px; font-weight: bold; text-shadow: 0 2px 10px rgba(10, 132, 255, 0.5);",
    ),
    (
        "%cWelcome, fellow security enthusiast!",
        "color: #fff; font-size: 14px; padding: 8px 0;",
    ),
    (
        "%cBuilt with Rust, WebAssembly and lots of care ✨",
        "color: #a0a0b0; font-size: 12px; font-style: italic;",
    ),
    (
        "%c\n[Hint] Check the network tab to see how efficiently this portfolio loads! 🚀",
        "color: #64b5ff; font-size: 11px;",
    ),
];

/// Every listener, observer and animation the page behaviors own. Dropping
/// the controller tears all of them down.
pub(crate) struct Controller {
    subscriptions: Vec<Subscription>,
    listeners: Vec<EventListener>,
    load_listeners: Rc<RefCell<Vec<EventListener>>>,
    observers: Vec<VisibilityObserver>,
    orb: Option<OrbAnimation<BrowserFrames, HtmlElement>>,
}

impl Controller {
    pub(crate) fn install() -> Result<Self, ControllerError> {
        let window = web_sys::window().ok_or(ControllerError::NoWindow)?;
        let document = window.document().ok_or(ControllerError::NoDocument)?;

        let root = require(
            document
                .document_element()
                .and_then(|element| element.dyn_into::<HtmlElement>().ok()),
            "html",
        )?;
        let toggle = require(query(&document, THEME_TOGGLE_SELECTOR), THEME_TOGGLE_SELECTOR)?;
        let icon = require(query(&document, THEME_ICON_SELECTOR), THEME_ICON_SELECTOR)?;
        let navbar = require(query(&document, NAVBAR_SELECTOR), NAVBAR_SELECTOR)?;
        let theme = Rc::new(ThemeState::load(LocalThemeStore::open(&window)?));

        let mut controller = Self {
            subscriptions: Vec::new(),
            listeners: Vec::new(),
            load_listeners: Rc::new(RefCell::new(Vec::new())),
            observers: Vec::new(),
            orb: None,
        };

        controller.install_theme(&theme, root, icon, &toggle);
        let scroll = controller.install_scroll(&window);
        controller.install_navbar(&theme, &scroll, navbar);
        controller.install_active_links(&document, &scroll);
        controller.install_anchors(&document);
        controller.install_reveals(&document)?;
        controller.install_hover(&document)?;
        controller.install_motion(&document);
        controller.install_previews(&window, &document)?;

        for (message, style) in CONSOLE_BANNER {
            gloo::console::log!(message, style);
        }

        Ok(controller)
    }

    fn install_theme(
        &mut self,
        theme: &Rc<ThemeState<LocalThemeStore>>,
        root: HtmlElement,
        icon: HtmlElement,
        toggle: &HtmlElement,
    ) {
        let view = ThemeView::new(root, icon);
        view.apply(theme.get());
        self.subscriptions
            .push(theme.subscribe(move |current| view.apply(current)));

        let theme = Rc::clone(theme);
        self.listeners.push(EventListener::new(toggle, "click", move |_| {
            theme.toggle();
        }));
    }

    fn install_scroll(&mut self, window: &Window) -> Signal<f64> {
        let scroll = Signal::new(window.scroll_y().unwrap_or(0.0));

        let signal = scroll.clone();
        let source = window.clone();
        self.listeners.push(EventListener::new(window, "scroll", move |_| {
            signal.set(source.scroll_y().unwrap_or(0.0));
        }));
        scroll
    }

    fn install_navbar(
        &mut self,
        theme: &Rc<ThemeState<LocalThemeStore>>,
        scroll: &Signal<f64>,
        navbar: HtmlElement,
    ) {
        {
            let theme = Rc::clone(theme);
            let navbar = navbar.clone();
            self.subscriptions.push(scroll.subscribe(move |scroll_y| {
                NavbarStyle::select(theme.get(), scroll_y).apply(&navbar);
            }));
        }

        let scroll = scroll.clone();
        self.subscriptions.push(theme.subscribe(move |current| {
            NavbarStyle::select(current, scroll.get()).apply(&navbar);
        }));
    }

    fn install_active_links(&mut self, document: &Document, scroll: &Signal<f64>) {
        let sections: Vec<(String, HtmlElement)> = query_all(document, TRACKED_SECTION_SELECTOR)
            .into_iter()
            .filter_map(|section| Some((section.get_attribute("id")?, section)))
            .collect();
        let links: Vec<NavLink<HtmlElement>> = query_all(document, NAV_LINK_SELECTOR)
            .into_iter()
            .map(|element| NavLink {
                href: element.get_attribute("href").unwrap_or_default(),
                element,
            })
            .collect();

        self.subscriptions.push(scroll.subscribe(move |scroll_y| {
            let bounds: Vec<SectionBounds> = sections
                .iter()
                .map(|(id, element)| SectionBounds {
                    id: id.clone(),
                    top: f64::from(element.offset_top()),
                    height: f64::from(element.offset_height()),
                })
                .collect();
            if let Some(section_id) = active_section(scroll_y, &bounds) {
                highlight(&links, section_id);
            }
        }));
    }

    fn install_anchors(&mut self, document: &Document) {
        for anchor in query_all(document, ANCHOR_SELECTOR) {
            let document = document.clone();
            let source = anchor.clone();
            self.listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let href = source.get_attribute("href").unwrap_or_default();
                    let Some(selector) = fragment_selector(&href) else {
                        return;
                    };
                    if let Ok(Some(target)) = document.query_selector(selector) {
                        scroll_to(&target);
                    }
                },
            ));
        }
    }

    fn install_reveals(&mut self, document: &Document) -> Result<(), ControllerError> {
        let cards: Rc<Vec<RevealCard<HtmlElement>>> = Rc::new(
            query_all(document, CARD_SELECTOR)
                .into_iter()
                .enumerate()
                .map(|(index, element)| RevealCard::prepare(element, index))
                .collect(),
        );
        let card_observer = {
            let cards = Rc::clone(&cards);
            VisibilityObserver::new(CARD_OBSERVER, move |target, is_intersecting| {
                if let Some(card) = cards.iter().find(|card| same_element(card.element(), target)) {
                    card.observe(is_intersecting);
                }
            })?
        };
        for card in cards.iter() {
            card_observer.observe(card.element());
        }
        self.observers.push(card_observer);

        let sections: Rc<Vec<RevealSection<HtmlElement>>> = Rc::new(
            query_all(document, SECTION_SELECTOR)
                .into_iter()
                .map(RevealSection::new)
                .collect(),
        );
        let section_observer = {
            let sections = Rc::clone(&sections);
            VisibilityObserver::new(SECTION_OBSERVER, move |target, is_intersecting| {
                if let Some(section) = sections
                    .iter()
                    .find(|section| same_element(section.element(), target))
                {
                    section.observe(is_intersecting);
                }
            })?
        };
        for section in sections.iter() {
            section_observer.observe(section.element());
        }
        self.observers.push(section_observer);
        Ok(())
    }

    fn install_hover(&mut self, document: &Document) -> Result<(), ControllerError> {
        inject_pulse_keyframes(document)?;

        for card in query_all(document, SKILL_CARD_SELECTOR) {
            for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
                let source = card.clone();
                self.listeners.push(EventListener::new(&card, event, move |_| {
                    if let Some(icon) = query_in(&source, SKILL_ICON_SELECTOR) {
                        pulse_icon(&icon, hovered);
                    }
                }));
            }
        }

        for badge in query_all(document, TECH_BADGE_SELECTOR) {
            for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
                let source = badge.clone();
                self.listeners.push(EventListener::new(&badge, event, move |_| {
                    lift_badge(&source, hovered);
                }));
            }
        }
        Ok(())
    }

    fn install_motion(&mut self, document: &Document) {
        if let Some(subtitle) = query(document, SUBTITLE_SELECTOR) {
            start_typing(&BrowserScheduler, subtitle);
        }
        self.orb = query(document, ORB_SELECTOR).map(|orb| OrbAnimation::start(BrowserFrames, orb));
    }

    fn install_previews(
        &mut self,
        window: &Window,
        document: &Document,
    ) -> Result<(), ControllerError> {
        let previews: Rc<Vec<PreviewFrame<HtmlElement>>> = Rc::new(
            query_all(document, PREVIEW_SELECTOR)
                .into_iter()
                .map(PreviewFrame::new)
                .collect(),
        );

        let observer = {
            let previews = Rc::clone(&previews);
            VisibilityObserver::new(PREVIEW_OBSERVER, move |target, is_intersecting| {
                if let Some(frame) = previews
                    .iter()
                    .find(|frame| same_element(frame.element(), target))
                {
                    frame.observe(is_intersecting);
                }
            })?
        };
        for frame in previews.iter() {
            observer.observe(frame.element());
        }
        self.observers.push(observer);

        let arm_pointer_lock = {
            let previews = Rc::clone(&previews);
            let slot = Rc::clone(&self.load_listeners);
            move || {
                let mut slot = slot.borrow_mut();
                for (index, frame) in previews.iter().enumerate() {
                    let frames = Rc::clone(&previews);
                    slot.push(EventListener::new(frame.element(), "load", move |_| {
                        frames[index].content_loaded();
                    }));
                }
            }
        };
        if still_parsing(document) {
            self.listeners.push(EventListener::once(
                document,
                "DOMContentLoaded",
                move |_| arm_pointer_lock(),
            ));
        } else {
            arm_pointer_lock();
        }

        let resizer = PreviewResizer::new(BrowserScheduler, Rc::clone(&previews));
        self.listeners.push(EventListener::new(window, "resize", move |_| {
            resizer.on_resize();
        }));

        for card in query_all(document, PREVIEW_CARD_SELECTOR) {
            let Some(preview) = query_in(&card, PREVIEW_SELECTOR) else {
                continue;
            };
            self.listeners.push(EventListener::new(&card, "mouseleave", move |_| {
                reset_scale(&preview, &BrowserScheduler, LEAVE_RESET);
            }));
        }
        Ok(())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        // The frame loop stops before any listener is removed.
        if let Some(orb) = self.orb.take() {
            orb.stop();
        }
    }
}

/// One `IntersectionObserver` plus the closure it calls back into.
struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    fn new(
        options: ObserverOptions,
        on_change: impl Fn(&Element, bool) + 'static,
    ) -> Result<Self, ControllerError> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    on_change(&entry.target(), entry.is_intersecting());
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|error| ControllerError::Browser {
                    api: "IntersectionObserver",
                    message: format!("{error:?}"),
                })?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn still_parsing(document: &Document) -> bool {
    document.ready_state() == "loading"
}

fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn query_in(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn same_element(element: &HtmlElement, target: &Element) -> bool {
    let element: &Element = element;
    element == target
}

fn scroll_to(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

fn inject_pulse_keyframes(document: &Document) -> Result<(), ControllerError> {
    if document.get_element_by_id(PULSE_STYLE_ID).is_some() {
        return Ok(());
    }
    let Some(head) = document.head() else {
        return Ok(());
    };

    let browser_error = |error: JsValue| ControllerError::Browser {
        api: "style injection",
        message: format!("{error:?}"),
    };
    let style = document.create_element("style").map_err(browser_error)?;
    style.set_id(PULSE_STYLE_ID);
    style.set_text_content(Some(PULSE_KEYFRAMES));
    head.append_child(&style).map_err(browser_error)?;
    Ok(())
}

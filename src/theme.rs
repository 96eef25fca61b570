use crate::{
    signal::{Signal, Subscription},
    surface::Surface,
};

pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Dark => "🌙",
            Self::Light => "☀️",
        }
    }
}

/// Where the selected theme name is persisted.
pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
}

/// The one owner of the current theme. Consumers read it through [`get`]
/// and learn about changes through [`subscribe`].
///
/// [`get`]: ThemeState::get
/// [`subscribe`]: ThemeState::subscribe
pub struct ThemeState<S: ThemeStore> {
    store: S,
    current: Signal<Theme>,
}

impl<S: ThemeStore> ThemeState<S> {
    /// Reads the persisted preference without writing anything back.
    /// Missing or unrecognised values resolve to [`Theme::Dark`].
    pub fn load(store: S) -> Self {
        let theme = store
            .load()
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default();

        Self {
            store,
            current: Signal::new(theme),
        }
    }

    pub fn get(&self) -> Theme {
        self.current.get()
    }

    pub fn set(&self, theme: Theme) {
        self.store.save(theme.as_str());
        self.current.set(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&self, subscriber: impl Fn(Theme) + 'static) -> Subscription {
        self.current.subscribe(subscriber)
    }
}

/// The root element attribute and the toggle's glyph.
pub struct ThemeView<E: Surface> {
    root: E,
    icon: E,
}

impl<E: Surface> ThemeView<E> {
    pub fn new(root: E, icon: E) -> Self {
        Self { root, icon }
    }

    pub fn apply(&self, theme: Theme) {
        self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        self.icon.set_text(theme.glyph());
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalThemeStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{ThemeStore, THEME_KEY};
    use crate::error::ControllerError;
    use web_sys::Storage;

    pub struct LocalThemeStore {
        storage: Storage,
    }

    impl LocalThemeStore {
        pub fn open(window: &web_sys::Window) -> Result<Self, ControllerError> {
            let storage = window
                .local_storage()
                .ok()
                .flatten()
                .ok_or(ControllerError::StorageUnavailable)?;
            Ok(Self { storage })
        }
    }

    impl ThemeStore for LocalThemeStore {
        fn load(&self) -> Option<String> {
            self.storage.get_item(THEME_KEY).ok().flatten()
        }

        fn save(&self, value: &str) {
            if self.storage.set_item(THEME_KEY, value).is_err() {
                gloo::console::warn!("theme: storage write failed", value);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{ThemeStore, THEME_KEY};
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    #[derive(Clone, Default)]
    pub(crate) struct MemoryStore {
        entries: Rc<RefCell<HashMap<String, String>>>,
        pub(crate) writes: Rc<RefCell<usize>>,
    }

    impl MemoryStore {
        pub(crate) fn with_theme(value: &str) -> Self {
            let store = Self::default();
            store
                .entries
                .borrow_mut()
                .insert(THEME_KEY.to_string(), value.to_string());
            store
        }

        pub(crate) fn stored(&self) -> Option<String> {
            self.entries.borrow().get(THEME_KEY).cloned()
        }
    }

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<String> {
            self.stored()
        }

        fn save(&self, value: &str) {
            *self.writes.borrow_mut() += 1;
            self.entries
                .borrow_mut()
                .insert(THEME_KEY.to_string(), value.to_string());
        }
    }
}

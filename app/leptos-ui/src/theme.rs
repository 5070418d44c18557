//! Theme preference: dark by default, persisted across reloads, applied as
//! a body class so plain CSS can restyle everything.

use leptos::prelude::*;

use crate::session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeState {
    pub theme: RwSignal<Theme>,
}

impl ThemeState {
    pub fn is_dark(&self) -> bool {
        self.theme.get() == Theme::Dark
    }

    pub fn toggle(&self) {
        let next = match self.theme.get_untracked() {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        session::set_theme(next.as_str());
        apply_body_class(next);
        self.theme.set(next);
    }
}

fn apply_body_class(theme: Theme) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let classes = body.class_list();
    match theme {
        Theme::Light => classes.add_1("light-mode").ok(),
        Theme::Dark => classes.remove_1("light-mode").ok(),
    };
}

/// Read the persisted preference and install the theme context. Dark unless
/// the user explicitly saved light.
pub fn provide_theme() {
    let theme = if session::theme().as_deref() == Some("light") {
        Theme::Light
    } else {
        Theme::Dark
    };
    apply_body_class(theme);
    provide_context(ThemeState {
        theme: RwSignal::new(theme),
    });
}

pub fn use_theme() -> ThemeState {
    expect_context::<ThemeState>()
}

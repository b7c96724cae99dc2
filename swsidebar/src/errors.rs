use egui::WidgetText;
use egui_toast::{Toast, ToastKind, ToastOptions};

#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    #[error("{0}")]
    Plain(String),
    #[error("Container element with id '{0}' not found")]
    ContainerNotFound(String),
    #[error("sidebar used before a successful init()")]
    NotInitialized,
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid sidebar options: {0}")]
    Validation(#[from] garde::Report),
}

pub fn error_toast<E: Into<WidgetText>>(err: E) -> Toast {
    Toast {
        text: err.into(),
        kind: ToastKind::Error,
        options: ToastOptions::default()
            .duration_in_seconds(5.0)
            .show_progress(true),
        ..Default::default()
    }
}

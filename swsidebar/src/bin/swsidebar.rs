#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use egui::ViewportBuilder;
use std::io::stdout;
use swsidebar::app::SwSidebar;
use swsidebar::consts::{OPTIONS_FILE, PKG_NAME};
use swsidebar::SidebarOptions;
use tracing::{error, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

fn init_log() {
    let env_filter = EnvFilter::new(format!("{PKG_NAME}=info"));
    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .with_line_number(true)
        .with_writer(stdout.with_max_level(Level::INFO));

    Registry::default()
        .with(env_filter)
        .with(formatting_layer)
        .init();
}

pub fn main() -> eframe::Result<()> {
    init_log();

    let sidebar_options = match SidebarOptions::load(OPTIONS_FILE) {
        Ok(options) => options,
        Err(err) => {
            error!("failed to load {OPTIONS_FILE}: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        centered: true,
        viewport: ViewportBuilder::default().with_min_inner_size((800.0, 500.0)),
        ..Default::default()
    };
    SwSidebar::start(options, sidebar_options)
}

// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Pagefields: a field overlay editor for document templates, built with Xilem

use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use xilem::core::fork;
use xilem::core::one_of::Either;
use xilem::{EventLoopBuilder, WidgetView, WindowView, Xilem, window};

mod components;
mod data;
mod editing;
mod file_watcher;
mod model;
mod page_fetcher;
mod settings;
mod theme;
mod views;

use data::AppState;
use views::{editor_tab, welcome};

/// Entry point for the Pagefields application
pub fn run(event_loop: EventLoopBuilder) -> Result<(), EventLoopError> {
    init_tracing();

    let mut initial_state = AppState::new();

    // Check for command-line argument (template directory)
    handle_command_line_args(&mut initial_state);

    let app = Xilem::new(initial_state, app_logic);
    app.run_in(event_loop)?;
    Ok(())
}

/// Initialize tracing (can be controlled via RUST_LOG env var).
/// Filter out noisy wgpu/naga shader compilation logs.
fn init_tracing() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in [
        "pagefields=info",
        "wgpu=warn",
        "naga=warn",
        "wgpu_core=warn",
        "wgpu_hal=warn",
    ] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {directive}: {e}"),
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Handle command-line arguments to open a template directory
fn handle_command_line_args(initial_state: &mut AppState) {
    let Some(arg) = std::env::args().nth(1) else {
        return;
    };

    let template_path = std::path::PathBuf::from(arg);

    // Validate that the path exists
    if template_path.is_dir() {
        tracing::info!("Opening template: {}", template_path.display());
        initial_state.load_template(template_path);
    } else {
        tracing::error!("Not a directory: {}", template_path.display());
        tracing::error!("Usage: pagefields [path/to/template]");
    }
}

/// Build the single-window UI (welcome screen or editor).
fn app_logic(state: &mut AppState) -> impl Iterator<Item = WindowView<AppState>> + use<> {
    let content = if state.has_template_loaded() {
        Either::A(editor_with_watcher(state))
    } else {
        Either::B(welcome(state))
    };
    let content = with_page_fetcher(state, content);

    let window_size = LogicalSize::new(1280.0, 900.0);
    let window_view = window(state.main_window_id, "Pagefields", content);
    let window_with_options = window_view.with_options(|options| {
        options
            .with_initial_inner_size(window_size)
            .on_close(|state: &mut AppState| state.running = false)
    });

    std::iter::once(window_with_options)
}

/// Run the page raster fetch task alongside `content` for the lifetime of
/// the window.
fn with_page_fetcher<V>(state: &AppState, content: V) -> impl WidgetView<AppState> + use<V>
where
    V: WidgetView<AppState>,
{
    let jobs = state.fetch_queue.receiver();

    fork(
        content,
        xilem::view::task_raw(
            move |proxy| {
                let jobs = jobs.clone();
                async move {
                    page_fetcher::run(proxy, jobs).await;
                }
            },
            |state: &mut AppState, loaded: page_fetcher::PageRasterLoaded| {
                state.page_raster_loaded(loaded);
            },
        ),
    )
}

/// Editor with a file watcher on the template's page images.
///
/// When page rasters are rewritten on disk (after a 1-second debounce),
/// their cached images are superseded and fetched again.
fn editor_with_watcher(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let pages_dir = state.template.as_ref().map(|template| template.pages_dir());
    let editor = editor_tab(state);

    fork(
        editor,
        xilem::view::task_raw(
            move |proxy| {
                let pages_dir = pages_dir.clone();
                async move {
                    if let Some(pages_dir) = pages_dir {
                        file_watcher::watch_pages(proxy, pages_dir).await;
                    }
                }
            },
            |state: &mut AppState, changed: file_watcher::PagesChanged| {
                state.pages_changed(changed);
            },
        ),
    )
}

// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! UI components for the Pagefields template editor

pub mod page_canvas;
pub mod properties_panel;
pub mod variable_palette;

// Re-export commonly used widget views and types
pub use page_canvas::page_canvas_view;
pub use properties_panel::properties_panel;
pub use variable_palette::variable_palette;

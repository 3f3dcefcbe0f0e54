// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod field_store;
pub mod hit_test;
pub mod interaction;
pub mod page_images;
pub mod page_surface;
pub mod properties;
pub mod scale;
pub mod session;

pub use interaction::Listener;
pub use page_images::{
    DirectoryRasterProvider, FetchRequest, PageImageCache, PageImageProvider, PageRaster,
    RasterError, RasterState,
};
pub use page_surface::VariableDragPayload;
pub use properties::{PanelContent, PropertyEdit};
pub use scale::RenderScale;
pub use session::EditSession;

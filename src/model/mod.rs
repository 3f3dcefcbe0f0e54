// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Template data model

pub mod catalog;
pub mod field;
pub mod field_id;
pub mod page;
pub mod template;

pub use catalog::{VariableCatalog, VariableEntry};
pub use field::{Alignment, Binding, BindingMode, Caption, Field, FieldGeometry, FontFamily};
pub use field_id::FieldId;
pub use page::PageDescriptor;
pub use template::Template;

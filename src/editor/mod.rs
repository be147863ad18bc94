// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor widget seam and per-panel decoration rendering.

pub mod diff;
pub mod renderer;
pub mod surface;

pub use diff::{diff_rows, DiffRow};
pub use renderer::{PanelRenderer, SCROLL_SETTLE_DELAY};
pub use surface::{Decoration, EditorSurface};

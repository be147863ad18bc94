// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A workspace holds exactly two editor panels (left/right); highlights and scroll
//! targets are the transient annotation state derived from assistant output.

pub mod highlight;
pub mod panel;
pub mod range;
pub mod workspace;

pub use highlight::{Highlight, ScrollTarget};
pub use panel::{PanelSide, ParsePanelSideError};
pub use range::LineRange;
pub use workspace::{EditorPanel, Workspace};

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Duet: a dual-pane code review workspace for the terminal.
//!
//! An assistant streams review replies that may embed reference tags like
//! `[[left|line 4-8]]`. The [`annotate`] module extracts those tags incrementally,
//! the [`editor`] module turns the resulting highlight state into per-panel
//! decorations and scroll reveals, and the [`tui`] module hosts the interactive
//! shell around both.

pub mod annotate;
pub mod chat;
pub mod editor;
pub mod model;
pub mod store;
pub mod tui;

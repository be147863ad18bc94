// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Duet CLI entrypoint.
//!
//! Runs the interactive dual-pane workspace TUI. Replies come from the built-in
//! scripted reviewer, which streams word-sized chunks with reference tags so the
//! highlight pipeline can be exercised offline.

use std::error::Error;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<workspace-dir>] [--durable-writes]\n  {program} [--workspace <dir>] [--durable-writes]\n  {program} --demo\n\nIf workspace-dir/--workspace is omitted, the current working directory is used.\n--demo runs against the built-in welcome workspace without persisting anything and\ncannot be combined with workspace-dir/--workspace.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    workspace_dir: Option<String>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--workspace" => {
                if options.workspace_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.workspace_dir = Some(dir);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.workspace_dir.is_some() {
                    return Err(());
                }
                options.workspace_dir = Some(arg);
            }
        }
    }

    if options.demo && options.workspace_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "duet".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let (workspace, workspace_folder) = if options.demo {
            (duet::model::Workspace::default(), None)
        } else {
            let dir = options.workspace_dir.unwrap_or_else(|| ".".to_owned());
            let folder = if options.durable_writes {
                duet::store::WorkspaceFolder::new(dir)
                    .with_durability(duet::store::WriteDurability::Durable)
            } else {
                duet::store::WorkspaceFolder::new(dir)
            };
            let workspace = folder.load_or_init_workspace()?;
            (workspace, Some(folder))
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            // The reviewer spawns its chunk pacer onto this runtime; the TUI itself
            // runs on a blocking thread so terminal polling never starves the timer.
            let service = Box::new(duet::chat::ScriptedReviewer::new(
                tokio::runtime::Handle::current(),
            ));

            let tui_join = tokio::task::spawn_blocking(move || {
                duet::tui::run(service, workspace, workspace_folder)
                    .map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("duet: {err}");
        std::process::exit(1);
    }
}

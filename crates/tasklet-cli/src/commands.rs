use std::io::Write;

use tasklet_core::{FilterMode, KeyValueStore, Session, TaskCollection, Theme, completed_count};
use tracing::{debug, info, instrument};

use crate::cli::{Command, ThemeAction};
use crate::render::{Renderer, short_id};

const MIN_FRAGMENT_LEN: usize = 4;

pub fn dispatch<S, W>(
    session: &mut Session<S>,
    renderer: &Renderer,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    debug!(?command, "dispatching command");

    match command {
        Command::Add { text } => cmd_add(session, &text.join(" "), out),
        Command::List { filter } => cmd_list(session, renderer, filter, out),
        Command::Toggle { id } => cmd_toggle(session, &id, out),
        Command::Delete { id } => cmd_delete(session, &id, out),
        Command::ClearCompleted => cmd_clear_completed(session, out),
        Command::Theme { action } => cmd_theme(session, renderer, action, out),
    }
}

/// Full id, or a fragment of at least four characters found in exactly
/// one id.
pub fn resolve_id(tasks: &TaskCollection, needle: &str) -> Option<String> {
    let needle = needle.trim();
    if tasks.contains(needle) {
        return Some(needle.to_string());
    }
    if needle.len() < MIN_FRAGMENT_LEN {
        return None;
    }

    let mut matches = tasks.iter().filter(|task| task.id.contains(needle));
    let first = matches.next()?;
    if matches.next().is_some() {
        debug!(needle, "ambiguous id fragment");
        return None;
    }
    Some(first.id.clone())
}

#[instrument(skip(session, out))]
fn cmd_add<S: KeyValueStore, W: Write>(session: &mut Session<S>, text: &str, out: &mut W) -> anyhow::Result<()> {
    if !session.add(text) {
        writeln!(out, "nothing to add")?;
        return Ok(());
    }

    if let Some(task) = session.tasks().as_slice().first() {
        info!(id = %task.id, "added task");
        writeln!(out, "Added {} {}", short_id(&task.id), task.text)?;
    }
    Ok(())
}

fn cmd_list<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    renderer: &Renderer,
    filter: FilterMode,
    out: &mut W,
) -> anyhow::Result<()> {
    session.set_filter(filter);
    renderer.write_list(out, &session.view())
}

#[instrument(skip(session, out))]
fn cmd_toggle<S: KeyValueStore, W: Write>(session: &mut Session<S>, needle: &str, out: &mut W) -> anyhow::Result<()> {
    let Some(id) = resolve_id(session.tasks(), needle) else {
        writeln!(out, "no matching task")?;
        return Ok(());
    };

    session.toggle(&id);
    if let Some(task) = session.tasks().get(&id) {
        let verb = if task.completed { "Completed" } else { "Reopened" };
        writeln!(out, "{verb} {} {}", short_id(&task.id), task.text)?;
    }
    Ok(())
}

#[instrument(skip(session, out))]
fn cmd_delete<S: KeyValueStore, W: Write>(session: &mut Session<S>, needle: &str, out: &mut W) -> anyhow::Result<()> {
    let Some(id) = resolve_id(session.tasks(), needle) else {
        writeln!(out, "no matching task")?;
        return Ok(());
    };

    let text = session.tasks().get(&id).map(|task| task.text.clone()).unwrap_or_default();
    session.delete(&id);
    writeln!(out, "Deleted {} {}", short_id(&id), text)?;
    Ok(())
}

#[instrument(skip(session, out))]
fn cmd_clear_completed<S: KeyValueStore, W: Write>(session: &mut Session<S>, out: &mut W) -> anyhow::Result<()> {
    let removed = completed_count(session.tasks());
    session.clear_completed();

    let noun = if removed == 1 { "task" } else { "tasks" };
    writeln!(out, "Cleared {removed} completed {noun}")?;
    Ok(())
}

fn cmd_theme<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    renderer: &Renderer,
    action: Option<ThemeAction>,
    out: &mut W,
) -> anyhow::Result<()> {
    match action {
        None => {}
        Some(ThemeAction::Light) => {
            session.set_theme(Theme::Light);
        }
        Some(ThemeAction::Dark) => {
            session.set_theme(Theme::Dark);
        }
        Some(ThemeAction::Toggle) => {
            session.toggle_theme();
        }
    }
    renderer.write_theme(out, session.theme())
}
